//! Built-in sample catalog. It seeds an empty store at startup and stands in
//! for the product list when the product actor cannot be reached.

use std::collections::BTreeMap;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, SupplierInfo};

fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn supplier(name: &str, contact: &str) -> Option<SupplierInfo> {
    Some(SupplierInfo {
        name: name.to_string(),
        contact: Some(contact.to_string()),
        email: None,
    })
}

pub fn sample_catalog() -> Vec<ProductCreate> {
    vec![
        ProductCreate {
            name: "Havells 32A MCB Single Pole".into(),
            category: "Electrical Goods".into(),
            description: "Miniature circuit breaker for residential and commercial protection.".into(),
            price: 285.0,
            mrp: Some(320.0),
            stock: 50,
            specifications: specs(&[("voltage", "240V AC"), ("amperage", "32A"), ("warranty", "2 Years")]),
            supplier: supplier("Havells India Ltd", "+91-8000-446677"),
            image_url: None,
        },
        ProductCreate {
            name: "Schneider Electric TPN MCCB 100A".into(),
            category: "Electrical Goods".into(),
            description: "Molded case circuit breaker with thermal magnetic protection.".into(),
            price: 4850.0,
            mrp: Some(5200.0),
            stock: 25,
            specifications: specs(&[("voltage", "415V AC"), ("amperage", "100A"), ("breakingCapacity", "36kA")]),
            supplier: supplier("Schneider Electric India", "+91-124-6736000"),
            image_url: None,
        },
        ProductCreate {
            name: "Legrand Arteor 6A 2-Way Switch".into(),
            category: "Switches & Sockets".into(),
            description: "Modular switch for modern homes.".into(),
            price: 165.0,
            mrp: Some(185.0),
            stock: 100,
            specifications: specs(&[("voltage", "250V AC"), ("amperage", "6A"), ("color", "White")]),
            supplier: supplier("Legrand India", "+91-22-6649-9000"),
            image_url: None,
        },
        ProductCreate {
            name: "Crompton Energion 1200mm Ceiling Fan".into(),
            category: "Fans".into(),
            description: "BLDC ceiling fan with remote control.".into(),
            price: 2499.0,
            mrp: Some(3199.0),
            stock: 40,
            specifications: specs(&[("sweep", "1200mm"), ("power", "35W"), ("warranty", "5 Years")]),
            supplier: supplier("Crompton Greaves", "+91-22-6167-8499"),
            image_url: None,
        },
        ProductCreate {
            name: "Philips 9W LED Bulb".into(),
            category: "Lighting".into(),
            description: "Cool daylight LED bulb, B22 base.".into(),
            price: 99.0,
            mrp: Some(130.0),
            stock: 300,
            specifications: specs(&[("power", "9W"), ("base", "B22"), ("colorTemperature", "6500K")]),
            supplier: supplier("Signify Innovations India", "+91-1800-102-2929"),
            image_url: None,
        },
        ProductCreate {
            name: "Polycab 1.5 sq mm FR PVC Wire 90m".into(),
            category: "Wires & Cables".into(),
            description: "Flame retardant copper house wire.".into(),
            price: 1350.0,
            mrp: Some(1599.0),
            stock: 60,
            specifications: specs(&[("size", "1.5 sq mm"), ("length", "90m"), ("conductor", "Copper")]),
            supplier: supplier("Polycab India Ltd", "+91-22-6735-1400"),
            image_url: None,
        },
    ]
}

/// The sample catalog as products with stable `sample_N` ids.
pub fn sample_products() -> Vec<Product> {
    sample_catalog()
        .into_iter()
        .enumerate()
        .filter_map(|(i, params)| Product::from_create_params(format!("sample_{}", i + 1), params).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_is_valid() {
        assert_eq!(sample_products().len(), sample_catalog().len());
        assert!(sample_products().iter().all(|p| p.stock > 0 && p.mrp >= p.price));
    }
}
