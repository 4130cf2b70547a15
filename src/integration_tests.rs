#[cfg(test)]
mod tests {
    use crate::actor_framework::FrameworkError;
    use crate::app_system::StoreSystem;
    use crate::cart_actor::CartAction;
    use crate::clients::{CartClient, NewReview, OrderClient, PlaceOrder, ProductClient, UserClient};
    use crate::config::{Config, Pricing};
    use crate::domain::{
        Cart, CustomerDetails, Order, OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus, Product,
        ProductCreate, Role, User, UserCreate,
    };
    use crate::mock_framework::{create_mock_client, expect_action, expect_batch, expect_create, expect_get};
    use crate::order_actor::OrderError;
    use crate::product_actor::{ProductAction, ProductActionResult, StockLine, StockSnapshot};
    use crate::review_actor::ReviewError;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            phone: "9000000000".into(),
            address: "12 MG Road".into(),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
            landmark: None,
        }
    }

    fn cod_request(user_id: &str, items: Vec<StockLine>) -> PlaceOrder {
        PlaceOrder {
            user_id: user_id.to_string(),
            items,
            customer: customer(),
            payment: PaymentDetails {
                method: PaymentMethod::Cod,
                payment_id: "cod_test".into(),
                gateway_order_id: None,
                signature: None,
            },
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
        }
    }

    fn test_user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: Role::User,
            created_at: chrono::Utc::now(),
        }
    }

    fn snapshot(stock: u32) -> ProductActionResult {
        ProductActionResult::StockLevel(StockSnapshot {
            product_id: "product_1".into(),
            name: "Ceiling Fan".into(),
            price: 2499.0,
            stock,
        })
    }

    async fn seeded(stock: u32) -> (StoreSystem, User, Product) {
        let system = StoreSystem::new(&Config::for_tests());
        let user = system
            .user_client
            .create_user(UserCreate {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                role: Role::User,
            })
            .await
            .unwrap();
        let product = system
            .product_client
            .create_product(ProductCreate {
                name: "Ceiling Fan".into(),
                category: "Fans".into(),
                description: "BLDC fan".into(),
                price: 2499.0,
                mrp: Some(3199.0),
                stock,
                specifications: Default::default(),
                supplier: None,
                image_url: None,
            })
            .await
            .unwrap();
        (system, user, product)
    }

    async fn stock_of(system: &StoreSystem, product_id: &str) -> u32 {
        system
            .product_client
            .get_product(product_id.to_string())
            .await
            .unwrap()
            .unwrap()
            .stock
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        // 1. Setup Mocks
        let (user_inner, mut user_rx) = create_mock_client::<User>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (cart_inner, mut cart_rx) = create_mock_client::<Cart>(10);

        let user_client = UserClient::new(user_inner);
        let product_client = ProductClient::new(product_inner);
        let cart_client = CartClient::new(cart_inner, product_client.clone());
        let order_client = OrderClient::new(order_inner, user_client, product_client, cart_client, Pricing::default());

        // 2. Place the order in the background
        let order_task = tokio::spawn(async move {
            order_client
                .place_order(cod_request("user_1", vec![StockLine::new("product_1", 2)]))
                .await
        });

        // 3. Verify Interactions

        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "user_1");
        responder.send(Ok(Some(test_user("user_1")))).unwrap();

        let (actions, responder) = expect_batch(&mut product_rx).await.expect("Expected stock check");
        assert!(matches!(actions.as_slice(), [(id, ProductAction::CheckStock)] if id == "product_1"));
        responder.send(Ok(vec![snapshot(5)])).unwrap();

        let (actions, responder) = expect_batch(&mut product_rx).await.expect("Expected stock reduction");
        assert!(matches!(actions.as_slice(), [(_, ProductAction::ReserveStock(2))]));
        responder.send(Ok(vec![ProductActionResult::Reserved { remaining: 3 }])).unwrap();

        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.items[0].name, "Ceiling Fan");
        assert_eq!(payload.summary.subtotal, 4998.0);
        assert_eq!(payload.summary.tax, 900.0);
        let created = Order {
            id: "order_1".into(),
            order_number: "COD-20250101-1".into(),
            user_id: payload.user_id,
            items: payload.items,
            customer: payload.customer,
            summary: payload.summary,
            status: payload.status,
            payment_status: payload.payment_status,
            payment: payload.payment,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        responder.send(Ok("order_1".to_string())).unwrap();

        let (order_id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, "order_1");
        responder.send(Ok(Some(created))).unwrap();

        let (cart_id, action, responder) = expect_action(&mut cart_rx).await.expect("Expected cart clear");
        assert_eq!(cart_id, "user_1");
        assert!(matches!(action, CartAction::Clear));
        responder.send(Err(FrameworkError::NotFound("user_1".into()))).unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.summary.total, 5898.0);
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_failed_order_creation_gives_stock_back() {
        let (user_inner, mut user_rx) = create_mock_client::<User>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (cart_inner, _cart_rx) = create_mock_client::<Cart>(10);

        let product_client = ProductClient::new(product_inner);
        let order_client = OrderClient::new(
            order_inner,
            UserClient::new(user_inner),
            product_client.clone(),
            CartClient::new(cart_inner, product_client),
            Pricing::default(),
        );

        let order_task = tokio::spawn(async move {
            order_client
                .place_order(cod_request("user_1", vec![StockLine::new("product_1", 2)]))
                .await
        });

        let (_, responder) = expect_get(&mut user_rx).await.unwrap();
        responder.send(Ok(Some(test_user("user_1")))).unwrap();
        let (_, responder) = expect_batch(&mut product_rx).await.unwrap();
        responder.send(Ok(vec![snapshot(5)])).unwrap();
        let (_, responder) = expect_batch(&mut product_rx).await.unwrap();
        responder.send(Ok(vec![ProductActionResult::Reserved { remaining: 3 }])).unwrap();

        let (_, responder) = expect_create(&mut order_rx).await.unwrap();
        responder
            .send(Err(FrameworkError::Entity(OrderError::ValidationError("rejected".into()))))
            .unwrap();

        let (actions, responder) = expect_batch(&mut product_rx).await.expect("Expected stock restore");
        assert!(matches!(actions.as_slice(), [(id, ProductAction::ReleaseStock(2))] if id == "product_1"));
        responder.send(Ok(vec![ProductActionResult::Released { stock: 5 }])).unwrap();

        assert_eq!(
            order_task.await.unwrap(),
            Err(OrderError::ValidationError("rejected".into()))
        );
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_for_last_unit() {
        let (system, user, product) = seeded(1).await;

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let orders = system.order_client.clone();
            let request = cod_request(&user.id, vec![StockLine::new(product.id.clone(), 1)]);
            tasks.push(tokio::spawn(async move { orders.place_order(request).await }));
        }

        let mut placed = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => placed += 1,
                Err(OrderError::InsufficientStock(items)) => assert_eq!(items[0].available, 0),
                Err(other) => panic!("Unexpected error: {other}"),
            }
        }

        assert_eq!(placed, 1);
        assert_eq!(stock_of(&system, &product.id).await, 0);
    }

    #[tokio::test]
    async fn test_cancel_restores_exactly_once() {
        let (system, user, product) = seeded(5).await;

        let order = system
            .order_client
            .place_order(cod_request(&user.id, vec![StockLine::new(product.id.clone(), 3)]))
            .await
            .unwrap();
        assert_eq!(stock_of(&system, &product.id).await, 2);

        let cancelled = system.order_client.cancel_order(&user, order.id.clone()).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(stock_of(&system, &product.id).await, 5);

        assert_eq!(
            system.order_client.cancel_order(&user, order.id.clone()).await,
            Err(OrderError::AlreadyCancelled)
        );
        assert_eq!(stock_of(&system, &product.id).await, 5);
    }

    #[tokio::test]
    async fn test_cancel_after_product_deleted_restores_the_rest() {
        let (system, user, fan) = seeded(5).await;
        let bulb = system
            .product_client
            .create_product(ProductCreate {
                name: "LED Bulb".into(),
                category: "Lighting".into(),
                description: "9W bulb".into(),
                price: 99.0,
                mrp: None,
                stock: 4,
                specifications: Default::default(),
                supplier: None,
                image_url: None,
            })
            .await
            .unwrap();

        let order = system
            .order_client
            .place_order(cod_request(
                &user.id,
                vec![StockLine::new(fan.id.clone(), 2), StockLine::new(bulb.id.clone(), 1)],
            ))
            .await
            .unwrap();
        assert_eq!(stock_of(&system, &fan.id).await, 3);

        system.product_client.delete_product(bulb.id.clone()).await.unwrap();

        let cancelled = system.order_client.cancel_order(&user, order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(stock_of(&system, &fan.id).await, 5);
        assert!(system.product_client.get_product(bulb.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_users_cannot_cancel() {
        let (system, user, product) = seeded(5).await;
        let order = system
            .order_client
            .place_order(cod_request(&user.id, vec![StockLine::new(product.id.clone(), 1)]))
            .await
            .unwrap();

        let stranger = test_user("user_99");
        assert_eq!(
            system.order_client.cancel_order(&stranger, order.id.clone()).await,
            Err(OrderError::NotFound(order.id))
        );
        assert_eq!(stock_of(&system, &product.id).await, 4);
    }

    #[tokio::test]
    async fn test_availability_check_reports_shortage() {
        let (system, user, product) = seeded(2).await;

        let report = system
            .product_client
            .check_stock_availability(&[StockLine::new(product.id.clone(), 3)])
            .await
            .unwrap();
        assert!(!report.is_available());
        assert_eq!(report.insufficient[0].available, 2);

        let err = system
            .order_client
            .place_order(cod_request(&user.id, vec![StockLine::new(product.id.clone(), 3)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(ref items) if items[0].name == "Ceiling Fan"));
        assert_eq!(stock_of(&system, &product.id).await, 2);
    }

    #[tokio::test]
    async fn test_admin_cancel_through_status_update() {
        let (system, user, product) = seeded(4).await;
        let order = system
            .order_client
            .place_order(cod_request(&user.id, vec![StockLine::new(product.id.clone(), 4)]))
            .await
            .unwrap();

        system
            .order_client
            .update_status(order.id.clone(), OrderStatus::Processing)
            .await
            .unwrap();
        let cancelled = system
            .order_client
            .update_status(order.id.clone(), OrderStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(stock_of(&system, &product.id).await, 4);

        let summary = system.order_client.sales_summary().await.unwrap();
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.by_status["cancelled"], 1);
        assert_eq!(summary.gross_revenue, 0.0);
        assert_eq!(summary.units_sold, 0);
    }

    #[tokio::test]
    async fn test_reviews_require_purchase_and_update_rating() {
        let (system, user, product) = seeded(5).await;
        let review = NewReview {
            product_id: product.id.clone(),
            rating: 4,
            title: None,
            comment: "Quiet and fast".into(),
        };

        assert_eq!(
            system.review_client.add_review(&user, review.clone()).await,
            Err(ReviewError::NotPurchased)
        );

        system
            .order_client
            .place_order(cod_request(&user.id, vec![StockLine::new(product.id.clone(), 1)]))
            .await
            .unwrap();

        let created = system.review_client.add_review(&user, review.clone()).await.unwrap();
        assert!(created.verified);
        assert_eq!(
            system.review_client.add_review(&user, review).await,
            Err(ReviewError::AlreadyReviewed)
        );

        let rated = system.product_client.get_product(product.id.clone()).await.unwrap().unwrap();
        assert_eq!(rated.review_count, 1);
        assert_eq!(rated.average_rating, 4.0);

        system.review_client.delete_review(&user, created.id).await.unwrap();
        let rated = system.product_client.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(rated.review_count, 0);
    }
}
