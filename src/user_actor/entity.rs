use chrono::Utc;

use super::error::UserError;
use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserUpdate};

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!("Invalid email: {email}"))),
    }
}

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type UpdateParams = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// # Errors
    /// Rejects a blank name or a malformed email address.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("Name required".to_string()));
        }
        validate_email(&params.email)?;

        Ok(Self {
            id,
            name: params.name,
            email: params.email.to_lowercase(),
            role: params.role,
            created_at: Utc::now(),
        })
    }

    /// Emails are unique, compared after lowercasing.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    /// Updates the user's profile information.
    fn on_update(&mut self, params: UserUpdate) -> Result<(), UserError> {
        if let Some(name) = params.name {
            if name.trim().is_empty() {
                return Err(UserError::ValidationError("Name required".to_string()));
            }
            self.name = name;
        }
        if let Some(email) = params.email {
            validate_email(&email)?;
            self.email = email.to_lowercase();
        }
        Ok(())
    }

    /// Currently, no custom actions are defined for users.
    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_email_is_normalised_and_validated() {
        let params = UserCreate {
            name: "Asha".into(),
            email: "Asha@Example.com".into(),
            role: Role::User,
        };
        let user = User::from_create_params("user_1".into(), params).unwrap();
        assert_eq!(user.email, "asha@example.com");

        let bad = UserCreate {
            name: "Asha".into(),
            email: "not-an-email".into(),
            role: Role::User,
        };
        assert!(matches!(
            User::from_create_params("user_2".into(), bad),
            Err(UserError::ValidationError(_))
        ));
    }
}
