use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserUpdate};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Creates an account. The actor rejects an email that is already taken,
    /// compared case-insensitively.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(user_id = %id, "User created");
        self.get_user(id.clone()).await?.ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let users = self.inner.list().await?;
        Ok(users.into_iter().find(|user| user.email.eq_ignore_ascii_case(email)))
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::mock_framework::{create_mock_client, expect_list};
    use crate::user_actor;
    use chrono::Utc;

    fn signup(email: &str) -> UserCreate {
        UserCreate {
            name: "Asha".into(),
            email: email.into(),
            role: Role::default(),
        }
    }

    #[tokio::test]
    async fn test_concurrent_signups_with_one_email() {
        let (actor, client) = user_actor::new(16);
        tokio::spawn(actor.run());

        let attempts = ["asha@example.com", "ASHA@example.com", "Asha@Example.com", "asha@example.com"]
            .into_iter()
            .map(|email| {
                let client = client.clone();
                tokio::spawn(async move { client.create_user(signup(email)).await })
            })
            .collect::<Vec<_>>();

        let mut created = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(user) => {
                    assert_eq!(user.email, "asha@example.com");
                    created += 1;
                }
                Err(e) => assert_eq!(e, UserError::AlreadyExists("asha@example.com".into())),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(client.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_change_cannot_take_another_account() {
        let (actor, client) = user_actor::new(8);
        tokio::spawn(actor.run());

        client.create_user(signup("asha@example.com")).await.unwrap();
        let ravi = client.create_user(signup("ravi@example.com")).await.unwrap();

        let update = UserUpdate {
            email: Some("Asha@example.com".into()),
            ..UserUpdate::default()
        };
        assert_eq!(
            client.update_user(ravi.id.clone(), update).await,
            Err(UserError::AlreadyExists("asha@example.com".into()))
        );
        assert_eq!(client.get_user(ravi.id).await.unwrap().unwrap().email, "ravi@example.com");
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let (inner, mut receiver) = create_mock_client::<User>(4);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.find_by_email("ASHA@example.com").await });

        let respond_to = expect_list(&mut receiver).await.expect("expected list request");
        let existing = User {
            id: "user_1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: Role::default(),
            created_at: Utc::now(),
        };
        respond_to.send(Ok(vec![existing])).unwrap();

        let found = task.await.unwrap().unwrap();
        assert_eq!(found.map(|user| user.id), Some("user_1".to_string()));
    }
}
