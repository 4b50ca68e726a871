//! Auth service: orchestrates hashing, store lookups and token issuance,
//! and passes sale CRUD through to the record store.
//!
//! Store failures are collapsed at this boundary: sign-up failures become
//! `NotAcceptable` and sign-in failures become `NotFound` regardless of the
//! underlying cause, so a caller cannot distinguish a wrong username from a
//! wrong password. Raw causes are logged only.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::error::{StoreError, StoreResult};
use tokio::time::timeout;
use tracing::warn;

use crate::error::AppError;
use crate::hash;
use crate::jwt::{TokenCodec, TokenError};
use crate::models::{Sale, User};
use crate::storage::{SaleStore, UserStore};

/// Fixed deadline applied to every storage call. No retries: an elapsed
/// deadline or a single failure is terminal for the request.
const STORE_DEADLINE: Duration = Duration::from_secs(3);

pub struct AuthService {
    users: Arc<dyn UserStore>,
    sales: Arc<dyn SaleStore>,
    tokens: TokenCodec,
}

async fn bounded<T, F>(operation: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>> + Send,
{
    match timeout(STORE_DEADLINE, operation).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout),
    }
}

fn map_store(err: StoreError) -> AppError {
    match err {
        StoreError::Missing => AppError::NotFound,
        other => AppError::Internal(other.to_string()),
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, sales: Arc<dyn SaleStore>) -> Self {
        AuthService {
            users,
            sales,
            tokens: TokenCodec::new(),
        }
    }

    fn issue(&self, subject_id: &str) -> Result<String, AppError> {
        self.tokens
            .issue(subject_id)
            .map_err(|err| AppError::Internal(err.to_string()))
    }

    /// Register a user and issue a token for the new id.
    ///
    /// `user.password_digest` arrives holding the plaintext password and is
    /// overwritten with its digest before the record leaves this function.
    pub async fn sign_up(&self, mut user: User) -> Result<String, AppError> {
        user.password_digest = hash::password_digest(&user.password_digest);

        let id = match bounded(self.users.create(&user)).await {
            Ok(id) => id,
            Err(err) => {
                warn!(username = %user.username, error = %err, "user creation rejected");
                return Err(AppError::NotAcceptable);
            }
        };

        self.issue(&id)
    }

    /// Exact (username, digest) lookup; issue a token for the found id
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<String, AppError> {
        let digest = hash::password_digest(password);

        let user = match bounded(self.users.find_by_credentials(username, &digest)).await {
            Ok(user) => user,
            Err(err) => {
                warn!(%username, error = %err, "sign-in lookup failed");
                return Err(AppError::NotFound);
            }
        };

        self.issue(&user.id)
    }

    /// Delegates to the token codec; its error is surfaced unchanged
    pub fn parse_token(&self, token: &str) -> Result<String, TokenError> {
        self.tokens.verify(token)
    }

    pub async fn create_sale(&self, sale: &Sale) -> Result<String, AppError> {
        bounded(self.sales.create(sale)).await.map_err(map_store)
    }

    pub async fn get_sale(&self, id: &str) -> Result<Sale, AppError> {
        bounded(self.sales.get_one(id)).await.map_err(map_store)
    }

    pub async fn get_all_sales(&self) -> Result<Vec<Sale>, AppError> {
        bounded(self.sales.get_all()).await.map_err(map_store)
    }

    /// Replace the sale identified by the path id; the body's own id is
    /// ignored
    pub async fn update_sale(&self, id: &str, mut sale: Sale) -> Result<(), AppError> {
        sale.id = id.to_string();
        bounded(self.sales.update(&sale)).await.map_err(map_store)
    }

    pub async fn delete_sale(&self, id: &str) -> Result<(), AppError> {
        bounded(self.sales.delete(id)).await.map_err(map_store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MemoryUsers {
        users: Mutex<Vec<User>>,
    }

    impl MemoryUsers {
        fn new() -> Self {
            MemoryUsers {
                users: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn create(&self, user: &User) -> StoreResult<String> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(StoreError::Rejected("username is taken".to_string()));
            }
            let mut stored = user.clone();
            stored.id = (users.len() + 1).to_string();
            let id = stored.id.clone();
            users.push(stored);
            Ok(id)
        }

        async fn find_by_credentials(
            &self,
            username: &str,
            password_digest: &str,
        ) -> StoreResult<UserProfile> {
            let users = self.users.lock().unwrap();
            users
                .iter()
                .find(|u| u.username == username && u.password_digest == password_digest)
                .map(|u| UserProfile {
                    id: u.id.clone(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                })
                .ok_or(StoreError::Missing)
        }
    }

    struct NoSales;

    #[async_trait]
    impl SaleStore for NoSales {
        async fn create(&self, _sale: &Sale) -> StoreResult<String> {
            Err(StoreError::Missing)
        }
        async fn get_one(&self, _id: &str) -> StoreResult<Sale> {
            Err(StoreError::Missing)
        }
        async fn get_all(&self) -> StoreResult<Vec<Sale>> {
            Err(StoreError::Missing)
        }
        async fn update(&self, _sale: &Sale) -> StoreResult<()> {
            Err(StoreError::Missing)
        }
        async fn delete(&self, _id: &str) -> StoreResult<()> {
            Err(StoreError::Missing)
        }
    }

    /// Never answers; used to exercise the storage deadline.
    struct StalledSales;

    #[async_trait]
    impl SaleStore for StalledSales {
        async fn create(&self, _sale: &Sale) -> StoreResult<String> {
            futures::future::pending().await
        }
        async fn get_one(&self, _id: &str) -> StoreResult<Sale> {
            futures::future::pending().await
        }
        async fn get_all(&self) -> StoreResult<Vec<Sale>> {
            futures::future::pending().await
        }
        async fn update(&self, _sale: &Sale) -> StoreResult<()> {
            futures::future::pending().await
        }
        async fn delete(&self, _id: &str) -> StoreResult<()> {
            futures::future::pending().await
        }
    }

    fn new_user(username: &str, password: &str) -> User {
        User {
            id: String::new(),
            username: username.to_string(),
            password_digest: password.to_string(),
            email: format!("{username}@test.com"),
        }
    }

    fn service_with(users: Arc<MemoryUsers>) -> AuthService {
        AuthService::new(users, Arc::new(NoSales))
    }

    #[tokio::test]
    async fn sign_up_stores_the_digest_not_the_plaintext() {
        let users = Arc::new(MemoryUsers::new());
        let service = service_with(users.clone());

        service.sign_up(new_user("anna", "secret")).await.unwrap();

        let stored = users.users.lock().unwrap();
        assert_eq!(stored[0].password_digest, hash::password_digest("secret"));
    }

    #[tokio::test]
    async fn sign_up_issues_a_token_for_the_new_id() {
        let service = service_with(Arc::new(MemoryUsers::new()));

        let token = service.sign_up(new_user("anna", "secret")).await.unwrap();

        assert_eq!(service.parse_token(&token).unwrap(), "1");
    }

    #[tokio::test]
    async fn duplicate_username_is_not_acceptable() {
        let service = service_with(Arc::new(MemoryUsers::new()));

        service.sign_up(new_user("anna", "secret")).await.unwrap();
        let second = service.sign_up(new_user("anna", "other")).await;

        assert!(matches!(second, Err(AppError::NotAcceptable)));
    }

    #[tokio::test]
    async fn sign_in_round_trips_through_the_digest() {
        let service = service_with(Arc::new(MemoryUsers::new()));
        service.sign_up(new_user("anna", "secret")).await.unwrap();

        let token = service.sign_in("anna", "secret").await.unwrap();

        assert_eq!(service.parse_token(&token).unwrap(), "1");
    }

    #[tokio::test]
    async fn wrong_password_is_indistinguishable_from_unknown_username() {
        let service = service_with(Arc::new(MemoryUsers::new()));
        service.sign_up(new_user("anna", "secret")).await.unwrap();

        let wrong_password = service.sign_in("anna", "nope").await;
        let unknown_user = service.sign_in("nobody", "secret").await;

        assert!(matches!(wrong_password, Err(AppError::NotFound)));
        assert!(matches!(unknown_user, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn missing_sale_maps_to_not_found() {
        let service = AuthService::new(Arc::new(MemoryUsers::new()), Arc::new(NoSales));

        let result = service.get_sale("64f000000000000000000000").await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_takes_the_id_from_the_path() {
        struct CapturingSales(Mutex<Option<Sale>>);

        #[async_trait]
        impl SaleStore for CapturingSales {
            async fn create(&self, _sale: &Sale) -> StoreResult<String> {
                unreachable!()
            }
            async fn get_one(&self, _id: &str) -> StoreResult<Sale> {
                unreachable!()
            }
            async fn get_all(&self) -> StoreResult<Vec<Sale>> {
                unreachable!()
            }
            async fn update(&self, sale: &Sale) -> StoreResult<()> {
                *self.0.lock().unwrap() = Some(sale.clone());
                Ok(())
            }
            async fn delete(&self, _id: &str) -> StoreResult<()> {
                unreachable!()
            }
        }

        let sales = Arc::new(CapturingSales(Mutex::new(None)));
        let service = AuthService::new(Arc::new(MemoryUsers::new()), sales.clone());

        let sale = Sale {
            id: "ignored".to_string(),
            article: "X".to_string(),
            price_for_one: 1.5,
            number_of_units: 2,
            amount: 3.0,
            date: "2024-01-01".to_string(),
            seller_id: "1".to_string(),
        };
        service.update_sale("42", sale).await.unwrap();

        assert_eq!(sales.0.lock().unwrap().as_ref().unwrap().id, "42");
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_store_call_hits_the_deadline() {
        let service = AuthService::new(Arc::new(MemoryUsers::new()), Arc::new(StalledSales));

        let result = service.get_all_sales().await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
