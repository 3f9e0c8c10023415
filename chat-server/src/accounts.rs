//! Registration and login for accounts mode.

use std::sync::Arc;

use chat_core::{ChatError, Identity};
use storage::ChatStore;
use tracing::{info, warn};

use crate::password::{hash_password, verify_password};
use crate::session::SessionSigner;

/// User accounts over a [`ChatStore`], plus the signer for their session cookies.
pub struct AccountService {
    store: Arc<dyn ChatStore>,
    signer: SessionSigner,
}

impl AccountService {
    pub fn new(store: Arc<dyn ChatStore>, signer: SessionSigner) -> Self {
        Self { store, signer }
    }

    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }

    /// Creates the user. Blank username or empty password is a client error; a taken username
    /// is a conflict.
    pub async fn register(&self, username: &str, password: &str) -> Result<Identity, ChatError> {
        let username = validate_credentials(username, password)?;
        let hash = hash_password(password)?;
        let user = self.store.create_user(username, &hash).await?;
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(Identity {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Checks credentials. Unknown user and wrong password are the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, ChatError> {
        let username = validate_credentials(username, password)?;
        let invalid = || ChatError::Auth("Invalid username or password".to_string());

        let user = match self.store.find_user_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username = %username, "login for unknown user");
                return Err(invalid());
            }
        };
        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "login with wrong password");
            return Err(invalid());
        }

        info!(user_id = user.id, "user logged in");
        Ok(Identity {
            user_id: user.id,
            username: user.username,
        })
    }
}

fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str, ChatError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ChatError::ClientInput(
            "Username and password are required".to_string(),
        ));
    }
    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryChatStore;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryChatStore::new()),
            SessionSigner::new("test-secret").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let accounts = service();
        let registered = accounts.register("  alice ", "pw").await.unwrap();
        assert_eq!(registered.username, "alice");

        let logged_in = accounts.login("alice", "pw").await.unwrap();
        assert_eq!(logged_in, registered);
    }

    #[tokio::test]
    async fn test_register_errors() {
        let accounts = service();
        assert_eq!(accounts.register("", "pw").await.unwrap_err().status_code(), 400);
        assert_eq!(accounts.register("bob", "").await.unwrap_err().status_code(), 400);

        accounts.register("bob", "pw").await.unwrap();
        assert_eq!(accounts.register("bob", "pw2").await.unwrap_err().status_code(), 409);
    }

    #[tokio::test]
    async fn test_login_errors_are_uniform() {
        let accounts = service();
        accounts.register("carol", "right").await.unwrap();

        let wrong = accounts.login("carol", "wrong").await.unwrap_err();
        let unknown = accounts.login("nobody", "right").await.unwrap_err();
        assert_eq!(wrong.status_code(), 401);
        assert_eq!(wrong.client_message(), unknown.client_message());
    }
}
