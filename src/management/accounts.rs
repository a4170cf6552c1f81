use std::sync::Arc;

use crate::{
    config,
    error::{PlaylistError, Result},
    management::storage::{KeyValueStore, StorageGateway},
    types::Account,
    utils,
};

/// Email to credential directory.
///
/// The directory is read in full from storage on every call and written back
/// in full on every change.
pub struct AccountDirectory<S: KeyValueStore> {
    storage: Arc<StorageGateway<S>>,
    hash_cost: u32,
}

impl<S: KeyValueStore> AccountDirectory<S> {
    pub fn new(storage: Arc<StorageGateway<S>>) -> Self {
        Self {
            storage,
            hash_cost: config::hash_cost(),
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Creates an account for `email`.
    ///
    /// Fails with `DuplicateEmail` when the email is taken (exact,
    /// case-sensitive match), in which case nothing is written. An unreadable
    /// directory fails with `Serde` and is left as it is.
    pub async fn register(&self, email: &str, password: &str) -> Result<Account> {
        if !utils::is_valid_email(email) {
            return Err(PlaylistError::InvalidEmail);
        }
        if !utils::is_valid_password(password) {
            return Err(PlaylistError::InvalidPassword);
        }

        let mut accounts = self.storage.load_accounts().await?;
        if accounts.iter().any(|a| a.email == email) {
            return Err(PlaylistError::DuplicateEmail);
        }

        let account = Account {
            id: utils::generate_id(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, self.hash_cost)?,
        };

        accounts.push(account.clone());
        self.storage.save_accounts(&accounts).await?;
        Ok(account)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        let accounts = self.storage.load_accounts_lenient().await?;
        let account = accounts
            .into_iter()
            .find(|a| a.email == email)
            .ok_or(PlaylistError::InvalidCredentials)?;

        // an unparseable stored hash is treated like a wrong password
        match bcrypt::verify(password, &account.password_hash) {
            Ok(true) => Ok(account),
            _ => Err(PlaylistError::InvalidCredentials),
        }
    }

    pub async fn find(&self, account_id: &str) -> Result<Option<Account>> {
        let accounts = self.storage.load_accounts_lenient().await?;
        Ok(accounts.into_iter().find(|a| a.id == account_id))
    }

    pub async fn exists(&self, account_id: &str) -> Result<bool> {
        Ok(self.find(account_id).await?.is_some())
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.storage.load_accounts().await
    }
}
