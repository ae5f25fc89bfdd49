//! Mock accounts and the signed-in user.
//!
//! This is demo authentication with plain-text passwords and seeded accounts. It is not a
//! security boundary. The signed-in user is mirrored to the local store under
//! [`USER_STORE_KEY`], without the password.

use crate::constants::USER_STORE_KEY;
use crate::local_store::{load_json, save_json, LocalStore};
use crate::{HerbalError, HerbalResult};
use herbal_types::{EmailAddress, NonEmptyText};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Public view of an account, as stored under the user key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Clone, Debug)]
struct Account {
    user: User,
    password: String,
}

/// Registered accounts plus the current session.
#[derive(Clone, Debug)]
pub struct Accounts {
    accounts: Vec<Account>,
    current: Option<User>,
}

impl Default for Accounts {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Accounts {
    /// The two demo accounts, nobody signed in.
    pub fn seeded() -> Self {
        let account = |id: &str, email: &str, password: &str, role, name: &str| Account {
            user: User {
                id: id.to_string(),
                email: email.to_string(),
                role,
                name: name.to_string(),
            },
            password: password.to_string(),
        };

        Self {
            accounts: vec![
                account("1", "admin@herbalalchemy.com", "admin123", Role::Admin, "Admin Herbal"),
                account("2", "user@example.com", "user123", Role::User, "Pengguna Demo"),
            ],
            current: None,
        }
    }

    /// Seeded accounts with the session restored from `store`.
    pub fn restore(store: &mut dyn LocalStore) -> Self {
        let mut accounts = Self::seeded();
        accounts.current = load_json(store, USER_STORE_KEY);
        accounts
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Sign in with email and password. Emails compare case-insensitively.
    pub fn login(
        &mut self,
        store: &mut dyn LocalStore,
        email: &str,
        password: &str,
    ) -> HerbalResult<User> {
        let email = EmailAddress::parse(email).map_err(|_| HerbalError::InvalidCredentials)?;
        let user = self
            .accounts
            .iter()
            .find(|a| a.user.email == email.as_str() && a.password == password)
            .map(|a| a.user.clone())
            .ok_or_else(|| {
                tracing::warn!(email = %email, "login failed");
                HerbalError::InvalidCredentials
            })?;

        self.sign_in(store, user)
    }

    /// Create a user account and sign it in.
    ///
    /// # Errors
    ///
    /// * [`HerbalError::InvalidInput`] for a blank name, malformed email or short password.
    /// * [`HerbalError::EmailTaken`] if the email already has an account.
    pub fn register(
        &mut self,
        store: &mut dyn LocalStore,
        name: &str,
        email: &str,
        password: &str,
    ) -> HerbalResult<User> {
        let name = NonEmptyText::new(name)?;
        let email = EmailAddress::parse(email)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(HerbalError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        if self.accounts.iter().any(|a| a.user.email == email.as_str()) {
            return Err(HerbalError::EmailTaken);
        }

        let user = User {
            id: (self.accounts.len() + 1).to_string(),
            email: email.to_string(),
            role: Role::User,
            name: name.to_string(),
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        tracing::info!(id = %user.id, "account registered");

        self.sign_in(store, user)
    }

    pub fn logout(&mut self, store: &mut dyn LocalStore) -> HerbalResult<()> {
        store.remove(USER_STORE_KEY)?;
        self.current = None;
        Ok(())
    }

    fn sign_in(&mut self, store: &mut dyn LocalStore, user: User) -> HerbalResult<User> {
        save_json(store, USER_STORE_KEY, &user)?;
        self.current = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::MemoryStore;

    #[test]
    fn seeded_admin_can_log_in() {
        let mut store = MemoryStore::new();
        let mut accounts = Accounts::seeded();
        let user = accounts
            .login(&mut store, "Admin@HerbalAlchemy.com", "admin123")
            .expect("login");
        assert!(user.is_admin());
        assert_eq!(user.name, "Admin Herbal");
        assert_eq!(accounts.current(), Some(&user));

        let raw = store.get(USER_STORE_KEY).expect("get").expect("stored");
        assert!(!raw.contains("admin123"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let mut store = MemoryStore::new();
        let mut accounts = Accounts::seeded();
        assert!(matches!(
            accounts.login(&mut store, "user@example.com", "nope"),
            Err(HerbalError::InvalidCredentials)
        ));
        assert!(accounts.current().is_none());
    }

    #[test]
    fn register_assigns_next_id_and_signs_in() {
        let mut store = MemoryStore::new();
        let mut accounts = Accounts::seeded();
        let user = accounts
            .register(&mut store, "Budi", "budi@example.com", "rahasia")
            .expect("register");
        assert_eq!(user.id, "3");
        assert_eq!(user.role, Role::User);

        let restored = Accounts::restore(&mut store);
        assert_eq!(restored.current(), Some(&user));
    }

    #[test]
    fn register_rejects_existing_email_and_short_password() {
        let mut store = MemoryStore::new();
        let mut accounts = Accounts::seeded();
        assert!(matches!(
            accounts.register(&mut store, "X", "USER@example.com", "panjang123"),
            Err(HerbalError::EmailTaken)
        ));
        assert!(matches!(
            accounts.register(&mut store, "X", "x@example.com", "123"),
            Err(HerbalError::InvalidInput(_))
        ));
    }

    #[test]
    fn logout_clears_store() {
        let mut store = MemoryStore::new();
        let mut accounts = Accounts::seeded();
        accounts
            .login(&mut store, "user@example.com", "user123")
            .expect("login");
        accounts.logout(&mut store).expect("logout");
        assert!(accounts.current().is_none());
        assert_eq!(store.get(USER_STORE_KEY).expect("get"), None);
    }
}
