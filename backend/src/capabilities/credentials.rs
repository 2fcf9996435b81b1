use super::CredentialVerifier;
use crate::config::AppConfig;
use common::error::ValidationError;
use common::requests::Role;
use sha2::{Digest, Sha256};

const MIN_PASSWORD_LEN: usize = 4;

struct Account {
    username: String,
    password_sha256: String,
    role: Role,
}

/// Accounts taken from configuration, with passwords held as SHA-256 hex
/// digests. Password changes live in memory until the process exits.
pub struct ConfiguredCredentials {
    accounts: Vec<Account>,
}

pub fn digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

impl ConfiguredCredentials {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            accounts: vec![
                Account {
                    username: config.admin_username.clone(),
                    password_sha256: config.admin_password_sha256.clone(),
                    role: Role::Admin,
                },
                Account {
                    username: config.user_username.clone(),
                    password_sha256: config.user_password_sha256.clone(),
                    role: Role::User,
                },
            ],
        }
    }

    fn account(&self, username: &str, password: &str) -> Option<&Account> {
        let hashed = digest(password);
        self.accounts
            .iter()
            .find(|a| a.username == username && a.password_sha256 == hashed)
    }
}

impl CredentialVerifier for ConfiguredCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<Role> {
        self.account(username, password).map(|a| a.role)
    }

    fn change_password(
        &mut self,
        username: &str,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ValidationError> {
        if self.account(username, current).is_none() {
            return Err(ValidationError::InvalidCredentials);
        }
        if new != confirm {
            return Err(ValidationError::PasswordPolicy(
                "New passwords do not match".to_string(),
            ));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordPolicy(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        let hashed = digest(new);
        if let Some(account) = self.accounts.iter_mut().find(|a| a.username == username) {
            account.password_sha256 = hashed;
        }
        Ok(())
    }
}
