//! Stored OAuth token sets for mailbox accounts.
//!
//! The store is a capability handed to whoever needs mailbox access; token
//! acquisition and refresh happen outside this crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::BidscanError;

/// OAuth token set for one mailbox account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

pub trait CredentialStore {
    fn load(&self, account: &str) -> Result<Option<TokenSet>, BidscanError>;

    fn save(&mut self, account: &str, tokens: TokenSet) -> Result<(), BidscanError>;

    /// Accounts with stored tokens, sorted.
    fn accounts(&self) -> Result<Vec<String>, BidscanError>;

    /// Load tokens for `account`, failing if it was never authenticated.
    fn require(&self, account: &str) -> Result<TokenSet, BidscanError> {
        self.load(account)?
            .ok_or_else(|| BidscanError::NotAuthenticated {
                account: account.to_string(),
            })
    }
}

/// Credential store kept in a JSON file keyed by account email.
pub struct JsonCredentialStore {
    path: PathBuf,
    accounts: BTreeMap<String, TokenSet>,
}

impl JsonCredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BidscanError> {
        let path = path.into();
        let accounts = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(JsonCredentialStore { path, accounts })
    }
}

impl CredentialStore for JsonCredentialStore {
    fn load(&self, account: &str) -> Result<Option<TokenSet>, BidscanError> {
        Ok(self.accounts.get(account).cloned())
    }

    fn save(&mut self, account: &str, tokens: TokenSet) -> Result<(), BidscanError> {
        self.accounts.insert(account.to_string(), tokens);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.accounts)?)?;
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<String>, BidscanError> {
        Ok(self.accounts.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenSet {
        TokenSet {
            token: "ya29.a0".into(),
            refresh_token: Some("1//0g".into()),
            token_uri: "https://oauth2.googleapis.com/token".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
            scopes: vec!["https://www.googleapis.com/auth/gmail.readonly".into()],
        }
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let mut store = JsonCredentialStore::open(&path).unwrap();
        store.save("estimating@example.com", tokens()).unwrap();

        let store = JsonCredentialStore::open(&path).unwrap();
        assert_eq!(store.accounts().unwrap(), vec!["estimating@example.com"]);
        assert_eq!(store.require("estimating@example.com").unwrap(), tokens());
    }

    #[test]
    fn test_unknown_account_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCredentialStore::open(dir.path().join("none.json")).unwrap();
        let err = store.require("nobody@example.com").unwrap_err();
        assert!(matches!(err, BidscanError::NotAuthenticated { .. }));
    }
}
