use bidscan_core::config::Config;
use bidscan_core::credentials::{CredentialStore, TokenSet};
use bidscan_core::error::BidscanError;
use std::path::Path;

pub fn import(config: &Config, account: &str, token_file: &Path) -> Result<(), BidscanError> {
    let content = std::fs::read_to_string(token_file)?;
    let tokens: TokenSet = serde_json::from_str(&content)?;

    let mut store = config.open_credentials()?;
    store.save(account, tokens)?;
    println!("Stored credentials for {account}");
    Ok(())
}

pub fn check(config: &Config) -> Result<(), BidscanError> {
    let store = config.open_credentials()?;
    let accounts = store.accounts()?;
    if accounts.is_empty() {
        println!("No authenticated accounts");
        return Ok(());
    }
    for account in accounts {
        println!("{account}");
    }
    Ok(())
}
