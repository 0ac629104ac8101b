use bidscan_core::config::Config;
use bidscan_core::email::mailbox::{DirectoryConnector, MailboxAccess};
use bidscan_core::error::BidscanError;
use std::path::Path;

use crate::output;

pub fn run(
    config: &Config,
    mailbox_dir: &Path,
    account: &str,
    query: &str,
    max_results: usize,
    output_format: &str,
) -> Result<(), BidscanError> {
    let credentials = config.open_credentials()?;
    let connector = DirectoryConnector::new(mailbox_dir);
    let access = MailboxAccess {
        credentials: &credentials,
        connector: &connector,
        account,
    };

    let mut records = config.open_records()?;
    let blobs = config.open_blobs();
    let report =
        bidscan_core::ingest_candidates(&access, &mut records, &blobs, query, max_results)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => println!("{}", output::table::format_ingest(&report)),
    }
    Ok(())
}

pub fn email(
    config: &Config,
    mailbox_dir: &Path,
    account: &str,
    message_id: &str,
    output_format: &str,
) -> Result<(), BidscanError> {
    let credentials = config.open_credentials()?;
    let connector = DirectoryConnector::new(mailbox_dir);
    let access = MailboxAccess {
        credentials: &credentials,
        connector: &connector,
        account,
    };
    let details = bidscan_core::email_details(&access, message_id)?;

    match output_format {
        "json" => output::json::print(&details)?,
        _ => println!("{}", output::table::format_email(&details)),
    }
    Ok(())
}
