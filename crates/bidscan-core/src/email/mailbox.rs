use std::path::{Path, PathBuf};

use tracing::debug;

use crate::credentials::{CredentialStore, TokenSet};
use crate::email::message::Message;
use crate::error::BidscanError;

/// Read access to a mailbox.
///
/// Every error returned here is a transport failure and aborts an ingestion batch.
pub trait Mailbox {
    /// Ids of messages matching `query`, in listing order, at most `max_results`.
    fn list(&self, query: &str, max_results: usize) -> Result<Vec<String>, BidscanError>;

    fn get(&self, message_id: &str) -> Result<Message, BidscanError>;

    /// Raw (decoded) bytes of one attachment.
    fn get_attachment(&self, message_id: &str, attachment_id: &str)
        -> Result<Vec<u8>, BidscanError>;
}

impl<M: Mailbox + ?Sized> Mailbox for &M {
    fn list(&self, query: &str, max_results: usize) -> Result<Vec<String>, BidscanError> {
        (**self).list(query, max_results)
    }

    fn get(&self, message_id: &str) -> Result<Message, BidscanError> {
        (**self).get(message_id)
    }

    fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Vec<u8>, BidscanError> {
        (**self).get_attachment(message_id, attachment_id)
    }
}

/// Opens an authenticated mailbox session for an account.
pub trait MailboxConnector {
    fn connect<'a>(
        &'a self,
        account: &str,
        tokens: TokenSet,
    ) -> Result<Box<dyn Mailbox + 'a>, BidscanError>;
}

/// Everything needed to reach one account's mailbox: its stored credentials
/// and a way to connect with them.
pub struct MailboxAccess<'a> {
    pub credentials: &'a dyn CredentialStore,
    pub connector: &'a dyn MailboxConnector,
    pub account: &'a str,
}

impl<'a> MailboxAccess<'a> {
    /// Connect with the account's stored tokens; `NotAuthenticated` if it has none.
    pub fn open(&self) -> Result<Box<dyn Mailbox + 'a>, BidscanError> {
        let tokens = self.credentials.require(self.account)?;
        debug!(account = self.account, "opening mailbox");
        self.connector.connect(self.account, tokens)
    }
}

/// A mailbox export on disk, opened on behalf of an authenticated account.
///
/// Layout: `<root>/<message_id>.json` holds the message; attachment bytes
/// live in `<root>/<message_id>/<attachment_id>`. Messages are listed in
/// file name order.
pub struct DirectoryMailbox {
    root: PathBuf,
    account: String,
    tokens: TokenSet,
}

impl DirectoryMailbox {
    pub fn new(root: impl Into<PathBuf>, account: &str, tokens: TokenSet) -> Self {
        DirectoryMailbox {
            root: root.into(),
            account: account.to_string(),
            tokens,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn scopes(&self) -> &[String] {
        &self.tokens.scopes
    }

    fn message_ids(&self) -> Result<Vec<String>, BidscanError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| transport(&self.root, e))?;
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| transport(&self.root, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    ids.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl Mailbox for DirectoryMailbox {
    fn list(&self, query: &str, max_results: usize) -> Result<Vec<String>, BidscanError> {
        let query = SubjectQuery::parse(query);
        let mut matched = Vec::new();
        for id in self.message_ids()? {
            if matched.len() >= max_results {
                break;
            }
            let message = self.get(&id)?;
            if query.matches(message.payload.header("subject").unwrap_or_default()) {
                matched.push(id);
            }
        }
        debug!(
            account = %self.account,
            root = %self.root.display(),
            matched = matched.len(),
            "listed messages"
        );
        Ok(matched)
    }

    fn get(&self, message_id: &str) -> Result<Message, BidscanError> {
        let path = self.root.join(format!("{message_id}.json"));
        let content = std::fs::read_to_string(&path).map_err(|e| transport(&path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| BidscanError::Mailbox(format!("invalid message {}: {e}", path.display())))
    }

    fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<Vec<u8>, BidscanError> {
        let path = self.root.join(message_id).join(attachment_id);
        std::fs::read(&path).map_err(|e| transport(&path, e))
    }
}

/// Connects accounts to mailbox exports under one directory.
pub struct DirectoryConnector {
    root: PathBuf,
}

impl DirectoryConnector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryConnector { root: root.into() }
    }
}

impl MailboxConnector for DirectoryConnector {
    fn connect<'a>(
        &'a self,
        account: &str,
        tokens: TokenSet,
    ) -> Result<Box<dyn Mailbox + 'a>, BidscanError> {
        if !self.root.is_dir() {
            return Err(BidscanError::Mailbox(format!(
                "{}: not a mailbox directory",
                self.root.display()
            )));
        }
        Ok(Box::new(DirectoryMailbox::new(&self.root, account, tokens)))
    }
}

fn transport(path: &Path, err: std::io::Error) -> BidscanError {
    BidscanError::Mailbox(format!("{}: {err}", path.display()))
}

/// Subset of the Gmail search syntax understood by [`DirectoryMailbox`].
///
/// Alternatives are separated by ` OR `; each alternative is a list of words
/// (optionally written `subject:(...)`) that must all appear in the subject,
/// case-insensitively. An empty query matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectQuery {
    alternatives: Vec<Vec<String>>,
}

impl SubjectQuery {
    pub fn parse(query: &str) -> Self {
        let alternatives = query
            .split(" OR ")
            .map(|alt| {
                alt.replace("subject:", " ")
                    .replace(|c: char| matches!(c, '(' | ')' | '"'), " ")
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();
        SubjectQuery { alternatives }
    }

    pub fn matches(&self, subject: &str) -> bool {
        if self.alternatives.is_empty() {
            return true;
        }
        let subject = subject.to_lowercase();
        self.alternatives
            .iter()
            .any(|words| words.iter().all(|w| subject.contains(w.as_str())))
    }
}
