pub mod attachments;
pub mod due_date;
pub mod mailbox;
pub mod message;
pub mod sender;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::doctype::{classify_attachment, is_pdf_file, mime_type_for};
use crate::error::BidscanError;
use crate::model::{NewDocument, NewProject};
use crate::store::blob::BlobStore;
use crate::store::RecordStore;
use attachments::collect_attachments;
use due_date::extract_due_date;
use mailbox::{Mailbox, MailboxAccess};
use message::Message;
use sender::{format_sender, parse_sender};

/// Default mailbox search for bid invitations.
pub const DEFAULT_QUERY: &str =
    "subject:(bid invitation) OR subject:(request for proposal) OR subject:(RFP)";

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Synthetic marker stored on a project to remember which message created it.
pub fn message_marker(message_id: &str) -> String {
    format!("Gmail-{message_id}")
}

/// A PDF attachment fetched from the mailbox.
#[derive(Debug, Clone)]
pub struct PdfAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Everything pulled out of one bid invitation email.
#[derive(Debug, Clone)]
pub struct EmailBidCandidate {
    pub message_id: String,
    pub subject: String,
    pub sender_name: String,
    pub sender_email: String,
    pub body: String,
    pub bid_due_date: Option<NaiveDate>,
    pub attachments: Vec<PdfAttachment>,
}

impl EmailBidCandidate {
    /// Parse headers, body, due date and fetch the PDF attachments of a message.
    ///
    /// Content problems fall back to defaults; only mailbox failures are errors.
    pub fn from_message(mailbox: &dyn Mailbox, message: &Message) -> Result<Self, BidscanError> {
        let payload = &message.payload;
        let subject = payload.header("subject").unwrap_or("No Subject").to_string();
        let (sender_name, sender_email) = parse_sender(payload.header("from").unwrap_or_default());
        let body = payload.plain_body();
        let bid_due_date = extract_due_date(&body, &subject);

        let mut attachments = Vec::new();
        for attachment in collect_attachments(payload) {
            if !is_pdf_file(&attachment.filename) {
                debug!(filename = %attachment.filename, "skipping non-PDF attachment");
                continue;
            }
            let bytes = mailbox.get_attachment(&message.id, &attachment.attachment_id)?;
            attachments.push(PdfAttachment {
                filename: attachment.filename,
                bytes,
            });
        }

        Ok(EmailBidCandidate {
            message_id: message.id.clone(),
            subject,
            sender_name,
            sender_email,
            body,
            bid_due_date,
            attachments,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProjectSummary {
    pub id: u64,
    pub name: String,
    pub bid_due_date: Option<NaiveDate>,
    pub sender: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub message: String,
    pub processed_count: usize,
    pub new_projects: Vec<NewProjectSummary>,
}

/// Turn matching messages of an authenticated account into projects with
/// their PDF documents.
///
/// Fails with `NotAuthenticated` before touching the mailbox when the account
/// has no stored credentials.
pub fn ingest_candidates(
    access: &MailboxAccess<'_>,
    records: &mut dyn RecordStore,
    blobs: &dyn BlobStore,
    query: &str,
    max_results: usize,
) -> Result<IngestReport, BidscanError> {
    let mailbox = access.open()?;
    ingest_from_mailbox(mailbox.as_ref(), records, blobs, query, max_results)
}

/// Ingest from an already opened mailbox.
///
/// Messages already converted (by synthetic marker) are skipped. A mailbox
/// error aborts the batch; projects committed before it are kept.
pub fn ingest_from_mailbox(
    mailbox: &dyn Mailbox,
    records: &mut dyn RecordStore,
    blobs: &dyn BlobStore,
    query: &str,
    max_results: usize,
) -> Result<IngestReport, BidscanError> {
    let message_ids = mailbox.list(query, max_results)?;
    if message_ids.is_empty() {
        return Ok(IngestReport {
            message: "No new bid invitations found".into(),
            processed_count: 0,
            new_projects: Vec::new(),
        });
    }

    let mut new_projects = Vec::new();
    for message_id in &message_ids {
        let marker = message_marker(message_id);
        if records.find_project_by_marker(&marker)?.is_some() {
            debug!(message_id = %message_id, "already ingested");
            continue;
        }

        let message = mailbox.get(message_id)?;
        let candidate = EmailBidCandidate::from_message(mailbox, &message)?;
        new_projects.push(persist_candidate(records, blobs, candidate, marker)?);
    }

    Ok(IngestReport {
        message: format!("Processed {} new bid invitations", new_projects.len()),
        processed_count: new_projects.len(),
        new_projects,
    })
}

fn persist_candidate(
    records: &mut dyn RecordStore,
    blobs: &dyn BlobStore,
    candidate: EmailBidCandidate,
    marker: String,
) -> Result<NewProjectSummary, BidscanError> {
    let project = records.insert_project(NewProject {
        name: candidate.subject,
        bid_due_date: candidate.bid_due_date,
        sender_name: candidate.sender_name,
        sender_email: candidate.sender_email,
        email_subject: Some(marker),
        email_body: candidate.body,
    })?;

    for attachment in candidate.attachments {
        let file_path = blobs.save(project.id, &attachment.filename, &attachment.bytes)?;
        let filename = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| attachment.filename.clone());
        let document = records.insert_document(NewDocument {
            project_id: project.id,
            filename,
            mime_type: mime_type_for(&attachment.filename).to_string(),
            document_type: classify_attachment(&attachment.filename),
            file_size: attachment.bytes.len() as u64,
            original_filename: attachment.filename,
            file_path,
        })?;
        debug!(
            document_id = document.id,
            document_type = %document.document_type,
            "stored attachment"
        );
    }

    info!(
        project_id = project.id,
        message_id = %candidate.message_id,
        "created project from bid invitation"
    );

    Ok(NewProjectSummary {
        id: project.id,
        name: project.name,
        bid_due_date: project.bid_due_date,
        sender: format_sender(&project.sender_name, &project.sender_email),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentInfo {
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailDetails {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub to: String,
    pub date: String,
    pub body: String,
    pub attachments: Vec<AttachmentInfo>,
}

/// Headers, body and top-level attachment list of a single message of an
/// authenticated account.
pub fn email_details(
    access: &MailboxAccess<'_>,
    message_id: &str,
) -> Result<EmailDetails, BidscanError> {
    let mailbox = access.open()?;
    email_details_from_mailbox(mailbox.as_ref(), message_id)
}

pub fn email_details_from_mailbox(
    mailbox: &dyn Mailbox,
    message_id: &str,
) -> Result<EmailDetails, BidscanError> {
    let message = mailbox.get(message_id)?;
    let payload = &message.payload;
    let header = |name: &str| payload.header(name).unwrap_or_default().to_string();

    let attachments = payload
        .parts
        .iter()
        .flatten()
        .filter(|p| !p.filename.is_empty())
        .map(|p| AttachmentInfo {
            filename: p.filename.clone(),
            mime_type: p.mime_type.clone(),
            size: p.body.size,
        })
        .collect();

    Ok(EmailDetails {
        id: message_id.to_string(),
        subject: payload.header("subject").unwrap_or("No Subject").to_string(),
        from: header("from"),
        to: header("to"),
        date: header("date"),
        body: payload.plain_body(),
        attachments,
    })
}
