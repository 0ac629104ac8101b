use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::BidscanError;

/// A single word with its bounding box, as reported by the extraction backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    pub text: String,
    /// 1-based page number.
    pub page: usize,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Result of looking up a named section in a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionExtract {
    pub section_name: String,
    /// Either the located span or the "not found" sentinel message.
    pub text: String,
    pub found: bool,
}

impl SectionExtract {
    pub fn not_found(section_name: &str) -> Self {
        SectionExtract {
            section_name: section_name.to_string(),
            text: format!("Section '{section_name}' not found in the document."),
            found: false,
        }
    }
}

/// A number followed by a unit of measure, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityMention {
    pub value: String,
    pub unit: String,
}

impl QuantityMention {
    /// The value as a decimal, if it parses.
    pub fn numeric(&self) -> Option<Decimal> {
        Decimal::from_str(&self.value).ok()
    }
}

impl fmt::Display for QuantityMention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Quantities and materials mined from a block of text.
///
/// Quantities keep every match in document order. Materials are lower-cased
/// and deduplicated; callers must not rely on their order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiningResult {
    pub quantities: Vec<QuantityMention>,
    pub materials: BTreeSet<String>,
}

impl Serialize for MiningResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let quantities: Vec<String> = self.quantities.iter().map(|q| q.to_string()).collect();
        let mut s = serializer.serialize_struct("MiningResult", 2)?;
        s.serialize_field("quantities", &quantities)?;
        s.serialize_field("materials", &self.materials)?;
        s.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Plans,
    Specifications,
    Addendum,
    Contract,
    BidDocument,
    Other,
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Plans => "plans",
            DocumentType::Specifications => "specifications",
            DocumentType::Addendum => "addendum",
            DocumentType::Contract => "contract",
            DocumentType::BidDocument => "bid_document",
            DocumentType::Other => "other",
            DocumentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = BidscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plans" => Ok(DocumentType::Plans),
            "specifications" => Ok(DocumentType::Specifications),
            "addendum" => Ok(DocumentType::Addendum),
            "contract" => Ok(DocumentType::Contract),
            "bid_document" => Ok(DocumentType::BidDocument),
            "other" => Ok(DocumentType::Other),
            "unknown" => Ok(DocumentType::Unknown),
            _ => Err(BidscanError::InvalidDocumentType(s.to_string())),
        }
    }
}

/// A bid project, usually created from one inbound email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    pub bid_due_date: Option<NaiveDate>,
    pub sender_name: String,
    pub sender_email: String,
    /// Holds the synthetic marker for projects created from email.
    pub email_subject: Option<String>,
    #[serde(default)]
    pub email_body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub bid_due_date: Option<NaiveDate>,
    pub sender_name: String,
    pub sender_email: String,
    pub email_subject: Option<String>,
    pub email_body: String,
}

/// A stored file belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: u64,
    pub project_id: u64,
    pub filename: String,
    pub original_filename: String,
    pub file_path: PathBuf,
    pub file_size: u64,
    pub mime_type: String,
    pub document_type: DocumentType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub project_id: u64,
    pub filename: String,
    pub original_filename: String,
    pub file_path: PathBuf,
    pub file_size: u64,
    pub mime_type: String,
    pub document_type: DocumentType,
}

/// Document record fields plus a text sample and page count.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub text_sample: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentText {
    pub document_id: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionAnalysis {
    pub document_id: u64,
    pub section_name: String,
    pub text: String,
    pub analysis: MiningResult,
}

/// A located section together with what was mined from it.
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    #[serde(flatten)]
    pub section: SectionExtract,
    pub analysis: MiningResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: ProjectRecord,
    pub document_count: usize,
    pub document_counts: BTreeMap<DocumentType, usize>,
}
