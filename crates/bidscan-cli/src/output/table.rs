use bidscan_core::email::sender::format_sender;
use bidscan_core::email::{EmailDetails, IngestReport};
use bidscan_core::model::{MiningResult, ProjectSummary, SectionReport};

pub fn format_section_report(report: &SectionReport) -> String {
    let section = &report.section;
    if !section.found {
        return section.text.clone();
    }

    let mut out = format!("=== {} ===\n\n", section.section_name);
    for line in section.text.lines() {
        out.push_str(&format!("  {line}\n"));
    }
    out.push('\n');
    out.push_str(&format_mining(&report.analysis));
    out
}

pub fn format_mining(result: &MiningResult) -> String {
    let mut out = String::new();

    if result.quantities.is_empty() {
        out.push_str("Quantities: none\n");
    } else {
        out.push_str(&format!("Quantities ({}):\n", result.quantities.len()));
        for q in &result.quantities {
            out.push_str(&format!("  {q}\n"));
        }
    }

    if result.materials.is_empty() {
        out.push_str("Materials: none");
    } else {
        let materials: Vec<&str> = result.materials.iter().map(String::as_str).collect();
        out.push_str(&format!("Materials: {}", materials.join(", ")));
    }

    out
}

pub fn format_summary(summary: &ProjectSummary) -> String {
    let project = &summary.project;
    let due = project
        .bid_due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into());

    let mut out = format!("Project {}: {}\n", project.id, project.name);
    out.push_str(&format!("  Bid due:  {due}\n"));
    out.push_str(&format!(
        "  Sender:   {}\n",
        format_sender(&project.sender_name, &project.sender_email)
    ));
    out.push_str(&format!(
        "  Created:  {}\n",
        project.created_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("\n  Documents: {}", summary.document_count));

    let width = summary
        .document_counts
        .keys()
        .map(|t| t.as_str().len())
        .max()
        .unwrap_or(0);
    for (doc_type, count) in &summary.document_counts {
        out.push_str(&format!("\n    {:<width$}  {}", doc_type.as_str(), count));
    }

    out
}

pub fn format_ingest(report: &IngestReport) -> String {
    let mut out = report.message.clone();

    for project in &report.new_projects {
        let due = project
            .bid_due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no due date".into());
        out.push_str(&format!(
            "\n  #{}  {}  ({due})  from {}",
            project.id, project.name, project.sender
        ));
    }

    out
}

pub fn format_email(details: &EmailDetails) -> String {
    let mut out = format!("Subject: {}\n", details.subject);
    out.push_str(&format!("From:    {}\n", details.from));
    out.push_str(&format!("To:      {}\n", details.to));
    out.push_str(&format!("Date:    {}\n\n", details.date));
    out.push_str(details.body.trim_end());

    if !details.attachments.is_empty() {
        out.push_str("\n\nAttachments:");
        for a in &details.attachments {
            out.push_str(&format!(
                "\n  {}  {}  {} bytes",
                a.filename, a.mime_type, a.size
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidscan_core::model::ProjectRecord;
    use std::collections::BTreeMap;

    fn summary(sender_name: &str) -> ProjectSummary {
        let project: ProjectRecord = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "RFP - Library",
            "bid_due_date": null,
            "sender_name": sender_name,
            "sender_email": "gc@example.com",
            "email_subject": null,
            "email_body": "",
            "created_at": "2025-03-01T09:30:00Z",
            "updated_at": "2025-03-01T09:30:00Z"
        }))
        .unwrap();
        ProjectSummary {
            project,
            document_count: 0,
            document_counts: BTreeMap::new(),
        }
    }

    #[test]
    fn test_summary_sender_without_name() {
        let out = format_summary(&summary(""));
        assert!(out.contains("  Sender:   gc@example.com\n"));
        assert!(!out.contains(" <gc@example.com>"));
    }

    #[test]
    fn test_summary_sender_with_name() {
        let out = format_summary(&summary("Pat Lee"));
        assert!(out.contains("  Sender:   Pat Lee <gc@example.com>\n"));
        assert!(out.contains("  Bid due:  -\n"));
    }
}
