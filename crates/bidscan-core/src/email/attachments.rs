use crate::email::message::{MessagePart, PartKind};

/// An attachment leaf found in a message's part tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub filename: String,
    pub attachment_id: String,
    pub mime_type: String,
    pub size: u64,
}

/// Collect every attachment leaf, depth first, in part order.
pub fn collect_attachments(part: &MessagePart) -> Vec<AttachmentRef> {
    let mut found = Vec::new();
    walk(part, &mut found);
    found
}

fn walk(part: &MessagePart, found: &mut Vec<AttachmentRef>) {
    match part.kind() {
        PartKind::Container(children) => {
            for child in children {
                walk(child, found);
            }
        }
        PartKind::Attachment {
            filename,
            attachment_id,
        } => found.push(AttachmentRef {
            filename: filename.to_string(),
            attachment_id: attachment_id.to_string(),
            mime_type: part.mime_type.clone(),
            size: part.body.size,
        }),
        PartKind::Other => {}
    }
}
