use regex::Regex;
use std::sync::LazyLock;

static NAME_AND_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*<(.+@.+)>").unwrap());

/// Split a `From` header into (name, email).
///
/// `"Jane Doe <jane@x.com>"` gives both parts. Anything else is taken whole
/// as the address with an empty name.
pub fn parse_sender(from_header: &str) -> (String, String) {
    if from_header.is_empty() {
        return (String::new(), String::new());
    }
    match NAME_AND_ADDRESS.captures(from_header) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
        None => (String::new(), from_header.trim().to_string()),
    }
}

/// Display form used in summaries: `Name <email>`, or just the email.
pub fn format_sender(name: &str, email: &str) -> String {
    if name.is_empty() {
        email.to_string()
    } else {
        format!("{name} <{email}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_address() {
        let (name, email) = parse_sender("Jane Doe <jane@x.com>");
        assert_eq!(name, "Jane Doe");
        assert_eq!(email, "jane@x.com");
    }

    #[test]
    fn test_bare_address() {
        let (name, email) = parse_sender("jane@x.com");
        assert_eq!(name, "");
        assert_eq!(email, "jane@x.com");
    }

    #[test]
    fn test_address_only_in_brackets() {
        let (name, email) = parse_sender("<bids@acme-gc.com>");
        assert_eq!(name, "");
        assert_eq!(email, "bids@acme-gc.com");
    }

    #[test]
    fn test_bracket_without_at_sign_falls_back() {
        let (name, email) = parse_sender(" Estimating Dept <undisclosed> ");
        assert_eq!(name, "");
        assert_eq!(email, "Estimating Dept <undisclosed>");
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(parse_sender(""), (String::new(), String::new()));
    }

    #[test]
    fn test_format_sender() {
        assert_eq!(format_sender("Jane Doe", "jane@x.com"), "Jane Doe <jane@x.com>");
        assert_eq!(format_sender("", "jane@x.com"), "jane@x.com");
    }
}
