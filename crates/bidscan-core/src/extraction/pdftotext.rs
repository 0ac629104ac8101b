use crate::error::BidscanError;
use crate::extraction::{PageText, PdfExtractor};
use crate::model::PositionedWord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Page text comes from plain `pdftotext` (reading order), or from
/// `pdftotext -layout` when layout mode is enabled. Word boxes come from
/// `pdftotext -bbox`.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: false }
    }

    /// Preserve the physical layout of each page (column alignment).
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, BidscanError> {
        let tmpfile = write_temp_pdf(pdf_bytes)?;
        let mut args = Vec::new();
        if self.layout {
            args.push("-layout");
        }
        let stdout = run_pdftotext(&args, tmpfile.path())?;
        let text = String::from_utf8_lossy(&stdout);
        Ok(split_pages(&text))
    }

    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PositionedWord>, BidscanError> {
        let tmpfile = write_temp_pdf(pdf_bytes)?;
        let stdout = run_pdftotext(&["-bbox"], tmpfile.path())?;
        parse_bbox_words(&String::from_utf8_lossy(&stdout))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn write_temp_pdf(pdf_bytes: &[u8]) -> Result<tempfile::NamedTempFile, BidscanError> {
    let mut tmpfile =
        tempfile::NamedTempFile::new().map_err(|e| BidscanError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| BidscanError::Extraction(e.to_string()))?;
    Ok(tmpfile)
}

fn run_pdftotext(args: &[&str], pdf_path: &Path) -> Result<Vec<u8>, BidscanError> {
    let output = Command::new("pdftotext")
        .args(args)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BidscanError::PdftotextNotFound
            } else {
                BidscanError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(BidscanError::PdftotextFailed { code, stderr });
    }

    Ok(output.stdout)
}

/// Split pdftotext output into pages.
///
/// pdftotext terminates every page with a form feed, so the piece after the
/// last form feed is not a page.
fn split_pages(text: &str) -> Vec<PageText> {
    let mut pieces: Vec<&str> = text.split('\x0c').collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageText {
            page_number: i + 1,
            text: page_text.to_string(),
        })
        .collect()
}

/// Parse the XHTML produced by `pdftotext -bbox` into positioned words.
fn parse_bbox_words(xml: &str) -> Result<Vec<PositionedWord>, BidscanError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut words = Vec::new();
    let mut page = 0usize;
    let mut current: Option<PositionedWord> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| BidscanError::Extraction(format!("invalid bbox output: {e}")))?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"page" => {
                page += 1;
            }
            Event::Start(e) if e.name().as_ref() == b"word" => {
                current = Some(word_from_tag(&e, page)?);
            }
            Event::Text(t) => {
                if let Some(word) = current.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| BidscanError::Extraction(e.to_string()))?;
                    word.text.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"word" => {
                if let Some(word) = current.take() {
                    if !word.text.trim().is_empty() {
                        words.push(word);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(words)
}

fn word_from_tag(tag: &BytesStart<'_>, page: usize) -> Result<PositionedWord, BidscanError> {
    let mut word = PositionedWord {
        text: String::new(),
        page,
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    for attr in tag.attributes() {
        let attr = attr.map_err(|e| BidscanError::Extraction(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| BidscanError::Extraction(e.to_string()))?;
        let parsed: f32 = match value.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"xMin" => word.x0 = parsed,
            b"yMin" => word.y0 = parsed,
            b"xMax" => word.x1 = parsed,
            b"yMax" => word.y1 = parsed,
            _ => {}
        }
    }

    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_form_feed() {
        let pages = split_pages("SECTION 09 91 23\nPainting\n\x0cPART 2\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "SECTION 09 91 23\nPainting\n");
        assert_eq!(pages[1].text, "PART 2\n");
    }

    #[test]
    fn test_split_pages_keeps_blank_page_in_middle() {
        let pages = split_pages("cover\x0c\x0cbody\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
    }

    #[test]
    fn test_parse_bbox_words() {
        let xml = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="Acrobat"/>
</head>
<body>
<doc>
  <page width="612.000000" height="792.000000">
    <word xMin="72.000000" yMin="84.100000" xMax="118.500000" yMax="96.300000">DIVISION</word>
    <word xMin="121.000000" yMin="84.100000" xMax="134.200000" yMax="96.300000">09</word>
  </page>
  <page width="612.000000" height="792.000000">
    <word xMin="72.000000" yMin="90.000000" xMax="130.000000" yMax="102.000000">Paint&amp;Coat</word>
  </page>
</doc>
</body>
</html>
"#;
        let words = parse_bbox_words(xml).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text, "DIVISION");
        assert_eq!(words[0].page, 1);
        assert_eq!(words[0].x0, 72.0);
        assert_eq!(words[0].y1, 96.3);
        assert_eq!(words[2].page, 2);
        assert_eq!(words[2].text, "Paint&Coat");
    }
}
