//! Header-row extraction from an uploaded delimited file.
//!
//! The backend owns authoritative parsing; this module is the wizard's
//! fail-fast gate, catching unsupported extensions, empty files, and
//! unparsable header rows before any bytes leave the machine.

use statreg_model::ImportFile;

use crate::error::{IngestError, Result};

/// Rejects files that do not carry the `.csv` extension, in any case.
pub fn check_extension(file: &ImportFile) -> Result<()> {
    if file.extension().as_deref() == Some("csv") {
        Ok(())
    } else {
        Err(IngestError::UnsupportedExtension {
            name: file.name.clone(),
        })
    }
}

/// Extracts the column names from the file's header row.
///
/// The first non-blank line is parsed as a comma-separated record with
/// double-quote escaping (embedded quotes doubled). A file with no
/// content, a header that is not valid UTF-8, or a dangling quote all
/// fail here.
pub fn read_header_row(bytes: &[u8]) -> Result<Vec<String>> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    let text = std::str::from_utf8(bytes).map_err(|_| IngestError::MalformedHeader {
        reason: "the file is not valid UTF-8".to_string(),
    })?;

    let line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or(IngestError::EmptyFile)?;

    let headers = parse_delimited_line(line)?;
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::MalformedHeader {
            reason: "the header row has no column names".to_string(),
        });
    }
    Ok(headers)
}

/// Parses one comma-separated line into trimmed fields.
///
/// A `"` opens a quoted section; inside it, `""` is a literal quote and
/// a lone `"` closes the section. A quote left open at end of line is an
/// error rather than a silently truncated field.
pub fn parse_delimited_line(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => in_quotes = true,
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(IngestError::MalformedHeader {
            reason: "unterminated quoted field".to_string(),
        });
    }

    fields.push(current.trim().to_string());
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        let ok = |name: &str| check_extension(&ImportFile::new(name, b"a".to_vec())).is_ok();
        assert!(ok("directors.csv"));
        assert!(ok("DIRECTORS.CSV"));
        assert!(!ok("directors.xlsx"));
        assert!(!ok("directors"));
    }

    #[test]
    fn reads_a_plain_header_row() {
        let headers = read_header_row(b"Title,First Name,Last Name\nMr,Sean,O'Brien\n").unwrap();
        assert_eq!(headers, vec!["Title", "First Name", "Last Name"]);
    }

    #[test]
    fn quoted_headers_keep_embedded_commas_and_quotes() {
        let headers =
            read_header_row(b"\"Address, Line 1\",\"Known \"\"Aliases\"\"\",Status").unwrap();
        assert_eq!(
            headers,
            vec!["Address, Line 1", "Known \"Aliases\"", "Status"]
        );
    }

    #[test]
    fn skips_leading_blank_lines() {
        let headers = read_header_row(b"\n\nTitle,Status\n").unwrap();
        assert_eq!(headers, vec!["Title", "Status"]);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(read_header_row(b""), Err(IngestError::EmptyFile)));
        assert!(matches!(
            read_header_row(b"\n  \n"),
            Err(IngestError::EmptyFile)
        ));
    }

    #[test]
    fn dangling_quote_is_rejected() {
        let err = read_header_row(b"\"Title,Status\n").unwrap_err();
        assert!(matches!(err, IngestError::MalformedHeader { .. }));
    }

    #[test]
    fn non_utf8_content_is_rejected() {
        let err = read_header_row(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, IngestError::MalformedHeader { .. }));
    }

    #[test]
    fn blank_header_names_are_rejected() {
        let err = read_header_row(b", ,\nrow\n").unwrap_err();
        assert!(matches!(err, IngestError::MalformedHeader { .. }));
    }
}
