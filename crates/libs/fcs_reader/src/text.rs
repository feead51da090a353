//! TEXT segment parsing.

use crate::FcsError;
use std::collections::HashMap;

/// Parses an FCS TEXT segment into a keyword map.
///
/// The first byte of the segment is the delimiter. Keywords and values
/// alternate, each terminated by the delimiter. A doubled delimiter inside a
/// value is an escape for a literal delimiter character. Keys are uppercased
/// so lookups do not depend on the writing software's casing.
///
/// # Errors
///
/// Returns [`FcsError::MalformedText`] when the segment is empty or contains
/// a dangling keyword with no value.
pub fn parse_text_segment(raw: &[u8]) -> Result<HashMap<String, String>, FcsError> {
    let (&delimiter, body) = raw.split_first().ok_or(FcsError::MalformedText)?;

    let mut tokens: Vec<Vec<u8>> = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let byte = body[i];
        if byte != delimiter {
            current.push(byte);
            i += 1;
        } else if body.get(i + 1) == Some(&delimiter) {
            // Doubled delimiter: a literal delimiter character inside the token.
            current.push(delimiter);
            i += 2;
        } else {
            tokens.push(std::mem::take(&mut current));
            i += 1;
        }
    }
    // A well-formed segment ends with a terminating delimiter; be lenient
    // about writers that drop it.
    if !current.is_empty() {
        tokens.push(current);
    }

    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return Err(FcsError::MalformedText);
    }

    let mut text = HashMap::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let key = String::from_utf8_lossy(&pair[0]).trim().to_uppercase();
        let value = String::from_utf8_lossy(&pair[1]).trim().to_string();
        text.insert(key, value);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pairs() {
        let text = parse_text_segment(b"/$PAR/2/$TOT/100/").unwrap();
        assert_eq!(text.get("$PAR").map(String::as_str), Some("2"));
        assert_eq!(text.get("$TOT").map(String::as_str), Some("100"));
    }

    #[test]
    fn uppercases_keys() {
        let text = parse_text_segment(b"/$tot/100/").unwrap();
        assert_eq!(text.get("$TOT").map(String::as_str), Some("100"));
    }

    #[test]
    fn supports_alternate_delimiters() {
        let text = parse_text_segment(b"\\$PAR\\1\\$P1N\\FSC-A\\").unwrap();
        assert_eq!(text.get("$P1N").map(String::as_str), Some("FSC-A"));
    }

    #[test]
    fn doubled_delimiter_escapes_a_literal() {
        let text = parse_text_segment(b"/$CYT/FACS//Calibur/").unwrap();
        assert_eq!(text.get("$CYT").map(String::as_str), Some("FACS/Calibur"));
    }

    #[test]
    fn escaped_delimiter_at_value_end() {
        let text = parse_text_segment(b"/$K1/v///$K2/w/").unwrap();
        assert_eq!(text.get("$K1").map(String::as_str), Some("v/"));
        assert_eq!(text.get("$K2").map(String::as_str), Some("w"));
    }

    #[test]
    fn tolerates_missing_trailing_delimiter() {
        let text = parse_text_segment(b"/$PAR/2/$TOT/100").unwrap();
        assert_eq!(text.get("$TOT").map(String::as_str), Some("100"));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(parse_text_segment(b"").is_err());
        assert!(parse_text_segment(b"/").is_err());
    }

    #[test]
    fn rejects_dangling_keyword() {
        assert!(parse_text_segment(b"/$PAR/2/$TOT/").is_err());
    }
}
