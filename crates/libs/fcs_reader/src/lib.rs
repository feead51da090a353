//! Reader for the header and TEXT segment of Flow Cytometry Standard (FCS)
//! container files.
//!
//! An FCS file starts with a fixed-width ASCII header: a version string
//! (`FCS2.0`, `FCS3.0`, `FCS3.1`), four spaces, and three pairs of
//! right-justified byte offsets (TEXT, DATA, ANALYSIS). The TEXT segment is a
//! delimited list of keyword/value pairs describing the acquisition; the
//! keywords this crate cares about are `$PAR` (parameter count), `$PnN`
//! (short parameter labels) and `$TOT` (total recorded events).
//!
//! Only metadata is read. The DATA segment is never touched, so reading a
//! multi-hundred-megabyte file stays cheap.

mod text;

pub use text::parse_text_segment;

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use thiserror::Error;

const HEADER_LEN: usize = 58;

#[derive(Debug, Error)]
pub enum FcsError {
    #[error("i/o error while reading FCS file: {0}")]
    Io(#[from] std::io::Error),

    #[error("file is too short to contain an FCS header")]
    TruncatedHeader,

    #[error("file does not start with an FCS version string")]
    NotAnFcsFile,

    #[error("invalid segment offset in header: {0:?}")]
    InvalidOffset(String),

    #[error("TEXT segment is empty or malformed")]
    MalformedText,

    #[error("required keyword {0} is missing from the TEXT segment")]
    MissingKeyword(String),

    #[error("keyword {keyword} has a non-numeric value {value:?}")]
    InvalidKeywordValue { keyword: String, value: String },
}

/// Metadata extracted from an FCS container.
#[derive(Debug, Clone)]
pub struct FcsMetadata {
    /// Version string from the header, e.g. `FCS3.1`.
    pub version: String,
    /// All TEXT segment keywords, keys uppercased.
    pub text: HashMap<String, String>,
    /// Short parameter labels (`$P1N` .. `$PnN`), in parameter order.
    pub pnn_labels: Vec<String>,
    /// Total number of recorded events (`$TOT`).
    pub event_count: u64,
}

/// Reads the header and TEXT segment of an FCS file.
///
/// # Errors
///
/// Returns an [`FcsError`] when the header is truncated or malformed, the
/// TEXT segment cannot be parsed, or a required keyword is absent.
pub fn read_metadata<R: Read + Seek>(reader: &mut R) -> Result<FcsMetadata, FcsError> {
    reader.seek(SeekFrom::Start(0))?;

    let mut header = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|_| FcsError::TruncatedHeader)?;

    if &header[0..3] != b"FCS" {
        return Err(FcsError::NotAnFcsFile);
    }
    let version = String::from_utf8_lossy(&header[0..6]).trim().to_string();

    let text_start = parse_offset(&header[10..18])?;
    let text_end = parse_offset(&header[18..26])?;
    if text_end <= text_start {
        return Err(FcsError::MalformedText);
    }

    // Offsets are inclusive on both ends.
    let text_len = (text_end - text_start + 1) as usize;
    let mut raw_text = vec![0u8; text_len];
    reader.seek(SeekFrom::Start(text_start))?;
    reader.read_exact(&mut raw_text)?;

    let text = parse_text_segment(&raw_text)?;

    let parameter_count: u32 = required_numeric(&text, "$PAR")?;
    let event_count: u64 = required_numeric(&text, "$TOT")?;

    let mut pnn_labels = Vec::with_capacity(parameter_count as usize);
    for n in 1..=parameter_count {
        let keyword = format!("$P{n}N");
        let label = text
            .get(&keyword)
            .ok_or(FcsError::MissingKeyword(keyword))?;
        pnn_labels.push(label.clone());
    }

    Ok(FcsMetadata {
        version,
        text,
        pnn_labels,
        event_count,
    })
}

fn parse_offset(field: &[u8]) -> Result<u64, FcsError> {
    let as_str = String::from_utf8_lossy(field);
    let trimmed = as_str.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| FcsError::InvalidOffset(trimmed.to_string()))
}

fn required_numeric<T: std::str::FromStr>(
    text: &HashMap<String, String>,
    keyword: &str,
) -> Result<T, FcsError> {
    let value = text
        .get(keyword)
        .ok_or_else(|| FcsError::MissingKeyword(keyword.to_string()))?;
    value
        .trim()
        .parse::<T>()
        .map_err(|_| FcsError::InvalidKeywordValue {
            keyword: keyword.to_string(),
            value: value.clone(),
        })
}
