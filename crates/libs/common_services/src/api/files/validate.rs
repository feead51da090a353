use crate::api::files::error::FilesError;
use std::ffi::OsStr;
use std::path::Path;

/// Per-file upload size cap: 1000 MiB.
pub const MAX_UPLOAD_SIZE_BYTE: usize = 1000 * 1024 * 1024;

/// Validates one upload candidate before any storage write happens.
///
/// # Errors
///
/// * [`FilesError::NotAnFcsFile`] when the extension is not exactly `.fcs`
///   (case-sensitive).
/// * [`FilesError::FileTooLarge`] when the payload exceeds the size cap.
/// * [`FilesError::InvalidFilename`] when the name fails generic
///   cross-platform filename checks.
pub fn validate_upload(file_name: &str, size_byte: usize) -> Result<(), FilesError> {
    if Path::new(file_name).extension() != Some(OsStr::new("fcs")) {
        return Err(FilesError::NotAnFcsFile(file_name.to_string()));
    }
    if size_byte > MAX_UPLOAD_SIZE_BYTE {
        return Err(FilesError::FileTooLarge(file_name.to_string()));
    }
    if !filename_is_valid(file_name) {
        return Err(FilesError::InvalidFilename(file_name.to_string()));
    }
    Ok(())
}

/// Generic cross-platform filename validity: no path separators, no reserved
/// characters, no reserved device names, no traversal components.
#[must_use]
pub fn filename_is_valid(file_name: &str) -> bool {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return false;
    }
    if file_name == "." || file_name == ".." {
        return false;
    }
    // A name that sanitizing would alter is invalid as given.
    let sanitized = sanitize_filename::sanitize_with_options(
        file_name,
        sanitize_filename::Options {
            windows: true,
            truncate: true,
            replacement: "",
        },
    );
    sanitized == file_name
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_plain_fcs_file() {
        assert!(validate_upload("sample_01.fcs", 1024).is_ok());
    }

    #[test]
    fn rejects_wrong_extension_with_filename_in_error() {
        let err = validate_upload("data.txt", 10).unwrap_err();
        assert!(matches!(err, FilesError::NotAnFcsFile(name) if name == "data.txt"));
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        assert!(validate_upload("data.FCS", 10).is_err());
    }

    #[test]
    fn rejects_oversize_payload() {
        let err = validate_upload("big.fcs", MAX_UPLOAD_SIZE_BYTE + 1).unwrap_err();
        assert!(matches!(err, FilesError::FileTooLarge(_)));
    }

    #[test]
    fn size_cap_is_inclusive() {
        assert!(validate_upload("exact.fcs", MAX_UPLOAD_SIZE_BYTE).is_ok());
    }

    #[test]
    fn rejects_path_separators_and_traversal() {
        assert!(!filename_is_valid("../escape.fcs"));
        assert!(!filename_is_valid("dir/inner.fcs"));
        assert!(!filename_is_valid("dir\\inner.fcs"));
    }

    #[test]
    fn rejects_reserved_characters_and_device_names() {
        assert!(!filename_is_valid("que:stion.fcs"));
        assert!(!filename_is_valid("CON"));
        assert!(!filename_is_valid(""));
    }
}
