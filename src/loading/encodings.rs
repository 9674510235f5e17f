//! Supported text encodings for delimited loading.
//!
//! Labels are resolved through [`encoding_rs`], so any WHATWG encoding label works; the list
//! below is the reference menu a UI would offer.

use encoding_rs::Encoding;

use crate::error::{CleanError, CleanResult};

/// Reference list of encoding labels offered for delimited files.
pub const SUPPORTED_ENCODINGS: &[&str] = &[
    "utf-8",
    "utf-16le",
    "utf-16be",
    "windows-1250",
    "windows-1251",
    "windows-1252",
    "iso-8859-2",
    "iso-8859-7",
    "iso-8859-15",
    "koi8-r",
    "shift_jis",
    "euc-jp",
    "gbk",
    "big5",
    "euc-kr",
    "macintosh",
];

/// Returns the reference list of supported encoding labels.
pub fn supported_encodings() -> &'static [&'static str] {
    SUPPORTED_ENCODINGS
}

/// Resolve an encoding label (case-insensitive, per WHATWG) to an encoding.
pub fn resolve(label: &str) -> CleanResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| CleanError::UnknownEncoding {
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{resolve, supported_encodings};

    #[test]
    fn every_listed_label_resolves() {
        for label in supported_encodings() {
            assert!(resolve(label).is_ok(), "label '{label}' did not resolve");
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = resolve("not-an-encoding").unwrap_err();
        assert!(err.to_string().contains("not-an-encoding"));
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert!(resolve("UTF-8").is_ok());
        assert!(resolve(" Windows-1252 ").is_ok());
    }
}
