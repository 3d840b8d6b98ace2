//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidInput(format!("invalid {label} id")))
}

/// NFC-normalize and trim a required text field; empty input is an error.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let normalized: String = value.nfc().collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// NFC-normalize and trim an optional text field; blank input becomes `None`.
pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.nfc().collect::<String>())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Monetary fields on entries must be >= 0; sign comes from the column.
pub(crate) fn require_non_negative(amount: i64, label: &str) -> ResultEngine<()> {
    if amount < 0 {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be negative"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_required_trims_and_rejects_empty() {
        assert_eq!(normalize_required("  Petty Cash ", "name").unwrap(), "Petty Cash");
        assert!(normalize_required("   ", "name").is_err());
    }

    #[test]
    fn normalize_optional_drops_blank() {
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(Some(" note ")), Some("note".to_string()));
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn parse_uuid_labels_errors() {
        let err = parse_uuid("nope", "account").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput("invalid account id".to_string())
        );
    }
}
