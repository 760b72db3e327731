//! BattleSpy report helpers.
//!
//! BattleSpy flags suspicious in-round behaviour as messages grouped into
//! per-round reports. Messages carry a numeric severity.

use crate::error::CoreError;

/// Maximum number of ids accepted by one bulk delete.
pub const MAX_BULK_DELETE: usize = 1_000;

/// Display badge for a message severity: `important` (3), `warning` (2),
/// `info` otherwise.
pub fn severity_badge(severity: i32) -> &'static str {
    match severity {
        3 => "important",
        2 => "warning",
        _ => "info",
    }
}

/// Validate a bulk-delete id list: non-empty and within [`MAX_BULK_DELETE`].
pub fn validate_id_list(ids: &[i64]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("ids must not be empty".to_string()));
    }
    if ids.len() > MAX_BULK_DELETE {
        return Err(CoreError::Validation(format!(
            "At most {MAX_BULK_DELETE} ids may be deleted at once (got {})",
            ids.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_follow_severity() {
        assert_eq!(severity_badge(3), "important");
        assert_eq!(severity_badge(2), "warning");
        assert_eq!(severity_badge(1), "info");
        assert_eq!(severity_badge(0), "info");
    }

    #[test]
    fn id_list_bounds() {
        assert!(validate_id_list(&[]).is_err());
        assert!(validate_id_list(&[1, 2]).is_ok());
        assert!(validate_id_list(&vec![1; MAX_BULK_DELETE + 1]).is_err());
    }
}
