//! Resource ownership check
//!
//! Blog posts record their author id as a string snapshot. Mutation is
//! allowed only when that snapshot equals the canonical string form of
//! the authenticated user's id. The comparison is exact: a differently
//! formatted rendering of the same underlying id denies.

use crate::error::ApiError;
use uuid::Uuid;

/// Authorize a mutation of a resource against its recorded author
///
/// Pure comparison, no I/O. Fails closed: any mismatch is `Forbidden`.
pub fn ensure_author(resource_author_id: &str, user_id: Uuid) -> Result<(), ApiError> {
    if resource_author_id == user_id.to_string() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not have permission to modify this blog post".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rstest::rstest;

    #[test]
    fn test_author_is_allowed() {
        let user_id = Uuid::new_v4();
        assert!(ensure_author(&user_id.to_string(), user_id).is_ok());
    }

    #[test]
    fn test_other_user_is_denied() {
        let author = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let err = ensure_author(&author.to_string(), intruder).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case::uppercase(|s: String| s.to_uppercase())]
    #[case::braced(|s: String| format!("{{{}}}", s))]
    #[case::no_hyphens(|s: String| s.replace('-', ""))]
    #[case::padded(|s: String| format!(" {}", s))]
    fn test_same_id_in_other_representation_is_denied(#[case] mangle: fn(String) -> String) {
        // The snapshot and the canonical form encode the same uuid, but
        // the comparison is on the exact string and must deny.
        let user_id = Uuid::new_v4();
        let mangled = mangle(user_id.to_string());
        assert!(ensure_author(&mangled, user_id).is_err());
    }

    #[test]
    fn test_empty_author_id_is_denied() {
        assert!(ensure_author("", Uuid::new_v4()).is_err());
    }
}
