//! # Resource IDs
//!
//! Two-part identifiers joined by [`RESOURCE_ID_SEPARATOR`]. The leading part may
//! be empty (for alternate contacts: the caller's own account); IDs written by
//! hand may leave it out along with the separator. The second part must not
//! contain the separator.

use crate::constants::RESOURCE_ID_SEPARATOR;
use crate::error::ResourceError;

/// Join two ID components
pub fn create_resource_id(first: &str, second: &str) -> String {
    [first, second].join(RESOURCE_ID_SEPARATOR)
}

/// Split an ID into its two components.
///
/// A single component means the first one was omitted and is returned empty.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidId`] when the ID has more than two components.
pub fn parse_resource_id(id: &str) -> Result<(String, String), ResourceError> {
    let parts: Vec<&str> = id.split(RESOURCE_ID_SEPARATOR).collect();

    match parts.as_slice() {
        [second] => Ok((String::new(), (*second).to_string())),
        [first, second] => Ok(((*first).to_string(), (*second).to_string())),
        _ => Err(ResourceError::InvalidId {
            id: id.to_string(),
            expected: format!("ContactType or AccountID{RESOURCE_ID_SEPARATOR}ContactType"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resource_id() {
        assert_eq!(create_resource_id("123456789012", "BILLING"), "123456789012/BILLING");
        assert_eq!(create_resource_id("", "SECURITY"), "/SECURITY");
    }

    #[test]
    fn test_parse_single_part() {
        let (account, contact_type) = parse_resource_id("x").unwrap();
        assert_eq!(account, "");
        assert_eq!(contact_type, "x");
    }

    #[test]
    fn test_parse_two_parts() {
        let (account, contact_type) = parse_resource_id("123456789012/OPERATIONS").unwrap();
        assert_eq!(account, "123456789012");
        assert_eq!(contact_type, "OPERATIONS");
    }

    #[test]
    fn test_parse_too_many_parts() {
        let err = parse_resource_id("a/b/c").unwrap_err();
        assert!(matches!(err, ResourceError::InvalidId { .. }));
        assert_eq!(
            err.to_string(),
            "unexpected format for ID (a/b/c), expected ContactType or AccountID/ContactType"
        );
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            ("", "BILLING"),
            ("123456789012", "SECURITY"),
            ("210987654321", "OPERATIONS"),
        ];
        for (first, second) in cases {
            let id = create_resource_id(first, second);
            assert_eq!(
                parse_resource_id(&id).unwrap(),
                (first.to_string(), second.to_string()),
                "round trip of {id}"
            );
        }
    }
}
