//! Query-parameter normalization shared by the read endpoints.
//!
//! Parameters arrive as raw strings. An empty value (`?year=`) means the
//! parameter is absent; a present but untypable value (`?year=abc`) is a
//! client error.

use std::str::FromStr;

use super::ApiError;

/// Row cap shared by both read endpoints.
pub const MAX_LIMIT: i64 = 200;

/// Parse an optional typed parameter, treating an empty value as absent.
pub fn parse_param<T: FromStr>(raw: Option<String>, message: &str) -> Result<Option<T>, ApiError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(message)),
    }
}

/// String equality filter: an empty value means no filter.
pub fn filter_param(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Row cap: absent falls back to `default`, anything present is clamped to
/// 1..=200.
pub fn clamp_limit(raw: Option<String>, default: i64) -> Result<i64, ApiError> {
    let limit = parse_param::<i64>(raw, "invalid limit")?.unwrap_or(default);
    Ok(limit.clamp(1, MAX_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_typed() {
        let year: Option<i64> = parse_param(Some("2013".to_string()), "invalid year").unwrap();
        assert_eq!(year, Some(2013));
    }

    #[test]
    fn test_parse_param_absent_and_empty() {
        let absent: Option<i64> = parse_param(None, "invalid year").unwrap();
        let empty: Option<i64> = parse_param(Some(String::new()), "invalid year").unwrap();
        assert_eq!(absent, None);
        assert_eq!(empty, None);
    }

    #[test]
    fn test_parse_param_untypable_is_bad_request() {
        let err = parse_param::<i64>(Some("abc".to_string()), "invalid year").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "invalid year"));
    }

    #[test]
    fn test_filter_param_empty_means_absent() {
        assert_eq!(filter_param(Some("PS4".to_string())), Some("PS4".to_string()));
        assert_eq!(filter_param(Some(String::new())), None);
        assert_eq!(filter_param(None), None);
    }

    #[test]
    fn test_clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 20).unwrap(), 20);
        assert_eq!(clamp_limit(Some("5".to_string()), 20).unwrap(), 5);
        assert_eq!(clamp_limit(Some("0".to_string()), 20).unwrap(), 1);
        assert_eq!(clamp_limit(Some("-3".to_string()), 20).unwrap(), 1);
        assert_eq!(clamp_limit(Some("1000".to_string()), 20).unwrap(), 200);
    }

    #[test]
    fn test_clamp_limit_untypable_is_bad_request() {
        let err = clamp_limit(Some("lots".to_string()), 20).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "invalid limit"));
    }
}
