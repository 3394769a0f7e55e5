use std::fmt;

use serde::Serialize;

use crate::errors::ApiError;

/// Cache key for a read: the request path, plus its serialized options when present.
///
/// `serde_json` orders object keys, so two logically identical option sets
/// always produce the same key. The path comes first so keys can be
/// invalidated by path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey(String);

impl RequestKey {
    pub fn path(path: &str) -> Self {
        Self(path.to_string())
    }

    pub fn with_options<O: Serialize>(path: &str, options: &O) -> Result<Self, ApiError> {
        let options = serde_json::to_value(options)?;
        let is_empty = match &options {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if is_empty {
            return Ok(Self::path(path));
        }
        Ok(Self(format!("{path}?{}", serde_json::to_string(&options)?)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestKey {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_order_does_not_change_key() {
        let a = RequestKey::with_options("/emails/logs", &json!({"limit": 50, "page": 2})).unwrap();
        let b = RequestKey::with_options("/emails/logs", &json!({"page": 2, "limit": 50})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), r#"/emails/logs?{"limit":50,"page":2}"#);
    }

    #[test]
    fn test_empty_options_collapse_to_path() {
        let key = RequestKey::with_options("/emails/logs", &json!({})).unwrap();
        assert_eq!(key, RequestKey::path("/emails/logs"));
    }

    #[test]
    fn test_prefix_match() {
        let key = RequestKey::with_options("/emails/logs", &json!({"limit": 1})).unwrap();
        assert!(key.starts_with("/emails"));
        assert!(!key.starts_with("/getAllContacts"));
    }
}
