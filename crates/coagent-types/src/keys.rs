//! Signing-key material published by the platform.

use serde::{Deserialize, Serialize};

/// A single public signing key from the platform's key metadata endpoint.
///
/// Keys rotate over time; the entire set is replaced wholesale on each
/// non-cached fetch, never merged. Identity is `key_identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    /// PEM-encoded public key material.
    pub key: String,
    /// Opaque identifier the platform sends alongside each signed request.
    pub key_identifier: String,
    /// Whether this is the key currently used for new signatures.
    pub is_current: bool,
}

/// The most recently fetched key set plus its freshness token.
///
/// An empty `etag` means "no caching information available": the next fetch
/// is unconditional. When `etag` is non-empty, `keys` is exactly the set the
/// server last associated with that entity tag.
///
/// The cache is an explicit value: callers thread it through verification
/// calls and persist the returned copy across requests. There is no hidden
/// module-level cache, so concurrent verification of independent requests is
/// safe as long as each call site manages its own value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCache {
    /// Entity tag of the cached key set; empty when nothing is cached.
    pub etag: String,
    /// The cached signing keys, in the order the server returned them.
    pub keys: Vec<SigningKey>,
}

impl KeyCache {
    /// Returns the key matching `key_identifier`, if present.
    ///
    /// Key sets are single-digit small, so this is a linear scan.
    pub fn find(&self, key_identifier: &str) -> Option<&SigningKey> {
        self.keys.iter().find(|k| k.key_identifier == key_identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keys() -> Vec<SigningKey> {
        vec![
            SigningKey {
                key: "<pem 1>".into(),
                key_identifier: "key-1".into(),
                is_current: false,
            },
            SigningKey {
                key: "<pem 2>".into(),
                key_identifier: "key-2".into(),
                is_current: true,
            },
        ]
    }

    #[test]
    fn default_cache_is_empty() {
        let cache = KeyCache::default();
        assert!(cache.etag.is_empty());
        assert!(cache.keys.is_empty());
    }

    #[test]
    fn find_by_identifier() {
        let cache = KeyCache {
            etag: String::new(),
            keys: sample_keys(),
        };
        assert_eq!(cache.find("key-2").map(|k| k.key.as_str()), Some("<pem 2>"));
        assert!(cache.find("key-3").is_none());
    }

    #[test]
    fn signing_key_wire_names() {
        let json = r#"{"key":"<pem>","key_identifier":"abc","is_current":true}"#;
        let key: SigningKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.key_identifier, "abc");
        assert!(key.is_current);
        assert_eq!(serde_json::to_string(&key).unwrap(), json);
    }
}
