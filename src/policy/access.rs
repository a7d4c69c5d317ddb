use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the role configuration file
#[derive(Error, Debug)]
pub enum PolicyConfigError {
    #[error("Failed to read role config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse role config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of an access check that did not pass
#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    /// No session identity attached to the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// The identity carries a role with no config entry
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// No pattern of the role matched the request
    #[error("Access denied for {key}")]
    Denied { key: String },
}

/// Per-role allow list entry in the config file
#[derive(Deserialize, Debug)]
struct RoleConfig {
    can_access: Vec<String>,
}

/// Maps a role name to the set of request patterns it may access.
///
/// A pattern is either the wildcard `*` (grants everything) or a string of
/// the form `METHOD:/path`, where a `*` inside the pattern matches any
/// substring at that position. Requests are canonicalized to `METHOD:path`
/// with the query string and any trailing slash stripped, and matching is
/// case-insensitive.
pub struct AccessPolicy {
    roles: HashMap<String, Vec<String>>,
}

impl AccessPolicy {
    /// Load the role configuration from a JSON file of the shape
    /// `{ "RoleName": { "can_access": ["GET:/api/lists*", ...] } }`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path_display = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| PolicyConfigError::Read {
            path: path_display.clone(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| PolicyConfigError::Parse {
            path: path_display,
            source,
        })
    }

    /// Parse the role configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: HashMap<String, RoleConfig> = serde_json::from_str(raw)?;
        Ok(Self {
            roles: parsed
                .into_iter()
                .map(|(role, config)| (role, config.can_access))
                .collect(),
        })
    }

    /// Decide whether `role` may perform `method` on `path`.
    ///
    /// Runs before any business logic on every protected operation. Denial
    /// distinguishes an unknown role from a plain pattern miss so the API
    /// layer can report them separately.
    pub fn check(&self, role: &str, method: &str, path: &str) -> Result<(), AccessError> {
        let patterns = self
            .roles
            .get(role)
            .ok_or_else(|| AccessError::UnknownRole(role.to_string()))?;

        let key = canonical_key(method, path);

        let allowed = patterns.iter().any(|pattern| {
            pattern == "*" || pattern_matches(pattern, &key)
        });

        if allowed {
            Ok(())
        } else {
            tracing::warn!(role = %role, key = %key, "access denied");
            Err(AccessError::Denied { key })
        }
    }
}

/// Build the canonical access key `METHOD:path`, dropping the query string
/// and any trailing slash, lowercased for case-insensitive matching.
fn canonical_key(method: &str, path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{}:{}", method, path).to_lowercase()
}

/// Match a single config pattern against a canonical key. Each `*` in the
/// pattern matches any substring at its position; the literal segments
/// between wildcards must appear in order.
fn pattern_matches(pattern: &str, key: &str) -> bool {
    let pattern = pattern.strip_suffix('/').unwrap_or(pattern).to_lowercase();
    let Some((prefix, rest)) = pattern.split_once('*') else {
        return key == pattern;
    };

    let Some(mut remainder) = key.strip_prefix(prefix) else {
        return false;
    };

    let mut segments = rest.split('*').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            // Last segment anchors the end of the key
            return remainder.ends_with(segment);
        }
        match remainder.find(segment) {
            Some(index) => remainder = &remainder[index + segment.len()..],
            None => return false,
        }
    }
    true
}
