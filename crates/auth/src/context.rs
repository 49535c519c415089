//! Per-request execution context handed to the gate.

use std::collections::BTreeMap;

use crate::IdentityClaims;

/// Well-known metadata key holding the presented credential.
pub const AUTHORIZATION: &str = "authorization";

/// Header-like metadata attached to an inbound request.
///
/// Names are case-insensitive (stored lowercased); values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    entries: BTreeMap<String, String>,
}

impl RequestMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an entry.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder-style [`RequestMetadata::insert`].
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestMetadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

/// Mutable state owned by the request-handling layer for one request.
///
/// Never shared between requests. The gate's only side effect is setting
/// [`RequestContext::identity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    metadata: Option<RequestMetadata>,
    identity: Option<IdentityClaims>,
}

impl RequestContext {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            identity: None,
        }
    }

    /// A context whose transport supplied no metadata container at all.
    pub fn without_metadata() -> Self {
        Self::default()
    }

    /// Shorthand for a context carrying only an `authorization` entry.
    pub fn with_authorization(value: impl Into<String>) -> Self {
        Self::new(RequestMetadata::new().with(AUTHORIZATION, value))
    }

    pub fn metadata(&self) -> Option<&RequestMetadata> {
        self.metadata.as_ref()
    }

    /// Identity attached by a successful [`crate::CredentialGate::authorize`].
    pub fn identity(&self) -> Option<&IdentityClaims> {
        self.identity.as_ref()
    }

    pub(crate) fn attach_identity(&mut self, claims: IdentityClaims) {
        self.identity = Some(claims);
    }
}
