//! Session identity and uploaded artifact references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authenticated identity for one client run.
///
/// Obtained once from the auth endpoint and never refreshed or persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Server-side user identifier.
    pub user_id: String,
    access_token: String,
}

impl Session {
    /// Create a session from the values returned by authentication.
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Bearer token for authenticated requests.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

// Keep the token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Finite-element mesh to be morphed.
    Fem,
    /// Target surface the mesh is morphed onto.
    Surface,
}

impl ArtifactKind {
    /// Collection segment used in upload URLs.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Fem => "fems",
            Self::Surface => "surfaces",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fem => f.write_str("mesh"),
            Self::Surface => f.write_str("surface"),
        }
    }
}

/// Opaque server-issued identifier of an uploaded artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
