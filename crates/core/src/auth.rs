//! Caller identity as seen by the storefront engine.
//!
//! Resolved once per request (or per session) and passed explicitly to the
//! operations that gate on it.

use serde::Serialize;

/// Who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthContext {
    #[default]
    Anonymous,
    Authenticated { user_id: String, role: String },
}

impl AuthContext {
    pub fn authenticated(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self::Authenticated {
            user_id: user_id.into(),
            role: role.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
