use chrono::{DateTime, Utc};

/// Credential for the planning API. Only the keyed digest of the raw token
/// is stored.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    /// Unique label, e.g. the planner or device holding the token.
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
