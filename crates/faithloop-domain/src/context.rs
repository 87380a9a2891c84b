//! Request context - who a request runs for and what time it is
//!
//! Every component call receives a `RequestContext` explicitly. There is no
//! ambient "current user" anywhere in the workspace.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the user that owns entries and extractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Generate a fresh user id
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a user id from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid user id: {}", e))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request-scoped context passed into every pipeline call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// User the request acts on behalf of
    pub user_id: UserId,

    /// Wall-clock instant the request started at
    pub now: DateTime<Utc>,
}

impl RequestContext {
    /// Context for `user_id` at the current time
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            now: Utc::now(),
        }
    }

    /// Context pinned to a fixed instant (tests, replays)
    pub fn at(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self { user_id, now }
    }

    /// Calendar date of `now` in UTC
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_id_string_round_trip() {
        let id = UserId::new();
        let parsed = UserId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_context_today() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();
        let ctx = RequestContext::at(UserId::new(), now);
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }
}
