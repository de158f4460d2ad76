use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Owner,
    Admin,
    User,
}

impl Rank {
    /// Wire name, which is also what the table shows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WhitelistStatus {
    #[default]
    Accepted,
    Pending,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub rank: Rank,
    #[serde(default)]
    pub is_leo: bool,
    #[serde(default)]
    pub is_supervisor: bool,
    #[serde(default)]
    pub is_ems_fd: bool,
    #[serde(default)]
    pub is_dispatch: bool,
    #[serde(default)]
    pub whitelist_status: WhitelistStatus,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_pending(&self) -> bool {
        self.whitelist_status == WhitelistStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_user() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "cl0",
                "username": "john",
                "rank": "OWNER",
                "isLeo": true,
                "isSupervisor": false,
                "isEmsFd": true,
                "isDispatch": false,
                "whitelistStatus": "PENDING",
                "banned": false,
                "createdAt": "2022-01-05T10:00:00Z",
                "steamId": null
            }"#,
        )
        .unwrap();

        assert_eq!(user.rank, Rank::Owner);
        assert!(user.is_leo && user.is_ems_fd);
        assert!(user.is_pending());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn missing_flags_default_to_false_and_accepted() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","username":"jane","rank":"USER"}"#).unwrap();
        assert!(!user.is_dispatch);
        assert_eq!(user.whitelist_status, WhitelistStatus::Accepted);
    }
}
