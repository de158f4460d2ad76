//! `/admin/manage/users` endpoints.
//!
//! Callers map the results into compute updates; nothing here touches `StateCtx`.

use thiserror::Error;

use crate::http::Client;
use crate::manage_users::{User, WhitelistStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsersApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("Failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

pub type ApiResult<T> = Result<T, UsersApiError>;

/// GET `/admin/manage/users`
pub async fn list_users(api_url: &str) -> ApiResult<Vec<User>> {
    let response = Client::get(format!("{api_url}/admin/manage/users"))
        .send()
        .await
        .map_err(|e| UsersApiError::Network(e.to_string()))?;

    if !response.is_success() {
        return Err(UsersApiError::Status(response.status));
    }

    response.json().map_err(|e| UsersApiError::Parse {
        what: "user list",
        message: e.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Accept,
    Decline,
}

impl PendingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }

    /// Whitelist status the user ends up with once the backend applied the action.
    pub fn resulting_status(self) -> WhitelistStatus {
        match self {
            Self::Accept => WhitelistStatus::Accepted,
            Self::Decline => WhitelistStatus::Declined,
        }
    }
}

/// POST `/admin/manage/users/pending/{id}/{accept|decline}`
pub async fn handle_pending(api_url: &str, user_id: &str, action: PendingAction) -> ApiResult<()> {
    let url = format!(
        "{api_url}/admin/manage/users/pending/{}/{}",
        urlencoding::encode(user_id),
        action.as_str()
    );

    let response = Client::post(url)
        .send()
        .await
        .map_err(|e| UsersApiError::Network(e.to_string()))?;

    if response.is_success() {
        Ok(())
    } else {
        Err(UsersApiError::Status(response.status))
    }
}
