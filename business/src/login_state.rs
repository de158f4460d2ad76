//! Login form state and the username/password authentication flow.
//!
//! - `LoginInput` holds what the user typed; `validate_login` checks it.
//! - `LoginCommand` posts the credentials to `/auth/login` and publishes the outcome
//!   into `AuthCompute`, including the route to navigate to on success.

use std::any::Any;
use std::fmt;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use snaily_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Updater,
    assign_impl, no_deps, snapshot_clone,
};
use tokio_util::sync::CancellationToken;

use crate::i18n::{ERRORS, Messages};
use crate::{BusinessConfig, Route, http::Client};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 255;

#[derive(Default, Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Set once the user edited a field; inline errors stay hidden before that.
    pub touched: bool,
}

impl State for LoginInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("This field is required"),
            Self::TooShort { min } => write!(f, "Must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "Must be at most {max} characters"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginValidation {
    pub username: Option<FieldError>,
    pub password: Option<FieldError>,
}

impl LoginValidation {
    pub fn is_valid(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

fn check_length(value: &str, min: usize, max: usize) -> Option<FieldError> {
    match value.chars().count() {
        0 => Some(FieldError::Required),
        len if len < min => Some(FieldError::TooShort { min }),
        len if len > max => Some(FieldError::TooLong { max }),
        _ => None,
    }
}

pub fn validate_login(input: &LoginInput) -> LoginValidation {
    LoginValidation {
        username: check_length(&input.username, USERNAME_MIN_LEN, USERNAME_MAX_LEN),
        password: check_length(&input.password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub has_temp_password: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    NotAuthenticated,
    Submitting,
    /// Submission rejected before any request was made.
    Invalid(LoginValidation),
    Authenticated {
        user_id: Option<String>,
        redirect: Route,
    },
    Failed(String),
}

impl AuthStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            Self::Authenticated { redirect, .. } => Some(redirect),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Where a successful login goes next, if anywhere.
pub fn resolve_login(response: LoginResponse, password: &str) -> AuthStatus {
    if response.has_temp_password {
        AuthStatus::Authenticated {
            user_id: response.user_id,
            redirect: Route::TempPassword {
                password: password.to_owned(),
            },
        }
    } else if let Some(user_id) = response.user_id {
        AuthStatus::Authenticated {
            user_id: Some(user_id),
            redirect: Route::Citizen,
        }
    } else {
        AuthStatus::NotAuthenticated
    }
}

/// Cache of the login outcome, written by [`LoginCommand`].
#[derive(Default, Debug, Clone)]
pub struct AuthCompute {
    pub status: AuthStatus,
}

impl Compute for AuthCompute {
    fn deps(&self) -> ComputeDeps {
        no_deps()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Written by `LoginCommand` only.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

fn extract_error_message(body: &[u8], status: u16) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("Server error (status {status})"))
}

/// Posts the credentials in [`LoginInput`] to `/auth/login`.
///
/// Dispatch explicitly via `ctx.dispatch::<LoginCommand>()`.
#[derive(Default, Debug)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<LoginInput>().clone();
        let config = snap.state::<BusinessConfig>().clone();

        Box::pin(async move {
            let validation = validate_login(&input);
            if !validation.is_valid() {
                info!("LoginCommand: rejected invalid form");
                updater.set(AuthCompute {
                    status: AuthStatus::Invalid(validation),
                });
                return;
            }

            info!("LoginCommand: logging in as '{}'", input.username);
            updater.set(AuthCompute {
                status: AuthStatus::Submitting,
            });

            let status = submit_login(&config, input.username, input.password).await;
            match &status {
                AuthStatus::Authenticated { redirect, .. } => {
                    info!("LoginCommand: success, redirecting to {redirect}");
                }
                AuthStatus::Failed(message) => warn!("LoginCommand: {message}"),
                _ => info!("LoginCommand: login response carried no user"),
            }
            updater.set(AuthCompute { status });
        })
    }
}

async fn submit_login(config: &BusinessConfig, username: String, password: String) -> AuthStatus {
    let url = format!("{}/auth/login", config.api_url());
    let request = match Client::post(url).json(&LoginRequest {
        username,
        password: password.clone(),
    }) {
        Ok(request) => request,
        Err(err) => {
            error!("LoginCommand: {err}");
            return AuthStatus::Failed(format!("Internal error: {err}"));
        }
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => return AuthStatus::Failed(format!("Network error: {err}")),
    };

    if !response.is_success() {
        return AuthStatus::Failed(extract_error_message(&response.body, response.status));
    }

    match response.json::<LoginResponse>() {
        Ok(body) => resolve_login(body, &password),
        Err(err) => {
            error!("LoginCommand: failed to parse LoginResponse: {err}");
            AuthStatus::Failed("Failed to parse server response".to_owned())
        }
    }
}

/// Error codes the auth backend puts in `/auth/login?error=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    Banned,
    Deleted,
    DiscordNameInUse,
}

impl AuthErrorCode {
    pub fn from_query(code: &str) -> Option<Self> {
        match code {
            "banned" => Some(Self::Banned),
            "deleted" => Some(Self::Deleted),
            "discordNameInUse" => Some(Self::DiscordNameInUse),
            _ => None,
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            Self::Banned => "userBanned",
            Self::Deleted => "userDeleted",
            Self::DiscordNameInUse => "discordNameInUse",
        }
    }

    pub fn message(self, messages: &Messages) -> &str {
        messages.t(ERRORS, self.message_key())
    }
}

/// Banner text for the login page's `error` query code. Unknown codes show nothing.
pub fn auth_error_message<'m>(code: Option<&str>, messages: &'m Messages) -> Option<&'m str> {
    code.and_then(AuthErrorCode::from_query)
        .map(|code| code.message(messages))
}

/// Where the "Login via Discord" button sends the browser.
pub fn discord_login_url(config: &BusinessConfig) -> String {
    format!("{}/auth/discord", config.api_url())
}
