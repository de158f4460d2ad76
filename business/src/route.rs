//! Navigation target of the client, mirrored as a URL path.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use log::debug;
use snaily_states::{State, snapshot_clone};
use ustr::Ustr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `error` is the raw `?error=` code reported by the auth backend.
    Login { error: Option<String> },
    Register,
    /// First login with a password issued by an admin.
    TempPassword { password: String },
    Citizen,
    ManageUsers,
    ManageUser { id: Ustr },
}

impl Default for Route {
    fn default() -> Self {
        Self::Login { error: None }
    }
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login { error: None } => "/auth/login".to_owned(),
            Self::Login { error: Some(code) } => {
                format!("/auth/login?error={}", urlencoding::encode(code))
            }
            Self::Register => "/auth/register".to_owned(),
            Self::TempPassword { password } => {
                format!("/auth/temp-password?tp={}", urlencoding::encode(password))
            }
            Self::Citizen => "/citizen".to_owned(),
            Self::ManageUsers => "/admin/manage/users".to_owned(),
            Self::ManageUser { id } => format!("/admin/manage/users/{id}"),
        }
    }

    /// Parses a path with an optional query string. Unknown paths land on the login page.
    pub fn parse(path: &str) -> Self {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let path = path.trim_end_matches('/');

        match path {
            "" | "/auth/login" => Self::Login {
                error: query_param(query, "error"),
            },
            "/auth/register" => Self::Register,
            "/auth/temp-password" => Self::TempPassword {
                password: query_param(query, "tp").unwrap_or_default(),
            },
            "/citizen" => Self::Citizen,
            "/admin/manage/users" => Self::ManageUsers,
            _ => match path.strip_prefix("/admin/manage/users/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::ManageUser {
                    id: Ustr::from(id),
                },
                _ => {
                    debug!("Route: unknown path {path:?}, falling back to login");
                    Self::default()
                }
            },
        }
    }

    pub fn is_auth_page(&self) -> bool {
        matches!(
            self,
            Self::Login { .. } | Self::Register | Self::TempPassword { .. }
        )
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            // `+` is how forms encode spaces
            let value = value.replace('+', " ");
            urlencoding::decode(&value)
                .map(Cow::into_owned)
                .unwrap_or(value)
        })
}

/// The path with the temporary password masked, for logs.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TempPassword { .. } => f.write_str("/auth/temp-password?tp=<redacted>"),
            route => f.write_str(&route.path()),
        }
    }
}

impl State for Route {
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
