//! Built-in message catalogue.
//!
//! Messages are addressed by `(namespace, key)`. Lookups for unknown keys return the key
//! itself so a missing translation shows up in the UI instead of an empty label.

use std::any::Any;
use std::collections::BTreeMap;

use snaily_states::{State, snapshot_clone};

use crate::table::BoolLabels;

pub const COMMON: &str = "Common";
pub const MANAGEMENT: &str = "Management";
pub const AUTH: &str = "Auth";
pub const ERRORS: &str = "Errors";

const ENGLISH: &[(&str, &str, &str)] = &[
    (COMMON, "yes", "Yes"),
    (COMMON, "no", "No"),
    (COMMON, "search", "Search"),
    (COMMON, "manage", "Manage"),
    (COMMON, "actions", "Actions"),
    (COMMON, "accept", "Accept"),
    (COMMON, "decline", "Decline"),
    (COMMON, "refresh", "Refresh"),
    (COMMON, "loading", "Loading..."),
    (MANAGEMENT, "MANAGE_USERS", "Manage Users"),
    (MANAGEMENT, "allUsers", "All Users"),
    (MANAGEMENT, "pendingUsers", "Pending Users"),
    (MANAGEMENT, "noPendingUsers", "There are no users pending access."),
    (AUTH, "login", "Login"),
    (AUTH, "username", "Username"),
    (AUTH, "password", "Password"),
    (AUTH, "noAccount", "Don't have an account? Register"),
    (AUTH, "loginViaDiscord", "Login via Discord"),
    (ERRORS, "userBanned", "This user has been banned from this CAD."),
    (ERRORS, "userDeleted", "This account has been deleted."),
    (
        ERRORS,
        "discordNameInUse",
        "This Discord account is already linked to another user.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    locale: String,
    entries: BTreeMap<(String, String), String>,
}

impl Messages {
    pub fn english() -> Self {
        let entries = ENGLISH
            .iter()
            .map(|(ns, key, text)| (((*ns).to_owned(), (*key).to_owned()), (*text).to_owned()))
            .collect();
        Self {
            locale: "en".to_owned(),
            entries,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Adds or replaces one message.
    pub fn insert(&mut self, namespace: &str, key: &str, text: impl Into<String>) {
        self.entries
            .insert((namespace.to_owned(), key.to_owned()), text.into());
    }

    pub fn t<'a>(&'a self, namespace: &str, key: &'a str) -> &'a str {
        self.entries
            .get(&(namespace.to_owned(), key.to_owned()))
            .map_or(key, String::as_str)
    }

    pub fn yes_no(&self, value: bool) -> &str {
        if value {
            self.t(COMMON, "yes")
        } else {
            self.t(COMMON, "no")
        }
    }

    pub fn bool_labels(&self) -> BoolLabels<'_> {
        BoolLabels {
            yes: self.yes_no(true),
            no: self.yes_no(false),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl State for Messages {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_english_messages() {
        let messages = Messages::english();
        assert_eq!(messages.t(MANAGEMENT, "allUsers"), "All Users");
        assert_eq!(messages.yes_no(true), "Yes");
        assert_eq!(messages.yes_no(false), "No");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let messages = Messages::english();
        assert_eq!(messages.t(COMMON, "doesNotExist"), "doesNotExist");
        assert_eq!(messages.t("Nope", "yes"), "yes");
    }

    #[test]
    fn overrides_feed_bool_labels() {
        let mut messages = Messages::english();
        messages.insert(COMMON, "yes", "Oui");
        messages.insert(COMMON, "no", "Non");

        let labels = messages.bool_labels();
        assert_eq!(labels.label(true), "Oui");
        assert_eq!(labels.label(false), "Non");
    }
}
