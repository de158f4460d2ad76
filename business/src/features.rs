use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::CadSettings;

/// Optional CAD features an admin can switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    DiscordAuth,
    Bleeter,
    Tow,
    Taxi,
    Courthouse,
    TruckLogs,
    Aop,
    Business,
    WeaponRegistration,
    #[serde(rename = "CALLS_911")]
    Calls911,
    #[serde(other)]
    Unknown,
}

/// Features resolved once at startup. Everything is enabled unless the CAD settings
/// disable it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    disabled: BTreeSet<Feature>,
}

impl FeatureFlags {
    pub fn from_settings(settings: &CadSettings) -> Self {
        Self::with_disabled(settings.disabled_features.iter().copied())
    }

    pub fn with_disabled(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            disabled: features
                .into_iter()
                .filter(|feature| *feature != Feature::Unknown)
                .collect(),
        }
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        !self.disabled.contains(&feature)
    }

    pub fn discord_auth(&self) -> bool {
        self.is_enabled(Feature::DiscordAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_enabled_by_default() {
        let flags = FeatureFlags::default();
        assert!(flags.discord_auth());
        assert!(flags.is_enabled(Feature::Tow));
    }

    #[test]
    fn disabled_features_are_off() {
        let flags = FeatureFlags::with_disabled([Feature::DiscordAuth]);
        assert!(!flags.discord_auth());
        assert!(flags.is_enabled(Feature::Bleeter));
    }

    #[test]
    fn unknown_names_deserialize_and_are_ignored() {
        let features: Vec<Feature> =
            serde_json::from_str(r#"["DISCORD_AUTH","SOMETHING_NEW","CALLS_911"]"#).unwrap();
        assert_eq!(
            features,
            vec![Feature::DiscordAuth, Feature::Unknown, Feature::Calls911]
        );

        let flags = FeatureFlags::with_disabled(features);
        assert!(!flags.discord_auth());
        assert!(flags.is_enabled(Feature::Unknown));
    }
}
