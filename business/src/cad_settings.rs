//! CAD-wide settings fetched once before the first frame.

use log::{info, warn};
use serde::Deserialize;

use crate::{BusinessConfig, Feature, http::Client};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadSettings {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub disabled_features: Vec<Feature>,
}

/// GET `/admin/manage/cad-settings`.
///
/// Never fails: any transport, status or parse error yields empty settings.
pub async fn load_cad_settings(config: &BusinessConfig) -> CadSettings {
    let url = format!("{}/admin/manage/cad-settings", config.api_url());

    let response = match Client::get(&url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("load_cad_settings: request failed, using empty settings: {err}");
            return CadSettings::default();
        }
    };

    if !response.is_success() {
        warn!(
            "load_cad_settings: status {}, using empty settings",
            response.status
        );
        return CadSettings::default();
    }

    match response.json::<Option<CadSettings>>() {
        Ok(settings) => {
            let settings = settings.unwrap_or_default();
            info!(
                "load_cad_settings: {} disabled feature(s)",
                settings.disabled_features.len()
            );
            settings
        }
        Err(err) => {
            warn!("load_cad_settings: unreadable body, using empty settings: {err}");
            CadSettings::default()
        }
    }
}
