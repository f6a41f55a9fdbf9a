//! Site list call: which properties the service account can read.

use crate::credentials::GscClient;
use crate::error::{GscError, Result};
use serde::Deserialize;

const SITES_ENDPOINT: &str = "https://www.googleapis.com/webmasters/v3/sites";

fn unknown_permission() -> String {
    "Unknown".to_string()
}

/// Response body for the site list call. `siteEntry` is absent entirely
/// when the account has access to no properties.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteList {
    #[serde(default)]
    pub site_entry: Vec<SiteEntry>,
}

/// One accessible property and the credential's permission level on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    pub site_url: String,
    #[serde(default = "unknown_permission")]
    pub permission_level: String,
}

/// List the properties the authenticated service account can access.
pub async fn list_sites(client: &GscClient) -> Result<Vec<SiteEntry>> {
    let response = client
        .http()
        .get(SITES_ENDPOINT)
        .bearer_auth(client.bearer())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(GscError::Api { status, body });
    }

    let parsed: SiteList = response.json().await?;
    Ok(parsed.site_entry)
}
