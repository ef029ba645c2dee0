//! Release version check against GitHub

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{PassForgeError, Result};

/// Latest-release endpoint of the upstream repository
pub const RELEASES_URL: &str = "https://api.github.com/repos/ron7/passmut/releases/latest";

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    tag_name: String,
}

/// Outcome of a version check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Available { latest: String },
}

/// Compare a release tag with the running version
pub fn compare_versions(tag: &str, current: &str) -> UpdateStatus {
    if tag == format!("v{}", current) {
        UpdateStatus::UpToDate
    } else {
        UpdateStatus::Available {
            latest: tag.to_string(),
        }
    }
}

fn parse_release(body: &str) -> Result<String> {
    let release: Release = serde_json::from_str(body)?;
    if release.tag_name.is_empty() {
        return Err(PassForgeError::parse(
            "no release information found",
            Some(body.chars().take(200).collect()),
        ));
    }
    Ok(release.tag_name)
}

/// Ask GitHub for the latest release tag
pub async fn check_for_updates() -> Result<UpdateStatus> {
    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(format!("pass-forge/{}", crate::VERSION))
        .build()
        .map_err(|e| PassForgeError::network(e.to_string(), None, None))?;

    let response = client.get(RELEASES_URL).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PassForgeError::network(
            format!("release lookup failed ({})", status),
            Some(status.as_u16()),
            Some(RELEASES_URL.to_string()),
        ));
    }

    let body = response.text().await?;
    let tag = parse_release(&body)?;
    tracing::debug!(tag = %tag, current = crate::VERSION, "Fetched latest release");
    Ok(compare_versions(&tag, crate::VERSION))
}
