//! Xtream Codes URL construction
//!
//! Player API URLs carry the credentials as query parameters; playback URLs
//! carry them as path segments.

use url::Url;

use super::error::Result;
use super::types::{ActionRequest, StreamLocator};
use crate::config::ClientConfig;

/// Player API endpoint path
const PLAYER_API_PATH: &str = "/player_api.php";

/// Build the `player_api.php` URL with the credentials already set
///
/// Any path on `base_url` is replaced by the endpoint path.
pub fn base_api_url(config: &ClientConfig) -> Result<Url> {
    let mut url = Url::parse(&config.base_url)?.join(PLAYER_API_PATH)?;
    set_query_param(&mut url, "username", &config.username);
    set_query_param(&mut url, "password", &config.password);
    Ok(url)
}

/// Build the URL for one API call
///
/// `action` is set (or overwritten), then every present parameter is set in
/// order. Absent parameters are skipped.
pub fn build_action_url(base_api_url: &Url, request: &ActionRequest) -> Url {
    let mut url = base_api_url.clone();
    set_query_param(&mut url, "action", &request.action);
    for (key, value) in request.present_parameters() {
        set_query_param(&mut url, key, &value.to_string());
    }
    url
}

/// Set a query parameter, replacing an existing key in place
///
/// The first occurrence keeps its position, later duplicates are dropped.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (k, v) in url.query_pairs().into_owned() {
        if k == key {
            if !replaced {
                pairs.push((k, value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k, v));
        }
    }

    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// Build a playback URL for a channel, movie or episode
///
/// Never touches the network. A timeshift window is only emitted when both
/// its start and duration are set.
pub fn build_stream_url(config: &ClientConfig, locator: &StreamLocator) -> String {
    let mut url = format!(
        "{}/{}/{}/{}/{}.{}",
        config.base_url.trim_end_matches('/'),
        locator.kind.path_segment(),
        config.username,
        config.password,
        locator.stream_id,
        locator.extension
    );

    if let Some((utc, duration)) = locator.timeshift.and_then(|t| t.window()) {
        url.push_str(&format!("?utc={}&duration={}", utc, duration));
    }

    url
}
