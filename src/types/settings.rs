use serde::{Deserialize, Serialize};

/// Durable, user-scoped blocker settings.
///
/// The engine core only reads `is_enabled` and `whitelist_urls`; the three
/// category toggles belong to the configuration surface and are persisted for
/// it. Field names match the wire/storage schema of the host extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockerSettings {
    #[serde(rename = "blockYouTubeAds")]
    pub block_youtube_ads: bool,
    pub block_popups: bool,
    pub block_trackers: bool,
    pub is_enabled: bool,
    /// Ordered list of hostname substrings exempt from blocking.
    pub whitelist_urls: Vec<String>,
}

impl Default for BlockerSettings {
    fn default() -> Self {
        Self {
            block_youtube_ads: true,
            block_popups: true,
            block_trackers: true,
            is_enabled: true,
            whitelist_urls: Vec::new(),
        }
    }
}
