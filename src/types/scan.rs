use serde::{Deserialize, Serialize};

/// Site category selecting which rule set the scanner applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageCategory {
    /// Video-hosting sites get the denser, higher-confidence selector set.
    VideoHosting,
    Generic,
}

impl PageCategory {
    pub fn for_hostname(hostname: &str) -> Self {
        if hostname.contains("youtube.com") {
            PageCategory::VideoHosting
        } else {
            PageCategory::Generic
        }
    }
}

/// Summary of one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Subtree roots removed from the document, counted or not.
    pub removed: u32,
    /// Blocking events emitted, one per newly-identified ad.
    pub events_emitted: u32,
    /// True when the hostname matched a whitelist entry and the pass did
    /// nothing at all.
    pub whitelisted: bool,
}
