use serde::{Deserialize, Serialize};

/// Tagged messages exchanged between page contexts, the configuration
/// surface, and the counter aggregator. The `action` tag values match the
/// host extension's wire strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// One newly-identified ad was blocked in the sender's page context.
    /// Fire-and-forget; the sender tolerates a lost acknowledgment.
    IncrementBlocked,
    /// Ask the aggregator for the live total. Answered from memory.
    GetAdsCount,
    /// Clear all aggregator state and persist the reset.
    ResetLiveCounter,
    /// Enable or disable blocking in a specific page context.
    ToggleBlocking { enabled: bool },
}

/// Response payloads, shaped like the host extension's replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageResponse {
    Count { count: u64 },
    Ack { status: String },
}

impl MessageResponse {
    pub fn ack(status: &str) -> Self {
        MessageResponse::Ack {
            status: status.to_string(),
        }
    }
}
