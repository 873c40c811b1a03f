//! Message dispatch for the aggregator process.
//!
//! Mirrors the host extension's background message handling: each tagged
//! message maps to one aggregator or settings operation. `toggleBlocking`
//! is a settings write here; delivering the toggle to a specific page
//! context is the caller's routing concern.

use std::sync::Mutex;
use std::time::Instant;

use crate::managers::counter_aggregator::{CounterAggregator, CounterAggregatorTrait, TabId};
use crate::services::session_store::SessionStoreTrait;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::MessageError;
use crate::types::message::{Message, MessageResponse};

/// Dispatches one message to the aggregator/settings pair.
///
/// `sender_tab` is the implicit tab attribution supplied by the host
/// messaging layer; increments without it are acknowledged but ignored.
pub fn handle_message<S: SessionStoreTrait>(
    aggregator: &Mutex<CounterAggregator<S>>,
    settings: &Mutex<SettingsEngine>,
    sender_tab: Option<TabId>,
    message: &Message,
) -> Result<MessageResponse, MessageError> {
    match message {
        Message::IncrementBlocked => {
            let mut agg = aggregator
                .lock()
                .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
            agg.on_increment(sender_tab, Instant::now());
            Ok(MessageResponse::ack("incremented"))
        }
        Message::GetAdsCount => {
            let agg = aggregator
                .lock()
                .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
            Ok(MessageResponse::Count { count: agg.total() })
        }
        Message::ResetLiveCounter => {
            let mut agg = aggregator
                .lock()
                .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
            agg.on_reset();
            Ok(MessageResponse::ack("reset"))
        }
        Message::ToggleBlocking { enabled } => {
            let mut engine = settings
                .lock()
                .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
            // Persist failure degrades silently; the live flag still flips.
            let _ = engine.set_enabled(*enabled);
            Ok(MessageResponse::ack("success"))
        }
    }
}

/// Host tab-lifecycle event: a tab was closed.
pub fn handle_tab_removed<S: SessionStoreTrait>(
    aggregator: &Mutex<CounterAggregator<S>>,
    tab: TabId,
) -> Result<(), MessageError> {
    let mut agg = aggregator
        .lock()
        .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
    agg.on_tab_removed(tab, Instant::now());
    Ok(())
}

/// Host lifecycle event: browser cold start.
pub fn handle_session_start<S: SessionStoreTrait>(
    aggregator: &Mutex<CounterAggregator<S>>,
) -> Result<(), MessageError> {
    let mut agg = aggregator
        .lock()
        .map_err(|e| MessageError::LockPoisoned(e.to_string()))?;
    agg.on_session_start();
    Ok(())
}
