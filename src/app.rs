//! App core for jablock.
//!
//! Central struct holding the settings engine and the counter aggregator,
//! and handing out page contexts wired to the live settings snapshot. One
//! App per browser session.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use crate::managers::counter_aggregator::{CounterAggregator, TabId};
use crate::managers::page_context::PageContext;
use crate::message_handler;
use crate::services::session_store::FileSessionStore;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::dom::PageDocument;
use crate::types::errors::MessageError;
use crate::types::message::{Message, MessageResponse};
use crate::types::settings::BlockerSettings;

pub struct App {
    pub settings_engine: Mutex<SettingsEngine>,
    pub aggregator: Mutex<CounterAggregator<FileSessionStore>>,
    shared_settings: Arc<RwLock<BlockerSettings>>,
}

impl App {
    /// Creates a new App with its stores under `data_dir`.
    pub fn new(data_dir: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let settings_path = Path::new(data_dir)
            .join("settings.json")
            .to_string_lossy()
            .to_string();
        let session_path = Path::new(data_dir)
            .join("session.json")
            .to_string_lossy()
            .to_string();

        let mut settings_engine = SettingsEngine::new(&settings_path);
        let _ = settings_engine.load();

        // Live snapshot shared with every page context; the subscription
        // keeps it current so whitelist edits apply on the next scan.
        let shared_settings = Arc::new(RwLock::new(settings_engine.get_settings().clone()));
        let mirror = shared_settings.clone();
        settings_engine.subscribe(Box::new(move |settings| {
            if let Ok(mut guard) = mirror.write() {
                *guard = settings.clone();
            }
        }));

        let store = FileSessionStore::new(&session_path);
        let aggregator = CounterAggregator::new(store)?;

        Ok(Self {
            settings_engine: Mutex::new(settings_engine),
            aggregator: Mutex::new(aggregator),
            shared_settings,
        })
    }

    pub fn shared_settings(&self) -> Arc<RwLock<BlockerSettings>> {
        self.shared_settings.clone()
    }

    /// Builds a page context for a freshly loaded page in `tab_id`.
    pub fn create_page_context(&self, tab_id: TabId, document: PageDocument) -> PageContext {
        PageContext::new(tab_id, document, self.shared_settings.clone())
    }

    pub fn handle_message(
        &self,
        sender_tab: Option<TabId>,
        message: &Message,
    ) -> Result<MessageResponse, MessageError> {
        message_handler::handle_message(&self.aggregator, &self.settings_engine, sender_tab, message)
    }

    pub fn handle_tab_removed(&self, tab: TabId) -> Result<(), MessageError> {
        message_handler::handle_tab_removed(&self.aggregator, tab)
    }

    pub fn handle_session_start(&self) -> Result<(), MessageError> {
        message_handler::handle_session_start(&self.aggregator)
    }
}
