// jablock Settings Engine
// Manages blocker settings: loading, saving, updating individual values,
// whitelist editing with hostname validation, and change notification.
// Settings are stored as a JSON file; the engine core only ever reads
// `is_enabled` and `whitelist_urls` through the subscription mechanism.

use std::fs;
use std::path::Path;

use crate::types::errors::SettingsError;
use crate::types::settings::BlockerSettings;

/// Maximum hostname length accepted into the whitelist.
const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Change listener invoked after every successful settings mutation.
pub type SettingsListener = Box<dyn Fn(&BlockerSettings) + Send>;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BlockerSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BlockerSettings;
    fn set_enabled(&mut self, enabled: bool) -> Result<(), SettingsError>;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn add_whitelist_entry(&mut self, hostname: &str) -> Result<(), SettingsError>;
    fn remove_whitelist_entry(&mut self, index: usize) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn subscribe(&mut self, listener: SettingsListener);
    fn config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BlockerSettings,
    listeners: Vec<SettingsListener>,
}

impl SettingsEngine {
    pub fn new(config_path: &str) -> Self {
        Self {
            config_path: config_path.to_string(),
            settings: BlockerSettings::default(),
            listeners: Vec::new(),
        }
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.settings);
        }
    }

    fn persist_and_notify(&mut self) -> Result<(), SettingsError> {
        self.save()?;
        self.notify();
        Ok(())
    }
}

/// Validates a hostname the way the configuration surface does: dot-separated
/// labels of alphanumerics and dashes, no leading/trailing dash, bounded
/// lengths. The engine core performs no further validation downstream.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    hostname.split('.').all(|label| {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        let chars: Vec<char> = label.chars().collect();
        if !chars[0].is_ascii_alphanumeric() || !chars[chars.len() - 1].is_ascii_alphanumeric() {
            return false;
        }
        chars.iter().all(|c| c.is_ascii_alphanumeric() || *c == '-')
    })
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed file is a serialization
    /// error.
    fn load(&mut self) -> Result<BlockerSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = BlockerSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;
        let settings: BlockerSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file, creating parent
    /// directories if needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &BlockerSettings {
        &self.settings
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.is_enabled = enabled;
        self.persist_and_notify()
    }

    /// Updates an individual setting by its wire key.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        match key {
            "blockYouTubeAds" => {
                self.settings.block_youtube_ads = value
                    .as_bool()
                    .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
            }
            "blockPopups" => {
                self.settings.block_popups = value
                    .as_bool()
                    .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
            }
            "blockTrackers" => {
                self.settings.block_trackers = value
                    .as_bool()
                    .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
            }
            "isEnabled" => {
                self.settings.is_enabled = value
                    .as_bool()
                    .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
            }
            "whitelistUrls" => {
                let urls: Vec<String> = serde_json::from_value(value)
                    .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
                self.settings.whitelist_urls = urls;
            }
            _ => return Err(SettingsError::InvalidKey(key.to_string())),
        }
        self.persist_and_notify()
    }

    /// Validates and appends a whitelist hostname. Rejects malformed
    /// hostnames and duplicates at this boundary so the core never sees
    /// invalid entries.
    fn add_whitelist_entry(&mut self, hostname: &str) -> Result<(), SettingsError> {
        let hostname = hostname.trim();
        if !is_valid_hostname(hostname) {
            return Err(SettingsError::InvalidHostname(hostname.to_string()));
        }
        if self.settings.whitelist_urls.iter().any(|h| h == hostname) {
            return Err(SettingsError::DuplicateEntry(hostname.to_string()));
        }
        self.settings.whitelist_urls.push(hostname.to_string());
        self.persist_and_notify()
    }

    fn remove_whitelist_entry(&mut self, index: usize) -> Result<(), SettingsError> {
        if index >= self.settings.whitelist_urls.len() {
            return Err(SettingsError::InvalidIndex(index));
        }
        self.settings.whitelist_urls.remove(index);
        self.persist_and_notify()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BlockerSettings::default();
        self.persist_and_notify()
    }

    /// Registers a change listener. Page contexts subscribe here so
    /// whitelist and enabled changes take effect on the next scan without a
    /// reload.
    fn subscribe(&mut self, listener: SettingsListener) {
        self.listeners.push(listener);
    }

    fn config_path(&self) -> &str {
        &self.config_path
    }
}
