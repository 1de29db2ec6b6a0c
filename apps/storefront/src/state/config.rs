//! # Site Configuration
//!
//! Immutable configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SWEETHOME_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization, so no lock is needed.
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! site_name = "SweetHome Bakery"
//! base_url = "https://sweethomebakery.example"
//! contact_phone = "+375 33 875 10 74"
//!
//! chat_auto_open_secs = 30
//! notification_dismiss_secs = 5
//! position_update_interval_secs = 30
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Application configuration.
///
/// Business constants (delivery thresholds, the compare cap, the event
/// history cap) are NOT configuration — they live in `sweethome-core`.
/// This struct holds the presentation-adjacent knobs: identity strings
/// and timer durations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site display name, used in share text and log lines.
    pub site_name: String,

    /// Public base URL of the site (share links point here).
    pub base_url: String,

    /// Contact phone quoted by the chat bot.
    pub contact_phone: String,

    /// Delay before the chat offers itself to a quiet visitor.
    pub chat_auto_open_secs: u64,

    /// Delay before a canned chat answer lands.
    pub chat_reply_delay_ms: u64,

    /// Extra delay before a follow-up chat message.
    pub chat_followup_delay_ms: u64,

    /// Delay before a keyword-matched reply to free-text input.
    pub chat_keyword_reply_delay_ms: u64,

    /// How long a notification stays up before auto-dismissing.
    pub notification_dismiss_secs: u64,

    /// Interval between simulated search-position updates.
    pub position_update_interval_secs: u64,

    /// Name of the running A/B experiment.
    pub ab_test_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "SweetHome Bakery".to_string(),
            base_url: "https://sweethomebakery.example".to_string(),
            contact_phone: "+375 33 875 10 74".to_string(),
            chat_auto_open_secs: 30,
            chat_reply_delay_ms: 1000,
            chat_followup_delay_ms: 500,
            chat_keyword_reply_delay_ms: 1500,
            notification_dismiss_secs: 5,
            position_update_interval_secs: 30,
            ab_test_name: "header_variation".to_string(),
        }
    }
}

impl SiteConfig {
    /// Resolves the configuration: defaults, then the optional TOML
    /// file, then environment overrides.
    ///
    /// A missing file is normal; a malformed one is logged and skipped
    /// rather than failing startup.
    pub fn resolve(config_path: Option<&Path>) -> Self {
        let mut config = match config_path {
            Some(path) => Self::from_file(path),
            None => SiteConfig::default(),
        };
        config.apply_env_overrides();
        config
    }

    /// Loads the TOML file, falling back to defaults.
    fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => {
                    debug!(path = %path.display(), "config file loaded");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "config file malformed, using defaults");
                    SiteConfig::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SiteConfig::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config file unreadable, using defaults");
                SiteConfig::default()
            }
        }
    }

    /// Applies `SWEETHOME_*` environment overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("SWEETHOME_SITE_NAME") {
            self.site_name = name;
        }
        if let Ok(url) = std::env::var("SWEETHOME_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(phone) = std::env::var("SWEETHOME_CONTACT_PHONE") {
            self.contact_phone = phone;
        }
        if let Ok(secs) = std::env::var("SWEETHOME_CHAT_AUTO_OPEN_SECS") {
            if let Ok(secs) = secs.parse() {
                self.chat_auto_open_secs = secs;
            }
        }
        if let Ok(secs) = std::env::var("SWEETHOME_NOTIFICATION_DISMISS_SECS") {
            if let Ok(secs) = secs.parse() {
                self.notification_dismiss_secs = secs;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.chat_auto_open_secs, 30);
        assert_eq!(config.notification_dismiss_secs, 5);
        assert_eq!(config.ab_test_name, "header_variation");
    }

    #[test]
    fn test_partial_toml_fills_with_defaults() {
        let config: SiteConfig = toml::from_str("site_name = \"Test Bakery\"").unwrap();
        assert_eq!(config.site_name, "Test Bakery");
        // Everything else falls back to the defaults
        assert_eq!(config.chat_reply_delay_ms, 1000);
    }

    #[test]
    fn test_resolve_without_file() {
        let config = SiteConfig::resolve(None);
        assert_eq!(config.site_name, "SweetHome Bakery");
    }
}
