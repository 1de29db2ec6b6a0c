//! # SweetHome Storefront Library
//!
//! The headless site controller: wires the pure core and the storage
//! adapter into the components a presentation layer talks to.
//!
//! ## Module Organization
//! ```text
//! sweethome_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront wiring & startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Persistence-backed cart state
//! │   ├── compare.rs  ◄─── Comparison set + table builder
//! │   └── config.rs   ◄─── Site configuration
//! ├── analytics.rs    ◄─── Event log (ring buffer + sinks)
//! ├── ab.rs           ◄─── A/B group assignment
//! ├── chat.rs         ◄─── Scripted chat widget
//! ├── notify.rs       ◄─── Notification center
//! ├── forms.rs        ◄─── Form validation + submission stubs
//! ├── share.rs        ◄─── Social share links
//! ├── positions.rs    ◄─── Simulated rank tracker
//! ├── catalog.rs      ◄─── Static product catalog
//! └── error.rs        ◄─── SiteError for controller operations
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Startup                                │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • defaults < storefront.toml < SWEETHOME_* env vars                 │
//! │                                                                         │
//! │  3. Open Storage ─────────────────────────────────────────────────────► │
//! │     • one JSON slot file under the platform data dir                    │
//! │     • corrupt store recovered as empty, never fatal                     │
//! │                                                                         │
//! │  4. Build Components ─────────────────────────────────────────────────► │
//! │     • EventLog rehydrated, A/B group resolved, cart rehydrated          │
//! │     • chat/notifications/positions created idle                         │
//! │                                                                         │
//! │  5. Start Background Tasks ───────────────────────────────────────────► │
//! │     • chat auto-open nudge, position drift interval                     │
//! │     • all owned; shutdown() aborts every one                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod ab;
pub mod analytics;
pub mod catalog;
pub mod chat;
pub mod error;
pub mod forms;
pub mod notify;
pub mod positions;
pub mod share;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sweethome_storage::{FileBackend, SessionStore, Storage};

use ab::AbTest;
use analytics::{AnalyticsSink, EventLog};
use chat::ChatWidget;
use notify::NotificationCenter;
use positions::{PositionTracker, TrackedQuery};
use state::{CartState, CompareState, SiteConfig};

// =============================================================================
// Storefront Controller
// =============================================================================

/// The assembled storefront: one instance per running site.
///
/// Owns every component and every background task; dropping (or calling
/// [`shutdown`](Storefront::shutdown)) cancels all scheduled work.
pub struct Storefront {
    pub config: SiteConfig,
    pub session: Arc<SessionStore>,
    pub analytics: Arc<EventLog>,
    pub ab: AbTest,
    pub cart: CartState,
    pub compare: CompareState,
    pub chat: ChatWidget,
    pub notifications: NotificationCenter,
    pub positions: PositionTracker,
}

impl Storefront {
    /// Builds a storefront over an opened storage.
    ///
    /// `sinks` are the optional external analytics destinations; an
    /// empty list is the normal case. Must be called inside a tokio
    /// runtime (the chat and notification components spawn timers).
    pub fn open(
        config: SiteConfig,
        storage: Storage,
        sinks: Vec<Box<dyn AnalyticsSink>>,
    ) -> Self {
        let storage = Arc::new(storage);
        let session = Arc::new(SessionStore::new());

        let mut event_log = EventLog::new(Arc::clone(&storage));
        for sink in sinks {
            event_log.register_boxed_sink(sink);
        }
        let analytics = Arc::new(event_log);

        let ab = AbTest::assign(&storage, Arc::clone(&analytics), &config.ab_test_name);
        let cart = CartState::load(Arc::clone(&storage), Arc::clone(&analytics));
        let compare = CompareState::new(Arc::clone(&analytics));
        let chat = ChatWidget::new(&config, Arc::clone(&session), Arc::clone(&analytics));
        let notifications =
            NotificationCenter::new(Duration::from_secs(config.notification_dismiss_secs));
        let positions = PositionTracker::new(default_tracked_queries());

        info!(
            group = %ab.group(),
            cart_items = cart.item_count(),
            events = analytics.len(),
            "storefront ready"
        );

        Storefront {
            config,
            session,
            analytics,
            ab,
            cart,
            compare,
            chat,
            notifications,
            positions,
        }
    }

    /// Starts the background tasks: the chat auto-open nudge and the
    /// simulated position drift.
    pub fn start_background_tasks(&self) {
        self.chat
            .schedule_auto_open(Duration::from_secs(self.config.chat_auto_open_secs));
        self.positions
            .start(Duration::from_secs(self.config.position_update_interval_secs));
    }

    /// Cancels every scheduled task. Idempotent; also runs on drop via
    /// the component destructors.
    pub fn shutdown(&self) {
        self.chat.abort_pending();
        self.positions.stop();
        info!("storefront shut down");
    }
}

/// The search queries the demo tracker watches.
fn default_tracked_queries() -> Vec<TrackedQuery> {
    vec![
        TrackedQuery {
            query: "cakes to order minsk".to_string(),
            position: 12,
        },
        TrackedQuery {
            query: "homemade pastry delivery".to_string(),
            position: 8,
        },
        TrackedQuery {
            query: "custom birthday cake".to_string(),
            position: 23,
        },
    ]
}

// =============================================================================
// Startup Helpers
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages (includes every analytics event)
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sweethome=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the slot-store file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.sweethome.bakery/store.json`
/// - **Windows**: `%APPDATA%\sweethome\bakery\store.json`
/// - **Linux**: `~/.local/share/sweethome-bakery/store.json`
///
/// ## Development Override
/// Set `SWEETHOME_STORE_PATH` to use a custom path.
pub fn default_store_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("SWEETHOME_STORE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "sweethome", "bakery")
        .ok_or("Could not determine app data directory")?;

    Ok(proj_dirs.data_dir().join("store.json"))
}

/// Opens the file-backed storage at the default (or overridden) path.
pub fn open_default_storage() -> Result<Storage, Box<dyn std::error::Error>> {
    let path = default_store_path()?;
    info!(path = %path.display(), "opening slot store");
    Ok(Storage::new(FileBackend::open(path)?))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweethome_core::Money;
    use sweethome_storage::MemoryBackend;

    fn memory_storefront() -> Storefront {
        Storefront::open(
            SiteConfig::default(),
            Storage::new(MemoryBackend::new()),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_open_starts_empty() {
        let storefront = memory_storefront();
        assert!(storefront.cart.is_empty());
        assert!(storefront.compare.is_empty());
        assert!(!storefront.chat.is_open());
    }

    #[tokio::test]
    async fn test_components_share_the_event_log() {
        let storefront = memory_storefront();

        storefront
            .cart
            .add_item("Apple Pie", Money::from_rubles(32))
            .unwrap();
        storefront.compare.toggle("Apple Pie").unwrap();
        storefront.chat.toggle();

        let names: Vec<String> = storefront
            .analytics
            .history()
            .iter()
            .map(|e| e.name.clone())
            .filter(|n| n != "ab_test_assignment")
            .collect();
        assert_eq!(names, vec!["add_to_cart", "product_comparison", "chat_opened"]);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let storefront = memory_storefront();
        storefront.start_background_tasks();
        storefront.shutdown();
        storefront.shutdown();
    }
}
