//! # Storefront Demo Binary
//!
//! Runs one scripted visitor session against the real storefront
//! controller: rehydrates state from the slot store, exercises the
//! cart, the delivery calculator, the comparison table, the chat and
//! the forms, then shuts down cleanly. State persists across runs —
//! run it twice and the cart picks up where it left off.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Resolve configuration (defaults < storefront.toml < env)
//! 3. Open the slot store (app data directory)
//! 4. Build the Storefront controller
//! 5. Run the scripted session
//! 6. Abort all background tasks and exit

use std::time::Duration;

use tracing::{info, warn};

use sweethome_core::{delivery, Money};
use sweethome_storefront::forms::{self, OrderForm};
use sweethome_storefront::notify::NotificationKind;
use sweethome_storefront::share::{self, SharePage, SharePlatform};
use sweethome_storefront::state::SiteConfig;
use sweethome_storefront::{self as storefront, Storefront};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storefront::init_tracing();

    let config_path: Option<std::path::PathBuf> =
        std::env::var("SWEETHOME_CONFIG").ok().map(Into::into);
    let config = SiteConfig::resolve(config_path.as_deref());
    info!(site = %config.site_name, "starting storefront session");

    let storage = storefront::open_default_storage()?;
    let site = Storefront::open(config, storage, Vec::new());
    site.start_background_tasks();

    run_session(&site).await;

    site.shutdown();
    Ok(())
}

/// One scripted visitor session.
async fn run_session(site: &Storefront) {
    // Where the visitor left off last run
    let summary = site.cart.summary();
    info!(
        items = summary.item_count,
        total = %summary.total,
        "cart rehydrated: {}",
        summary.delivery_message
    );

    // Browse and add a couple of products
    for (name, price) in [
        ("Tenderness Cake", Money::from_rubles(45)),
        ("Rainbow Cupcakes", Money::from_rubles(20)),
    ] {
        match site.cart.add_item(name, price) {
            Ok(item) => {
                site.notifications.push(
                    format!("{} added to cart ({})", item.name, item.unit_price()),
                    NotificationKind::Success,
                );
            }
            Err(err) => warn!(%err, "add to cart failed"),
        }
    }
    info!("{}", site.cart.summary().delivery_message);

    // The delivery calculator, fed a typed-in amount
    match "50".parse::<Money>().map(delivery::quote) {
        Ok(Ok(quote)) => info!(
            order = %quote.order_amount,
            delivery = %quote.delivery_cost,
            total = %quote.total,
            "delivery quote"
        ),
        Ok(Err(err)) => info!(%err, "delivery quote rejected"),
        Err(err) => warn!(%err, "unparseable amount"),
    }

    // Compare two cakes
    for name in ["Tenderness Cake", "Honey Paradise Cake"] {
        if let Err(err) = site.compare.toggle(name) {
            warn!(%err, "compare toggle failed");
        }
    }
    if let Ok(table) = site.compare.table() {
        info!(products = ?table.products, "comparison table built");
    }

    // Ask the chat about delivery, then free-text
    site.chat.toggle();
    if let Err(err) = site.chat.select_topic("delivery") {
        warn!(%err, "chat topic failed");
    }
    if let Err(err) = site.chat.send_message("how much is a custom cake?") {
        warn!(%err, "chat message failed");
    }

    // Give the scheduled bot replies time to land
    tokio::time::sleep(Duration::from_millis(2200)).await;
    for message in site.chat.transcript() {
        info!(sender = ?message.sender, "chat: {}", message.text);
    }

    // Submit an order (backend stub: terminates at the log)
    let order = OrderForm {
        name: "Alena".to_string(),
        phone: "+375 33 875 10 74".to_string(),
        email: Some("alena@example.com".to_string()),
        product: Some("Tenderness Cake".to_string()),
        comment: None,
    };
    match forms::submit_order(&order, &site.analytics) {
        Ok(ack) => {
            site.notifications.push(ack, NotificationKind::Success);
        }
        Err(rejected) => {
            for field_error in &rejected.errors {
                warn!(field = %field_error.field, "{}", field_error.message);
            }
            site.notifications
                .push("Please fix the errors in the form", NotificationKind::Error);
        }
    }

    // Newsletter signup and a share link
    if let Ok(ack) = forms::subscribe_newsletter("alena@example.com", &site.analytics) {
        site.notifications.push(ack, NotificationKind::Success);
    }
    let link = share::share_catalog(
        SharePlatform::Telegram,
        &SharePage {
            url: format!("{}/catalog", site.config.base_url),
            title: site.config.site_name.clone(),
            text: "Check out the homemade pastry catalog!".to_string(),
        },
        &site.analytics,
    );
    info!(%link, "share link built");

    info!(
        events = site.analytics.len(),
        notifications = site.notifications.active().len(),
        "session complete"
    );
}
