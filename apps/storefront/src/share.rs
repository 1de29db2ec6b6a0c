//! # Social Share Links
//!
//! Builds the share URLs for the supported platforms. Building a link
//! and recording the share intent is all that happens here; nothing is
//! ever requested over the wire.

use serde_json::json;
use urlencoding::encode;

use crate::analytics::EventLog;

/// Supported share targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Vk,
    Facebook,
    Telegram,
    Twitter,
}

impl SharePlatform {
    /// Tag used in analytics payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::Vk => "vk",
            SharePlatform::Facebook => "facebook",
            SharePlatform::Telegram => "telegram",
            SharePlatform::Twitter => "twitter",
        }
    }
}

/// What is being shared.
#[derive(Debug, Clone)]
pub struct SharePage {
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Builds the share URL for a platform.
///
/// Each component is percent-encoded; the templates themselves are the
/// platforms' documented share endpoints.
pub fn share_url(platform: SharePlatform, page: &SharePage) -> String {
    let url = encode(&page.url);
    let title = encode(&page.title);
    let text = encode(&page.text);

    match platform {
        SharePlatform::Vk => format!(
            "https://vk.com/share.php?url={url}&title={title}&description={text}"
        ),
        SharePlatform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={url}")
        }
        SharePlatform::Telegram => {
            let combined_raw = format!("{} {}", page.title, page.text);
            let combined = encode(&combined_raw);
            format!("https://t.me/share/url?url={url}&text={combined}")
        }
        SharePlatform::Twitter => {
            format!("https://twitter.com/intent/tweet?url={url}&text={title}")
        }
    }
}

/// Builds a catalog share link and records the share intent.
pub fn share_catalog(platform: SharePlatform, page: &SharePage, analytics: &EventLog) -> String {
    let link = share_url(platform, page);

    analytics.record(
        "social_share",
        json!({
            "platform": platform.as_str(),
            "content_type": "catalog",
            "page_url": page.url,
        }),
    );

    link
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sweethome_storage::{MemoryBackend, Storage};

    fn page() -> SharePage {
        SharePage {
            url: "https://sweethomebakery.example/catalog?ref=share test".to_string(),
            title: "SweetHome Bakery".to_string(),
            text: "Check out the homemade pastry catalog!".to_string(),
        }
    }

    #[test]
    fn test_components_are_percent_encoded() {
        let page = page();

        for platform in [
            SharePlatform::Vk,
            SharePlatform::Facebook,
            SharePlatform::Telegram,
            SharePlatform::Twitter,
        ] {
            let link = share_url(platform, &page);
            // The raw space and the unescaped query must not leak through
            assert!(!link.contains("share test"), "{link}");
            assert!(link.contains("share%20test") || link.contains("share+test"), "{link}");
        }
    }

    #[test]
    fn test_platform_templates() {
        let page = page();

        assert!(share_url(SharePlatform::Vk, &page).starts_with("https://vk.com/share.php?url="));
        assert!(share_url(SharePlatform::Facebook, &page)
            .starts_with("https://www.facebook.com/sharer/sharer.php?u="));
        assert!(share_url(SharePlatform::Telegram, &page).starts_with("https://t.me/share/url?url="));
        assert!(share_url(SharePlatform::Twitter, &page)
            .starts_with("https://twitter.com/intent/tweet?url="));
    }

    #[test]
    fn test_share_catalog_records_event() {
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let analytics = EventLog::new(storage);

        share_catalog(SharePlatform::Telegram, &page(), &analytics);

        let event = analytics.history().into_iter().last().unwrap();
        assert_eq!(event.name, "social_share");
        assert_eq!(event.payload["platform"], "telegram");
    }
}
