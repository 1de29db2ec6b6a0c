//! # Scripted Chat Widget
//!
//! A canned-response chat: three predefined topics, keyword-matched
//! replies to free text, and a fallback. No model, no backend — the
//! script IS the bot.
//!
//! ## Reply Scheduling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Chat Timing                                          │
//! │                                                                         │
//! │  select_topic("delivery")                                               │
//! │    t+0        visitor question appended                                 │
//! │    t+1.0s     bot answer appended                                       │
//! │    t+1.5s     optional follow-up appended (custom-cake topic)           │
//! │                                                                         │
//! │  send_message("how much is the cake?")                                  │
//! │    t+0        visitor message appended                                  │
//! │    t+1.5s     keyword-matched (or fallback) reply appended              │
//! │                                                                         │
//! │  schedule_auto_open(30s)                                                │
//! │    fires once per session, only if the visitor never opened the chat   │
//! │                                                                         │
//! │  Every delayed action is an owned task. Closing or dropping the        │
//! │  widget aborts them all: a dead widget never speaks.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::debug;

use sweethome_core::validation::validate_text;
use sweethome_core::{
    DELIVERY_WINDOW_END, DELIVERY_WINDOW_START, ESTIMATED_DELIVERY_HOURS,
    FREE_DELIVERY_THRESHOLD, STANDARD_DELIVERY_COST,
};
use sweethome_storage::{slot::session, SessionStore};

use crate::analytics::EventLog;
use crate::error::SiteError;
use crate::state::SiteConfig;

// =============================================================================
// Transcript Types
// =============================================================================

/// Who said it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    Visitor,
    Bot,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        ChatMessage {
            sender,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

// =============================================================================
// Chat Script
// =============================================================================

/// A canned question/answer topic offered as a quick button.
#[derive(Debug, Clone)]
pub struct CannedTopic {
    /// Stable topic key (what the button invokes).
    pub key: &'static str,
    /// The visitor-side question text.
    pub question: &'static str,
    /// The bot's answer.
    pub answer: String,
    /// An optional second message sent shortly after the answer.
    pub follow_up: Option<String>,
}

/// The complete response script: topics, keyword replies, fallback.
///
/// The wording is replaceable content; the matching behavior is not.
#[derive(Debug, Clone)]
pub struct ChatScript {
    topics: Vec<CannedTopic>,
    keyword_replies: Vec<(Vec<&'static str>, String)>,
    fallback: String,
}

impl ChatScript {
    /// The script as shipped with the site.
    pub fn standard(config: &SiteConfig) -> Self {
        let phone = &config.contact_phone;

        ChatScript {
            topics: vec![
                CannedTopic {
                    key: "delivery",
                    question: "Delivery terms",
                    answer: format!(
                        "We deliver daily from {DELIVERY_WINDOW_START} to {DELIVERY_WINDOW_END}. \
                         Delivery is free for orders from {FREE_DELIVERY_THRESHOLD}, \
                         otherwise {STANDARD_DELIVERY_COST}. \
                         Average delivery time is {ESTIMATED_DELIVERY_HOURS} hours."
                    ),
                    follow_up: None,
                },
                CannedTopic {
                    key: "payment",
                    question: "Payment methods",
                    answer: "We accept cash on delivery, bank cards and online payment. \
                             You can also pay the courier by card."
                        .to_string(),
                    follow_up: None,
                },
                CannedTopic {
                    key: "custom",
                    question: "Custom cakes",
                    answer: "Yes, we make custom-designed cakes! Send us a photo or a \
                             description of your idea and we will prepare a quote within 2 hours."
                        .to_string(),
                    follow_up: Some(format!(
                        "Want to discuss the details? Call us at {phone} or leave a \
                         request on the site."
                    )),
                },
            ],
            keyword_replies: vec![
                (
                    vec!["price", "cost", "how much"],
                    "Prices are listed in the catalog. I can help you pick something \
                     for your budget!"
                        .to_string(),
                ),
                (
                    vec!["time", "when", "hours"],
                    format!(
                        "We are open daily from {DELIVERY_WINDOW_START} to {DELIVERY_WINDOW_END}. \
                         Delivery can be scheduled for any time in that window."
                    ),
                ),
                (
                    vec!["order", "checkout"],
                    format!(
                        "To place an order, pick products in the catalog and press \
                         'Order'. Or call us at {phone}."
                    ),
                ),
            ],
            fallback: format!(
                "Thanks for your question! For precise details call us at {phone} \
                 or leave a request on the site."
            ),
        }
    }

    /// Looks up a canned topic by key.
    pub fn topic(&self, key: &str) -> Option<&CannedTopic> {
        self.topics.iter().find(|t| t.key == key)
    }

    /// The keys of all offered topics, in display order.
    pub fn topic_keys(&self) -> Vec<&'static str> {
        self.topics.iter().map(|t| t.key).collect()
    }

    /// Picks the reply for a free-text message.
    ///
    /// First keyword group with any match wins; no match means the
    /// fallback. Matching is case-insensitive substring search.
    pub fn reply_for(&self, message: &str) -> &str {
        let lowered = message.to_lowercase();
        for (keywords, reply) in &self.keyword_replies {
            if keywords.iter().any(|k| lowered.contains(k)) {
                return reply;
            }
        }
        &self.fallback
    }
}

// =============================================================================
// Chat Widget
// =============================================================================

/// The chat widget state machine.
pub struct ChatWidget {
    script: ChatScript,
    transcript: Arc<Mutex<Vec<ChatMessage>>>,
    open: Arc<AtomicBool>,
    session: Arc<SessionStore>,
    analytics: Arc<EventLog>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    reply_delay: Duration,
    followup_delay: Duration,
    keyword_reply_delay: Duration,
}

impl ChatWidget {
    /// Creates a closed widget with the standard script.
    ///
    /// Must be constructed inside a tokio runtime; replies are spawned
    /// as delayed tasks.
    pub fn new(config: &SiteConfig, session: Arc<SessionStore>, analytics: Arc<EventLog>) -> Self {
        ChatWidget {
            script: ChatScript::standard(config),
            transcript: Arc::new(Mutex::new(Vec::new())),
            open: Arc::new(AtomicBool::new(false)),
            session,
            analytics,
            tasks: Mutex::new(Vec::new()),
            reply_delay: Duration::from_millis(config.chat_reply_delay_ms),
            followup_delay: Duration::from_millis(config.chat_followup_delay_ms),
            keyword_reply_delay: Duration::from_millis(config.chat_keyword_reply_delay_ms),
        }
    }

    /// Opens or closes the widget; returns the new open state.
    ///
    /// Opening marks the session and records `chat_opened`. Closing
    /// aborts every pending scheduled reply.
    pub fn toggle(&self) -> bool {
        let was_open = self.open.fetch_xor(true, Ordering::SeqCst);
        if was_open {
            self.abort_pending();
            debug!("chat closed");
            false
        } else {
            self.session.set(session::CHAT_OPENED, "true");
            self.analytics.record("chat_opened", json!({}));
            debug!("chat opened");
            true
        }
    }

    /// Checks the open state.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Schedules the once-per-session auto-open nudge.
    ///
    /// A no-op when the chat was already opened this session. The timer
    /// is owned; teardown cancels it.
    pub fn schedule_auto_open(&self, delay: Duration) {
        if self.session.is_set(session::CHAT_OPENED) {
            return;
        }

        let open = Arc::clone(&self.open);
        let session = Arc::clone(&self.session);
        let analytics = Arc::clone(&self.analytics);

        self.track(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The visitor may have opened (and even closed) the chat
            // while we slept; the session flag is the source of truth
            if session.is_set(session::CHAT_OPENED) {
                return;
            }
            if !open.swap(true, Ordering::SeqCst) {
                session.set(session::CHAT_OPENED, "true");
                analytics.record("chat_opened", json!({ "auto": true }));
                debug!("chat auto-opened");
            }
        }));
    }

    /// Handles a canned-topic button press.
    ///
    /// Appends the visitor-side question immediately and schedules the
    /// bot's answer (plus the optional follow-up).
    pub fn select_topic(&self, key: &str) -> Result<(), SiteError> {
        let topic = self
            .script
            .topic(key)
            .ok_or_else(|| SiteError::chat(format!("Unknown chat topic: {key}")))?;

        self.append(ChatMessage::new(ChatSender::Visitor, topic.question));

        self.analytics.record(
            "chat_question",
            json!({
                "question_type": topic.key,
                "question": topic.question,
            }),
        );

        let transcript = Arc::clone(&self.transcript);
        let answer = topic.answer.clone();
        let follow_up = topic.follow_up.clone();
        let reply_delay = self.reply_delay;
        let followup_delay = self.followup_delay;

        self.track(tokio::spawn(async move {
            tokio::time::sleep(reply_delay).await;
            Self::append_to(&transcript, ChatMessage::new(ChatSender::Bot, answer));

            if let Some(follow_up) = follow_up {
                tokio::time::sleep(followup_delay).await;
                Self::append_to(&transcript, ChatMessage::new(ChatSender::Bot, follow_up));
            }
        }));

        Ok(())
    }

    /// Handles free-text visitor input.
    ///
    /// Appends the message immediately and schedules the keyword-matched
    /// (or fallback) reply.
    pub fn send_message(&self, text: &str) -> Result<(), SiteError> {
        validate_text("message", text)?;
        let text = text.trim().to_string();

        self.append(ChatMessage::new(ChatSender::Visitor, text.clone()));

        self.analytics.record(
            "chat_message",
            json!({
                "message": text,
                "direction": "outgoing",
            }),
        );

        let transcript = Arc::clone(&self.transcript);
        let reply = self.script.reply_for(&text).to_string();
        let delay = self.keyword_reply_delay;

        self.track(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Self::append_to(&transcript, ChatMessage::new(ChatSender::Bot, reply));
        }));

        Ok(())
    }

    /// Snapshot of the transcript, oldest first.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// The script in use (topic buttons for a presentation layer).
    pub fn script(&self) -> &ChatScript {
        &self.script
    }

    /// Aborts every scheduled reply and the auto-open nudge.
    pub fn abort_pending(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }

    fn append(&self, message: ChatMessage) {
        Self::append_to(&self.transcript, message);
    }

    fn append_to(transcript: &Mutex<Vec<ChatMessage>>, message: ChatMessage) {
        if let Ok(mut transcript) = transcript.lock() {
            transcript.push(message);
        }
    }

    fn track(&self, task: JoinHandle<()>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| !t.is_finished());
            tasks.push(task);
        }
    }
}

/// A dropped widget never speaks again.
impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("open", &self.is_open())
            .field("messages", &self.transcript().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweethome_storage::{MemoryBackend, Storage};

    /// Config with millisecond-scale chat delays for fast tests.
    fn fast_config() -> SiteConfig {
        SiteConfig {
            chat_reply_delay_ms: 10,
            chat_followup_delay_ms: 10,
            chat_keyword_reply_delay_ms: 10,
            ..SiteConfig::default()
        }
    }

    fn widget() -> (Arc<SessionStore>, Arc<EventLog>, ChatWidget) {
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let analytics = Arc::new(EventLog::new(storage));
        let session = Arc::new(SessionStore::new());
        let widget = ChatWidget::new(&fast_config(), Arc::clone(&session), Arc::clone(&analytics));
        (session, analytics, widget)
    }

    #[test]
    fn test_script_keyword_matching() {
        let script = ChatScript::standard(&SiteConfig::default());

        assert!(script.reply_for("What is the PRICE of this?").contains("catalog"));
        assert!(script.reply_for("when are you open").contains("09:00"));
        assert!(script.reply_for("I want to order a cake").contains("Order"));
        // Unmatched input falls back
        assert!(script.reply_for("hello there").contains("Thanks for your question"));
    }

    #[test]
    fn test_script_topics() {
        let script = ChatScript::standard(&SiteConfig::default());
        assert_eq!(script.topic_keys(), vec!["delivery", "payment", "custom"]);
        assert!(script.topic("delivery").unwrap().answer.contains("100.00 BYN"));
        assert!(script.topic("custom").unwrap().follow_up.is_some());
        assert!(script.topic("refunds").is_none());
    }

    #[tokio::test]
    async fn test_topic_answer_arrives_after_delay() {
        let (_session, _analytics, widget) = widget();

        widget.select_topic("delivery").unwrap();

        // The visitor question is visible immediately, the answer is not
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].sender, ChatSender::Visitor);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].sender, ChatSender::Bot);
    }

    #[tokio::test]
    async fn test_custom_topic_sends_follow_up() {
        let (_session, _analytics, widget) = widget();
        widget.select_topic("custom").unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 3);
        assert!(transcript[2].text.contains("discuss the details"));
    }

    #[tokio::test]
    async fn test_unknown_topic_is_error() {
        let (_session, _analytics, widget) = widget();
        assert!(widget.select_topic("refunds").is_err());
        assert!(widget.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_free_text_gets_keyword_reply() {
        let (_session, _analytics, widget) = widget();
        widget.send_message("how much for the honey cake?").unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 2);
        assert!(transcript[1].text.contains("budget"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (_session, _analytics, widget) = widget();
        assert!(widget.send_message("   ").is_err());
        assert!(widget.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_closing_aborts_scheduled_replies() {
        let (_session, _analytics, widget) = widget();

        widget.toggle(); // open
        widget.select_topic("delivery").unwrap();
        widget.toggle(); // close; pending reply aborted

        tokio::time::sleep(Duration::from_millis(60)).await;
        // Only the visitor question ever landed
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].sender, ChatSender::Visitor);
    }

    #[tokio::test]
    async fn test_auto_open_fires_once_per_session() {
        let (session, _analytics, widget) = widget();

        widget.schedule_auto_open(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(widget.is_open());
        assert!(session.is_set(session::CHAT_OPENED));

        // A second widget over the same session never auto-opens
        let storage = Arc::new(Storage::new(MemoryBackend::new()));
        let analytics = Arc::new(EventLog::new(storage));
        let second = ChatWidget::new(&fast_config(), Arc::clone(&session), analytics);
        second.schedule_auto_open(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!second.is_open());
    }

    #[tokio::test]
    async fn test_manual_open_suppresses_auto_open() {
        let (_session, _analytics, widget) = widget();

        widget.schedule_auto_open(Duration::from_millis(30));
        widget.toggle(); // manual open marks the session
        widget.toggle(); // and close again

        tokio::time::sleep(Duration::from_millis(80)).await;
        // The close aborted the nudge, and the session flag would have
        // stopped it anyway
        assert!(!widget.is_open());
    }

    #[tokio::test]
    async fn test_chat_records_events() {
        let (_session, analytics, widget) = widget();
        widget.toggle();
        widget.select_topic("payment").unwrap();
        widget.send_message("when do you open?").unwrap();

        let names: Vec<String> = analytics.history().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["chat_opened", "chat_question", "chat_message"]);
    }
}
