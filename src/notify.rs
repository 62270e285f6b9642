use std::collections::VecDeque;
use std::time::{Duration, Instant};
use strum_macros::{Display, EnumString};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn occupied(spot_number: &str) -> Self {
        Self::error(format!("Spot {} is occupied!", spot_number))
    }
}

#[derive(Debug, Clone)]
struct Toast {
    note: Notification,
    expires_at: Instant,
}

/// Non-blocking, auto-dismissing message queue.
#[derive(Debug, Clone)]
pub struct Toasts {
    ttl: Duration,
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, note: Notification) {
        self.push_at(note, Instant::now());
    }

    pub fn push_at(&mut self, note: Notification, now: Instant) {
        self.dismiss_expired(now);
        match note.level {
            Level::Error => error!("🔔 {}", note.message),
            Level::Warning => warn!("🔔 {}", note.message),
            Level::Info | Level::Success => info!("🔔 {}", note.message),
        }
        self.queue.push_back(Toast {
            note,
            expires_at: now + self.ttl,
        });
    }

    pub fn dismiss_expired(&mut self, now: Instant) {
        self.queue.retain(|t| t.expires_at > now);
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.queue
            .iter()
            .filter(move |t| t.expires_at > now)
            .map(|t| &t.note)
    }

    /// Every queued notification, expired or not.
    pub fn all(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter().map(|t| &t.note)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
