//! Transient notifications raised by the screens.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Instant,
}

/// Notifications expire on their own once `ttl` has passed.
#[derive(Debug, Clone)]
pub struct Notices {
    ttl: Duration,
    raised: Vec<Notice>,
}
impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            raised: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.raise(NoticeKind::Info, message.into());
    }
    pub fn error(&mut self, message: impl Into<String>) {
        self.raise(NoticeKind::Error, message.into());
    }

    fn raise(&mut self, kind: NoticeKind, message: String) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.raised.retain(|n| now.duration_since(n.raised_at) < ttl);
        self.raised.push(Notice {
            kind,
            message,
            raised_at: now,
        });
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.raised.last()
    }

    pub fn active_at(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        let ttl = self.ttl;
        self.raised
            .iter()
            .filter(move |n| now.saturating_duration_since(n.raised_at) < ttl)
    }

    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        self.active_at(Instant::now())
    }

    pub fn has_active_error_at(&self, now: Instant) -> bool {
        self.active_at(now).any(|n| n.kind == NoticeKind::Error)
    }

    pub fn has_active_error(&self) -> bool {
        self.has_active_error_at(Instant::now())
    }
}
