use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient outcome message for the last user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub issued_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::at(NoticeKind::Success, text, Instant::now())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::at(NoticeKind::Error, text, Instant::now())
    }

    pub fn at(kind: NoticeKind, text: impl Into<String>, issued_at: Instant) -> Self {
        Self {
            kind,
            text: text.into(),
            issued_at,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= NOTICE_TTL
    }
}
