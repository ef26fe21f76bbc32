// src/integrations/notifications.rs
//
// Notification sink: fire-and-forget user-facing notices (toasts in a UI)

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Writes notices to the log
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => log::info!("[NOTICE] {}", message),
            NoticeKind::Error => log::warn!("[NOTICE] {}", message),
        }
    }
}

/// Buffers notices until the host drains them
#[derive(Default)]
pub struct QueuedNotifier {
    notices: Mutex<VecDeque<Notice>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl NotificationSink for QueuedNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Notice {
                message: message.to_string(),
                kind,
            });
    }
}
