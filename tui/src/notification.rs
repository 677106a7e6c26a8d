//! Transient notification banners.
//!
//! A bounded queue of timestamped entries with TTL-based expiry. Run
//! completions, stop requests, and save results all surface here.

use serde::{Deserialize, Serialize};


/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn label(&self) -> &str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "ok",
            NotificationKind::Warning => "warn",
            NotificationKind::Error => "error",
        }
    }
}


/// A single banner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub body: String,
    pub created_ms: u64,
    /// `None` persists until dismissed.
    pub ttl_ms: Option<u64>,
}

impl Notification {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.ttl_ms {
            Some(ttl) => now_ms.saturating_sub(self.created_ms) >= ttl,
            None => false,
        }
    }

    pub fn summary(&self) -> String {
        format!("[{}] {}", self.kind.label(), self.body)
    }
}


/// Bounded notification queue; oldest entries evicted first.
pub struct NotificationCenter {
    entries: Vec<Notification>,
    max_entries: usize,
}

impl NotificationCenter {
    pub fn new(max_entries: usize) -> Self {
        NotificationCenter {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, kind: NotificationKind, body: &str, now_ms: u64, ttl_ms: Option<u64>) {
        self.entries.push(Notification {
            kind,
            body: body.to_string(),
            created_ms: now_ms,
            ttl_ms,
        });
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    /// Drop expired entries.
    pub fn prune(&mut self, now_ms: u64) {
        self.entries.retain(|entry| !entry.is_expired(now_ms));
    }

    /// The newest live entry, for the banner overlay.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn dismiss_latest(&mut self) {
        self.entries.pop();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_latest() {
        let mut center = NotificationCenter::new(10);
        center.push(NotificationKind::Info, "saved", 1000, Some(5000));
        center.push(NotificationKind::Error, "boom", 2000, Some(5000));
        assert_eq!(center.len(), 2);
        assert_eq!(center.latest().unwrap().body, "boom");
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut center = NotificationCenter::new(2);
        center.push(NotificationKind::Info, "a", 1, None);
        center.push(NotificationKind::Info, "b", 2, None);
        center.push(NotificationKind::Info, "c", 3, None);
        assert_eq!(center.len(), 2);
        assert_eq!(center.latest().unwrap().body, "c");
    }

    #[test]
    fn prune_removes_expired_only() {
        let mut center = NotificationCenter::new(10);
        center.push(NotificationKind::Info, "old", 1000, Some(1000));
        center.push(NotificationKind::Info, "fresh", 1500, Some(1000));
        center.push(NotificationKind::Info, "forever", 1000, None);
        center.prune(2100);
        assert_eq!(center.len(), 2);
        assert_eq!(center.entries[0].body, "fresh");
        assert_eq!(center.entries[1].body, "forever");
    }

    #[test]
    fn dismiss_latest_pops() {
        let mut center = NotificationCenter::new(10);
        center.push(NotificationKind::Warning, "careful", 1000, None);
        center.dismiss_latest();
        assert!(center.is_empty());
        center.dismiss_latest();
        assert!(center.is_empty());
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let entry = Notification {
            kind: NotificationKind::Info,
            body: "x".into(),
            created_ms: 1000,
            ttl_ms: Some(500),
        };
        assert!(!entry.is_expired(1499));
        assert!(entry.is_expired(1500));
    }

    #[test]
    fn summary_includes_kind_label() {
        let entry = Notification {
            kind: NotificationKind::Success,
            body: "run finished".into(),
            created_ms: 0,
            ttl_ms: None,
        };
        assert_eq!(entry.summary(), "[ok] run finished");
    }
}
