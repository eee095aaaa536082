//! Confirmation events queued by the store for the presentation layer.
//!
//! These are informational; failures travel through `CoreError` instead.

use chrono::{DateTime, Utc};
use rolekeeper_model::{PermissionType, RoleId, UserField, UserId};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    UserAdded {
        user_id: UserId,
        name: String,
    },
    UserDeleted {
        user_id: UserId,
    },
    UserUpdated {
        user_id: UserId,
        field: UserField,
    },
    RoleAdded {
        role_id: RoleId,
        name: String,
    },
    RoleDeleted {
        role_id: RoleId,
    },
    PermissionToggled {
        role_id: RoleId,
        permission: PermissionType,
        granted: bool,
    },
}

impl Notification {
    /// Toast text for this event.
    pub fn message(&self) -> String {
        match self {
            Notification::UserAdded { .. } => "User has been added.".to_string(),
            Notification::UserDeleted { .. } => {
                "User has been deleted.".to_string()
            }
            Notification::UserUpdated { field, .. } => {
                format!("User {field} has been updated.")
            }
            Notification::RoleAdded { .. } => "Role has been added.".to_string(),
            Notification::RoleDeleted { .. } => {
                "Role has been deleted.".to_string()
            }
            Notification::PermissionToggled {
                permission,
                granted: true,
                ..
            } => format!("Permission {permission} has been granted."),
            Notification::PermissionToggled {
                permission,
                granted: false,
                ..
            } => format!("Permission {permission} has been revoked."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationEvent {
    /// Monotonic per store, starting at 1
    pub sequence: u64,
    pub notification: Notification,
    pub emitted_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn message(&self) -> String {
        self.notification.message()
    }
}

/// Undrained notifications kept per store; older ones are dropped first.
pub const MAX_PENDING_NOTIFICATIONS: usize = 256;

/// FIFO of pending notifications, bounded by [`MAX_PENDING_NOTIFICATIONS`].
#[derive(Debug, Clone, Default)]
pub(crate) struct NotificationQueue {
    pending: Vec<NotificationEvent>,
    next_sequence: u64,
}

impl NotificationQueue {
    pub(crate) fn push(&mut self, notification: Notification) {
        self.next_sequence += 1;
        self.pending.push(NotificationEvent {
            sequence: self.next_sequence,
            notification,
            emitted_at: Utc::now(),
        });

        let overflow =
            self.pending.len().saturating_sub(MAX_PENDING_NOTIFICATIONS);
        if overflow > 0 {
            self.pending.drain(..overflow);
            trace!(dropped = overflow, "Dropped oldest undrained notifications");
        }
    }

    pub(crate) fn pending(&self) -> &[NotificationEvent] {
        &self.pending
    }

    pub(crate) fn drain(&mut self) -> Vec<NotificationEvent> {
        std::mem::take(&mut self.pending)
    }
}
