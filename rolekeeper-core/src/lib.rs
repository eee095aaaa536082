//! # Rolekeeper Core
//!
//! In-memory engine behind the Rolekeeper RBAC admin console.
//!
//! ## Overview
//!
//! - **Entity Store**: owns users and roles, assigns monotonic ids and enforces
//!   the configured [`StorePolicy`]
//! - **Permission toggling**: flips one permission on one role
//! - **Inline editing**: a single-slot session for editing a user's role or
//!   status
//! - **Queries**: stable, case-insensitive user search with role and status
//!   filters, memoized per store and revision
//! - **Dashboard**: intent-driven facade tying the pieces together for a
//!   presentation layer
//!
//! Everything is synchronous and single-owner; mutating calls take `&mut`.
//!
//! ## Example
//!
//! ```
//! use rolekeeper_core::{Dashboard, DashboardIntent};
//! use rolekeeper_model::{NewUser, UserStatus};
//!
//! let mut dashboard = Dashboard::seeded();
//! dashboard
//!     .apply(DashboardIntent::AddUser(NewUser::new(
//!         "Amy Lane",
//!         "amy@x.com",
//!         "viewer",
//!         UserStatus::Active,
//!     )))
//!     .unwrap();
//! dashboard.apply(DashboardIntent::SetSearch("a".into())).unwrap();
//! dashboard
//!     .apply(DashboardIntent::SetRoleFilter(Some("viewer".into())))
//!     .unwrap();
//!
//! assert_eq!(
//!     dashboard.visible_users().names(),
//!     vec!["Bob Wilson", "Amy Lane"]
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Intent-driven facade for presentation layers
pub mod dashboard;

/// Inline edit session for user fields
pub mod editor;

/// Error types and error handling utilities
pub mod error;

/// Confirmation events for toasts
pub mod notifications;

/// Strictness settings for the store
pub mod policy;

/// User search and filtering
pub mod query;

/// Canonical user and role collections
pub mod store;

pub use dashboard::{Dashboard, DashboardIntent, IntentOutcome};
pub use editor::{EditSession, FieldValue, UserFieldEditor};
pub use error::{CoreError, EditError, EntityKind, Result, ValidationError};
pub use notifications::{
    MAX_PENDING_NOTIFICATIONS, Notification, NotificationEvent,
};
pub use policy::{
    MissingIdPolicy, RoleReferenceMode, StorePolicy, ValidationMode,
};
pub use query::{UserQuery, UserView, filter_users};
pub use store::{EntityStore, IdSequence, toggle_permission};

pub use rolekeeper_model as model;
