//! Inline field editor for the user table.
//!
//! At most one field of one user is open for editing at a time. The session
//! holds no draft value: switching to another field abandons the previous
//! edit, and a commit writes straight into the store.
//!
//! ```text
//! Idle --start_editing--> EditingRole / EditingStatus
//! Editing* --start_editing--> Editing* (previous edit abandoned)
//! Editing* --commit--> Idle
//! Editing* --cancel--> Idle
//! ```

use rolekeeper_model::{User, UserField, UserId, UserStatus};
use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, EditError, Result};
use crate::store::EntityStore;

/// Current inline edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditSession {
    #[default]
    Idle,
    EditingRole {
        user_id: UserId,
    },
    EditingStatus {
        user_id: UserId,
    },
}

impl EditSession {
    pub fn editing(user_id: UserId, field: UserField) -> Self {
        match field {
            UserField::Role => EditSession::EditingRole { user_id },
            UserField::Status => EditSession::EditingStatus { user_id },
        }
    }

    /// The `(user, field)` pair being edited, if any.
    pub fn target(&self) -> Option<(UserId, UserField)> {
        match *self {
            EditSession::Idle => None,
            EditSession::EditingRole { user_id } => {
                Some((user_id, UserField::Role))
            }
            EditSession::EditingStatus { user_id } => {
                Some((user_id, UserField::Status))
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }

    pub fn is_editing(&self, user_id: UserId, field: UserField) -> bool {
        self.target() == Some((user_id, field))
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.target().map(|(user_id, _)| user_id)
    }
}

/// A committed value, typed by the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Any role name; checked against live roles only under enforced references
    Role(String),
    Status(UserStatus),
}

impl FieldValue {
    pub fn field(&self) -> UserField {
        match self {
            FieldValue::Role(_) => UserField::Role,
            FieldValue::Status(_) => UserField::Status,
        }
    }

    /// Parse presentation text into the domain of `field`.
    pub fn parse(field: UserField, raw: &str) -> Result<Self> {
        match field {
            UserField::Role => Ok(FieldValue::Role(raw.to_string())),
            UserField::Status => Ok(FieldValue::Status(raw.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFieldEditor {
    session: EditSession,
}

impl UserFieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    /// Open `field` of `user_id` for editing, replacing any open edit.
    pub fn start_editing(
        &mut self,
        user_id: UserId,
        field: UserField,
    ) -> EditSession {
        if let Some((previous_user, previous_field)) = self.session.target()
            && (previous_user, previous_field) != (user_id, field)
        {
            debug!(
                user_id = %previous_user,
                field = %previous_field,
                "Abandoning open edit"
            );
        }
        self.session = EditSession::editing(user_id, field);
        self.session
    }

    /// Close the session without touching the store. Returns the session that
    /// was open.
    pub fn cancel(&mut self) -> EditSession {
        std::mem::take(&mut self.session)
    }

    /// Write `value` into the user being edited and return to idle.
    ///
    /// The commit must name the open `(user, field)` pair. A value the store
    /// rejects keeps the session open so the operator can correct it. If the
    /// user vanished, the session closes and the store's missing-id policy
    /// decides the result.
    pub fn commit(
        &mut self,
        store: &mut EntityStore,
        user_id: UserId,
        value: FieldValue,
    ) -> Result<Option<User>> {
        self.ensure_open(user_id, value.field())?;

        let outcome = match value {
            FieldValue::Role(role) => store.set_user_role(user_id, role),
            FieldValue::Status(status) => store.set_user_status(user_id, status),
        };

        match outcome {
            Ok(updated) => {
                self.session = EditSession::Idle;
                Ok(updated)
            }
            Err(err @ CoreError::NotFound { .. }) => {
                self.session = EditSession::Idle;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn commit_role(
        &mut self,
        store: &mut EntityStore,
        user_id: UserId,
        role: impl Into<String>,
    ) -> Result<Option<User>> {
        self.commit(store, user_id, FieldValue::Role(role.into()))
    }

    pub fn commit_status(
        &mut self,
        store: &mut EntityStore,
        user_id: UserId,
        status: UserStatus,
    ) -> Result<Option<User>> {
        self.commit(store, user_id, FieldValue::Status(status))
    }

    /// Commit text typed or selected in the presentation layer.
    pub fn commit_raw(
        &mut self,
        store: &mut EntityStore,
        user_id: UserId,
        field: UserField,
        raw: &str,
    ) -> Result<Option<User>> {
        self.ensure_open(user_id, field)?;
        let value = FieldValue::parse(field, raw)?;
        self.commit(store, user_id, value)
    }

    fn ensure_open(&self, user_id: UserId, field: UserField) -> Result<()> {
        match self.session.target() {
            None => Err(EditError::NotEditing.into()),
            Some(target) if target == (user_id, field) => Ok(()),
            Some((active_user, active_field)) => {
                Err(EditError::SessionMismatch {
                    active_user,
                    active_field,
                    requested_user: user_id,
                    requested_field: field,
                }
                .into())
            }
        }
    }
}
