//! Dashboard facade
//!
//! Bundles the entity store, the inline editor and the current user filter
//! behind a single intent-driven entry point for the presentation layer.

use rolekeeper_model::{
    NewRole, NewUser, PermissionType, Role, RoleId, User, UserField,
    UserFilter, UserId, UserStatus,
};
use tracing::debug;

use crate::editor::{EditSession, FieldValue, UserFieldEditor};
use crate::error::Result;
use crate::notifications::NotificationEvent;
use crate::query::{UserQuery, UserView};
use crate::store::EntityStore;

/// An operator action dispatched by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardIntent {
    AddUser(NewUser),
    DeleteUser(UserId),
    AddRole(NewRole),
    DeleteRole(RoleId),
    TogglePermission {
        role_id: RoleId,
        permission: PermissionType,
    },
    StartEditing {
        user_id: UserId,
        field: UserField,
    },
    CommitEdit {
        user_id: UserId,
        value: FieldValue,
    },
    /// Commit unparsed text for `field`, e.g. straight from a select box
    CommitRawEdit {
        user_id: UserId,
        field: UserField,
        value: String,
    },
    CancelEdit,
    SetSearch(String),
    SetRoleFilter(Option<String>),
    SetStatusFilter(Option<UserStatus>),
    ClearFilters,
}

/// What an intent produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    UserAdded(User),
    /// `None` when the id was unknown and ignored
    UserDeleted(Option<User>),
    UserUpdated(Option<User>),
    RoleAdded(Role),
    RoleDeleted(Option<Role>),
    RoleUpdated(Option<Role>),
    EditSession(EditSession),
    FilterChanged(UserFilter),
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    store: EntityStore,
    editor: UserFieldEditor,
    filter: UserFilter,
    query: UserQuery,
}

impl Dashboard {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Dashboard over the demo data.
    pub fn seeded() -> Self {
        Self::new(EntityStore::seeded())
    }

    pub fn apply(&mut self, intent: DashboardIntent) -> Result<IntentOutcome> {
        match intent {
            DashboardIntent::AddUser(candidate) => {
                self.store.add_user(candidate).map(IntentOutcome::UserAdded)
            }
            DashboardIntent::DeleteUser(user_id) => {
                let removed = self.store.delete_user(user_id)?;
                if removed.is_some()
                    && self.editor.session().user_id() == Some(user_id)
                {
                    debug!(
                        user_id = %user_id,
                        "Closing edit session for deleted user"
                    );
                    self.editor.cancel();
                }
                Ok(IntentOutcome::UserDeleted(removed))
            }
            DashboardIntent::AddRole(candidate) => {
                self.store.add_role(candidate).map(IntentOutcome::RoleAdded)
            }
            DashboardIntent::DeleteRole(role_id) => self
                .store
                .delete_role(role_id)
                .map(IntentOutcome::RoleDeleted),
            DashboardIntent::TogglePermission {
                role_id,
                permission,
            } => self
                .store
                .toggle_permission(role_id, permission)
                .map(IntentOutcome::RoleUpdated),
            DashboardIntent::StartEditing { user_id, field } => Ok(
                IntentOutcome::EditSession(
                    self.editor.start_editing(user_id, field),
                ),
            ),
            DashboardIntent::CommitEdit { user_id, value } => self
                .editor
                .commit(&mut self.store, user_id, value)
                .map(IntentOutcome::UserUpdated),
            DashboardIntent::CommitRawEdit {
                user_id,
                field,
                value,
            } => self
                .editor
                .commit_raw(&mut self.store, user_id, field, &value)
                .map(IntentOutcome::UserUpdated),
            DashboardIntent::CancelEdit => {
                self.editor.cancel();
                Ok(IntentOutcome::EditSession(self.editor.session()))
            }
            DashboardIntent::SetSearch(search) => {
                self.filter.search = search;
                Ok(self.filter_changed())
            }
            DashboardIntent::SetRoleFilter(role) => {
                self.filter.role = role.filter(|role| !role.is_empty());
                Ok(self.filter_changed())
            }
            DashboardIntent::SetStatusFilter(status) => {
                self.filter.status = status;
                Ok(self.filter_changed())
            }
            DashboardIntent::ClearFilters => {
                self.filter = UserFilter::default();
                Ok(self.filter_changed())
            }
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    pub fn roles(&self) -> &[Role] {
        self.store.roles()
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    /// Users matching the current filter, recomputed only when the store or
    /// the filter changed.
    pub fn visible_users(&mut self) -> UserView<'_> {
        self.query.evaluate(&self.store, &self.filter)
    }

    pub fn edit_session(&self) -> EditSession {
        self.editor.session()
    }

    /// Take the pending confirmations. Only the newest
    /// [`MAX_PENDING_NOTIFICATIONS`](crate::notifications::MAX_PENDING_NOTIFICATIONS)
    /// are kept between drains.
    pub fn drain_notifications(&mut self) -> Vec<NotificationEvent> {
        self.store.drain_notifications()
    }

    fn filter_changed(&self) -> IntentOutcome {
        debug!(
            search = %self.filter.search,
            role = ?self.filter.role,
            status = ?self.filter.status,
            "User filter changed"
        );
        IntentOutcome::FilterChanged(self.filter.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn filter_intents_update_the_view() {
        let mut dashboard = Dashboard::seeded();

        dashboard
            .apply(DashboardIntent::SetStatusFilter(Some(UserStatus::Inactive)))
            .unwrap();
        assert_eq!(dashboard.visible_users().names(), vec!["Bob Wilson"]);

        dashboard
            .apply(DashboardIntent::SetRoleFilter(Some(String::new())))
            .unwrap();
        assert_eq!(dashboard.filter().role, None);

        dashboard.apply(DashboardIntent::ClearFilters).unwrap();
        let view = dashboard.visible_users();
        assert_eq!(view.len(), 3);
        assert!(!view.is_filtered());
    }

    #[test]
    fn deleting_edited_user_closes_session() {
        let mut dashboard = Dashboard::seeded();
        dashboard
            .apply(DashboardIntent::StartEditing {
                user_id: UserId(2),
                field: UserField::Role,
            })
            .unwrap();

        dashboard.apply(DashboardIntent::DeleteUser(UserId(2))).unwrap();
        assert!(dashboard.edit_session().is_idle());
    }

    #[test]
    fn deleting_other_user_keeps_session() {
        let mut dashboard = Dashboard::seeded();
        dashboard
            .apply(DashboardIntent::StartEditing {
                user_id: UserId(2),
                field: UserField::Status,
            })
            .unwrap();

        dashboard.apply(DashboardIntent::DeleteUser(UserId(1))).unwrap();
        assert_eq!(
            dashboard.edit_session(),
            EditSession::EditingStatus { user_id: UserId(2) }
        );
    }

    #[test]
    fn raw_commit_flows_through_editor() {
        let mut dashboard = Dashboard::seeded();
        dashboard
            .apply(DashboardIntent::StartEditing {
                user_id: UserId(1),
                field: UserField::Status,
            })
            .unwrap();

        let err = dashboard
            .apply(DashboardIntent::CommitRawEdit {
                user_id: UserId(1),
                field: UserField::Status,
                value: "paused".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Model(_)));

        let outcome = dashboard
            .apply(DashboardIntent::CommitRawEdit {
                user_id: UserId(1),
                field: UserField::Status,
                value: "inactive".into(),
            })
            .unwrap();
        let IntentOutcome::UserUpdated(Some(user)) = outcome else {
            panic!("expected updated user, got {outcome:?}");
        };
        assert_eq!(user.status, UserStatus::Inactive);
        assert!(dashboard.edit_session().is_idle());
    }

    #[test]
    fn every_mutation_emits_a_notification() {
        let mut dashboard = Dashboard::seeded();
        dashboard
            .apply(DashboardIntent::AddRole(NewRole::new(
                "auditor",
                "Reads logs",
                [PermissionType::Read],
            )))
            .unwrap();
        dashboard
            .apply(DashboardIntent::TogglePermission {
                role_id: RoleId(4),
                permission: PermissionType::Update,
            })
            .unwrap();
        dashboard.apply(DashboardIntent::DeleteRole(RoleId(4))).unwrap();
        dashboard.apply(DashboardIntent::DeleteRole(RoleId(4))).unwrap();

        let messages: Vec<_> = dashboard
            .drain_notifications()
            .iter()
            .map(|event| event.message())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Role has been added.",
                "Permission update has been granted.",
                "Role has been deleted.",
            ]
        );
        assert!(dashboard.drain_notifications().is_empty());
    }
}
