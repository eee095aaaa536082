//! End-to-end operator flows against the seeded console.

use anyhow::Result;
use rolekeeper_core::{
    Dashboard, DashboardIntent, EditSession, FieldValue, IntentOutcome,
};
use rolekeeper_model::{
    NewUser, PermissionSet, PermissionType, RoleId, UserField, UserId,
    UserStatus,
};

fn amy() -> NewUser {
    NewUser::new("Amy Lane", "amy@x.com", "viewer", UserStatus::Active)
}

#[test]
fn add_then_filter_by_search_and_role() -> Result<()> {
    let mut dashboard = Dashboard::seeded();
    dashboard.apply(DashboardIntent::AddUser(amy()))?;

    dashboard.apply(DashboardIntent::SetSearch("a".into()))?;
    dashboard.apply(DashboardIntent::SetRoleFilter(Some("viewer".into())))?;

    let view = dashboard.visible_users();
    assert_eq!(view.names(), vec!["Bob Wilson", "Amy Lane"]);
    assert_eq!(view.ids(), vec![UserId(3), UserId(4)]);
    Ok(())
}

#[test]
fn viewer_create_toggle_is_idempotent() -> Result<()> {
    let mut dashboard = Dashboard::seeded();
    let viewer = RoleId(3);

    let toggle = DashboardIntent::TogglePermission {
        role_id: viewer,
        permission: PermissionType::Create,
    };

    let IntentOutcome::RoleUpdated(Some(role)) = dashboard.apply(toggle.clone())?
    else {
        panic!("viewer should exist");
    };
    assert_eq!(
        role.permissions,
        PermissionSet::from([PermissionType::Read, PermissionType::Create])
    );

    let IntentOutcome::RoleUpdated(Some(role)) = dashboard.apply(toggle)? else {
        panic!("viewer should exist");
    };
    assert_eq!(role.permissions, PermissionSet::from([PermissionType::Read]));
    Ok(())
}

#[test]
fn deleting_editor_role_keeps_user_references() -> Result<()> {
    let mut dashboard = Dashboard::seeded();
    let editor_id = dashboard
        .store()
        .role_by_name("editor")
        .map(|role| role.id)
        .expect("seeded editor role");

    dashboard.apply(DashboardIntent::DeleteRole(editor_id))?;

    assert!(dashboard.store().role_by_name("editor").is_none());
    let editors: Vec<_> = dashboard
        .users()
        .iter()
        .filter(|user| user.role == "editor")
        .map(|user| user.name.as_str())
        .collect();
    assert_eq!(editors, vec!["Jane Smith"]);
    Ok(())
}

#[test]
fn inactive_filter_ignores_name_and_email() -> Result<()> {
    let mut dashboard = Dashboard::seeded();
    dashboard.apply(DashboardIntent::AddUser(NewUser::new(
        "Zed",
        "zed@elsewhere.org",
        "admin",
        UserStatus::Inactive,
    )))?;

    dashboard.apply(DashboardIntent::SetSearch(String::new()))?;
    dashboard.apply(DashboardIntent::SetRoleFilter(None))?;
    dashboard
        .apply(DashboardIntent::SetStatusFilter(Some(UserStatus::Inactive)))?;

    let view = dashboard.visible_users();
    assert_eq!(view.names(), vec!["Bob Wilson", "Zed"]);
    assert!(view.iter().all(|user| user.status == UserStatus::Inactive));
    Ok(())
}

#[test]
fn empty_match_is_distinct_from_no_filter() -> Result<()> {
    let mut dashboard = Dashboard::seeded();

    dashboard.apply(DashboardIntent::SetSearch("nobody-here".into()))?;
    let view = dashboard.visible_users();
    assert!(view.is_empty());
    assert!(view.is_empty_match());

    let mut empty = Dashboard::default();
    let view = empty.visible_users();
    assert!(view.is_empty());
    assert!(!view.is_empty_match());
    Ok(())
}

#[test]
fn inline_edit_round_trip() -> Result<()> {
    let mut dashboard = Dashboard::seeded();

    dashboard.apply(DashboardIntent::StartEditing {
        user_id: UserId(1),
        field: UserField::Role,
    })?;
    // Switching abandons the role edit without writing anything.
    let outcome = dashboard.apply(DashboardIntent::StartEditing {
        user_id: UserId(3),
        field: UserField::Status,
    })?;
    assert_eq!(
        outcome,
        IntentOutcome::EditSession(EditSession::EditingStatus {
            user_id: UserId(3)
        })
    );
    assert_eq!(dashboard.store().revision(), 0);

    dashboard.apply(DashboardIntent::CommitEdit {
        user_id: UserId(3),
        value: FieldValue::Status(UserStatus::Active),
    })?;
    assert!(dashboard.edit_session().is_idle());

    dashboard.apply(DashboardIntent::SetStatusFilter(Some(UserStatus::Inactive)))?;
    assert!(dashboard.visible_users().is_empty_match());

    let messages: Vec<_> = dashboard
        .drain_notifications()
        .into_iter()
        .map(|event| event.message())
        .collect();
    assert_eq!(messages, vec!["User status has been updated."]);
    Ok(())
}

#[test]
fn delete_then_add_gets_fresh_id() -> Result<()> {
    let mut dashboard = Dashboard::seeded();
    dashboard.apply(DashboardIntent::DeleteUser(UserId(2)))?;

    let IntentOutcome::UserAdded(user) =
        dashboard.apply(DashboardIntent::AddUser(amy()))?
    else {
        panic!("add should report the new user");
    };
    assert_eq!(user.id, UserId(4));

    let mut ids: Vec<_> = dashboard.users().iter().map(|u| u.id).collect();
    ids.dedup();
    assert_eq!(ids, vec![UserId(1), UserId(3), UserId(4)]);
    Ok(())
}

#[test]
fn unknown_ids_are_absorbed() -> Result<()> {
    let mut dashboard = Dashboard::seeded();

    assert_eq!(
        dashboard.apply(DashboardIntent::DeleteUser(UserId(404)))?,
        IntentOutcome::UserDeleted(None)
    );
    assert_eq!(
        dashboard.apply(DashboardIntent::TogglePermission {
            role_id: RoleId(404),
            permission: PermissionType::Read,
        })?,
        IntentOutcome::RoleUpdated(None)
    );
    assert_eq!(dashboard.users().len(), 3);
    assert_eq!(dashboard.roles().len(), 3);
    assert!(dashboard.drain_notifications().is_empty());
    Ok(())
}
