//! Demo records the console starts with.

use rolekeeper_model::{
    PermissionSet, PermissionType, Role, RoleId, User, UserId, UserStatus,
};

/// Well-known demo role names
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const EDITOR: &str = "editor";
    pub const VIEWER: &str = "viewer";
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: roles::ADMIN.to_string(),
            status: UserStatus::Active,
        },
        User {
            id: UserId(2),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: roles::EDITOR.to_string(),
            status: UserStatus::Active,
        },
        User {
            id: UserId(3),
            name: "Bob Wilson".to_string(),
            email: "bob@example.com".to_string(),
            role: roles::VIEWER.to_string(),
            status: UserStatus::Inactive,
        },
    ]
}

pub fn demo_roles() -> Vec<Role> {
    use PermissionType::*;

    vec![
        Role {
            id: RoleId(1),
            name: roles::ADMIN.to_string(),
            description: "Full system access".to_string(),
            permissions: PermissionSet::from([Create, Read, Update, Delete]),
        },
        Role {
            id: RoleId(2),
            name: roles::EDITOR.to_string(),
            description: "Can edit content".to_string(),
            permissions: PermissionSet::from([Read, Update]),
        },
        Role {
            id: RoleId(3),
            name: roles::VIEWER.to_string(),
            description: "Read-only access".to_string(),
            permissions: PermissionSet::from([Read]),
        },
    ]
}
