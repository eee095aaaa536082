use rolekeeper_core::store::seed::{demo_roles, demo_users};
use rolekeeper_model::{Role, User};
use serde::{Deserialize, Serialize};

/// Records the store starts with. Each list falls back to the demo data when
/// omitted; an explicit empty list starts that collection empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default = "demo_users")]
    pub users: Vec<User>,
    #[serde(default = "demo_roles")]
    pub roles: Vec<Role>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: demo_users(),
            roles: demo_roles(),
        }
    }
}

impl SeedConfig {
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            roles: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.roles.is_empty()
    }
}
