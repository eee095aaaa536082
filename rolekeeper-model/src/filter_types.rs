use crate::error::ModelError;
use crate::user::UserStatus;

/// Criteria for the user table view.
///
/// Every field is optional; a default filter matches every user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserFilter {
    /// Case-insensitive substring matched against name and email. Not trimmed.
    pub search: String,
    /// Exact, case-sensitive role name.
    pub role: Option<String>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// Build criteria from presentation strings, where `""` means unset.
    pub fn from_raw(
        search: &str,
        role: &str,
        status: &str,
    ) -> Result<Self, ModelError> {
        let status = if status.is_empty() {
            None
        } else {
            Some(status.parse::<UserStatus>()?)
        };

        Ok(Self {
            search: search.to_string(),
            role: (!role.is_empty()).then(|| role.to_string()),
            status,
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        self.role = (!role.is_empty()).then_some(role);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Role criterion, treating an empty string the same as unset.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|role| !role.is_empty())
    }

    /// Whether any criterion narrows the view.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.role().is_some() || self.status.is_some()
    }
}
