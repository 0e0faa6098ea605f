//! User-related entity definitions.

use serde::{Deserialize, Serialize};

/// Portal role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Faculty,
}

impl UserType {
    /// Converts the role to its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        }
    }

    /// Parses a role from its stored string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            _ => None,
        }
    }

    /// Dashboard route for this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Student => "/dashboard/student",
            Self::Faculty => "/dashboard/faculty",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in identity: who, and as what role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: String,
    pub user_type: UserType,
}

impl CurrentUser {
    pub fn new(user_id: impl Into<String>, user_type: UserType) -> Self {
        Self {
            user_id: user_id.into(),
            user_type,
        }
    }
}

/// A student identity embedded in on-duty requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub id: String,
}

impl Student {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_round_trip() {
        assert_eq!(UserType::parse("student"), Some(UserType::Student));
        assert_eq!(UserType::parse("Faculty"), None);
        assert_eq!(UserType::Faculty.as_str(), "faculty");
        assert_eq!(
            serde_json::to_string(&UserType::Student).unwrap(),
            "\"student\""
        );
    }

    #[test]
    fn test_dashboard_paths() {
        assert_eq!(UserType::Student.dashboard_path(), "/dashboard/student");
        assert_eq!(UserType::Faculty.dashboard_path(), "/dashboard/faculty");
    }
}
