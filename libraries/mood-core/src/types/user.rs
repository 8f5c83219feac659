/// Account and social-graph records owned by the backend
use serde::{Deserialize, Serialize};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserProfile {
    /// Name shown in the UI: profile name, else the e-mail local part
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("ユーザー")
            .to_string()
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token to persist client-side
    pub access_token: String,
    pub user: UserProfile,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOutcome {
    pub user_id: Option<String>,
    /// Backend-provided message (e.g. "check your inbox")
    pub message: Option<String>,
}

/// Another user as returned by search and friend listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Pending incoming friend request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: String,
    pub from_user: UserSummary,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_profile_name() {
        let user = UserProfile {
            id: "1".into(),
            email: Some("aki@example.com".into()),
            name: Some("Aki".into()),
        };
        assert_eq!(user.display_name(), "Aki");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = UserProfile {
            id: "1".into(),
            email: Some("aki@example.com".into()),
            name: Some("  ".into()),
        };
        assert_eq!(user.display_name(), "aki");

        let anonymous = UserProfile {
            id: "2".into(),
            email: None,
            name: None,
        };
        assert_eq!(anonymous.display_name(), "ユーザー");
    }
}
