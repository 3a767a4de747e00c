use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical role names. Reference data: the matching rows are seeded
/// by a migration and never created by request flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum RoleName {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_DOCTOR")]
    Doctor,
    #[serde(rename = "ROLE_PATIENT")]
    Patient,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ROLE_ADMIN",
            RoleName::Doctor => "ROLE_DOCTOR",
            RoleName::Patient => "ROLE_PATIENT",
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical role record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i32,
    pub name: RoleName,
}

/// User identity record.
///
/// Identity fields are immutable after sign-up; only the role set can
/// change, and that is not exercised beyond creation here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Bcrypt hash. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub address: String,
    pub pin: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Effective role names, as they appear in token responses.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.to_string()).collect()
    }

    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_wire_format() {
        assert_eq!(RoleName::Admin.as_str(), "ROLE_ADMIN");
        assert_eq!(RoleName::Doctor.as_str(), "ROLE_DOCTOR");
        assert_eq!(RoleName::Patient.as_str(), "ROLE_PATIENT");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            mobile_number: "1234567890".to_string(),
            address: "1 Main St".to_string(),
            pin: "560001".to_string(),
            roles: vec![Role {
                id: 3,
                name: RoleName::Patient,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("ROLE_PATIENT"));
    }
}
