//! Role resolution policy for sign-up.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{AuthError, AuthResult, Role, RoleName, UserRepositoryInterface};

/// Map one requested role string to a canonical role name.
///
/// Anything that is not "admin" or "doctor" (including "patient" and
/// unrecognized strings) falls back to the default patient role.
fn map_requested(requested: &str) -> RoleName {
    match requested {
        "admin" => RoleName::Admin,
        "doctor" => RoleName::Doctor,
        _ => RoleName::Patient,
    }
}

/// Resolve a set of requested role strings into canonical role records.
///
/// An absent request resolves to the default `{PATIENT}`. Duplicate
/// resolutions collapse before lookup. A missing reference-data row is
/// `RoleNotFound`, a seeding defect rather than a user error.
pub async fn resolve_roles(
    repo: &dyn UserRepositoryInterface,
    requested: Option<&HashSet<String>>,
) -> AuthResult<Vec<Role>> {
    let names: BTreeSet<RoleName> = match requested {
        None => BTreeSet::from([RoleName::Patient]),
        Some(strs) => strs.iter().map(|s| map_requested(s)).collect(),
    };

    let mut roles = Vec::with_capacity(names.len());
    for name in names {
        let role = repo
            .find_role_by_name(name)
            .await?
            .ok_or(AuthError::RoleNotFound(name))?;
        roles.push(role);
    }

    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn names(roles: &[Role]) -> Vec<RoleName> {
        roles.iter().map(|r| r.name).collect()
    }

    #[tokio::test]
    async fn test_absent_request_defaults_to_patient() {
        let repo = InMemoryUserRepository::new();
        let roles = resolve_roles(&repo, None).await.unwrap();
        assert_eq!(names(&roles), vec![RoleName::Patient]);
    }

    #[tokio::test]
    async fn test_unrecognized_strings_fall_back_to_patient() {
        let repo = InMemoryUserRepository::new();
        let requested: HashSet<String> =
            ["patient".to_string(), "bogus".to_string()].into();
        let roles = resolve_roles(&repo, Some(&requested)).await.unwrap();
        assert_eq!(names(&roles), vec![RoleName::Patient]);
    }

    #[tokio::test]
    async fn test_mixed_request_resolves_and_dedups() {
        let repo = InMemoryUserRepository::new();
        let requested: HashSet<String> = [
            "admin".to_string(),
            "doctor".to_string(),
            "bogus".to_string(),
        ]
        .into();
        let mut resolved = names(&resolve_roles(&repo, Some(&requested)).await.unwrap());
        resolved.sort();
        assert_eq!(
            resolved,
            vec![RoleName::Admin, RoleName::Doctor, RoleName::Patient]
        );
    }

    #[tokio::test]
    async fn test_missing_reference_row_is_role_not_found() {
        let repo = InMemoryUserRepository::without_seeded_roles();
        let err = resolve_roles(&repo, None).await.unwrap_err();
        assert!(matches!(err, AuthError::RoleNotFound(RoleName::Patient)));
    }
}
