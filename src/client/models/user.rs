//! User model

use serde::{Deserialize, Serialize};

use super::Mission;
use super::reference::{Field, Reference, nullable_list};
use super::resource::Resource;
use super::roles::ApiRoles;
use crate::error::ModelError;

/// Backend account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub roles: Vec<String>,
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "nullable_list")]
    pub missions: Vec<Reference<Mission>>,
    /// Only ever set locally to change a password; the backend never returns it.
    pub password: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub trigram: Option<String>,
    pub mail: Option<String>,
}

impl User {
    /// Fold the role names into a single bit-set.
    pub fn roles_flags(&self) -> Result<ApiRoles, ModelError> {
        self.roles.iter().try_fold(ApiRoles::NONE, |flags, name| {
            ApiRoles::from_name(name)
                .map(|role| flags | role)
                .ok_or_else(|| ModelError::InvalidRole(name.clone()))
        })
    }
}

impl Resource for User {
    const ENDPOINT: &'static str = "users";
    const NAME: &'static str = "User";
    const FIELDS: &'static [Field] = &[
        Field::text("username"),
        Field::roles("roles"),
        Field::flag("enabled"),
        Field::many("missions", "missions"),
        Field::text("password"),
        Field::text("phone"),
        Field::text("city"),
        Field::text("trigram"),
        Field::text("mail"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_flags_folds_names() {
        let user = User {
            roles: vec!["ROLE_USER".to_string(), "ROLE_CLIENT_MANAGE".to_string()],
            ..Default::default()
        };

        assert_eq!(
            user.roles_flags().unwrap(),
            ApiRoles::ROLE_USER | ApiRoles::ROLE_CLIENT_MANAGE
        );
    }

    #[test]
    fn test_roles_flags_empty() {
        assert_eq!(User::default().roles_flags().unwrap(), ApiRoles::NONE);
    }

    #[test]
    fn test_roles_flags_rejects_unknown() {
        let user = User {
            roles: vec!["ROLE_ADMIN".to_string(), "ROLE_ROOT".to_string()],
            ..Default::default()
        };

        match user.roles_flags() {
            Err(ModelError::InvalidRole(name)) => assert_eq!(name, "ROLE_ROOT"),
            other => panic!("Expected InvalidRole, got {:?}", other),
        }
    }
}
