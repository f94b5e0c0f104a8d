//! User and permission display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{id_or_new, ref_ids, yes_no};
use crate::client::models::{ApiRoles, User};
use crate::output::formatters::or_dash;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    /// Username, with the trigram when set
    #[tabled(rename = "NAME (TRIGRAM)")]
    pub name: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,

    #[tabled(rename = "CITY")]
    pub city: String,

    #[tabled(rename = "EMAIL")]
    pub mail: String,

    #[tabled(rename = "ENABLED")]
    pub enabled: String,

    #[tabled(rename = "ROLES")]
    pub roles: String,

    #[tabled(rename = "ASSIGNED MISSIONS")]
    pub missions: String,
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        let name = match (&user.username, &user.trigram) {
            (Some(username), Some(trigram)) => format!("{} ({})", username, trigram),
            (username, _) => or_dash(username.as_deref()),
        };

        Self {
            id: id_or_new(user.id.as_deref()),
            name,
            phone: or_dash(user.phone.as_deref()),
            city: or_dash(user.city.as_deref()),
            mail: or_dash(user.mail.as_deref()),
            enabled: yes_no(user.enabled),
            roles: if user.roles.is_empty() {
                "None".to_string()
            } else {
                user.roles.join("\n")
            },
            missions: ref_ids(&user.missions),
        }
    }
}

/// What a role set allows on one resource family.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PermissionDisplay {
    #[tabled(rename = "MODEL")]
    pub model: String,

    #[tabled(rename = "LIST")]
    pub list: String,

    #[tabled(rename = "CREATE")]
    pub create: String,

    #[tabled(rename = "READ")]
    pub read: String,

    #[tabled(rename = "UPDATE (FULL)")]
    pub update: String,

    #[tabled(rename = "UPDATE (PARTIAL)")]
    pub patch: String,

    #[tabled(rename = "DELETE")]
    pub delete: String,
}

fn tick(allowed: bool) -> String {
    if allowed { "✓" } else { "" }.to_string()
}

/// Per-family permission rows of a role set.
pub fn permission_rows(roles: ApiRoles) -> Vec<PermissionDisplay> {
    roles
        .permissions()
        .into_iter()
        .map(|(model, p)| PermissionDisplay {
            model: model.to_string(),
            list: tick(p.list),
            create: tick(p.create),
            read: tick(p.read),
            update: tick(p.update),
            patch: tick(p.patch),
            delete: tick(p.delete),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Reference;

    #[test]
    fn test_user_display() {
        let user = User {
            id: Some("1".to_string()),
            username: Some("alice".to_string()),
            trigram: Some("ALI".to_string()),
            enabled: Some(true),
            roles: vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
            missions: vec![Reference::unresolved("4"), Reference::unresolved("5")],
            ..Default::default()
        };

        let row = UserDisplay::from(&user);

        assert_eq!(row.name, "alice (ALI)");
        assert_eq!(row.enabled, "Yes");
        assert_eq!(row.roles, "ROLE_ADMIN\nROLE_USER");
        assert_eq!(row.missions, "4, 5");
        assert_eq!(row.phone, "--");
    }

    #[test]
    fn test_permission_rows() {
        let rows = permission_rows(ApiRoles::ROLE_CLIENT_MANAGE | ApiRoles::ROLE_MISSION_GET_ITEM);

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].model, "client");
        assert_eq!(rows[0].delete, "✓");
        assert_eq!(rows[4].model, "mission");
        assert_eq!(rows[4].read, "✓");
        assert_eq!(rows[4].list, "");
    }
}
