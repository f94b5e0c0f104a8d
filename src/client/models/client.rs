//! Customer model

use serde::{Deserialize, Serialize};

use super::Mission;
use super::reference::{Field, Reference, nullable_list};
use super::resource::Resource;

/// Customer of one or more missions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub missions: Vec<Reference<Mission>>,
}

impl Resource for Client {
    const ENDPOINT: &'static str = "clients";
    const NAME: &'static str = "Client";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::text("phone"),
        Field::text("first_name"),
        Field::text("last_name"),
        Field::text("mail"),
        Field::many("missions", "missions"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
