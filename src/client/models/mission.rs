//! Mission, mission type and step models

use serde::{Deserialize, Serialize};

use super::reference::{Field, Reference, nullable_list};
use super::resource::Resource;
use super::{Client, Host, User};

/// A pentest engagement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub path_to_codi: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub users: Vec<Reference<User>>,
    #[serde(deserialize_with = "nullable_list")]
    pub hosts: Vec<Reference<Host>>,
    pub nmap: Option<bool>,
    pub nessus: Option<bool>,
    pub nmap_filer: Option<bool>,
    pub nessus_filer: Option<bool>,
    pub mission_type: Option<Reference<MissionType>>,
    pub credentials: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub clients: Vec<Reference<Client>>,
    #[serde(deserialize_with = "nullable_list")]
    pub steps: Vec<Reference<Step>>,
}

impl Resource for Mission {
    const ENDPOINT: &'static str = "missions";
    const NAME: &'static str = "Mission";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::date("start_date"),
        Field::text("path_to_codi"),
        Field::date("end_date"),
        Field::many("users", "users"),
        Field::many("hosts", "hosts"),
        Field::flag("nmap"),
        Field::flag("nessus"),
        Field::flag("nmap_filer"),
        Field::flag("nessus_filer"),
        Field::one("mission_type", "mission_types"),
        Field::text("credentials"),
        Field::many("clients", "clients"),
        Field::many("steps", "steps"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// Kind of engagement (web, internal, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Resource for MissionType {
    const ENDPOINT: &'static str = "mission_types";
    const NAME: &'static str = "MissionType";
    const FIELDS: &'static [Field] = &[Field::text("name")];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// Timeline entry of a mission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: Option<String>,
    pub find_at: Option<String>,
    pub created_at: Option<String>,
    pub mission: Option<Reference<Mission>>,
}

impl Resource for Step {
    const ENDPOINT: &'static str = "steps";
    const NAME: &'static str = "Step";
    const FIELDS: &'static [Field] = &[
        Field::text("description"),
        Field::date("find_at"),
        Field::date("created_at"),
        Field::one("mission", "missions"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
