//! Host and port scan models

use serde::{Deserialize, Serialize};

use super::reference::{Field, Reference, nullable_list};
use super::resource::Resource;
use super::{HostVuln, Mission};

/// Scanned host (domain or address) attached to a mission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub checked: Option<bool>,
    pub technology: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub host_vulns: Vec<Reference<HostVuln>>,
    pub mission: Option<Reference<Mission>>,
    #[serde(deserialize_with = "nullable_list")]
    pub nmaps: Vec<Reference<Nmap>>,
}

impl Resource for Host {
    const ENDPOINT: &'static str = "hosts";
    const NAME: &'static str = "Host";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::flag("checked"),
        Field::text("technology"),
        Field::many("host_vulns", "host_vulns"),
        Field::one("mission", "missions"),
        Field::many("nmaps", "nmaps"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// Open port reported by a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nmap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: Option<String>,
    pub status: Option<bool>,
    pub port: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub host: Vec<Reference<Host>>,
}

impl Resource for Nmap {
    const ENDPOINT: &'static str = "nmaps";
    const NAME: &'static str = "Nmap";
    const FIELDS: &'static [Field] = &[
        Field::date("date"),
        Field::flag("status"),
        Field::text("port"),
        Field::many("host", "hosts"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
