//! Vulnerability models: catalogue entries, their types and impacts, and per-host findings

use serde::{Deserialize, Serialize};

use super::Host;
use super::reference::{Field, Reference, nullable_list};
use super::resource::Resource;

/// Vulnerability catalogue entry
///
/// The backend also exposes the host findings of a vulnerability, but they are
/// left out so that a partial update never touches them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vuln {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub remediation: Option<String>,
    pub vuln_type: Option<Reference<VulnType>>,
    pub impact: Option<Reference<Impact>>,
}

impl Resource for Vuln {
    const ENDPOINT: &'static str = "vulns";
    const NAME: &'static str = "Vuln";
    const FIELDS: &'static [Field] = &[
        Field::text("name"),
        Field::text("description"),
        Field::text("remediation"),
        Field::one("vuln_type", "vuln_types"),
        Field::one("impact", "impacts"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub vulns: Vec<Reference<Vuln>>,
}

impl Resource for VulnType {
    const ENDPOINT: &'static str = "vuln_types";
    const NAME: &'static str = "VulnType";
    const FIELDS: &'static [Field] = &[Field::text("name"), Field::many("vulns", "vulns")];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// Severity level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Impact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub vulns: Vec<Reference<Vuln>>,
}

impl Resource for Impact {
    const ENDPOINT: &'static str = "impacts";
    const NAME: &'static str = "Impact";
    const FIELDS: &'static [Field] = &[Field::text("name"), Field::many("vulns", "vulns")];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

/// A vulnerability found on a host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostVuln {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub host: Option<Reference<Host>>,
    pub vuln: Option<Reference<Vuln>>,
    pub impact: Option<Reference<Impact>>,
    pub current_state: Option<String>,
}

impl Resource for HostVuln {
    const ENDPOINT: &'static str = "host_vulns";
    const NAME: &'static str = "HostVuln";
    const FIELDS: &'static [Field] = &[
        Field::one("host", "hosts"),
        Field::one("vuln", "vulns"),
        Field::one("impact", "impacts"),
        Field::text("current_state"),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
