//! Vulnerability, impact and finding display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{id_or_new, ref_id, ref_ids};
use crate::client::models::{HostVuln, Impact, Vuln, VulnType};
use crate::output::formatters::{or_dash, truncate_string};

const TEXT_WIDTH: usize = 60;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VulnDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub vuln_type: String,

    #[tabled(rename = "IMPACT")]
    pub impact: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    #[tabled(rename = "REMEDIATION")]
    pub remediation: String,
}

impl From<&Vuln> for VulnDisplay {
    fn from(vuln: &Vuln) -> Self {
        let impact = match vuln.impact.as_ref().and_then(|r| r.get()) {
            Some(impact) => or_dash(impact.name.as_deref()),
            None => ref_id(vuln.impact.as_ref()),
        };

        let vuln_type = match vuln.vuln_type.as_ref().and_then(|r| r.get()) {
            Some(kind) => or_dash(kind.name.as_deref()),
            None => ref_id(vuln.vuln_type.as_ref()),
        };

        Self {
            id: id_or_new(vuln.id.as_deref()),
            name: or_dash(vuln.name.as_deref()),
            vuln_type,
            impact,
            description: truncate_string(&or_dash(vuln.description.as_deref()), TEXT_WIDTH),
            remediation: truncate_string(&or_dash(vuln.remediation.as_deref()), TEXT_WIDTH),
        }
    }
}

/// Shared row of the two catalogue types holding a vulnerability list
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "VULNS")]
    pub vulns: String,
}

impl From<&Impact> for CategoryDisplay {
    fn from(impact: &Impact) -> Self {
        Self {
            id: id_or_new(impact.id.as_deref()),
            name: or_dash(impact.name.as_deref()),
            vulns: ref_ids(&impact.vulns),
        }
    }
}

impl From<&VulnType> for CategoryDisplay {
    fn from(kind: &VulnType) -> Self {
        Self {
            id: id_or_new(kind.id.as_deref()),
            name: or_dash(kind.name.as_deref()),
            vulns: ref_ids(&kind.vulns),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct HostVulnDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "VULN")]
    pub vuln: String,

    #[tabled(rename = "IMPACT")]
    pub impact: String,

    #[tabled(rename = "HOST")]
    pub host: String,

    #[tabled(rename = "STATE")]
    pub current_state: String,
}

impl From<&HostVuln> for HostVulnDisplay {
    fn from(finding: &HostVuln) -> Self {
        let vuln = match finding.vuln.as_ref().and_then(|r| r.get()) {
            Some(v) => format!("#{} - {}", id_or_new(v.id.as_deref()), or_dash(v.name.as_deref())),
            None => ref_id(finding.vuln.as_ref()),
        };

        let host = match finding.host.as_ref().and_then(|r| r.get()) {
            Some(h) => format!("#{} - {}", id_or_new(h.id.as_deref()), or_dash(h.name.as_deref())),
            None => ref_id(finding.host.as_ref()),
        };

        let impact = match finding.impact.as_ref().and_then(|r| r.get()) {
            Some(i) => or_dash(i.name.as_deref()),
            None => ref_id(finding.impact.as_ref()),
        };

        Self {
            id: id_or_new(finding.id.as_deref()),
            vuln,
            impact,
            host,
            current_state: or_dash(finding.current_state.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Host, Reference};

    #[test]
    fn test_host_vuln_display_mixes_resolved_and_links() {
        let finding = HostVuln {
            id: Some("11".to_string()),
            host: Some(Reference::resolved(Host {
                id: Some("7".to_string()),
                name: Some("www.acme.test".to_string()),
                ..Default::default()
            })),
            vuln: Some(Reference::unresolved("/api/vulns/3")),
            impact: None,
            current_state: Some("open".to_string()),
        };

        let row = HostVulnDisplay::from(&finding);

        assert_eq!(row.host, "#7 - www.acme.test");
        assert_eq!(row.vuln, "#3");
        assert_eq!(row.impact, "--");
        assert_eq!(row.current_state, "open");
    }

    #[test]
    fn test_vuln_display_uses_embedded_names() {
        let vuln = Vuln {
            id: Some("3".to_string()),
            name: Some("XSS".to_string()),
            impact: Some(Reference::resolved(Impact {
                id: Some("2".to_string()),
                name: Some("High".to_string()),
                ..Default::default()
            })),
            vuln_type: Some(Reference::unresolved("4")),
            ..Default::default()
        };

        let row = VulnDisplay::from(&vuln);
        assert_eq!(row.impact, "High");
        assert_eq!(row.vuln_type, "#4");
    }
}
