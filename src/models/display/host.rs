//! Host, scan and report point display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{id_or_new, ref_id, ref_ids, yes_no};
use crate::client::models::{Host, NegativePoint, Nmap, PositivePoint};
use crate::output::formatters::{or_dash, truncate_string};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct HostDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TECHNOLOGY")]
    pub technology: String,

    #[tabled(rename = "CHECKED")]
    pub checked: String,

    /// Number of findings on the host
    #[tabled(rename = "VULNERABILITIES")]
    pub vulns: usize,

    #[tabled(rename = "MISSION")]
    pub mission: String,
}

impl From<&Host> for HostDisplay {
    fn from(host: &Host) -> Self {
        Self {
            id: id_or_new(host.id.as_deref()),
            name: or_dash(host.name.as_deref()),
            technology: or_dash(host.technology.as_deref()),
            checked: yes_no(host.checked),
            vulns: host.host_vulns.len(),
            mission: ref_id(host.mission.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NmapDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "PORT")]
    pub port: String,

    #[tabled(rename = "OPEN")]
    pub status: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "HOSTS")]
    pub hosts: String,
}

impl From<&Nmap> for NmapDisplay {
    fn from(nmap: &Nmap) -> Self {
        Self {
            id: id_or_new(nmap.id.as_deref()),
            port: or_dash(nmap.port.as_deref()),
            status: yes_no(nmap.status),
            date: or_dash(nmap.date.as_deref()),
            hosts: ref_ids(&nmap.host),
        }
    }
}

/// Positive or negative report point
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PointDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl PointDisplay {
    fn new(id: Option<&str>, name: Option<&str>, description: Option<&str>) -> Self {
        Self {
            id: id_or_new(id),
            name: or_dash(name),
            description: truncate_string(&or_dash(description), 80),
        }
    }
}

impl From<&PositivePoint> for PointDisplay {
    fn from(point: &PositivePoint) -> Self {
        Self::new(
            point.id.as_deref(),
            point.name.as_deref(),
            point.description.as_deref(),
        )
    }
}

impl From<&NegativePoint> for PointDisplay {
    fn from(point: &NegativePoint) -> Self {
        Self::new(
            point.id.as_deref(),
            point.name.as_deref(),
            point.description.as_deref(),
        )
    }
}
