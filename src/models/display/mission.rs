//! Mission, mission type and step display models

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use super::common::{flag, id_or_new, ref_id};
use crate::client::models::{Mission, MissionType, Step};
use crate::output::formatters::{format_deadline, format_delta, format_span, or_dash, parse_date};
use crate::output::tree::TreeNode;

/// Mission display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MissionDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Planned length of the mission
    #[tabled(rename = "DURATION")]
    pub duration: String,

    /// Time remaining, or closed since
    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "NMAP")]
    pub nmap: String,

    #[tabled(rename = "NESSUS")]
    pub nessus: String,

    /// Number of hosts in scope
    #[tabled(rename = "HOSTS")]
    pub hosts: usize,
}

impl MissionDisplay {
    pub fn at(mission: &Mission, now: DateTime<Utc>) -> Self {
        Self {
            id: id_or_new(mission.id.as_deref()),
            name: or_dash(mission.name.as_deref()),
            duration: format_span(mission.start_date.as_deref(), mission.end_date.as_deref()),
            status: format_deadline(mission.end_date.as_deref(), now),
            nmap: flag(mission.nmap, "Done", "To do"),
            nessus: flag(mission.nessus, "Done", "To do"),
            hosts: mission.hosts.len(),
        }
    }
}

impl From<&Mission> for MissionDisplay {
    fn from(mission: &Mission) -> Self {
        Self::at(mission, Utc::now())
    }
}

fn done(value: Option<bool>, what: &str) -> String {
    format!("{} {}", if value.unwrap_or(false) { "✓" } else { "…" }, what)
}

/// Detailed view of one mission.
///
/// Embedded clients, pentesters, hosts and steps are shown in full; references
/// the server returned as bare links only show their id.
pub fn mission_tree(mission: &Mission, now: DateTime<Utc>) -> TreeNode {
    let title = format!(
        "#{} - {}",
        id_or_new(mission.id.as_deref()),
        or_dash(mission.name.as_deref())
    );

    let mut root = TreeNode::new(title)
        .leaf(format_deadline(mission.end_date.as_deref(), now))
        .leaf(done(mission.nmap, "Nmap"))
        .leaf(done(mission.nessus, "Nessus"));

    if let Some(kind) = &mission.mission_type {
        let label = kind
            .get()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| ref_id(Some(kind)));
        root = root.leaf(format!("Type > {}", label));
    }

    root = root.leaf(match &mission.path_to_codi {
        Some(path) => format!("CodiMD > {}", path),
        None => "CodiMD not set".to_string(),
    });

    root = root.leaf(match &mission.credentials {
        Some(credentials) => format!("Credentials > {}", credentials),
        None => "Credentials not set".to_string(),
    });

    let mut clients = TreeNode::new("Clients");
    for client in &mission.clients {
        match client.get() {
            Some(c) => {
                let contact = format!(
                    "{} {}",
                    c.first_name.as_deref().unwrap_or_default(),
                    c.last_name.as_deref().unwrap_or_default()
                );
                let node = TreeNode::new(format!(
                    "{} ({})",
                    contact.trim(),
                    or_dash(c.name.as_deref())
                ))
                .leaf(or_dash(c.mail.as_deref()))
                .leaf(or_dash(c.phone.as_deref()));
                clients.add_child(node);
            }
            None => clients.add_child(TreeNode::new(unloaded(client.id()))),
        }
    }
    root.add_child(clients);

    let mut pentesters = TreeNode::new("Pentesters");
    for user in &mission.users {
        let label = match user.get() {
            Some(u) => or_dash(u.username.as_deref()),
            None => unloaded(user.id()),
        };
        pentesters.add_child(TreeNode::new(label));
    }
    root.add_child(pentesters);

    let mut scope = TreeNode::new("Scope");
    for host in &mission.hosts {
        match host.get() {
            Some(h) => {
                let mut node = TreeNode::new(format!(
                    "{} #{} - {}",
                    if h.checked.unwrap_or(false) { "✓" } else { "…" },
                    id_or_new(h.id.as_deref()),
                    or_dash(h.name.as_deref())
                ));
                for finding in &h.host_vulns {
                    let label = match finding.get() {
                        Some(hv) => format!(
                            "#{} - vuln {} - {}",
                            id_or_new(hv.id.as_deref()),
                            ref_id(hv.vuln.as_ref()),
                            or_dash(hv.current_state.as_deref())
                        ),
                        None => unloaded(finding.id()),
                    };
                    node.add_child(TreeNode::new(label));
                }
                scope.add_child(node);
            }
            None => scope.add_child(TreeNode::new(unloaded(host.id()))),
        }
    }
    root.add_child(scope);

    let mut activity = TreeNode::new("Activity");
    for step in &mission.steps {
        let label = match step.get() {
            Some(s) => {
                let ago = s
                    .created_at
                    .as_deref()
                    .and_then(parse_date)
                    .map(|created| format!("{} ago", format_delta(now, created).1))
                    .unwrap_or_else(|| "--".to_string());
                format!(
                    "{} - #{} - {}",
                    ago,
                    id_or_new(s.id.as_deref()),
                    or_dash(s.description.as_deref())
                )
            }
            None => unloaded(step.id()),
        };
        activity.add_child(TreeNode::new(label));
    }
    root.add_child(activity);

    root
}

fn unloaded(id: Option<&str>) -> String {
    format!("#{} (save to update)", id.unwrap_or("?"))
}

/// Step display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StepDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    #[tabled(rename = "CREATED")]
    pub created_at: String,

    #[tabled(rename = "FOUND")]
    pub find_at: String,

    #[tabled(rename = "MISSION")]
    pub mission: String,
}

impl From<&Step> for StepDisplay {
    fn from(step: &Step) -> Self {
        Self {
            id: id_or_new(step.id.as_deref()),
            description: or_dash(step.description.as_deref()),
            created_at: or_dash(step.created_at.as_deref()),
            find_at: or_dash(step.find_at.as_deref()),
            mission: ref_id(step.mission.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MissionTypeDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<&MissionType> for MissionTypeDisplay {
    fn from(kind: &MissionType) -> Self {
        Self {
            id: id_or_new(kind.id.as_deref()),
            name: or_dash(kind.name.as_deref()),
        }
    }
}
