//! Rendering of records for the shell
//!
//! Each resource type has one presentation: a table for most, a tree for a
//! single mission or the impact list, one line per host/vuln link.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::{ApiRoles, Record, ResourceKind};
use crate::error::Result;
use crate::models::display::{
    CategoryDisplay, ClientDisplay, HostDisplay, HostVulnDisplay, MissionDisplay,
    MissionTypeDisplay, NmapDisplay, PointDisplay, StepDisplay, UserDisplay, VulnDisplay,
    mission_tree, permission_rows,
};
use crate::output::json::{format_json, format_raw};
use crate::output::table::{NO_RESULTS, format_table, format_table_lined};
use crate::output::tree::TreeNode;

/// Display rows for every record of the given variant
macro_rules! rows {
    ($records:expr, $variant:ident => $display:ty) => {
        $records
            .iter()
            .filter_map(|record| match record {
                Record::$variant(value) => Some(<$display>::from(value)),
                _ => None,
            })
            .collect::<Vec<$display>>()
    };
}

fn table_or_json<T: Tabled + Serialize>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(rows)),
        OutputFormat::Json => Ok(format_json(rows)?),
    }
}

/// Records as raw JSON, in their local form
pub fn render_raw(records: &[Record]) -> Result<String> {
    let values = records
        .iter()
        .map(Record::to_value)
        .collect::<Result<Vec<_>>>()?;

    match values.as_slice() {
        [single] => Ok(format_raw(single)?),
        _ => Ok(format_raw(&values)?),
    }
}

/// Render records of one type.
pub fn render(
    kind: ResourceKind,
    records: &[Record],
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<String> {
    if records.is_empty() && format == OutputFormat::Table {
        return Ok(NO_RESULTS.to_string());
    }

    match kind {
        ResourceKind::Mission => match (format, records) {
            (OutputFormat::Table, [Record::Mission(mission)]) => {
                Ok(mission_tree(mission, now).render())
            }
            _ => {
                let rows: Vec<MissionDisplay> = records
                    .iter()
                    .filter_map(|record| match record {
                        Record::Mission(m) => Some(MissionDisplay::at(m, now)),
                        _ => None,
                    })
                    .collect();
                table_or_json(&rows, format)
            }
        },
        ResourceKind::User => render_users(records, format),
        ResourceKind::Client => table_or_json(&rows!(records, Client => ClientDisplay), format),
        ResourceKind::Vuln => table_or_json(&rows!(records, Vuln => VulnDisplay), format),
        ResourceKind::PositivePoint => {
            table_or_json(&rows!(records, PositivePoint => PointDisplay), format)
        }
        ResourceKind::NegativePoint => {
            table_or_json(&rows!(records, NegativePoint => PointDisplay), format)
        }
        ResourceKind::Step => table_or_json(&rows!(records, Step => StepDisplay), format),
        ResourceKind::Host => table_or_json(&rows!(records, Host => HostDisplay), format),
        ResourceKind::Impact => {
            let rows = rows!(records, Impact => CategoryDisplay);
            match format {
                OutputFormat::Table => {
                    let mut tree = TreeNode::new("Impacts");
                    for row in &rows {
                        tree.add_child(TreeNode::new(format!("#{} - {}", row.id, row.name)));
                    }
                    Ok(tree.render())
                }
                OutputFormat::Json => Ok(format_json(&rows)?),
            }
        }
        ResourceKind::HostVuln => {
            let rows = rows!(records, HostVuln => HostVulnDisplay);
            match format {
                OutputFormat::Table => Ok(rows
                    .iter()
                    .map(|row| format!("{} ({}) <=> {}", row.vuln, row.impact, row.host))
                    .collect::<Vec<_>>()
                    .join("\n")),
                OutputFormat::Json => Ok(format_json(&rows)?),
            }
        }
        ResourceKind::MissionType => {
            table_or_json(&rows!(records, MissionType => MissionTypeDisplay), format)
        }
        ResourceKind::VulnType => {
            table_or_json(&rows!(records, VulnType => CategoryDisplay), format)
        }
        ResourceKind::Nmap => table_or_json(&rows!(records, Nmap => NmapDisplay), format),
    }
}

/// Users table; a single user also gets the permissions granted by their roles.
fn render_users(records: &[Record], format: OutputFormat) -> Result<String> {
    let rows = rows!(records, User => UserDisplay);
    if format == OutputFormat::Json {
        return Ok(format_json(&rows)?);
    }

    let mut output = format_table_lined(&rows);

    if let [Record::User(user)] = records {
        output.push('\n');
        match user.roles_flags() {
            Ok(roles) => {
                output.push_str(&format_table(&permission_rows(roles)));

                let upload = if roles.contains(ApiRoles::ROLE_HOST_UPLOAD) {
                    "Yes".green()
                } else {
                    "No".red()
                };
                output.push_str(&format!("\nCan upload host: {}", upload));
            }
            Err(e) => output.push_str(&e.to_string().yellow().to_string()),
        }
    }

    Ok(output)
}
