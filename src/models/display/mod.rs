//! Display model implementations for table and JSON output
//!
//! Display models turn resources into CLI-friendly rows with column names and
//! serialization. Unresolved references are shown by id.

mod client;
mod common;
mod host;
mod mission;
mod user;
mod vuln;

pub use client::ClientDisplay;
pub use host::{HostDisplay, NmapDisplay, PointDisplay};
pub use mission::{MissionDisplay, MissionTypeDisplay, StepDisplay, mission_tree};
pub use user::{UserDisplay, permission_rows};
pub use vuln::{CategoryDisplay, HostVulnDisplay, VulnDisplay};
