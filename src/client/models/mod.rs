//! SMERSH data models
//!
//! One typed record per backend entity, all built on [`Resource`]. Relationship
//! fields hold [`Reference`]s, decoded lazily from bare links.

mod auth;
mod client;
mod host;
mod mission;
mod point;
mod record;
mod reference;
mod resource;
mod roles;
mod user;
mod vuln;

pub use auth::{JwtToken, LoginResponse};
#[cfg(test)]
pub(crate) use auth::encode_token;
pub use client::Client;
pub use host::{Host, Nmap};
pub use mission::{Mission, MissionType, Step};
pub use point::{NegativePoint, PositivePoint};
pub use record::{Record, ResourceKind};
pub use reference::{API_ROOT, Field, FieldKind, Reference, iri};
pub use resource::Resource;
pub use roles::{ApiRoles, Permissions};
pub use user::User;
pub use vuln::{HostVuln, Impact, Vuln, VulnType};
