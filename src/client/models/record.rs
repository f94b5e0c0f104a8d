//! Closed registry of resource types
//!
//! Shell commands name a type once (`mission`, `host_vuln`, ...); the name is
//! resolved to a [`ResourceKind`] and every later operation goes through
//! [`Record`], which dispatches to the typed [`Resource`] implementation.

use serde_json::Value;

use super::reference::Field;
use super::resource::Resource;
use super::{
    Client, Host, HostVuln, Impact, Mission, MissionType, NegativePoint, Nmap, PositivePoint,
    Step, User, Vuln, VulnType,
};
use crate::client::SmershApi;
use crate::error::Result;

/// Resource type, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ResourceKind {
    #[value(name = "mission")]
    Mission,
    #[value(name = "user")]
    User,
    #[value(name = "client")]
    Client,
    #[value(name = "vuln")]
    Vuln,
    #[value(name = "positive_point")]
    PositivePoint,
    #[value(name = "negative_point")]
    NegativePoint,
    #[value(name = "step")]
    Step,
    #[value(name = "host")]
    Host,
    #[value(name = "impact")]
    Impact,
    #[value(name = "host_vuln")]
    HostVuln,
    #[value(name = "mission_type")]
    MissionType,
    #[value(name = "vuln_type")]
    VulnType,
    #[value(name = "nmap")]
    Nmap,
}

/// Run `$body` with the type alias `$ty` bound to the concrete type of a [`ResourceKind`].
macro_rules! with_kind {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            ResourceKind::Mission => { type $ty = Mission; $body }
            ResourceKind::User => { type $ty = User; $body }
            ResourceKind::Client => { type $ty = Client; $body }
            ResourceKind::Vuln => { type $ty = Vuln; $body }
            ResourceKind::PositivePoint => { type $ty = PositivePoint; $body }
            ResourceKind::NegativePoint => { type $ty = NegativePoint; $body }
            ResourceKind::Step => { type $ty = Step; $body }
            ResourceKind::Host => { type $ty = Host; $body }
            ResourceKind::Impact => { type $ty = Impact; $body }
            ResourceKind::HostVuln => { type $ty = HostVuln; $body }
            ResourceKind::MissionType => { type $ty = MissionType; $body }
            ResourceKind::VulnType => { type $ty = VulnType; $body }
            ResourceKind::Nmap => { type $ty = Nmap; $body }
        }
    };
}

/// Run `$body` with `$r` bound to the typed resource inside a [`Record`].
macro_rules! with_record {
    ($record:expr, $r:ident => $body:expr) => {
        match $record {
            Record::Mission($r) => $body,
            Record::User($r) => $body,
            Record::Client($r) => $body,
            Record::Vuln($r) => $body,
            Record::PositivePoint($r) => $body,
            Record::NegativePoint($r) => $body,
            Record::Step($r) => $body,
            Record::Host($r) => $body,
            Record::Impact($r) => $body,
            Record::HostVuln($r) => $body,
            Record::MissionType($r) => $body,
            Record::VulnType($r) => $body,
            Record::Nmap($r) => $body,
        }
    };
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Mission,
        ResourceKind::User,
        ResourceKind::Client,
        ResourceKind::Vuln,
        ResourceKind::PositivePoint,
        ResourceKind::NegativePoint,
        ResourceKind::Step,
        ResourceKind::Host,
        ResourceKind::Impact,
        ResourceKind::HostVuln,
        ResourceKind::MissionType,
        ResourceKind::VulnType,
        ResourceKind::Nmap,
    ];

    /// Resolve a command-line type name.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Mission => "mission",
            ResourceKind::User => "user",
            ResourceKind::Client => "client",
            ResourceKind::Vuln => "vuln",
            ResourceKind::PositivePoint => "positive_point",
            ResourceKind::NegativePoint => "negative_point",
            ResourceKind::Step => "step",
            ResourceKind::Host => "host",
            ResourceKind::Impact => "impact",
            ResourceKind::HostVuln => "host_vuln",
            ResourceKind::MissionType => "mission_type",
            ResourceKind::VulnType => "vuln_type",
            ResourceKind::Nmap => "nmap",
        }
    }

    /// Display name of the type
    pub fn title(self) -> &'static str {
        with_kind!(self, T => T::NAME)
    }

    pub fn fields(self) -> &'static [Field] {
        with_kind!(self, T => T::FIELDS)
    }

    /// Empty, unsaved record of this type.
    pub fn draft(self) -> Record {
        with_kind!(self, T => Record::from(T::default()))
    }

    pub async fn get(self, api: &dyn SmershApi, id: &str) -> Result<Record> {
        with_kind!(self, T => T::get(api, id).await.map(Record::from))
    }

    pub async fn all(self, api: &dyn SmershApi) -> Result<Vec<Record>> {
        with_kind!(self, T => Ok(T::all(api).await?.into_iter().map(Record::from).collect()))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A resource of any type
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Mission(Mission),
    User(User),
    Client(Client),
    Vuln(Vuln),
    PositivePoint(PositivePoint),
    NegativePoint(NegativePoint),
    Step(Step),
    Host(Host),
    Impact(Impact),
    HostVuln(HostVuln),
    MissionType(MissionType),
    VulnType(VulnType),
    Nmap(Nmap),
}

macro_rules! record_from {
    ($($variant:ident),*) => {
        $(impl From<$variant> for Record {
            fn from(value: $variant) -> Self {
                Record::$variant(value)
            }
        })*
    };
}

record_from!(
    Mission,
    User,
    Client,
    Vuln,
    PositivePoint,
    NegativePoint,
    Step,
    Host,
    Impact,
    HostVuln,
    MissionType,
    VulnType,
    Nmap
);

impl Record {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Record::Mission(_) => ResourceKind::Mission,
            Record::User(_) => ResourceKind::User,
            Record::Client(_) => ResourceKind::Client,
            Record::Vuln(_) => ResourceKind::Vuln,
            Record::PositivePoint(_) => ResourceKind::PositivePoint,
            Record::NegativePoint(_) => ResourceKind::NegativePoint,
            Record::Step(_) => ResourceKind::Step,
            Record::Host(_) => ResourceKind::Host,
            Record::Impact(_) => ResourceKind::Impact,
            Record::HostVuln(_) => ResourceKind::HostVuln,
            Record::MissionType(_) => ResourceKind::MissionType,
            Record::VulnType(_) => ResourceKind::VulnType,
            Record::Nmap(_) => ResourceKind::Nmap,
        }
    }

    pub fn id(&self) -> Option<&str> {
        with_record!(self, r => r.id())
    }

    pub fn is_new(&self) -> bool {
        with_record!(self, r => r.is_new())
    }

    pub fn iri(&self) -> Option<String> {
        with_record!(self, r => r.iri())
    }

    /// Local form: snake_case keys, bare ids for unresolved references.
    pub fn to_value(&self) -> Result<Value> {
        with_record!(self, r => Ok(serde_json::to_value(r)?))
    }

    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        with_record!(self, r => r.set_field(name, value))
    }

    pub fn add_items(&mut self, name: &str, items: Vec<Value>) -> Result<Vec<Value>> {
        with_record!(self, r => r.add_items(name, items))
    }

    pub fn remove_items(&mut self, name: &str, ids: &[String]) -> Result<usize> {
        with_record!(self, r => r.remove_items(name, ids))
    }

    pub async fn save(&mut self, api: &dyn SmershApi) -> Result<()> {
        with_record!(self, r => r.save(api).await)
    }

    pub async fn delete(&self, api: &dyn SmershApi) -> Result<()> {
        with_record!(self, r => r.delete(api).await)
    }

    pub async fn fetch(&self, api: &dyn SmershApi) -> Result<Record> {
        with_record!(self, r => r.fetch(api).await.map(Record::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockResponse, MockSmershApi};
    use serde_json::json;

    #[test]
    fn test_from_name() {
        assert_eq!(ResourceKind::from_name("mission"), Some(ResourceKind::Mission));
        assert_eq!(ResourceKind::from_name("host_vuln"), Some(ResourceKind::HostVuln));
        assert_eq!(ResourceKind::from_name("Vuln_Type"), Some(ResourceKind::VulnType));
        assert_eq!(ResourceKind::from_name("hostvuln"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.draft().kind(), kind);
            assert!(kind.draft().is_new());
        }
    }

    #[test]
    fn test_titles_and_fields() {
        assert_eq!(ResourceKind::HostVuln.title(), "HostVuln");
        assert!(
            ResourceKind::Mission
                .fields()
                .iter()
                .any(|f| f.name == "path_to_codi")
        );
    }

    #[tokio::test]
    async fn test_get_dispatches_to_endpoint() {
        let api = MockSmershApi::new()
            .with_response(MockResponse::body(json!({ "@id": "/api/host_vulns/3", "currentState": "open" })))
            .await;

        let record = ResourceKind::HostVuln.get(&api, "3").await.unwrap();

        assert_eq!(record.kind(), ResourceKind::HostVuln);
        assert_eq!(record.id(), Some("3"));
        assert_eq!(api.captured_requests().await[0].path, "/api/host_vulns/3");
    }

    #[tokio::test]
    async fn test_record_edit_and_save() {
        let api = MockSmershApi::new()
            .with_response(MockResponse::body(json!({ "@id": "/api/positive_points/8" })))
            .await;

        let mut record = ResourceKind::PositivePoint.draft();
        record.set_field("name", json!("Strong passwords")).unwrap();
        record.save(&api).await.unwrap();

        assert_eq!(record.id(), Some("8"));
        assert_eq!(record.iri().as_deref(), Some("/api/positive_points/8"));
        assert_eq!(record.to_value().unwrap()["name"], json!("Strong passwords"));

        let requests = api.captured_requests().await;
        assert_eq!(requests[0].path, "/api/positive_points");
    }

    #[tokio::test]
    async fn test_save_then_reload() {
        let api = MockSmershApi::new()
            .with_responses(vec![
                MockResponse::body(json!({ "@id": "/api/hosts/12", "name": "www.acme.test" })),
                MockResponse::body(json!({
                    "@id": "/api/hosts/12",
                    "name": "www.acme.test",
                    "checked": false,
                    "mission": "/api/missions/4"
                })),
            ])
            .await;

        let mut record = ResourceKind::Host.draft();
        record.set_field("name", json!("www.acme.test")).unwrap();
        record.save(&api).await.unwrap();
        let fresh = record.fetch(&api).await.unwrap();

        assert_eq!(fresh.id(), Some("12"));
        assert_eq!(fresh.to_value().unwrap()["checked"], json!(false));
        assert_eq!(fresh.to_value().unwrap()["mission"], json!("4"));

        let requests = api.captured_requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(requests[1].path, "/api/hosts/12");
        assert_eq!(api.call_counts().await.total(), 2);
    }
}
