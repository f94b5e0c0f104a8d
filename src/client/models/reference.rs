//! Lazy references between resources
//!
//! A relationship field holds either an unresolved identifier (the target
//! exists server-side but was returned as a bare link) or a resolved, fully
//! decoded resource embedded by the server or loaded with [`Reference::resolve`].
//!
//! Locally a reference serializes as its bare id (unresolved) or as the nested
//! object (resolved). The link form sent to the backend is produced by
//! [`export_links`], driven by the per-type field table.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::resource::Resource;
use crate::client::SmershApi;
use crate::client::wire::{extract_id, is_link};
use crate::error::{ModelError, Result};

/// Path prefix of every resource endpoint
pub const API_ROOT: &str = "/api";

/// Canonical link of a resource: ids that are already links are kept verbatim.
pub fn iri(endpoint: &str, id: &str) -> String {
    if is_link(id) {
        id.to_string()
    } else {
        format!("{}/{}/{}", API_ROOT, endpoint, id)
    }
}

/// Kind of a resource field, as declared in the per-type field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    /// ISO-8601 timestamp kept as text
    Date,
    /// Single reference to a resource living under the given endpoint
    One(&'static str),
    /// Ordered reference list to resources living under the given endpoint
    Many(&'static str),
    /// List of permission role names
    Roles,
}

impl FieldKind {
    /// Whether the field holds a sequence.
    pub fn is_list(self) -> bool {
        matches!(self, FieldKind::Many(_) | FieldKind::Roles)
    }
}

/// One entry of a resource's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Flag }
    }

    pub const fn date(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Date }
    }

    pub const fn one(name: &'static str, endpoint: &'static str) -> Self {
        Self { name, kind: FieldKind::One(endpoint) }
    }

    pub const fn many(name: &'static str, endpoint: &'static str) -> Self {
        Self { name, kind: FieldKind::Many(endpoint) }
    }

    pub const fn roles(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Roles }
    }
}

/// A relationship value: unresolved id or resolved resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    Unresolved(String),
    Resolved(Box<T>),
}

impl<T> Reference<T> {
    /// Build an unresolved reference. Links are reduced to their bare id.
    pub fn unresolved(id: impl AsRef<str>) -> Self {
        Reference::Unresolved(extract_id(id.as_ref()).to_string())
    }

    pub fn resolved(value: T) -> Self {
        Reference::Resolved(Box::new(value))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved(_))
    }

    /// Embedded resource, if this reference was resolved.
    pub fn get(&self) -> Option<&T> {
        match self {
            Reference::Resolved(value) => Some(value),
            Reference::Unresolved(_) => None,
        }
    }
}

impl<T: Resource> Reference<T> {
    /// Identifier of the target, bare form.
    pub fn id(&self) -> Option<&str> {
        match self {
            Reference::Unresolved(id) => Some(extract_id(id)),
            Reference::Resolved(value) => value.id().map(extract_id),
        }
    }

    /// Canonical link of the target.
    pub fn link(&self) -> Option<String> {
        match self {
            Reference::Unresolved(id) => Some(iri(T::ENDPOINT, id)),
            Reference::Resolved(value) => value.iri(),
        }
    }

    /// Load the full target from the backend without touching this reference.
    pub async fn fetch(&self, api: &dyn SmershApi) -> Result<T> {
        match self.id() {
            Some(id) if !id.is_empty() => T::get(api, id).await,
            _ => Err(ModelError::Draft(T::NAME).into()),
        }
    }

    /// Promote an unresolved reference in place. Resolved references are left as is.
    pub async fn resolve(&mut self, api: &dyn SmershApi) -> Result<&T> {
        if let Reference::Unresolved(_) = self {
            let value = self.fetch(api).await?;
            *self = Reference::resolved(value);
        }

        match self {
            Reference::Resolved(value) => Ok(value),
            Reference::Unresolved(_) => Err(ModelError::Draft(T::NAME).into()),
        }
    }
}

impl<T: Serialize> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Reference::Unresolved(id) => serializer.serialize_str(id),
            Reference::Resolved(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Reference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(Reference::unresolved(id)),
            Value::Number(id) => Ok(Reference::Unresolved(id.to_string())),
            Value::Object(map) if is_stub(&map) => match map.get("id") {
                Some(Value::String(id)) => Ok(Reference::unresolved(id)),
                Some(Value::Number(id)) => Ok(Reference::Unresolved(id.to_string())),
                _ => Err(D::Error::custom("reference stub without usable id")),
            },
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(Reference::resolved)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a link or an object, found {}",
                other
            ))),
        }
    }
}

/// An object carrying nothing but its identifier.
fn is_stub(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.contains_key("id")
}

/// Deserialize a reference list, reading `null` as an empty list.
pub fn nullable_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn stub(id: String) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert("id".to_string(), Value::String(id));
    Value::Object(map)
}

/// Wrap bare identifiers of relationship fields into `{id}` stubs.
///
/// Only fields declared as references in `fields` are touched, and only
/// string values: embedded objects are left for in-place decoding.
pub fn wrap_lazy(value: Value, fields: &[Field]) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };

    for field in fields {
        let Some(raw) = map.get_mut(field.name) else {
            continue;
        };

        match field.kind {
            FieldKind::One(_) => {
                if let Value::String(id) = raw {
                    *raw = stub(std::mem::take(id));
                }
            }
            FieldKind::Many(_) => {
                if let Value::Array(items) = raw {
                    for item in items.iter_mut() {
                        if let Value::String(id) = item {
                            *item = stub(std::mem::take(id));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Value::Object(map)
}

fn link_of(field: &Field, endpoint: &str, value: &Value) -> std::result::Result<Value, ModelError> {
    let id = match value {
        Value::Null => return Ok(Value::Null),
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        Value::Object(map) => match map.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        },
        _ => None,
    };

    id.map(|id| Value::String(iri(endpoint, &id)))
        .ok_or_else(|| ModelError::UnsavedReference(field.name.to_string()))
}

/// Replace every reference of a locally serialized resource with its canonical link.
pub fn export_links(value: Value, fields: &[Field]) -> std::result::Result<Value, ModelError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };

    for field in fields {
        let Some(raw) = map.get_mut(field.name) else {
            continue;
        };

        match field.kind {
            FieldKind::One(endpoint) => {
                *raw = link_of(field, endpoint, raw)?;
            }
            FieldKind::Many(endpoint) => {
                if let Value::Array(items) = raw {
                    for item in items.iter_mut() {
                        *item = link_of(field, endpoint, item)?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(Value::Object(map))
}

/// Identity of a list item for membership tests: bare id of a link or of an embedded object.
pub fn item_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(extract_id(s).to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("id").and_then(item_key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Mission, User};
    use serde_json::json;

    const FIELDS: &[Field] = &[
        Field::text("name"),
        Field::one("mission", "missions"),
        Field::many("users", "users"),
    ];

    #[test]
    fn test_iri() {
        assert_eq!(iri("missions", "42"), "/api/missions/42");
        assert_eq!(iri("missions", "/api/missions/42"), "/api/missions/42");
    }

    #[test]
    fn test_bare_string_becomes_unresolved() {
        let reference: Reference<Mission> = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(reference, Reference::Unresolved("7".to_string()));
        assert_eq!(reference.id(), Some("7"));
        assert!(!reference.is_resolved());
    }

    #[test]
    fn test_link_and_bare_id_are_equivalent() {
        let from_link: Reference<Mission> = Reference::unresolved("/api/missions/42");
        let from_bare: Reference<Mission> = Reference::unresolved("42");

        assert_eq!(from_link, from_bare);
        assert_eq!(from_link.link().as_deref(), Some("/api/missions/42"));
        assert_eq!(from_bare.link().as_deref(), Some("/api/missions/42"));
    }

    #[test]
    fn test_object_becomes_resolved() {
        let reference: Reference<Mission> =
            serde_json::from_value(json!({ "id": "7", "name": "X" })).unwrap();

        let mission = reference.get().expect("resolved");
        assert_eq!(mission.id.as_deref(), Some("7"));
        assert_eq!(mission.name.as_deref(), Some("X"));
    }

    #[test]
    fn test_stub_stays_unresolved() {
        let reference: Reference<Mission> = serde_json::from_value(json!({ "id": "7" })).unwrap();
        assert_eq!(reference, Reference::Unresolved("7".to_string()));
    }

    #[test]
    fn test_wrap_lazy_only_touches_reference_strings() {
        let value = json!({
            "name": "plain text",
            "mission": "/api/missions/3",
            "users": ["/api/users/1", { "id": "2", "username": "bob" }]
        });

        assert_eq!(
            wrap_lazy(value, FIELDS),
            json!({
                "name": "plain text",
                "mission": { "id": "/api/missions/3" },
                "users": [{ "id": "/api/users/1" }, { "id": "2", "username": "bob" }]
            })
        );
    }

    #[test]
    fn test_export_links() {
        let value = json!({
            "name": "x",
            "mission": "3",
            "users": ["/api/users/1", { "id": "2", "username": "bob" }]
        });

        assert_eq!(
            export_links(value, FIELDS).unwrap(),
            json!({
                "name": "x",
                "mission": "/api/missions/3",
                "users": ["/api/users/1", "/api/users/2"]
            })
        );
    }

    #[test]
    fn test_export_rejects_embedded_draft() {
        let value = json!({ "mission": { "name": "draft" } });

        match export_links(value, FIELDS) {
            Err(ModelError::UnsavedReference(field)) => assert_eq!(field, "mission"),
            other => panic!("Expected UnsavedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_null_list_decodes_empty() {
        let user: User = serde_json::from_value(json!({ "id": "1", "missions": null })).unwrap();
        assert!(user.missions.is_empty());
    }

    #[test]
    fn test_item_key() {
        assert_eq!(item_key(&json!("/api/users/4")).as_deref(), Some("4"));
        assert_eq!(item_key(&json!({ "id": "4", "username": "x" })).as_deref(), Some("4"));
        assert_eq!(item_key(&json!(true)), None);
    }
}
