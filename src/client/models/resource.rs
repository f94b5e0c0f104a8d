//! Shared behaviour of every SMERSH resource type

use std::fmt::Debug;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::reference::{API_ROOT, Field, FieldKind, export_links, iri, item_key, wrap_lazy};
use super::roles::ApiRoles;
use crate::client::SmershApi;
use crate::client::case::{convert_keys, to_camel};
use crate::client::wire::{extract_id, is_link, strip_nulls};
use crate::error::{ApiError, ModelError, Result};

/// A typed record mirroring one backend entity type.
///
/// Implementors only declare their endpoint, display name, field table and
/// identifier accessors; decoding, export and the CRUD protocol are shared.
#[async_trait]
pub trait Resource:
    Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static
{
    /// Collection name under [`API_ROOT`]
    const ENDPOINT: &'static str;

    /// Human-readable type name
    const NAME: &'static str;

    /// Every editable field, with relationship fields tagged by target endpoint
    const FIELDS: &'static [Field];

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    /// Not persisted yet: no identifier, or an empty one.
    fn is_new(&self) -> bool {
        self.id().is_none_or(str::is_empty)
    }

    /// The identifier is still a link that was never fetched.
    fn is_lazy(&self) -> bool {
        self.id().is_some_and(is_link)
    }

    /// Canonical link of this resource, `None` for drafts.
    fn iri(&self) -> Option<String> {
        match self.id() {
            Some(id) if !id.is_empty() => Some(iri(Self::ENDPOINT, id)),
            _ => None,
        }
    }

    fn collection_path() -> String {
        format!("{}/{}", API_ROOT, Self::ENDPOINT)
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}/{}", API_ROOT, Self::ENDPOINT, extract_id(id))
    }

    /// Look up a field of the table.
    fn field(name: &str) -> std::result::Result<&'static Field, ModelError> {
        Self::FIELDS
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ModelError::UnknownField {
                kind: Self::NAME,
                field: name.to_string(),
            })
    }

    /// Decode a normalized payload, wrapping bare relationship ids as unresolved references.
    fn decode(value: Value) -> Result<Self> {
        let wrapped = wrap_lazy(value, Self::FIELDS);
        Ok(serde_json::from_value(wrapped)?)
    }

    /// Wire form of this resource: links for references, camelCase keys.
    ///
    /// Unset fields are kept as `null`; callers building a partial update strip them.
    fn export(&self) -> Result<Value> {
        let local = serde_json::to_value(self)?;
        let linked = export_links(local, Self::FIELDS)?;
        Ok(convert_keys(linked, to_camel))
    }

    /// Replace a field value. `value` uses the local form (bare ids for references).
    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        let field = Self::field(name)?;
        check_value(field, &value)?;

        let mut local = serde_json::to_value(&*self)?;
        if let Value::Object(map) = &mut local {
            map.insert(field.name.to_string(), value);
        }
        *self = Self::decode(local)?;

        Ok(())
    }

    /// Append items to a list field, skipping those already present.
    ///
    /// Membership is decided by id. Returns the skipped duplicates.
    fn add_items(&mut self, name: &str, items: Vec<Value>) -> Result<Vec<Value>> {
        let field = Self::field(name)?;
        let mut local = serde_json::to_value(&*self)?;
        let list = list_mut(&mut local, field, Self::NAME)?;
        let mut skipped = Vec::new();

        for item in items {
            check_item(field, &item)?;

            let key = item_key(&item);
            if list.iter().any(|existing| item_key(existing) == key) {
                skipped.push(item);
            } else {
                list.push(item);
            }
        }

        *self = Self::decode(local)?;
        Ok(skipped)
    }

    /// Remove list items whose id is in `ids`. Returns how many were removed.
    fn remove_items(&mut self, name: &str, ids: &[String]) -> Result<usize> {
        let field = Self::field(name)?;
        let mut local = serde_json::to_value(&*self)?;
        let list = list_mut(&mut local, field, Self::NAME)?;
        let before = list.len();

        let wanted: Vec<&str> = ids.iter().map(|id| extract_id(id)).collect();
        list.retain(|item| {
            item_key(item).is_none_or(|key| !wanted.contains(&key.as_str()))
        });

        let removed = before - list.len();
        *self = Self::decode(local)?;
        Ok(removed)
    }

    /// Fetch one resource by bare id or link.
    async fn get(api: &dyn SmershApi, id: &str) -> Result<Self> {
        let path = Self::item_path(id);
        debug!("Fetching {} {}", Self::NAME, path);

        let body = api
            .get(&path)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse(format!("{} returned no data", path)))?;

        Self::decode(body)
    }

    /// Fetch the whole collection, in server order.
    async fn all(api: &dyn SmershApi) -> Result<Vec<Self>> {
        let path = Self::collection_path();
        debug!("Listing {}", path);

        match api.get(&path).await? {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.into_iter().map(Self::decode).collect(),
            Some(other) => Err(ApiError::InvalidResponse(format!(
                "{} did not return a collection: {}",
                path, other
            ))
            .into()),
        }
    }

    /// Create (draft) or partially update (persisted) this resource.
    ///
    /// Creation adopts the server-issued id; an update never changes the id.
    async fn save(&mut self, api: &dyn SmershApi) -> Result<()> {
        let payload = self.export()?;

        match self.iri() {
            None => {
                let payload = strip_id(payload);
                let path = Self::collection_path();
                debug!("Creating {} at {}", Self::NAME, path);

                let response = api.post(&path, payload).await?.ok_or_else(|| {
                    ApiError::InvalidResponse(format!("creating at {} returned no data", path))
                })?;

                let issued = response
                    .get("id")
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        ApiError::InvalidResponse(format!(
                            "creating at {} returned no identifier",
                            path
                        ))
                    })?;

                self.set_id(Some(extract_id(issued).to_string()));
            }
            Some(link) => {
                debug!("Updating {} at {}", Self::NAME, link);
                api.patch(&link, strip_nulls(payload)).await?;
            }
        }

        Ok(())
    }

    /// Delete this resource server-side. Drafts are refused without any request.
    async fn delete(&self, api: &dyn SmershApi) -> Result<()> {
        let link = self.iri().ok_or(ModelError::Draft(Self::NAME))?;
        debug!("Deleting {} at {}", Self::NAME, link);

        api.delete(&link).await?;
        Ok(())
    }

    /// Load a fully resolved copy of this resource.
    async fn fetch(&self, api: &dyn SmershApi) -> Result<Self> {
        match self.id() {
            Some(id) if !id.is_empty() => Self::get(api, extract_id(id)).await,
            _ => Err(ModelError::Draft(Self::NAME).into()),
        }
    }
}

fn strip_id(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => {
            map.remove("id");
            Value::Object(map)
        }
        other => other,
    }
}

fn list_mut<'a>(
    local: &'a mut Value,
    field: &Field,
    kind: &'static str,
) -> std::result::Result<&'a mut Vec<Value>, ModelError> {
    let not_a_list = || ModelError::NotAList {
        kind,
        field: field.name.to_string(),
    };

    if !field.kind.is_list() {
        return Err(not_a_list());
    }

    let map = local.as_object_mut().ok_or_else(not_a_list)?;
    let slot = map
        .entry(field.name.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }

    slot.as_array_mut().ok_or_else(not_a_list)
}

fn invalid(field: &Field, reason: &str) -> ModelError {
    ModelError::InvalidValue {
        field: field.name.to_string(),
        reason: reason.to_string(),
    }
}

fn check_item(field: &Field, item: &Value) -> std::result::Result<(), ModelError> {
    match (field.kind, item) {
        (FieldKind::Roles, Value::String(role)) => ApiRoles::from_name(role)
            .map(|_| ())
            .ok_or_else(|| ModelError::InvalidRole(role.clone())),
        (FieldKind::Roles, _) => Err(invalid(field, "role names must be strings")),
        (_, Value::String(_) | Value::Object(_)) => Ok(()),
        _ => Err(invalid(field, "expected an identifier")),
    }
}

fn check_value(field: &Field, value: &Value) -> std::result::Result<(), ModelError> {
    match (field.kind, value) {
        (_, Value::Null) if !field.kind.is_list() => Ok(()),
        (FieldKind::Text | FieldKind::Date, Value::String(_)) => Ok(()),
        (FieldKind::Flag, Value::Bool(_)) => Ok(()),
        (FieldKind::One(_), Value::String(_) | Value::Object(_)) => Ok(()),
        (FieldKind::Many(_) | FieldKind::Roles, Value::Array(items)) => {
            items.iter().try_for_each(|item| check_item(field, item))
        }
        (FieldKind::Flag, _) => Err(invalid(field, "expected a boolean")),
        (FieldKind::Many(_) | FieldKind::Roles, _) => Err(invalid(field, "expected a list")),
        _ => Err(invalid(field, "expected text")),
    }
}
