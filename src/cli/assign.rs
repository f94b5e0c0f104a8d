//! Parsing of `assign` arguments into field values

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::client::models::{ApiRoles, Field, FieldKind, Record};
use crate::error::{ModelError, Result};
use crate::output::formatters::normalize_date_input;

/// What an `assign` line does to its field
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Set(Value),
    Add(Vec<Value>),
    Remove(Vec<String>),
}

/// Outcome of an applied assignment
#[derive(Debug, Default, PartialEq)]
pub struct Applied {
    /// Items that were already in the list
    pub skipped: Vec<Value>,
    pub removed: usize,
}

fn invalid(field: &Field, reason: impl Into<String>) -> ModelError {
    ModelError::InvalidValue {
        field: field.name.to_string(),
        reason: reason.into(),
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Some(true),
        "no" | "false" | "f" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Object ids are non-negative integers; links are accepted too.
fn parse_object_id(field: &Field, value: &str) -> std::result::Result<String, ModelError> {
    let id = crate::client::wire::extract_id(value);
    id.parse::<u64>()
        .map(|n| n.to_string())
        .map_err(|_| invalid(field, format!("'{}' is not an object identifier", value)))
}

fn single<'a>(field: &Field, values: &'a [String]) -> std::result::Result<&'a str, ModelError> {
    match values {
        [value] => Ok(value),
        _ => Err(invalid(field, "expected exactly one value")),
    }
}

/// Turn the words typed after the field name into an [`Assignment`].
pub fn parse_assignment(
    field: &Field,
    values: &[String],
    now: DateTime<Utc>,
) -> std::result::Result<Assignment, ModelError> {
    if field.kind.is_list() {
        let (action, items) = values
            .split_first()
            .ok_or_else(|| invalid(field, "expected add or remove"))?;

        if items.is_empty() {
            return Err(invalid(field, "expected at least one item"));
        }

        return match (action.as_str(), field.kind) {
            ("add", FieldKind::Roles) => items
                .iter()
                .map(|role| match ApiRoles::from_name(role) {
                    Some(_) => Ok(Value::String(role.clone())),
                    None => Err(ModelError::InvalidRole(role.clone())),
                })
                .collect::<std::result::Result<_, _>>()
                .map(Assignment::Add),
            ("add", _) => items
                .iter()
                .map(|item| parse_object_id(field, item).map(Value::String))
                .collect::<std::result::Result<_, _>>()
                .map(Assignment::Add),
            ("remove", FieldKind::Roles) => Ok(Assignment::Remove(items.to_vec())),
            ("remove", _) => items
                .iter()
                .map(|item| parse_object_id(field, item))
                .collect::<std::result::Result<_, _>>()
                .map(Assignment::Remove),
            (other, _) => Err(invalid(
                field,
                format!("expected add or remove, got '{}'", other),
            )),
        };
    }

    match field.kind {
        FieldKind::Text => Ok(Assignment::Set(Value::String(values.join(" ")))),
        FieldKind::Flag => {
            let value = single(field, values)?;
            parse_bool(value)
                .map(|b| Assignment::Set(Value::Bool(b)))
                .ok_or_else(|| invalid(field, "boolean value expected"))
        }
        FieldKind::Date => {
            let value = single(field, values)?;
            normalize_date_input(value, now)
                .map(|date| Assignment::Set(Value::String(date)))
                .ok_or_else(|| invalid(field, "expected `now` or an ISO-8601 date"))
        }
        FieldKind::One(_) => {
            let value = single(field, values)?;
            parse_object_id(field, value).map(|id| Assignment::Set(Value::String(id)))
        }
        FieldKind::Many(_) | FieldKind::Roles => Err(invalid(field, "expected add or remove")),
    }
}

/// Parse and apply one `assign` line to `record`.
pub fn apply(
    record: &mut Record,
    field_name: &str,
    values: &[String],
    now: DateTime<Utc>,
) -> Result<Applied> {
    let kind = record.kind();
    let field = kind
        .fields()
        .iter()
        .find(|f| f.name == field_name)
        .ok_or_else(|| ModelError::UnknownField {
            kind: kind.title(),
            field: field_name.to_string(),
        })?;

    let mut applied = Applied::default();
    match parse_assignment(field, values, now)? {
        Assignment::Set(value) => record.set_field(field.name, value)?,
        Assignment::Add(items) => applied.skipped = record.add_items(field.name, items)?,
        Assignment::Remove(ids) => applied.removed = record.remove_items(field.name, &ids)?,
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Mission, ResourceKind, User};
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 15).unwrap()
    }

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_bool() {
        for yes in ["yes", "TRUE", "t", "Y", "1"] {
            assert_eq!(parse_bool(yes), Some(true));
        }
        for no in ["no", "False", "f", "n", "0"] {
            assert_eq!(parse_bool(no), Some(false));
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(
            parse_assignment(&Field::text("name"), &words(&["Acme", "external"]), now()).unwrap(),
            Assignment::Set(json!("Acme external"))
        );
        assert_eq!(
            parse_assignment(&Field::flag("nmap"), &words(&["yes"]), now()).unwrap(),
            Assignment::Set(json!(true))
        );
        assert_eq!(
            parse_assignment(&Field::date("end_date"), &words(&["now"]), now()).unwrap(),
            Assignment::Set(json!("2024-03-01T12:30:15+00:00"))
        );
        assert_eq!(
            parse_assignment(&Field::one("mission", "missions"), &words(&["/api/missions/4"]), now())
                .unwrap(),
            Assignment::Set(json!("4"))
        );
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse_assignment(&Field::flag("nmap"), &words(&["maybe"]), now()).is_err());
        assert!(parse_assignment(&Field::flag("nmap"), &words(&["yes", "no"]), now()).is_err());
        assert!(parse_assignment(&Field::date("end_date"), &words(&["soon"]), now()).is_err());
        assert!(parse_assignment(&Field::one("mission", "missions"), &words(&["x"]), now()).is_err());
    }

    #[test]
    fn test_parse_list_actions() {
        let users = Field::many("users", "users");

        assert_eq!(
            parse_assignment(&users, &words(&["add", "3", "4"]), now()).unwrap(),
            Assignment::Add(vec![json!("3"), json!("4")])
        );
        assert_eq!(
            parse_assignment(&users, &words(&["remove", "3"]), now()).unwrap(),
            Assignment::Remove(vec!["3".to_string()])
        );
        assert!(parse_assignment(&users, &words(&["3"]), now()).is_err());
        assert!(parse_assignment(&users, &words(&["add"]), now()).is_err());
        assert!(parse_assignment(&users, &words(&["add", "-1"]), now()).is_err());
    }

    #[test]
    fn test_parse_roles() {
        let roles = Field::roles("roles");

        assert_eq!(
            parse_assignment(&roles, &words(&["add", "ROLE_ADMIN"]), now()).unwrap(),
            Assignment::Add(vec![json!("ROLE_ADMIN")])
        );
        assert!(matches!(
            parse_assignment(&roles, &words(&["add", "ROLE_WIZARD"]), now()),
            Err(ModelError::InvalidRole(name)) if name == "ROLE_WIZARD"
        ));
    }

    #[test]
    fn test_apply_to_record() {
        let mut record = ResourceKind::Mission.draft();

        apply(&mut record, "name", &words(&["Acme"]), now()).unwrap();
        apply(&mut record, "users", &words(&["add", "1", "2"]), now()).unwrap();
        let applied = apply(&mut record, "users", &words(&["add", "2"]), now()).unwrap();
        assert_eq!(applied.skipped, vec![json!("2")]);

        let applied = apply(&mut record, "users", &words(&["remove", "1"]), now()).unwrap();
        assert_eq!(applied.removed, 1);

        match record {
            Record::Mission(Mission { name, users, .. }) => {
                assert_eq!(name.as_deref(), Some("Acme"));
                assert_eq!(users.len(), 1);
                assert_eq!(users[0].id(), Some("2"));
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_apply_unknown_field() {
        let mut record = Record::from(User::default());
        let err = apply(&mut record, "colour", &words(&["red"]), now()).unwrap_err();

        assert!(matches!(
            err,
            Error::Model(ModelError::UnknownField { field, .. }) if field == "colour"
        ));
    }
}
