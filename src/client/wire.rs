//! JSON-LD response normalization
//!
//! The backend speaks Hydra-flavoured JSON-LD. Before a payload reaches the
//! typed models it is normalized:
//! - `hydra:Collection` envelopes are replaced by their member list
//! - every object carrying `id` or `@id` ends up with a single bare string `id`
//! - `@`-prefixed envelope keys are dropped and remaining keys become snake_case
//!
//! Objects without an identifier (auth tokens, upload reports) pass through untouched.

use serde_json::{Map, Value};

use super::case::to_snake;

/// `@type` value marking a collection envelope
const COLLECTION_TYPE: &str = "hydra:Collection";

/// Key holding the members of a collection envelope
const MEMBER_KEY: &str = "hydra:member";

/// Key holding the human-readable reason of a 400 answer
pub const DESCRIPTION_KEY: &str = "hydra:description";

/// Prefix of JSON-LD envelope keys
const ENVELOPE_PREFIX: char = '@';

/// Last path segment of a link (`/api/missions/42` -> `42`). Bare ids are returned as is.
pub fn extract_id(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

/// Whether an identifier is a full resource link rather than a bare id.
pub fn is_link(id: &str) -> bool {
    id.starts_with('/')
}

fn is_collection(map: &Map<String, Value>) -> bool {
    map.get("@type").and_then(Value::as_str) == Some(COLLECTION_TYPE)
}

fn normalize_id(raw: &Value) -> Value {
    match raw {
        Value::String(s) => Value::String(extract_id(s).to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => other.clone(),
    }
}

/// Normalize a decoded response body. See the module documentation for the rules.
pub fn clean_ldjson(data: Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.into_iter().map(clean_ldjson).collect()),
        Value::Object(mut map) => {
            if is_collection(&map) {
                let members = map.remove(MEMBER_KEY).unwrap_or(Value::Array(Vec::new()));
                return clean_ldjson(members);
            }

            let raw_id = match map.get("id").or_else(|| map.get("@id")) {
                Some(id) => normalize_id(id),
                None => return Value::Object(map),
            };

            let mut cleaned = Map::with_capacity(map.len());
            cleaned.insert("id".to_string(), raw_id);

            for (key, value) in map {
                if key.starts_with(ENVELOPE_PREFIX) || key == "id" {
                    continue;
                }
                cleaned.insert(to_snake(&key), clean_ldjson(value));
            }

            Value::Object(cleaned)
        }
        other => other,
    }
}

/// Parse a raw response body. Empty or non-JSON bodies mean "no data".
pub fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => Some(clean_ldjson(value)),
        Err(e) => {
            log::debug!("Response body is not JSON, treating as no data: {}", e);
            None
        }
    }
}

/// Drop `null` members of an object so a merge-patch never clears a field by accident.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_is_unwrapped() {
        let payload = json!({
            "@context": "/api/contexts/Mission",
            "@id": "/api/missions",
            "@type": "hydra:Collection",
            "hydra:member": [
                { "id": 1, "name": "A" },
                { "id": "/api/x/2", "name": "B" }
            ],
            "hydra:totalItems": 2
        });

        assert_eq!(
            clean_ldjson(payload),
            json!([{ "id": "1", "name": "A" }, { "id": "2", "name": "B" }])
        );
    }

    #[test]
    fn test_collection_without_members_is_empty() {
        let payload = json!({ "@type": "hydra:Collection" });
        assert_eq!(clean_ldjson(payload), json!([]));
    }

    #[test]
    fn test_at_id_becomes_bare_id() {
        let payload = json!({
            "@id": "/api/missions/42",
            "@type": "Mission",
            "pathToCodi": "http://codi/42",
            "missionType": { "@id": "/api/mission_types/3", "name": "Web" }
        });

        assert_eq!(
            clean_ldjson(payload),
            json!({
                "id": "42",
                "path_to_codi": "http://codi/42",
                "mission_type": { "id": "3", "name": "Web" }
            })
        );
    }

    #[test]
    fn test_plain_id_wins_over_at_id() {
        let payload = json!({ "@id": "/api/users/9", "id": 7, "username": "alice" });
        assert_eq!(clean_ldjson(payload), json!({ "id": "7", "username": "alice" }));
    }

    #[test]
    fn test_link_strings_inside_lists_are_kept() {
        let payload = json!({
            "id": 1,
            "users": ["/api/users/2", "/api/users/3"]
        });

        assert_eq!(
            clean_ldjson(payload),
            json!({ "id": "1", "users": ["/api/users/2", "/api/users/3"] })
        );
    }

    #[test]
    fn test_object_without_id_passes_through() {
        let payload = json!({ "token": "a.b.c", "refreshToken": "x" });
        assert_eq!(clean_ldjson(payload.clone()), payload);
    }

    #[test]
    fn test_parse_body_tolerates_empty_and_garbage() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("   \n"), None);
        assert_eq!(parse_body("<html>oops</html>"), None);
        assert_eq!(parse_body(r#"{"id": 5}"#), Some(json!({ "id": "5" })));
    }

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id("/api/missions/42"), "42");
        assert_eq!(extract_id("42"), "42");
        assert!(is_link("/api/missions/42"));
        assert!(!is_link("42"));
    }

    #[test]
    fn test_strip_nulls() {
        let value = json!({ "name": "x", "credentials": null, "users": [] });
        assert_eq!(strip_nulls(value), json!({ "name": "x", "users": [] }));
    }
}
