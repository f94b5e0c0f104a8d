//! Field-name case conversion between the wire (camelCase) and local (snake_case) forms

use serde_json::{Map, Value};

/// Convert a snake_case name to camelCase.
///
/// The first segment is lowercased, every following segment is title-cased.
pub fn to_camel(s: &str) -> String {
    let mut parts = s.split('_');
    let mut out = parts.next().unwrap_or_default().to_lowercase();

    for part in parts {
        title_case_into(&mut out, part);
    }

    out
}

/// Uppercase every letter that follows a non-letter, lowercase the others (`2vuln` -> `2Vuln`).
fn title_case_into(out: &mut String, word: &str) {
    let mut after_letter = false;

    for c in word.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
}

/// Convert a camelCase (or PascalCase) name to snake_case.
///
/// Three left-to-right, non-overlapping passes, then lowercasing:
/// 1. any char followed by an uppercase letter and a lowercase run (`FooBar` -> `Foo_Bar`)
/// 2. lowercase letter or digit followed by an uppercase letter (`fooBAR` -> `foo_BAR`)
/// 3. uppercase letter followed by an uppercase letter (`foo_BAR` -> `foo_B_AR`)
///
/// Acronyms split letter by letter: `ID` becomes `i_d`.
pub fn to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let pass = split_title_runs(&chars);
    let pass = split_pairs(&pass, |a| a.is_ascii_lowercase() || a.is_ascii_digit());
    let pass = split_pairs(&pass, |a| a.is_ascii_uppercase());

    pass.into_iter().collect::<String>().to_lowercase()
}

fn split_title_runs(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let starts_run = i + 2 < chars.len()
            && chars[i + 1].is_ascii_uppercase()
            && chars[i + 2].is_ascii_lowercase();

        if starts_run {
            out.push(chars[i]);
            out.push('_');
            out.push(chars[i + 1]);

            let mut j = i + 2;
            while j < chars.len() && chars[j].is_ascii_lowercase() {
                out.push(chars[j]);
                j += 1;
            }
            i = j;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

fn split_pairs(chars: &[char], left: impl Fn(char) -> bool) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        if i + 1 < chars.len() && left(chars[i]) && chars[i + 1].is_ascii_uppercase() {
            out.push(chars[i]);
            out.push('_');
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// Recursively rename every object key of `value` with `convert`.
pub fn convert_keys(value: Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (convert(&k), convert_keys(v, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| convert_keys(v, convert))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("mission_type"), "missionType");
        assert_eq!(to_camel("path_to_codi"), "pathToCodi");
        assert_eq!(to_camel("name"), "name");
        assert_eq!(to_camel("Name_again"), "nameAgain");
    }

    #[test]
    fn test_to_camel_title_cases_after_digits() {
        assert_eq!(to_camel("host_2vuln"), "host2Vuln");
        assert_eq!(to_camel("nmap_x86_64"), "nmapX8664");
        assert_eq!(to_camel("step_fIND_at"), "stepFindAt");
    }

    #[test]
    fn test_to_snake() {
        assert_eq!(to_snake("missionType"), "mission_type");
        assert_eq!(to_snake("pathToCodi"), "path_to_codi");
        assert_eq!(to_snake("FooBar"), "foo_bar");
        assert_eq!(to_snake("name"), "name");
        assert_eq!(to_snake("host2Vuln"), "host2_vuln");
    }

    #[test]
    fn test_to_snake_acronym_quirk() {
        assert_eq!(to_snake("ID"), "i_d");
        assert_eq!(to_snake("fooBAR"), "foo_b_ar");
    }

    #[test]
    fn test_snake_camel_round_trip() {
        for name in [
            "mission_type",
            "nmap_filer",
            "start_date",
            "host_vulns",
            "a_b_c",
            "current_state",
            "name",
        ] {
            assert_eq!(to_snake(&to_camel(name)), name, "round trip of {}", name);
        }
    }

    #[test]
    fn test_convert_keys_recurses() {
        let value = json!({
            "missionType": { "firstName": "x" },
            "hostVulns": [{ "currentState": "open" }],
            "plain": "valueStaysCamel"
        });

        let converted = convert_keys(value, to_snake);

        assert_eq!(
            converted,
            json!({
                "mission_type": { "first_name": "x" },
                "host_vulns": [{ "current_state": "open" }],
                "plain": "valueStaysCamel"
            })
        );
    }
}
