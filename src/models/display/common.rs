//! Common display utilities and helpers

use crate::client::models::{Reference, Resource};

/// Render a flag with custom wording, unset counting as false
pub fn flag(value: Option<bool>, yes: &str, no: &str) -> String {
    if value.unwrap_or(false) { yes } else { no }.to_string()
}

pub fn yes_no(value: Option<bool>) -> String {
    flag(value, "Yes", "No")
}

/// Identifier of a record, `NEW` for drafts
pub fn id_or_new(id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => "NEW".to_string(),
    }
}

/// Comma-separated ids of a reference list, `None` when empty
pub fn ref_ids<T: Resource>(refs: &[Reference<T>]) -> String {
    if refs.is_empty() {
        return "None".to_string();
    }

    refs.iter()
        .map(|r| r.id().unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `#id` of a single reference, `--` when unset
pub fn ref_id<T: Resource>(reference: Option<&Reference<T>>) -> String {
    match reference.and_then(|r| r.id()) {
        Some(id) => format!("#{}", id),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Mission, User};

    #[test]
    fn test_flags() {
        assert_eq!(yes_no(Some(true)), "Yes");
        assert_eq!(yes_no(None), "No");
        assert_eq!(flag(Some(true), "Done", "To do"), "Done");
    }

    #[test]
    fn test_ids() {
        assert_eq!(id_or_new(Some("4")), "4");
        assert_eq!(id_or_new(None), "NEW");

        let users: Vec<Reference<User>> =
            vec![Reference::unresolved("/api/users/1"), Reference::unresolved("2")];
        assert_eq!(ref_ids(&users), "1, 2");
        assert_eq!(ref_ids::<User>(&[]), "None");

        let mission: Reference<Mission> = Reference::unresolved("9");
        assert_eq!(ref_id(Some(&mission)), "#9");
        assert_eq!(ref_id::<Mission>(None), "--");
    }
}
