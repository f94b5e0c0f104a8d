//! Positive and negative report points

use serde::{Deserialize, Serialize};

use super::reference::Field;
use super::resource::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositivePoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Resource for PositivePoint {
    const ENDPOINT: &'static str = "positive_points";
    const NAME: &'static str = "PositivePoint";
    const FIELDS: &'static [Field] = &[Field::text("name"), Field::text("description")];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegativePoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Resource for NegativePoint {
    const ENDPOINT: &'static str = "negative_points";
    const NAME: &'static str = "NegativePoint";
    const FIELDS: &'static [Field] = &[Field::text("name"), Field::text("description")];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
