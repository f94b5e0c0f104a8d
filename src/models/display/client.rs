//! Customer display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{id_or_new, ref_ids};
use crate::client::models::Client;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClientDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CONTACT NAME")]
    pub contact: String,

    #[tabled(rename = "PHONE NUMBER")]
    pub phone: String,

    #[tabled(rename = "EMAIL")]
    pub mail: String,

    #[tabled(rename = "MISSIONS")]
    pub missions: String,
}

impl From<&Client> for ClientDisplay {
    fn from(client: &Client) -> Self {
        let contact = match (&client.first_name, &client.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => "--".to_string(),
        };

        Self {
            id: id_or_new(client.id.as_deref()),
            name: or_dash(client.name.as_deref()),
            contact,
            phone: or_dash(client.phone.as_deref()),
            mail: or_dash(client.mail.as_deref()),
            missions: ref_ids(&client.missions),
        }
    }
}
