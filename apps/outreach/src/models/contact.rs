use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier for a stored contact. Numeric or textual depending on the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Number(n) => write!(f, "{n}"),
            ContactId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ContactId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(ContactId::Number)
            .unwrap_or_else(|_| ContactId::Text(s.to_string())))
    }
}

/// A stored HR contact, as returned by the backend (snake_case).
/// Optional text fields may be missing or `null`; they read as empty and are
/// filled in when the contact is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hr_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /addContact` and `PUT /updateContact/:id` (camelCase).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub hr_name: String,
    pub email: String,
    pub company_name: String,
    pub job_position: String,
    pub required_skills: Vec<String>,
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            hr_name: contact.hr_name.clone(),
            email: contact.email.clone(),
            company_name: contact.company_name.clone(),
            job_position: contact.job_position.clone(),
            required_skills: contact.required_skills.clone(),
        }
    }
}

/// One entry of the `contacts` field in a bulk send, with blanks filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingContact {
    pub id: Option<ContactId>,
    pub hr_name: String,
    pub email: String,
    pub company_name: String,
    pub job_position: String,
    pub required_skills: Vec<String>,
}

impl From<&Contact> for OutgoingContact {
    fn from(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id.clone()),
            hr_name: or_default(&contact.hr_name, "HR"),
            email: contact.email.trim().to_string(),
            company_name: or_default(&contact.company_name, "Company"),
            job_position: or_default(&contact.job_position, "Position"),
            required_skills: contact.required_skills.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn or_default(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
