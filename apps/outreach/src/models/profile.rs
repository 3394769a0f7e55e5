use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sender profile attached to outgoing emails (`userProfile` in a bulk send).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Free-form user settings. The backend owns the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(pub Map<String, Value>);

impl Settings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_skips_absent_links() {
        let profile = UserProfile {
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["fullName"], "Ada");
        assert!(value.get("linkedinUrl").is_none());
    }

    #[test]
    fn test_settings_round_trip_as_plain_object() {
        let mut settings = Settings::default();
        settings.set("dailyLimit", Value::from(50));
        assert_eq!(serde_json::to_string(&settings).unwrap(), r#"{"dailyLimit":50}"#);
    }
}
