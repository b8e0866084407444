use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub email: String,
}

impl LookupRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
        }
    }
}

/// One breach as returned by `GET /api/v3/breachedaccount/{account}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreachRecord {
    pub name: String,
    pub title: String,
    pub breach_date: NaiveDate,
    pub data_classes: Vec<String>,

    // Only present on untruncated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwn_count: Option<u64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_sensitive: bool,
}

/// Provider order is preserved. Empty means the account was not found in any breach.
pub type BreachList = Vec<BreachRecord>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Pending,
    Succeeded(BreachList),
    Failed(String),
}

impl LookupState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LookupState::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LookupState::Succeeded(_) | LookupState::Failed(_))
    }

    pub fn breaches(&self) -> Option<&[BreachRecord]> {
        match self {
            LookupState::Succeeded(list) => Some(list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_record_from_provider_json() {
        let body = serde_json::json!([{
            "Name": "Adobe",
            "Title": "Adobe",
            "Domain": "adobe.com",
            "BreachDate": "2013-10-04",
            "AddedDate": "2013-12-04T00:00:00Z",
            "PwnCount": 152445165u64,
            "DataClasses": ["Email addresses", "Password hints", "Passwords", "Usernames"],
            "IsVerified": true,
            "IsSensitive": false
        }]);

        let list: BreachList = serde_json::from_value(body).unwrap();
        assert_eq!(list.len(), 1);
        let adobe = &list[0];
        assert_eq!(adobe.name, "Adobe");
        assert_eq!(adobe.breach_date, NaiveDate::from_ymd_opt(2013, 10, 4).unwrap());
        assert_eq!(adobe.data_classes.len(), 4);
        assert_eq!(adobe.domain.as_deref(), Some("adobe.com"));
        assert_eq!(adobe.pwn_count, Some(152445165));
        assert!(adobe.is_verified);
    }

    #[test]
    fn test_breach_record_minimal_fields() {
        let body = r#"{"Name":"X","Title":"X Corp","BreachDate":"2020-01-31","DataClasses":[]}"#;
        let record: BreachRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.title, "X Corp");
        assert!(record.domain.is_none());
        assert!(!record.is_verified);
    }

    #[test]
    fn test_breach_record_rejects_bad_date() {
        let body = r#"{"Name":"X","Title":"X","BreachDate":"yesterday","DataClasses":[]}"#;
        assert!(serde_json::from_str::<BreachRecord>(body).is_err());
    }

    #[test]
    fn test_lookup_state_serializes_with_status_tag() {
        let json = serde_json::to_value(LookupState::Failed("API error: 500".into())).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["detail"], "API error: 500");

        let json = serde_json::to_value(LookupState::Succeeded(vec![])).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert!(json["detail"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_lookup_request_trims_email() {
        assert_eq!(LookupRequest::new("  a@b.com\n").email, "a@b.com");
    }
}
