use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{MAX_PAGE_SIZE, default_page, default_page_size};
use crate::models::StoredPitch;
use crate::store::Document;

/// Pitch as returned by the API, including store-assigned metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PitchResponse {
    pub id: Uuid,
    pub name: String,
    pub created_by: String,
    pub team_id: Option<String>,
    pub is_verified: bool,
    pub image_url: Option<String>,
    pub address: String,
    #[serde(rename = "type")]
    pub pitch_type: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredPitch> for PitchResponse {
    fn from(stored: StoredPitch) -> Self {
        let pitch = stored.pitch;
        Self {
            id: stored.id,
            name: pitch.name().to_string(),
            created_by: pitch.created_by().to_string(),
            team_id: pitch.team_id().map(String::from),
            is_verified: pitch.is_verified(),
            image_url: pitch.image_url().map(String::from),
            address: pitch.address().to_string(),
            pitch_type: pitch.pitch_type().to_string(),
            notes: pitch.notes().to_string(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// Query parameters for listing pitches
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PitchFilter {
    pub team_id: Option<String>,
    pub created_by: Option<String>,
    pub is_verified: Option<bool>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be >= 1"))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: u32,
}

impl Default for PitchFilter {
    fn default() -> Self {
        Self {
            team_id: None,
            created_by: None,
            is_verified: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PitchFilter {
    /// Equality filter over the stored record's wire keys.
    pub fn to_document_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(team_id) = &self.team_id {
            filter.insert("teamId".to_string(), Value::String(team_id.clone()));
        }
        if let Some(created_by) = &self.created_by {
            filter.insert("createdBy".to_string(), Value::String(created_by.clone()));
        }
        if let Some(is_verified) = self.is_verified {
            filter.insert("isVerified".to_string(), Value::Bool(is_verified));
        }
        filter
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit()
    }

    pub fn limit(&self) -> usize {
        self.page_size.min(MAX_PAGE_SIZE) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPitch, Pitch};
    use serde_json::json;

    #[test]
    fn test_filter_defaults() {
        let filter: PitchFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 50);
        assert!(filter.validate().is_ok());
        assert!(filter.to_document_filter().is_empty());
    }

    #[test]
    fn test_filter_validation() {
        let zero_page = PitchFilter {
            page: 0,
            ..PitchFilter::default()
        };
        assert!(zero_page.validate().is_err());

        let huge_page = PitchFilter {
            page_size: 101,
            ..PitchFilter::default()
        };
        assert!(huge_page.validate().is_err());
    }

    #[test]
    fn test_filter_to_document_uses_wire_keys() {
        let filter = PitchFilter {
            team_id: Some("t1".into()),
            created_by: Some("u1".into()),
            is_verified: Some(false),
            ..PitchFilter::default()
        };

        assert_eq!(
            Value::Object(filter.to_document_filter()),
            json!({ "teamId": "t1", "createdBy": "u1", "isVerified": false })
        );
    }

    #[test]
    fn test_offset() {
        let filter = PitchFilter {
            page: 3,
            page_size: 20,
            ..PitchFilter::default()
        };
        assert_eq!(filter.offset(), 40);
        assert_eq!(filter.limit(), 20);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let now = Utc::now();
        let stored = StoredPitch {
            id: Uuid::nil(),
            pitch: Pitch::new(NewPitch::new("Sportpark Nord", "user123")).unwrap(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(PitchResponse::from(stored)).unwrap();
        assert_eq!(value["name"], "Sportpark Nord");
        assert_eq!(value["createdBy"], "user123");
        assert_eq!(value["teamId"], Value::Null);
        assert_eq!(value["isVerified"], false);
        assert_eq!(value["type"], "");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }
}
