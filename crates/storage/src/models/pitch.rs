use chrono::{DateTime, Utc};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{PitchValidationError, StorageError};
use crate::store::{Document, StoredDocument};

/// Collection pitches are stored under.
pub const PITCHES_COLLECTION: &str = "pitches";

const NAME: &str = "name";
const CREATED_BY: &str = "createdBy";
const TEAM_ID: &str = "teamId";
const IS_VERIFIED: &str = "isVerified";
const IMAGE_URL: &str = "imageUrl";
const ADDRESS: &str = "address";
const TYPE: &str = "type";
const NOTES: &str = "notes";

/// Caller-supplied fields for a new [`Pitch`].
///
/// Omitted optionals take their defaults on construction: no team, not
/// verified, no image, and empty address/type/notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewPitch {
    pub name: Option<String>,
    pub created_by: Option<String>,
    pub team_id: Option<String>,
    pub is_verified: Option<bool>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    #[schema(rename = "type")]
    pub pitch_type: Option<String>,
    pub notes: Option<String>,
}

impl NewPitch {
    pub fn new(name: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            created_by: Some(created_by.into()),
            ..Self::default()
        }
    }
}

/// A playing field or venue record.
///
/// A `Pitch` only exists in a valid state: `name` and `created_by` are
/// non-empty. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pitch {
    name: String,
    created_by: String,
    team_id: Option<String>,
    is_verified: bool,
    image_url: Option<String>,
    address: String,
    pitch_type: String,
    notes: String,
}

impl Pitch {
    /// Builds a pitch from typed input, failing if `name` or `created_by`
    /// is missing or empty.
    pub fn new(input: NewPitch) -> Result<Self, PitchValidationError> {
        let name = required(NAME, input.name)?;
        let created_by = required(CREATED_BY, input.created_by)?;

        Ok(Self {
            name,
            created_by,
            team_id: input.team_id,
            is_verified: input.is_verified.unwrap_or(false),
            image_url: input.image_url,
            address: input.address.unwrap_or_default(),
            pitch_type: input.pitch_type.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
        })
    }

    /// Builds a pitch from an untyped document such as a request body or a
    /// record read back from the store.
    ///
    /// Checks run in a fixed order: required fields first (`name`, then
    /// `createdBy`), then the `isVerified` type, then the types of the
    /// remaining fields. A required field counts as missing when it is
    /// absent, `null`, `false`, `0` or the empty string. Only `teamId` and
    /// `imageUrl` accept `null`. Unknown keys are ignored.
    pub fn from_document(document: &Document) -> Result<Self, PitchValidationError> {
        for field in [NAME, CREATED_BY] {
            if document.get(field).is_none_or(is_falsy) {
                return Err(PitchValidationError::MissingRequiredField(field));
            }
        }

        let is_verified = match document.get(IS_VERIFIED) {
            None => None,
            Some(Value::Bool(verified)) => Some(*verified),
            Some(_) => {
                return Err(PitchValidationError::InvalidType {
                    field: IS_VERIFIED,
                    expected: "boolean",
                });
            }
        };

        Self::new(NewPitch {
            name: string_field(document, NAME)?,
            created_by: string_field(document, CREATED_BY)?,
            team_id: nullable_string_field(document, TEAM_ID)?,
            is_verified,
            image_url: nullable_string_field(document, IMAGE_URL)?,
            address: string_field(document, ADDRESS)?,
            pitch_type: string_field(document, TYPE)?,
            notes: string_field(document, NOTES)?,
        })
    }

    /// Flat record of all eight fields, ready to hand to a document store.
    ///
    /// Unset optionals are written as `null`. Timestamps are not included;
    /// the store stamps those at write time.
    pub fn to_storage_record(&self) -> Document {
        let mut record = Document::new();
        record.insert(NAME.into(), Value::String(self.name.clone()));
        record.insert(CREATED_BY.into(), Value::String(self.created_by.clone()));
        record.insert(TEAM_ID.into(), optional_string(&self.team_id));
        record.insert(IS_VERIFIED.into(), Value::Bool(self.is_verified));
        record.insert(IMAGE_URL.into(), optional_string(&self.image_url));
        record.insert(ADDRESS.into(), Value::String(self.address.clone()));
        record.insert(TYPE.into(), Value::String(self.pitch_type.clone()));
        record.insert(NOTES.into(), Value::String(self.notes.clone()));
        record
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn pitch_type(&self) -> &str {
        &self.pitch_type
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// A pitch together with the identity and timestamps the store assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPitch {
    pub id: Uuid,
    pub pitch: Pitch,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StoredDocument> for StoredPitch {
    type Error = StorageError;

    fn try_from(document: StoredDocument) -> Result<Self, Self::Error> {
        let pitch = Pitch::from_document(&document.data).map_err(|source| {
            StorageError::CorruptDocument {
                id: document.id,
                source,
            }
        })?;

        Ok(Self {
            id: document.id,
            pitch,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, PitchValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PitchValidationError::MissingRequiredField(field)),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn string_field(
    document: &Document,
    field: &'static str,
) -> Result<Option<String>, PitchValidationError> {
    match document.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PitchValidationError::InvalidType {
            field,
            expected: "string",
        }),
    }
}

fn nullable_string_field(
    document: &Document,
    field: &'static str,
) -> Result<Option<String>, PitchValidationError> {
    match document.get(field) {
        Some(Value::Null) => Ok(None),
        _ => string_field(document, field),
    }
}

fn optional_string(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}
