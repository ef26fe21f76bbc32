use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{
    read_number, read_string_list, read_timestamp, require_string, timestamp_value, Document,
    Fields, Record,
};
use crate::domain::{DomainError, DomainResult};

use super::invariants::validate_property;

/// A property listing shown on the public site and managed from the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Identifier assigned by the document collection
    pub id: String,

    pub title: String,

    pub city: City,

    /// Asking price, unset when the listing has none
    pub price: Option<f64>,

    /// Room count (the "3" in a 3+1 layout)
    pub rooms: Option<u32>,

    /// Floor area in square meters
    pub area: Option<f64>,

    pub description: String,

    /// Media URLs in display order
    pub images: Vec<String>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Cities the company lists in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "İstanbul")]
    Istanbul,
    #[serde(rename = "Ankara")]
    Ankara,
    #[serde(rename = "İzmir")]
    Izmir,
    #[serde(rename = "Antalya")]
    Antalya,
}

impl City {
    pub const ALL: [City; 4] = [City::Istanbul, City::Ankara, City::Izmir, City::Antalya];

    /// Display name, as stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Istanbul => "İstanbul",
            City::Ankara => "Ankara",
            City::Izmir => "İzmir",
            City::Antalya => "Antalya",
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for City {
    type Err = DomainError;

    /// Accepts the display names and their dotless ASCII spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "İstanbul" | "Istanbul" => Ok(City::Istanbul),
            "Ankara" => Ok(City::Ankara),
            "İzmir" | "Izmir" => Ok(City::Izmir),
            "Antalya" => Ok(City::Antalya),
            other => Err(DomainError::InvalidField {
                field: "city".to_string(),
                reason: format!("unknown city '{}'", other),
            }),
        }
    }
}

/// Validated listing content without an identifier, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub title: String,
    pub city: City,
    pub price: f64,
    pub rooms: u32,
    pub area: f64,
    pub description: String,
    pub images: Vec<String>,
}

impl PropertyDraft {
    /// Field map for a create or full update. Timestamps are added by the caller.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".into(), Value::String(self.title.clone()));
        fields.insert("city".into(), Value::String(self.city.as_str().to_string()));
        fields.insert("price".into(), Value::from(self.price));
        fields.insert("rooms".into(), Value::from(self.rooms));
        fields.insert("area".into(), Value::from(self.area));
        fields.insert("description".into(), Value::String(self.description.clone()));
        fields.insert(
            "images".into(),
            Value::Array(self.images.iter().cloned().map(Value::String).collect()),
        );
        fields
    }

    pub fn to_fields_at(&self, at: DateTime<Utc>, created: bool) -> Fields {
        let mut fields = self.to_fields();
        fields.insert("updatedAt".into(), timestamp_value(at));
        if created {
            fields.insert("createdAt".into(), timestamp_value(at));
        }
        fields
    }
}

fn read_rooms(fields: &Fields) -> DomainResult<Option<u32>> {
    match read_number(fields, "rooms")? {
        None => Ok(None),
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
        Some(n) => Err(DomainError::InvalidField {
            field: "rooms".to_string(),
            reason: format!("expected a whole non-negative count, got {}", n),
        }),
    }
}

impl Record for Property {
    const COLLECTION: &'static str = "properties";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_document(document: Document) -> DomainResult<Self> {
        let fields = &document.fields;
        let city: City = require_string(fields, "city")?.parse()?;

        let property = Property {
            title: require_string(fields, "title")?,
            city,
            price: read_number(fields, "price")?,
            rooms: read_rooms(fields)?,
            area: read_number(fields, "area")?,
            description: read_string_or_empty(fields, "description")?,
            images: read_string_list(fields, "images")?,
            created_at: read_timestamp(fields, "createdAt")?,
            updated_at: read_timestamp(fields, "updatedAt")?,
            id: document.id,
        };

        validate_property(&property)?;
        Ok(property)
    }
}

fn read_string_or_empty(fields: &Fields, key: &str) -> DomainResult<String> {
    Ok(crate::domain::record::read_string(fields, key)?.unwrap_or_default())
}
