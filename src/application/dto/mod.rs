// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - Forms carry raw strings exactly as typed; parsing happens here
// - Records convert INTO DTOs, forms convert INTO domain drafts

use serde::{Deserialize, Serialize};

use crate::domain::{City, Message, MessageDraft, Property, PropertyDraft};
use crate::engine::{PropertyFilter, RefreshState};
use crate::error::{AppError, AppResult};
use crate::integrations::{Credentials, MediaBlob, Session};

// ============================================================================
// LISTING DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: String,
    pub title: String,
    pub city: String,
    pub price: Option<f64>,
    pub rooms: Option<u32>,
    pub area: Option<f64>,
    pub description: String,
    pub images: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Listing browser filter inputs. Blank fields mean "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterForm {
    pub city: String,
    pub min_price: String,
    pub max_price: String,
    pub rooms: String,
}

impl FilterForm {
    pub fn to_filter(&self) -> AppResult<PropertyFilter> {
        PropertyFilter::parse(&self.city, &self.min_price, &self.max_price, &self.rooms)
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// Admin listing form. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingForm {
    pub title: String,
    pub city: String,
    pub price: String,
    pub rooms: String,
    pub area: String,
    pub description: String,
    /// Already-uploaded image URLs the admin kept, in display order
    pub existing_images: Vec<String>,
}

impl ListingForm {
    pub fn into_draft(self) -> AppResult<PropertyDraft> {
        let title = required("title", &self.title)?;
        let city: City = required("city", &self.city)?
            .parse()
            .map_err(|e: crate::domain::DomainError| AppError::Validation(e.to_string()))?;
        let price = parse_amount("price", &self.price)?;
        let rooms = parse_rooms(&self.rooms)?;
        let area = parse_amount("area", &self.area)?;
        let description = required("description", &self.description)?;

        Ok(PropertyDraft {
            title,
            city,
            price,
            rooms,
            area,
            description,
            images: self.existing_images,
        })
    }
}

/// A file chosen in the listing form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl From<UploadDto> for MediaBlob {
    fn from(upload: UploadDto) -> Self {
        MediaBlob::new(upload.file_name, upload.content_type, upload.bytes)
    }
}

// ============================================================================
// MESSAGE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<ContactForm> for MessageDraft {
    fn from(form: ContactForm) -> Self {
        MessageDraft {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            message: form.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxSummaryDto {
    pub unread_count: usize,
    pub refresh: RefreshState,
}

// ============================================================================
// AUTH DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Credentials {
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user_id: String,
    pub email: String,
    pub expires_at: String,
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<Property> for PropertyDto {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            city: property.city.to_string(),
            price: property.price,
            rooms: property.rooms,
            area: property.area,
            description: property.description,
            images: property.images,
            created_at: property.created_at.map(|d| d.to_rfc3339()),
            updated_at: property.updated_at.map(|d| d.to_rfc3339()),
        }
    }
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            name: message.name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            status: message.status.to_string(),
            created_at: message.created_at.map(|d| d.to_rfc3339()),
        }
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            email: session.email,
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn parse_amount(field: &str, value: &str) -> AppResult<f64> {
    let raw = required(field, value)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(AppError::Validation(format!(
            "{} must be a non-negative number, got '{}'",
            field, raw
        ))),
    }
}

/// "3" or the "3+1" layout notation
fn parse_rooms(value: &str) -> AppResult<u32> {
    let raw = required("rooms", value)?;
    let count = raw.split('+').next().unwrap_or(&raw).trim();
    count
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("rooms must be a whole number, got '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_form() -> ListingForm {
        ListingForm {
            title: " Bahçeli villa ".into(),
            city: "Antalya".into(),
            price: "7500000".into(),
            rooms: "4+1".into(),
            area: "210.5".into(),
            description: "Havuzlu".into(),
            existing_images: vec!["https://cdn.example/a.jpg".into()],
        }
    }

    #[test]
    fn test_listing_form_into_draft() {
        let draft = listing_form().into_draft().unwrap();
        assert_eq!(draft.title, "Bahçeli villa");
        assert_eq!(draft.city, City::Antalya);
        assert_eq!(draft.price, 7_500_000.0);
        assert_eq!(draft.rooms, 4);
        assert_eq!(draft.area, 210.5);
        assert_eq!(draft.images, vec!["https://cdn.example/a.jpg"]);
    }

    #[test]
    fn test_listing_form_requires_every_field() {
        for blank in ["title", "city", "price", "rooms", "area", "description"] {
            let mut form = listing_form();
            match blank {
                "title" => form.title.clear(),
                "city" => form.city.clear(),
                "price" => form.price.clear(),
                "rooms" => form.rooms.clear(),
                "area" => form.area.clear(),
                _ => form.description.clear(),
            }
            match form.into_draft() {
                Err(AppError::Validation(msg)) => assert!(msg.contains(blank), "{}", msg),
                other => panic!("{} should be required, got {:?}", blank, other),
            }
        }
    }

    #[test]
    fn test_listing_form_rejects_bad_numbers() {
        let mut form = listing_form();
        form.price = "-1".into();
        assert!(matches!(form.into_draft(), Err(AppError::Validation(_))));

        let mut form = listing_form();
        form.rooms = "çok".into();
        assert!(matches!(form.into_draft(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_filter_form_errors_are_validation() {
        let form = FilterForm {
            city: "Bursa".into(),
            ..FilterForm::default()
        };
        assert!(matches!(form.to_filter(), Err(AppError::Validation(_))));
        assert!(FilterForm::default().to_filter().unwrap() == PropertyFilter::default());
    }

    #[test]
    fn test_filter_form_deserializes_partial_input() {
        let form: FilterForm = serde_json::from_str(r#"{ "city": "Ankara" }"#).unwrap();
        assert_eq!(form.to_filter().unwrap().city, Some(City::Ankara));
    }

    #[test]
    fn test_property_dto_uses_display_city() {
        let dto = PropertyDto::from(Property {
            id: "p1".into(),
            title: "Daire".into(),
            city: City::Istanbul,
            price: None,
            rooms: None,
            area: None,
            description: String::new(),
            images: Vec::new(),
            created_at: None,
            updated_at: None,
        });
        assert_eq!(dto.city, "İstanbul");
    }
}
