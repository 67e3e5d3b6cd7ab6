use crate::category::CategoryCatalog;
use crate::error::ValidationError;
use crate::filter::parse_event_date;
use crate::models::{CreateEventRequest, UpdateProfileRequest};

const MAX_TITLE_CHARS: usize = 200;
const MAX_TAGS: usize = 16;
const MAX_TAG_CHARS: usize = 32;
const MAX_NAME_CHARS: usize = 100;

/// Validator for organizer and profile input.
pub struct Validator;

impl Validator {
    fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Missing(field));
        }
        Ok(())
    }

    pub fn validate_title(title: &str) -> Result<(), ValidationError> {
        Self::require("title", title)?;
        let len = title.chars().count();
        if len > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong(len));
        }
        Ok(())
    }

    /// The category must be a display name from the taxonomy.
    pub fn validate_category(
        category: &str,
        catalog: &CategoryCatalog,
    ) -> Result<(), ValidationError> {
        Self::require("category", category)?;
        if !catalog.has_display_name(category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }
        Ok(())
    }

    pub fn validate_date(date: &str) -> Result<(), ValidationError> {
        Self::require("date", date)?;
        if parse_event_date(date).is_none() {
            return Err(ValidationError::InvalidDate(date.to_string()));
        }
        Ok(())
    }

    pub fn validate_price(price: f64) -> Result<(), ValidationError> {
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }
        Ok(())
    }

    pub fn validate_capacity(max_attendees: Option<i64>) -> Result<(), ValidationError> {
        match max_attendees {
            Some(n) if n <= 0 => Err(ValidationError::InvalidCapacity(n)),
            _ => Ok(()),
        }
    }

    pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
        if tags.len() > MAX_TAGS {
            return Err(ValidationError::TooManyTags(tags.len()));
        }
        for tag in tags {
            let len = tag.trim().chars().count();
            if len == 0 || len > MAX_TAG_CHARS {
                return Err(ValidationError::InvalidTag(tag.clone()));
            }
        }
        Ok(())
    }

    /// Validate a create-event request against the taxonomy.
    pub fn validate_new_event(
        req: &CreateEventRequest,
        catalog: &CategoryCatalog,
    ) -> Result<(), ValidationError> {
        Self::validate_title(&req.title)?;
        Self::require("description", &req.description)?;
        Self::validate_category(&req.category, catalog)?;
        Self::validate_date(&req.date)?;
        Self::require("location", &req.location)?;
        Self::validate_price(req.price)?;
        Self::validate_capacity(req.max_attendees)?;
        Self::validate_tags(&req.tags)?;
        Ok(())
    }

    pub fn validate_profile_update(req: &UpdateProfileRequest) -> Result<(), ValidationError> {
        for (field, value) in [("first_name", &req.first_name), ("last_name", &req.last_name)] {
            if let Some(v) = value {
                let len = v.chars().count();
                if len > MAX_NAME_CHARS {
                    return Err(ValidationError::NameTooLong(field, len));
                }
            }
        }
        Ok(())
    }
}
