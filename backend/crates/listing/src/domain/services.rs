//! Domain Services
//!
//! Field coercion and validation of submitted listing forms. Multipart and
//! JSON bodies are both reduced to a `ListingForm` of raw strings first.

use crate::domain::entities::{ListingDraft, ListingPatch};
use crate::domain::value_objects::{ListingStatus, MediaPath};
use crate::error::{ListingError, ListingResult};

/// Raw submitted listing fields, before validation.
///
/// Blank values of the validated fields (see [`VALIDATED_FIELDS`]) are kept
/// so validation rejects them; other blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub title: Option<String>,
    pub price: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub living_area: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    /// Existing media references supplied as text
    pub images: Option<Vec<String>>,
    pub agent_photo: Option<String>,
}

/// Fields that accept a JSON number as well as a string
pub const NUMERIC_FIELDS: [&str; 4] = ["price", "beds", "baths", "livingArea"];

/// Fields whose submitted value must be valid even when blank
pub const VALIDATED_FIELDS: [&str; 5] = ["title", "price", "beds", "baths", "status"];

impl ListingForm {
    /// Record a text field by its wire name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        if value.trim().is_empty() && !VALIDATED_FIELDS.contains(&field) {
            return;
        }

        let slot = match field {
            "title" => &mut self.title,
            "price" => &mut self.price,
            "beds" => &mut self.beds,
            "baths" => &mut self.baths,
            "livingArea" => &mut self.living_area,
            "status" => &mut self.status,
            "address" => &mut self.address,
            "description" => &mut self.description,
            "agentPhoto" => &mut self.agent_photo,
            "images" | "images[]" => {
                self.images.get_or_insert_with(Vec::new).push(value);
                return;
            }
            _ => return,
        };
        *slot = Some(value);
    }

    /// Replace the `images` list wholesale (JSON arrays)
    pub fn set_images(&mut self, images: Vec<String>) {
        self.images = Some(images.into_iter().filter(|s| !s.trim().is_empty()).collect());
    }

    /// Validate for creation; `title` and `price` are required.
    pub fn into_draft(self) -> ListingResult<ListingDraft> {
        let fields = self.validate()?;

        let title = fields
            .title
            .ok_or_else(|| ListingError::Validation("title is required".to_string()))?;
        let price = fields
            .price
            .ok_or_else(|| ListingError::Validation("price is required".to_string()))?;

        Ok(ListingDraft {
            title,
            price,
            beds: fields.beds.unwrap_or(0),
            baths: fields.baths.unwrap_or(0),
            living_area: fields.living_area,
            status: fields.status.unwrap_or_default(),
            address: fields.address,
            description: fields.description,
            images: fields.images.unwrap_or_default(),
            agent_photo: fields.agent_photo,
        })
    }

    /// Validate for a partial update
    pub fn into_patch(self) -> ListingResult<ListingPatch> {
        self.validate()
    }

    fn validate(self) -> ListingResult<ListingPatch> {
        Ok(ListingPatch {
            title: self.title.map(|t| parse_title(&t)).transpose()?,
            price: self.price.as_deref().map(|v| parse_number("price", v)).transpose()?,
            beds: self.beds.as_deref().map(|v| parse_count("beds", v)).transpose()?,
            baths: self.baths.as_deref().map(|v| parse_count("baths", v)).transpose()?,
            living_area: self
                .living_area
                .as_deref()
                .map(|v| parse_number("livingArea", v))
                .transpose()?,
            status: self.status.as_deref().map(str::parse::<ListingStatus>).transpose()?,
            address: self.address,
            description: self.description,
            images: self
                .images
                .map(|refs| refs.iter().map(|r| MediaPath::from_client(r)).collect()),
            agent_photo: self.agent_photo.as_deref().map(MediaPath::from_client),
        })
    }
}

fn parse_title(raw: &str) -> ListingResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ListingError::Validation("title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

/// Finite decimal number, e.g. `"250000"` or `"1234.5"`
pub fn parse_number(field: &str, raw: &str) -> ListingResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ListingError::Validation(format!("{field} must be a number")))
}

/// Non-negative integer
pub fn parse_count(field: &str, raw: &str) -> ListingResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| {
            ListingError::Validation(format!("{field} must be a non-negative integer"))
        })
}
