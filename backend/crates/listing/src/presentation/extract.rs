//! Listing Submission Extractor
//!
//! Accepts `multipart/form-data`, urlencoded forms or JSON and produces the
//! raw form plus the uploaded files keyed by field name. An empty body is an
//! empty submission.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{HeaderMap, header};
use axum::{Form, Json};
use bytes::Bytes;
use serde_json::{Number, Value};

use crate::domain::services::{ListingForm, NUMERIC_FIELDS};
use crate::domain::value_objects::{UploadedFile, UploadedFiles};
use crate::error::{ListingError, ListingResult};

/// A create/update body after boundary parsing, before validation
#[derive(Debug, Default)]
pub struct ListingSubmission {
    pub form: ListingForm,
    pub files: UploadedFiles,
}

impl<S> FromRequest<S> for ListingSubmission
where
    S: Send + Sync,
{
    type Rejection = ListingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            return read_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            return from_pairs(pairs);
        }

        // A missing body is an empty submission.
        let body = Bytes::from_request(req, state).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let Json(value) = Json::<Value>::from_bytes(&body)?;
        from_json(value)
    }
}

/// Lowercased `Content-Type`, empty when absent
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

async fn read_multipart(mut multipart: Multipart) -> ListingResult<ListingSubmission> {
    let mut submission = ListingSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if let Some(file_name) = field.file_name().map(String::from) {
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await?;

            // Browsers send an empty part for an untouched file input.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            submission.files.push(
                &name,
                UploadedFile {
                    file_name: Some(file_name),
                    content_type,
                    data,
                },
            );
            continue;
        }

        let text = field.text().await?;
        set_text(&mut submission.form, &name, text)?;
    }

    Ok(submission)
}

fn from_pairs(pairs: Vec<(String, String)>) -> ListingResult<ListingSubmission> {
    let mut submission = ListingSubmission::default();
    for (name, text) in pairs {
        set_text(&mut submission.form, &name, text)?;
    }
    Ok(submission)
}

/// A text part; an `images` value may carry a JSON array of references.
fn set_text(form: &mut ListingForm, name: &str, text: String) -> ListingResult<()> {
    if matches!(name, "images" | "images[]") && text.trim_start().starts_with('[') {
        let images: Vec<String> = serde_json::from_str(&text).map_err(|_| {
            ListingError::Validation("images must be a list of strings".to_string())
        })?;
        form.set_images(images);
    } else {
        form.set(name, text);
    }
    Ok(())
}

fn from_json(value: Value) -> ListingResult<ListingSubmission> {
    let Value::Object(map) = value else {
        return Err(ListingError::InvalidBody("expected a JSON object".to_string()));
    };

    let mut form = ListingForm::default();

    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => form.set(&key, s),
            Value::Number(n) if NUMERIC_FIELDS.contains(&key.as_str()) => {
                form.set(&key, number_text(&n))
            }
            Value::Array(items) if key == "images" => {
                let images = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        _ => Err(ListingError::Validation(
                            "images must be a list of strings".to_string(),
                        )),
                    })
                    .collect::<ListingResult<Vec<_>>>()?;
                form.set_images(images);
            }
            _ if is_listing_field(&key) => {
                return Err(ListingError::Validation(format!("{key} has an invalid type")));
            }
            _ => {}
        }
    }

    Ok(ListingSubmission {
        form,
        files: UploadedFiles::new(),
    })
}

/// Whole numbers lose their fraction, so `2.0` reads as the integer `2`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn is_listing_field(key: &str) -> bool {
    matches!(
        key,
        "title"
            | "price"
            | "beds"
            | "baths"
            | "livingArea"
            | "status"
            | "address"
            | "description"
            | "images"
            | "agentPhoto"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_and_strings() {
        let submission = from_json(json!({
            "title": "Loft",
            "price": 250000,
            "beds": "3",
            "livingArea": 80.5,
            "images": ["/uploads/a.jpg", ""],
            "agentPhoto": null,
            "_id": 7
        }))
        .unwrap();

        let form = submission.form;
        assert_eq!(form.title.as_deref(), Some("Loft"));
        assert_eq!(form.price.as_deref(), Some("250000"));
        assert_eq!(form.beds.as_deref(), Some("3"));
        assert_eq!(form.living_area.as_deref(), Some("80.5"));
        assert_eq!(form.images, Some(vec!["/uploads/a.jpg".to_string()]));
        assert!(form.agent_photo.is_none());
        assert!(submission.files.is_empty());
    }

    #[test]
    fn test_json_type_errors() {
        assert!(matches!(
            from_json(json!({"title": 5})),
            Err(ListingError::Validation(_))
        ));
        assert!(matches!(
            from_json(json!({"images": [1, 2]})),
            Err(ListingError::Validation(_))
        ));
        assert!(matches!(
            from_json(json!(["not", "an", "object"])),
            Err(ListingError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_whole_json_numbers_read_as_integers() {
        let form = from_json(json!({"beds": 2.0, "baths": 1, "price": 99.5}))
            .unwrap()
            .form;
        assert_eq!(form.beds.as_deref(), Some("2"));
        assert_eq!(form.baths.as_deref(), Some("1"));
        assert_eq!(form.price.as_deref(), Some("99.5"));

        let patch = form.into_patch().unwrap();
        assert_eq!(patch.beds, Some(2));
    }

    #[test]
    fn test_urlencoded_pairs() {
        let submission = from_pairs(vec![
            ("title".to_string(), "Loft".to_string()),
            ("images[]".to_string(), "/uploads/a.jpg".to_string()),
            ("images[]".to_string(), "/uploads/b.jpg".to_string()),
        ])
        .unwrap();

        assert_eq!(submission.form.title.as_deref(), Some("Loft"));
        assert_eq!(
            submission.form.images,
            Some(vec!["/uploads/a.jpg".to_string(), "/uploads/b.jpg".to_string()])
        );
    }

    #[test]
    fn test_content_type() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_type(&headers), "");

        headers.insert(
            header::CONTENT_TYPE,
            "Multipart/Form-Data; boundary=x".parse().unwrap(),
        );
        assert!(content_type(&headers).starts_with("multipart/form-data"));
    }
}
