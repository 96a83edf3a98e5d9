//! Request body validation for product writes.

use crate::error::AppError;
use crate::model::ProductInput;
use serde_json::Value;

const REQUIRED_TEXT_FIELDS: &[&str] = &["name", "category"];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a write body and convert it to `ProductInput`.
    /// Body must be an object with string `name` and `category`; other keys are ignored.
    pub fn product_input(body: Value) -> Result<ProductInput, AppError> {
        let map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        for field in REQUIRED_TEXT_FIELDS {
            match map.get(*field) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", field)));
                }
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(AppError::Validation(format!("{} must be a string", field)));
                }
            }
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_name_and_category() {
        let input = RequestValidator::product_input(json!({"name": "Widget", "category": "Tools", "extra": 1})).unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.category, "Tools");
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let err = RequestValidator::product_input(json!({"name": "Widget"})).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "category is required"));
    }

    #[test]
    fn non_string_field_is_a_validation_error() {
        let err = RequestValidator::product_input(json!({"name": 5, "category": "Tools"})).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn non_object_body_is_a_bad_request() {
        let err = RequestValidator::product_input(json!(["Widget", "Tools"])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
