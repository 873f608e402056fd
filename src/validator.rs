// src/validator.rs - Centralized validation module
use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use crate::cart::{CustomOrderRequest, Customization};
use crate::error::ApiError;
use crate::models::{AdjustStockRequest, CreateReviewRequest};

/// Sugar slider granularity, in percent
pub const SUGAR_STEP: u8 = 5;

lazy_static! {
    static ref ORIGIN_REGEX: Regex = Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d{1,5})?$").unwrap();
}

// ==================== VALIDATION RESULT ====================

#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    pub errors: HashMap<String, Vec<String>>,
    pub warnings: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        for (field, errors) in other.errors {
            self.errors.entry(field).or_default().extend(errors);
        }
        for (field, warnings) in other.warnings {
            self.warnings.entry(field).or_default().extend(warnings);
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let message = fields
            .iter()
            .map(|(field, errors)| format!("{}: {}", field, errors.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");

        ApiError::ValidationError(message)
    }

    /// Ok when there are no errors; warnings are only logged
    pub fn into_result(self) -> Result<(), ApiError> {
        for (field, warnings) in &self.warnings {
            log::warn!("{}: {}", field, warnings.join(", "));
        }
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.to_api_error())
        }
    }
}

// ==================== FIELD VALIDATORS ====================

pub struct FieldValidator;

impl FieldValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(format!("{} cannot be empty", field))
        } else {
            Ok(())
        }
    }

    pub fn range<T: PartialOrd + std::fmt::Display>(
        value: T,
        field: &str,
        min: Option<T>,
        max: Option<T>
    ) -> Result<(), String> {
        if let Some(min_val) = min {
            if value < min_val {
                return Err(format!("{} must be at least {}", field, min_val));
            }
        }

        if let Some(max_val) = max {
            if value > max_val {
                return Err(format!("{} must not exceed {}", field, max_val));
            }
        }

        Ok(())
    }

    /// Scheme + host (+ port), no path; "*" is handled by the caller
    pub fn origin(value: &str, field: &str) -> Result<(), String> {
        if ORIGIN_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(format!("{} is not a valid origin: {}", field, value))
        }
    }

    pub fn step(value: u8, field: &str, step: u8) -> Result<(), String> {
        if step == 0 || value % step == 0 {
            Ok(())
        } else {
            Err(format!("{} must be a multiple of {}", field, step))
        }
    }
}

// ==================== CUSTOM VALIDATION ====================

pub trait CustomValidate {
    fn custom_validate(&self) -> ValidationResult;
}

impl CustomValidate for Customization {
    fn custom_validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Err(e) = FieldValidator::step(self.sugar_level, "sugar_level", SUGAR_STEP) {
            result.add_error("sugar_level", e);
        }

        result
    }
}

impl CustomValidate for CustomOrderRequest {
    fn custom_validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.merge(self.customization.custom_validate());

        if let Err(e) = FieldValidator::range(self.quantity, "quantity", Some(1), None) {
            result.add_error("quantity", e);
        }
        if self.quantity > 20 {
            result.add_warning("quantity", "Unusually large custom order");
        }

        result
    }
}

impl CustomValidate for CreateReviewRequest {
    fn custom_validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Err(e) = FieldValidator::range(self.rating, "rating", Some(1), Some(5)) {
            result.add_error("rating", e);
        }
        if let Err(e) = FieldValidator::not_empty(&self.comment, "comment") {
            result.add_error("comment", e);
        }

        result
    }
}

impl CustomValidate for AdjustStockRequest {
    fn custom_validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self.amount.parse_positive().is_none() {
            result.add_error("amount", "Amount must be a number greater than zero");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::AdjustmentDirection;
    use crate::models::AmountInput;

    #[test]
    fn test_field_validators() {
        assert!(FieldValidator::not_empty("  ", "comment").is_err());
        assert!(FieldValidator::not_empty("enak", "comment").is_ok());
        assert!(FieldValidator::range(6u8, "rating", Some(1), Some(5)).is_err());
        assert!(FieldValidator::step(55, "sugar_level", 5).is_ok());
        assert!(FieldValidator::step(53, "sugar_level", 5).is_err());
        assert!(FieldValidator::origin("http://localhost:3000", "origin").is_ok());
        assert!(FieldValidator::origin("https://kopisantai.com", "origin").is_ok());
        assert!(FieldValidator::origin("kopisantai.com/menu", "origin").is_err());
    }

    #[test]
    fn test_customization_sugar_step() {
        let mut customization = Customization::default();
        assert!(customization.custom_validate().is_valid());

        customization.sugar_level = 42;
        let result = customization.custom_validate();
        assert!(!result.is_valid());
        assert!(result.errors.contains_key("sugar_level"));

        // bounds are left to the derived rules
        customization.sugar_level = 105;
        assert!(customization.custom_validate().is_valid());
        assert!(::validator::Validate::validate(&customization).is_err());
    }

    #[test]
    fn test_custom_order_quantity() {
        let request = CustomOrderRequest {
            customization: Customization::default(),
            quantity: 0,
        };
        let result = request.custom_validate();
        assert!(result.errors.contains_key("quantity"));

        let large = CustomOrderRequest {
            customization: Customization::default(),
            quantity: 25,
        };
        let result = large.custom_validate();
        assert!(result.is_valid());
        assert!(result.warnings.contains_key("quantity"));
    }

    #[test]
    fn test_review_requires_rating_and_comment() {
        let missing_rating = CreateReviewRequest { rating: 0, comment: "Mantap".into() };
        assert!(!missing_rating.custom_validate().is_valid());

        let blank = CreateReviewRequest { rating: 5, comment: "   ".into() };
        assert!(!blank.custom_validate().is_valid());

        let ok = CreateReviewRequest { rating: 4, comment: "Mantap".into() };
        assert!(ok.custom_validate().into_result().is_ok());
    }

    #[test]
    fn test_stock_amount() {
        let request = AdjustStockRequest {
            direction: AdjustmentDirection::Add,
            amount: AmountInput::Text("1.5".into()),
        };
        assert!(request.custom_validate().is_valid());

        let invalid = AdjustStockRequest {
            direction: AdjustmentDirection::Subtract,
            amount: AmountInput::Text("banyak".into()),
        };
        let err = invalid.custom_validate().into_result().unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(ref msg) if msg.starts_with("amount:")));
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationResult::new();
        a.add_error("x", "bad");
        let mut b = ValidationResult::new();
        b.add_error("x", "worse");
        b.add_warning("y", "hmm");
        a.merge(b);
        assert_eq!(a.errors["x"].len(), 2);
        assert_eq!(a.warnings["y"].len(), 1);
    }
}
