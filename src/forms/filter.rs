use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::filter::FilterCriteria;
use crate::domain::types::{CategoryId, DistrictId, PlaceCost, TypeConstraintError};

fn validate_price(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("price")),
    }
}

/// Raw catalog filter input; prices arrive as text so that empty fields mean
/// "no bound".
#[derive(Deserialize, Validate, Default)]
pub struct FilterForm {
    #[validate(custom(function = "validate_price"))]
    pub min_cost: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub max_cost: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub district_ids: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FilterFormError {
    #[error("Filter form validation failed: {0}")]
    Validation(String),
    #[error("Filter form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FilterFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for FilterFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn parse_price(value: Option<String>) -> Result<Option<PlaceCost>, TypeConstraintError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let price = text
                .parse::<f64>()
                .map_err(|_| TypeConstraintError::InvalidValue(format!("price: {text}")))?;
            PlaceCost::new(price).map(Some)
        }
    }
}

impl TryFrom<FilterForm> for FilterCriteria {
    type Error = FilterFormError;

    fn try_from(value: FilterForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            min_cost: parse_price(value.min_cost)?,
            max_cost: parse_price(value.max_cost)?,
            category_ids: value
                .category_ids
                .into_iter()
                .map(CategoryId::new)
                .collect::<Result<_, _>>()?,
            district_ids: value
                .district_ids
                .into_iter()
                .map(DistrictId::new)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prices_mean_no_bound() {
        let filter = FilterCriteria::try_from(FilterForm {
            min_cost: Some("".into()),
            max_cost: None,
            ..FilterForm::default()
        })
        .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn parses_prices_and_ids() {
        let filter = FilterCriteria::try_from(FilterForm {
            min_cost: Some(" 100 ".into()),
            max_cost: Some("500.5".into()),
            category_ids: vec!["c1".into(), "c1".into()],
            district_ids: vec!["d1".into()],
        })
        .unwrap();
        assert_eq!(filter.min_cost.unwrap().get(), 100.0);
        assert_eq!(filter.max_cost.unwrap().get(), 500.5);
        assert_eq!(filter.category_ids.len(), 1);
        assert_eq!(filter.district_ids.len(), 1);
    }

    #[test]
    fn rejects_negative_price() {
        let err = FilterCriteria::try_from(FilterForm {
            min_cost: Some("-5".into()),
            ..FilterForm::default()
        })
        .unwrap_err();
        assert!(matches!(err, FilterFormError::Validation(_)));
    }

    #[test]
    fn rejects_unparsable_price() {
        let err = FilterCriteria::try_from(FilterForm {
            max_cost: Some("cheap".into()),
            ..FilterForm::default()
        })
        .unwrap_err();
        assert!(matches!(err, FilterFormError::Validation(_)));
    }
}
