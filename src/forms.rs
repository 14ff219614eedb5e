//! Form binding between text inputs and property records

use std::collections::BTreeMap;

use crate::error::FormError;
use crate::types::{ElementProperties, LoadingBc, LoadingField, PropertyField, PropertyValue};

/// Raw text of a form, keyed by field key
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldValues(BTreeMap<&'static str, String>);

impl FieldValues {
    /// Every key present and blank
    pub fn blank(keys: impl IntoIterator<Item = &'static str>) -> Self {
        Self(keys.into_iter().map(|key| (key, String::new())).collect())
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.0.values().all(|value| value.trim().is_empty())
    }
}

/// A record that can be shown in and read back from a form
pub trait FormBinding: Sized {
    /// Field keys in display order
    fn keys() -> Vec<&'static str>;

    /// Text for every recognized field; fields without a stored value are blank
    fn populate(record: Option<&Self>) -> FieldValues;

    /// Parse every field. Any invalid field rejects the whole form.
    fn read(values: &FieldValues) -> Result<Self, FormError>;

    fn blank() -> FieldValues {
        FieldValues::blank(Self::keys())
    }
}

impl FormBinding for LoadingBc {
    fn keys() -> Vec<&'static str> {
        LoadingField::ALL.iter().map(|field| field.key()).collect()
    }

    fn populate(record: Option<&Self>) -> FieldValues {
        let mut values = Self::blank();
        if let Some(record) = record {
            for (field, value) in record.iter() {
                values.set(field.key(), value.to_string());
            }
        }
        values
    }

    fn read(values: &FieldValues) -> Result<Self, FormError> {
        let mut record = LoadingBc::new();
        for field in LoadingField::ALL {
            if let Some(value) = parse_number(field.key(), values.get(field.key()))? {
                record.insert(field, value);
            }
        }
        Ok(record)
    }
}

impl FormBinding for ElementProperties {
    fn keys() -> Vec<&'static str> {
        PropertyField::ALL.iter().map(|field| field.key()).collect()
    }

    fn populate(record: Option<&Self>) -> FieldValues {
        let mut values = Self::blank();
        if let Some(record) = record {
            for (field, value) in record.iter() {
                values.set(field.key(), value.to_string());
            }
        }
        values
    }

    fn read(values: &FieldValues) -> Result<Self, FormError> {
        let mut record = ElementProperties::new();
        for field in PropertyField::ALL {
            let text = values.get(field.key());
            if field.is_vector() {
                if let Some(vector) = parse_vector(text)? {
                    record.insert(field, PropertyValue::Vector(vector));
                }
            } else if let Some(value) = parse_number(field.key(), text)? {
                record.insert(field, PropertyValue::Scalar(value));
            }
        }
        Ok(record)
    }
}

/// Blank is `None`; anything else must be a finite real
pub fn parse_number(field: &'static str, text: &str) -> Result<Option<f64>, FormError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FormError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// `"x,y,z"` with exactly three numeric tokens; blank is `None`
pub fn parse_vector(text: &str) -> Result<Option<[f64; 3]>, FormError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parts: Vec<f64> = trimmed
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| FormError::InvalidVector(text.to_string()))?;

    match parts.as_slice() {
        [x, y, z] if parts.iter().all(|v| v.is_finite()) => Ok(Some([*x, *y, *z])),
        _ => Err(FormError::InvalidVector(text.to_string())),
    }
}

/// Node coordinate entry; every coordinate is required
pub fn parse_coordinates(x: &str, y: &str, z: &str) -> Result<[f64; 3], FormError> {
    let required = |field: &'static str, text: &str| {
        parse_number(field, text)?.ok_or(FormError::InvalidNumber {
            field,
            value: text.to_string(),
        })
    };
    Ok([required("x", x)?, required("y", y)?, required("z", z)?])
}

/// Finite and not negative
pub fn parse_deformation_scale(text: &str) -> Result<f64, FormError> {
    match text.trim().parse::<f64>() {
        Ok(scale) if scale.is_finite() && scale >= 0.0 => Ok(scale),
        _ => Err(FormError::InvalidScale(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_blanks_missing_fields() {
        let record = LoadingBc::new().with(LoadingField::Fy, -10.0);
        let values = LoadingBc::populate(Some(&record));

        assert_eq!(values.get("F_y"), "-10");
        assert_eq!(values.get("u_x"), "");
        assert_eq!(values, LoadingBc::blank().with("F_y", "-10"));
    }

    #[test]
    fn test_populate_without_record_is_all_blank() {
        assert!(ElementProperties::populate(None).is_blank());
        assert_eq!(ElementProperties::populate(None).get("local_z"), "");
    }

    #[test]
    fn test_read_loading_skips_blank() {
        let values = LoadingBc::blank()
            .with("u_x", "0")
            .with("M_z", " 2.5 ")
            .with("F_x", "   ");
        let record = LoadingBc::read(&values).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get(LoadingField::Ux), Some(0.0));
        assert_eq!(record.get(LoadingField::Mz), Some(2.5));
    }

    #[test]
    fn test_read_all_blank_is_empty_record() {
        assert!(ElementProperties::read(&ElementProperties::blank()).unwrap().is_empty());
        assert!(LoadingBc::read(&LoadingBc::blank()).unwrap().is_empty());
    }

    #[test]
    fn test_vector_needs_three_numeric_tokens() {
        assert_eq!(parse_vector("0, 0 ,1"), Ok(Some([0.0, 0.0, 1.0])));
        assert_eq!(parse_vector(""), Ok(None));
        assert_eq!(parse_vector("1,2"), Err(FormError::InvalidVector("1,2".to_string())));
        assert_eq!(parse_vector("1,a,3"), Err(FormError::InvalidVector("1,a,3".to_string())));
        assert!(parse_vector("1,2,3,4").is_err());
    }

    #[test]
    fn test_bad_vector_rejects_valid_scalars() {
        let values = ElementProperties::blank()
            .with("E", "200e9")
            .with("A", "0.01")
            .with("local_z", "1,2");
        assert!(matches!(
            ElementProperties::read(&values),
            Err(FormError::InvalidVector(_))
        ));
    }

    #[test]
    fn test_properties_round_trip_through_form() {
        let values = ElementProperties::blank()
            .with("E", "1000")
            .with("nu", "0.3")
            .with("local_z", "0,0,1");
        let record = ElementProperties::read(&values).unwrap();
        assert_eq!(record.get(PropertyField::LocalZ), Some(PropertyValue::Vector([0.0, 0.0, 1.0])));
        assert_eq!(ElementProperties::populate(Some(&record)), values);
    }

    #[test]
    fn test_non_numeric_scalar_is_rejected() {
        let values = LoadingBc::blank().with("F_z", "ten");
        assert_eq!(
            LoadingBc::read(&values),
            Err(FormError::InvalidNumber { field: "F_z", value: "ten".to_string() })
        );
    }

    #[test]
    fn test_deformation_scale() {
        assert_eq!(parse_deformation_scale("2.0"), Ok(2.0));
        assert_eq!(parse_deformation_scale("0"), Ok(0.0));
        assert!(parse_deformation_scale("-1").is_err());
        assert!(parse_deformation_scale("abc").is_err());
        assert!(parse_deformation_scale("inf").is_err());
    }

    #[test]
    fn test_coordinates_required() {
        assert_eq!(parse_coordinates("1", "-2.5", "0"), Ok([1.0, -2.5, 0.0]));
        assert!(parse_coordinates("", "0", "0").is_err());
    }
}
