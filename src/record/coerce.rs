//! Conversion of textual cell content into attribute target types.

use crate::error::IngestError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// The type an attribute wants its cell content coerced to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetType {
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Text,
}

impl TargetType {
    /// Type name used in coercion error messages.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            TargetType::Integer => "Integer",
            TargetType::Long => "Long",
            TargetType::Float => "Float",
            TargetType::Double => "Double",
            TargetType::Decimal => "Decimal",
            TargetType::Text => "Text",
        }
    }
}

/// One successfully coerced attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum CoercedValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
}

/// Coerces textual cell content to the target type.
///
/// Numeric cells render whole numbers with a trailing ".0", so that suffix is
/// stripped before parsing integral targets. Fractional targets parse the
/// text as-is; anything that does not parse reports which value failed to
/// become which type.
pub fn coerce(value: &str, target: TargetType) -> Result<CoercedValue, IngestError> {
    let fail = || IngestError::Coercion {
        value: value.to_owned(),
        target: target.as_str(),
    };
    match target {
        TargetType::Integer => strip_integral_suffix(value)
            .parse::<i32>()
            .map(CoercedValue::Integer)
            .map_err(|_| fail()),
        TargetType::Long => strip_integral_suffix(value)
            .parse::<i64>()
            .map(CoercedValue::Long)
            .map_err(|_| fail()),
        TargetType::Float => value
            .parse::<f32>()
            .map(CoercedValue::Float)
            .map_err(|_| fail()),
        TargetType::Double => value
            .parse::<f64>()
            .map(CoercedValue::Double)
            .map_err(|_| fail()),
        TargetType::Decimal => Decimal::from_str(value)
            .map(CoercedValue::Decimal)
            .map_err(|_| fail()),
        TargetType::Text => Ok(CoercedValue::Text(value.to_owned())),
    }
}

/// Drops the ".0" a numeric cell leaves on whole numbers. Only integral
/// targets get this; fractional targets parse the suffix fine on their own.
fn strip_integral_suffix(value: &str) -> &str {
    value.strip_suffix(".0").unwrap_or(value)
}
