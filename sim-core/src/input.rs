//! Raw user input for a single field, parsed from text.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{CompanyCode, FieldName, PlanCode};

/// Error returned when typed text cannot become a [`FieldInput`].
#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("unknown company '{0}' (expected tepco, kepco, or other)")]
    UnknownCompany(String),

    #[error("unknown plan '{0}' (expected juryoA, juryoB, or juryoC)")]
    UnknownPlan(String),

    #[error("invalid capacity '{0}'")]
    InvalidCapacity(String),

    #[error("invalid amount '{input}': {source}")]
    InvalidAmount {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("{0} is derived from the postal code and cannot be entered")]
    DerivedField(FieldName),
}

/// A new raw value for one field. `None` / empty text clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    PostalCode(String),
    Company(Option<CompanyCode>),
    Plan(Option<PlanCode>),
    Capacity(Option<u32>),
    ElectricityBill(Option<Decimal>),
    Email(String),
}

impl FieldInput {
    pub fn field(&self) -> FieldName {
        match self {
            Self::PostalCode(_) => FieldName::PostalCode,
            Self::Company(_) => FieldName::Company,
            Self::Plan(_) => FieldName::Plan,
            Self::Capacity(_) => FieldName::Capacity,
            Self::ElectricityBill(_) => FieldName::ElectricityBill,
            Self::Email(_) => FieldName::Email,
        }
    }

    /// Parses `raw` as typed into `field`.
    ///
    /// Surrounding whitespace is ignored. Postal codes may contain the usual
    /// `123-4567` hyphen, capacities may carry their unit (`30A`, `12kVA`),
    /// and amounts may use comma thousands separators (`5,000`).
    pub fn parse(
        field: FieldName,
        raw: &str,
    ) -> Result<Self, InputParseError> {
        let text = raw.trim();

        match field {
            FieldName::PostalCode => Ok(Self::PostalCode(text.replace('-', ""))),
            FieldName::Area => Err(InputParseError::DerivedField(field)),
            FieldName::Company => optional(text, |s| {
                CompanyCode::parse(s).ok_or_else(|| InputParseError::UnknownCompany(s.to_string()))
            })
            .map(Self::Company),
            FieldName::Plan => optional(text, |s| {
                PlanCode::parse(s).ok_or_else(|| InputParseError::UnknownPlan(s.to_string()))
            })
            .map(Self::Plan),
            FieldName::Capacity => optional(text, parse_capacity).map(Self::Capacity),
            FieldName::ElectricityBill => parse_optional_amount(text).map(Self::ElectricityBill),
            FieldName::Email => Ok(Self::Email(text.to_string())),
        }
    }
}

fn optional<T>(
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, InputParseError>,
) -> Result<Option<T>, InputParseError> {
    if text.is_empty() {
        Ok(None)
    } else {
        parse(text).map(Some)
    }
}

fn parse_capacity(text: &str) -> Result<u32, InputParseError> {
    let digits = text
        .strip_suffix("kVA")
        .or_else(|| text.strip_suffix('A'))
        .unwrap_or(text)
        .trim();

    digits
        .parse()
        .map_err(|_| InputParseError::InvalidCapacity(text.to_string()))
}

/// Parses a yen amount, accepting comma thousands separators.
///
/// Empty input means "no amount". Unparseable input is an error and is
/// logged at warn level.
pub fn parse_optional_amount(s: &str) -> Result<Option<Decimal>, InputParseError> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(None);
    }

    normalized.parse().map(Some).map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        InputParseError::InvalidAmount {
            input: s.to_string(),
            source: e,
        }
    })
}
