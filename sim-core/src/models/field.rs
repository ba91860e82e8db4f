use std::fmt;

use serde::{Deserialize, Serialize};

use super::StepId;

/// Names of the raw form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    PostalCode,
    /// Derived from the postal code; never entered by hand.
    Area,
    Company,
    Plan,
    Capacity,
    ElectricityBill,
    Email,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::PostalCode,
        FieldName::Area,
        FieldName::Company,
        FieldName::Plan,
        FieldName::Capacity,
        FieldName::ElectricityBill,
        FieldName::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostalCode => "postalCode",
            Self::Area => "area",
            Self::Company => "company",
            Self::Plan => "plan",
            Self::Capacity => "capacity",
            Self::ElectricityBill => "electricityBill",
            Self::Email => "email",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    /// The step whose errors this field's errors are reported under.
    pub fn step(&self) -> StepId {
        match self {
            Self::PostalCode | Self::Area => StepId::PostalCode,
            Self::Company => StepId::Company,
            Self::Plan => StepId::Plan,
            Self::Capacity => StepId::Capacity,
            Self::ElectricityBill => StepId::ElectricityBill,
            Self::Email => StepId::Email,
        }
    }

    /// The step that must be completed before this field accepts input.
    ///
    /// `None` for the postal code (always open) and for the area, which is
    /// never enabled for input at all.
    pub fn enabled_by(&self) -> Option<StepId> {
        match self {
            Self::PostalCode | Self::Area => None,
            Self::Company => Some(StepId::PostalCode),
            Self::Plan => Some(StepId::Company),
            Self::Capacity => Some(StepId::Plan),
            Self::ElectricityBill => Some(StepId::Capacity),
            Self::Email => Some(StepId::ElectricityBill),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PostalCode => "Postal code",
            Self::Area => "Area",
            Self::Company => "Electricity company",
            Self::Plan => "Plan",
            Self::Capacity => "Contract capacity",
            Self::ElectricityBill => "Monthly electricity bill",
            Self::Email => "Email address",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
