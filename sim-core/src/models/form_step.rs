use std::fmt;

use serde::{Deserialize, Serialize};

use super::FieldName;

/// The six logical steps of the form, in their fixed dependency order.
///
/// Variant order is the step order, so the derived `Ord` sorts steps the
/// way the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    PostalCode,
    Company,
    Plan,
    Capacity,
    ElectricityBill,
    Email,
}

impl StepId {
    pub const ORDER: [StepId; 6] = [
        StepId::PostalCode,
        StepId::Company,
        StepId::Plan,
        StepId::Capacity,
        StepId::ElectricityBill,
        StepId::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostalCode => "postal-code",
            Self::Company => "company",
            Self::Plan => "plan",
            Self::Capacity => "capacity",
            Self::ElectricityBill => "electricity-bill",
            Self::Email => "email",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|step| step.as_str() == s)
    }

    pub fn name(&self) -> &'static str {
        self.field().label()
    }

    /// Position of this step in [`StepId::ORDER`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Every step this one depends on: all steps before it.
    pub fn dependencies(&self) -> &'static [StepId] {
        &Self::ORDER[..self.index()]
    }

    /// The field this step collects.
    pub fn field(&self) -> FieldName {
        match self {
            Self::PostalCode => FieldName::PostalCode,
            Self::Company => FieldName::Company,
            Self::Plan => FieldName::Plan,
            Self::Capacity => FieldName::Capacity,
            Self::ElectricityBill => FieldName::ElectricityBill,
            Self::Email => FieldName::Email,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing step entry, derived on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStep {
    pub id: StepId,
    pub name: &'static str,
    pub completed: bool,
    pub enabled: bool,
    pub has_error: bool,
}
