use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityUnit {
    #[serde(rename = "A")]
    Ampere,
    #[serde(rename = "kVA")]
    Kva,
}

impl CapacityUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ampere => "A",
            Self::Kva => "kVA",
        }
    }
}

/// One selectable contract capacity, e.g. `30A` or `12kVA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityOption {
    pub value: u32,
    pub label: String,
    pub unit: CapacityUnit,
}

impl CapacityOption {
    pub fn new(
        value: u32,
        unit: CapacityUnit,
    ) -> Self {
        Self {
            value,
            label: format!("{value}{}", unit.symbol()),
            unit,
        }
    }
}

/// The legal capacity values of a plan.
///
/// A bare capacity number carries no unit of its own; it only means
/// something once paired with the rule of the active plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CapacityRule {
    /// The plan has no contract capacity; the value must stay unset.
    NotApplicable,
    /// A fixed list of ampere breaker sizes.
    Ampere(&'static [u32]),
    /// `count` consecutive kVA values starting at `start`.
    Kva { start: u32, count: u32 },
}

impl CapacityRule {
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    pub fn unit(&self) -> Option<CapacityUnit> {
        match self {
            Self::NotApplicable => None,
            Self::Ampere(_) => Some(CapacityUnit::Ampere),
            Self::Kva { .. } => Some(CapacityUnit::Kva),
        }
    }

    /// Expands the rule into its ordered option list.
    pub fn options(&self) -> Vec<CapacityOption> {
        match *self {
            Self::NotApplicable => Vec::new(),
            Self::Ampere(values) => values
                .iter()
                .map(|&value| CapacityOption::new(value, CapacityUnit::Ampere))
                .collect(),
            Self::Kva { start, count } => (start..start + count)
                .map(|value| CapacityOption::new(value, CapacityUnit::Kva))
                .collect(),
        }
    }

    /// Returns `true` if `capacity` is a legal value under this rule.
    pub fn accepts(
        &self,
        capacity: Option<u32>,
    ) -> bool {
        match (*self, capacity) {
            (Self::NotApplicable, None) => true,
            (Self::NotApplicable, Some(_)) => false,
            (_, None) => false,
            (Self::Ampere(values), Some(value)) => values.contains(&value),
            (Self::Kva { start, count }, Some(value)) => (start..start + count).contains(&value),
        }
    }
}
