use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AreaCode, CompanyCode, FieldName, PlanCode};

/// The raw form values: the single source of truth for every derived view.
///
/// Every field stays `None` until the user supplies it. `capacity` is a
/// bare number whose unit depends on the selected company and plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub postal_code: Option<String>,
    pub area: Option<AreaCode>,
    pub company: Option<CompanyCode>,
    pub plan: Option<PlanCode>,
    pub capacity: Option<u32>,
    pub electricity_bill: Option<Decimal>,
    pub email: Option<String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `field` currently holds a value.
    pub fn is_set(
        &self,
        field: FieldName,
    ) -> bool {
        match field {
            FieldName::PostalCode => self.postal_code.is_some(),
            FieldName::Area => self.area.is_some(),
            FieldName::Company => self.company.is_some(),
            FieldName::Plan => self.plan.is_some(),
            FieldName::Capacity => self.capacity.is_some(),
            FieldName::ElectricityBill => self.electricity_bill.is_some(),
            FieldName::Email => self.email.is_some(),
        }
    }

    /// Returns `true` if `field` holds a different value in `other`.
    pub fn differs_on(
        &self,
        other: &FormData,
        field: FieldName,
    ) -> bool {
        match field {
            FieldName::PostalCode => self.postal_code != other.postal_code,
            FieldName::Area => self.area != other.area,
            FieldName::Company => self.company != other.company,
            FieldName::Plan => self.plan != other.plan,
            FieldName::Capacity => self.capacity != other.capacity,
            FieldName::ElectricityBill => self.electricity_bill != other.electricity_bill,
            FieldName::Email => self.email != other.email,
        }
    }

    /// Clears `field` back to its unset state.
    pub fn clear(
        &mut self,
        field: FieldName,
    ) {
        match field {
            FieldName::PostalCode => self.postal_code = None,
            FieldName::Area => self.area = None,
            FieldName::Company => self.company = None,
            FieldName::Plan => self.plan = None,
            FieldName::Capacity => self.capacity = None,
            FieldName::ElectricityBill => self.electricity_bill = None,
            FieldName::Email => self.email = None,
        }
    }
}
