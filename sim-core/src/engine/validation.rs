//! Field validation.
//!
//! Two layers feed the same [`FormErrors`] map:
//!
//! * [`validate_fields`] checks each present field on its own (format and
//!   range rules).
//! * [`validate_cross_fields`] checks that present fields agree with each
//!   other (area vs. postal code, company vs. area, plan vs. company,
//!   capacity vs. plan).
//!
//! Absent fields are never reported; the form validates progressively.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{self, MAX_ELECTRICITY_BILL, MIN_ELECTRICITY_BILL};
use crate::engine::area::detect_area;
use crate::models::{CompanyCode, FieldName, FormData, FormErrors};

pub const AREA_MISMATCH_ERROR: &str = "Area does not match the postal code.";
pub const COMPANY_AREA_MISMATCH_ERROR: &str = "This company does not serve your area.";
pub const PLAN_MISMATCH_ERROR: &str = "This plan is not offered by the selected company.";
pub const CAPACITY_MISMATCH_ERROR: &str =
    "This contract capacity is not available for the selected plan.";
pub const UNCOVERED_COMPANY_ERROR: &str = "This company is not covered by the simulation.";
pub const BILL_TOO_LOW_ERROR: &str = "Electricity bill must be at least 1,000 yen.";
pub const BILL_TOO_HIGH_ERROR: &str = "Electricity bill must be at most 999,999 yen.";
pub const EMAIL_REQUIRED_ERROR: &str = "Email address is required.";
pub const EMAIL_FORMAT_ERROR: &str = "Please enter a valid email address.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid"));

/// Returns `true` if `email` has the `local@domain.tld` shape.
pub(crate) fn is_email_shaped(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks every present field against its own format and range rules.
pub fn validate_fields(data: &FormData) -> FormErrors {
    let mut errors = FormErrors::new();

    if let Some(postal_code) = data.postal_code.as_deref() {
        if let Some(message) = detect_area(postal_code).error_message {
            errors.insert(FieldName::PostalCode, message);
        }
    }

    if data.company == Some(CompanyCode::Other) {
        errors.insert(FieldName::Company, UNCOVERED_COMPANY_ERROR);
    }

    if let Some(bill) = data.electricity_bill {
        if bill < MIN_ELECTRICITY_BILL {
            errors.insert(FieldName::ElectricityBill, BILL_TOO_LOW_ERROR);
        } else if bill > MAX_ELECTRICITY_BILL {
            errors.insert(FieldName::ElectricityBill, BILL_TOO_HIGH_ERROR);
        }
    }

    if let Some(email) = data.email.as_deref() {
        if email.is_empty() {
            errors.insert(FieldName::Email, EMAIL_REQUIRED_ERROR);
        } else if !is_email_shaped(email) {
            errors.insert(FieldName::Email, EMAIL_FORMAT_ERROR);
        }
    }

    errors
}

/// Checks that related fields agree, wherever both sides are present.
///
/// The capacity value is judged against the company and plan in the same
/// snapshot; a bare number is never read as amperes or kVA on its own.
pub fn validate_cross_fields(data: &FormData) -> FormErrors {
    let mut errors = FormErrors::new();

    if let (Some(postal_code), Some(area)) = (data.postal_code.as_deref(), data.area) {
        if detect_area(postal_code).area != area {
            errors.insert(FieldName::Area, AREA_MISMATCH_ERROR);
        }
    }

    if let (Some(area), Some(company)) = (data.area, data.company) {
        let serves_area = catalog::companies_for_area(area)
            .iter()
            .any(|offered| offered.code == company);
        if !serves_area {
            errors.insert(FieldName::Company, COMPANY_AREA_MISMATCH_ERROR);
        }
    }

    if let (Some(company), Some(plan)) = (data.company, data.plan) {
        let offered = catalog::plan(company, plan);

        if offered.is_none() {
            errors.insert(FieldName::Plan, PLAN_MISMATCH_ERROR);
        }

        if data.capacity.is_some()
            && !offered.is_some_and(|plan| plan.capacity.accepts(data.capacity))
        {
            errors.insert(FieldName::Capacity, CAPACITY_MISMATCH_ERROR);
        }
    }

    errors
}

/// Runs both layers; cross-field messages win when both flag a field.
pub fn validate_form(data: &FormData) -> FormErrors {
    let mut errors = validate_fields(data);
    errors.extend(validate_cross_fields(data));
    errors
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{AreaCode, PlanCode};

    fn with_plan(
        company: CompanyCode,
        plan: PlanCode,
        capacity: Option<u32>,
    ) -> FormData {
        FormData {
            company: Some(company),
            plan: Some(plan),
            capacity,
            ..FormData::default()
        }
    }

    // =========================================================================
    // validate_fields
    // =========================================================================

    #[test]
    fn empty_form_has_no_field_errors() {
        assert!(validate_fields(&FormData::default()).is_empty());
    }

    #[test]
    fn postal_code_errors_come_from_area_detection() {
        let short = FormData {
            postal_code: Some("123".to_string()),
            ..FormData::default()
        };
        let outside = FormData {
            postal_code: Some("9000000".to_string()),
            ..FormData::default()
        };

        assert_eq!(
            validate_fields(&short).get(FieldName::PostalCode),
            Some("postal code must be 7 digits")
        );
        assert_eq!(
            validate_fields(&outside).get(FieldName::PostalCode),
            Some("area not serviced")
        );
    }

    #[test]
    fn other_company_is_flagged() {
        let data = FormData {
            company: Some(CompanyCode::Other),
            ..FormData::default()
        };

        assert_eq!(
            validate_fields(&data).get(FieldName::Company),
            Some(UNCOVERED_COMPANY_ERROR)
        );
    }

    #[test]
    fn bill_bounds_are_inclusive() {
        let bill = |amount| FormData {
            electricity_bill: Some(amount),
            ..FormData::default()
        };

        assert!(validate_fields(&bill(dec!(1000))).is_empty());
        assert!(validate_fields(&bill(dec!(999999))).is_empty());
        assert_eq!(
            validate_fields(&bill(dec!(999))).get(FieldName::ElectricityBill),
            Some(BILL_TOO_LOW_ERROR)
        );
        assert_eq!(
            validate_fields(&bill(dec!(1000000))).get(FieldName::ElectricityBill),
            Some(BILL_TOO_HIGH_ERROR)
        );
    }

    #[test]
    fn email_must_be_present_and_well_formed() {
        let email = |value: &str| FormData {
            email: Some(value.to_string()),
            ..FormData::default()
        };

        assert!(validate_fields(&email("test@example.com")).is_empty());
        assert_eq!(
            validate_fields(&email("")).get(FieldName::Email),
            Some(EMAIL_REQUIRED_ERROR)
        );
        assert_eq!(
            validate_fields(&email("test@example")).get(FieldName::Email),
            Some(EMAIL_FORMAT_ERROR)
        );
        assert_eq!(
            validate_fields(&email("te st@example.com")).get(FieldName::Email),
            Some(EMAIL_FORMAT_ERROR)
        );
    }

    // =========================================================================
    // validate_cross_fields
    // =========================================================================

    #[test]
    fn area_must_follow_postal_code() {
        let data = FormData {
            postal_code: Some("1000001".to_string()),
            area: Some(AreaCode::Kansai),
            ..FormData::default()
        };

        assert_eq!(
            validate_cross_fields(&data).get(FieldName::Area),
            Some(AREA_MISMATCH_ERROR)
        );
    }

    #[test]
    fn matching_area_passes() {
        let data = FormData {
            postal_code: Some("5300001".to_string()),
            area: Some(AreaCode::Kansai),
            ..FormData::default()
        };

        assert!(validate_cross_fields(&data).is_empty());
    }

    #[test]
    fn company_must_serve_the_area() {
        let located = |area: AreaCode, company: CompanyCode| FormData {
            postal_code: Some(
                match area {
                    AreaCode::Kansai => "5300001",
                    _ => "1000001",
                }
                .to_string(),
            ),
            area: Some(area),
            company: Some(company),
            ..FormData::default()
        };

        assert_eq!(
            validate_cross_fields(&located(AreaCode::Tokyo, CompanyCode::Kepco))
                .get(FieldName::Company),
            Some(COMPANY_AREA_MISMATCH_ERROR)
        );
        assert!(
            validate_cross_fields(&located(AreaCode::Kansai, CompanyCode::Tepco))
                .contains(FieldName::Company)
        );
        assert!(validate_cross_fields(&located(AreaCode::Tokyo, CompanyCode::Tepco)).is_empty());
        assert!(validate_cross_fields(&located(AreaCode::Kansai, CompanyCode::Kepco)).is_empty());
    }

    #[test]
    fn other_company_is_allowed_in_any_area() {
        for area in [AreaCode::Tokyo, AreaCode::Kansai, AreaCode::Unsupported] {
            let data = FormData {
                area: Some(area),
                company: Some(CompanyCode::Other),
                ..FormData::default()
            };

            assert!(!validate_cross_fields(&data).contains(FieldName::Company));
        }
    }

    #[test]
    fn kepco_plan_in_tokyo_cannot_be_submitted() {
        let data = FormData {
            postal_code: Some("1000001".to_string()),
            area: Some(AreaCode::Tokyo),
            company: Some(CompanyCode::Kepco),
            plan: Some(PlanCode::JuryoA),
            capacity: None,
            electricity_bill: Some(dec!(5000)),
            email: Some("test@example.com".to_string()),
        };

        let errors = validate_form(&data);

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldName::Company]);
        assert!(!crate::engine::can_submit(&data, &errors));
    }

    #[test]
    fn plan_must_be_offered_by_company() {
        let tepco_a = with_plan(CompanyCode::Tepco, PlanCode::JuryoA, None);
        let kepco_c = with_plan(CompanyCode::Kepco, PlanCode::JuryoC, None);
        let other_b = with_plan(CompanyCode::Other, PlanCode::JuryoB, None);

        assert!(validate_cross_fields(&tepco_a).contains(FieldName::Plan));
        assert!(validate_cross_fields(&kepco_c).contains(FieldName::Plan));
        assert!(validate_cross_fields(&other_b).contains(FieldName::Plan));
    }

    #[test]
    fn ampere_plan_rejects_values_outside_the_list() {
        let nine = with_plan(CompanyCode::Tepco, PlanCode::JuryoB, Some(9));
        let thirty = with_plan(CompanyCode::Tepco, PlanCode::JuryoB, Some(30));

        assert_eq!(
            validate_cross_fields(&nine).get(FieldName::Capacity),
            Some(CAPACITY_MISMATCH_ERROR)
        );
        assert!(validate_cross_fields(&thirty).is_empty());
    }

    #[test]
    fn kva_plans_accept_6_through_49() {
        for (company, plan) in [
            (CompanyCode::Tepco, PlanCode::JuryoC),
            (CompanyCode::Kepco, PlanCode::JuryoB),
        ] {
            assert!(validate_cross_fields(&with_plan(company, plan, Some(6))).is_empty());
            assert!(validate_cross_fields(&with_plan(company, plan, Some(49))).is_empty());
            assert!(
                validate_cross_fields(&with_plan(company, plan, Some(5)))
                    .contains(FieldName::Capacity)
            );
            assert!(
                validate_cross_fields(&with_plan(company, plan, Some(50)))
                    .contains(FieldName::Capacity)
            );
        }
    }

    #[test]
    fn capacity_free_plan_rejects_any_value() {
        let set = with_plan(CompanyCode::Kepco, PlanCode::JuryoA, Some(30));
        let unset = with_plan(CompanyCode::Kepco, PlanCode::JuryoA, None);

        assert!(validate_cross_fields(&set).contains(FieldName::Capacity));
        assert!(validate_cross_fields(&unset).is_empty());
    }

    #[test]
    fn unknown_pair_rejects_any_capacity() {
        let data = with_plan(CompanyCode::Other, PlanCode::JuryoB, Some(30));

        let errors = validate_cross_fields(&data);

        assert!(errors.contains(FieldName::Plan));
        assert!(errors.contains(FieldName::Capacity));
    }

    #[test]
    fn missing_capacity_is_not_an_error() {
        let data = with_plan(CompanyCode::Tepco, PlanCode::JuryoB, None);

        assert!(validate_cross_fields(&data).is_empty());
    }

    // =========================================================================
    // validate_form
    // =========================================================================

    #[test]
    fn validate_form_merges_both_layers() {
        let data = FormData {
            postal_code: Some("1000001".to_string()),
            area: Some(AreaCode::Tokyo),
            company: Some(CompanyCode::Tepco),
            plan: Some(PlanCode::JuryoB),
            capacity: Some(9),
            electricity_bill: Some(dec!(500)),
            email: Some("test@example.com".to_string()),
        };

        let errors = validate_form(&data);

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![FieldName::Capacity, FieldName::ElectricityBill]
        );
    }
}
