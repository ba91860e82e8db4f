//! Static reference data: service areas, companies, plans, and the fixed
//! tables that drive the form engine.
//!
//! Everything here is immutable and looked up by code. No function in this
//! module does more than a table scan.

use rust_decimal::Decimal;

use crate::models::{
    Area, AreaCode, CapacityRule, Company, CompanyCode, FieldName, Plan, PlanCode,
};

/// Required postal-code length, in characters.
pub const POSTAL_CODE_LENGTH: usize = 7;

/// Breaker sizes offered on ampere-based plans.
pub const AMPERE_VALUES: [u32; 7] = [10, 15, 20, 30, 40, 50, 60];

/// First value of the kVA capacity range.
pub const KVA_START_VALUE: u32 = 6;

/// Number of consecutive kVA values offered (6 through 49).
pub const KVA_RANGE_LENGTH: u32 = 44;

/// Smallest monthly bill the simulator accepts, in yen.
pub const MIN_ELECTRICITY_BILL: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Largest monthly bill the simulator accepts, in yen.
pub const MAX_ELECTRICITY_BILL: Decimal = Decimal::from_parts(999_999, 0, 0, false, 0);

const KVA_RULE: CapacityRule = CapacityRule::Kva {
    start: KVA_START_VALUE,
    count: KVA_RANGE_LENGTH,
};

const HIGH_CAPACITY_HELP: &str = "Applies to contracts with high power usage.";

pub static AREAS: [Area; 3] = [
    Area {
        code: AreaCode::Tokyo,
        name: "TEPCO service area",
        postal_prefix: Some('1'),
    },
    Area {
        code: AreaCode::Kansai,
        name: "KEPCO service area",
        postal_prefix: Some('5'),
    },
    Area {
        code: AreaCode::Unsupported,
        name: "Outside the service area",
        postal_prefix: None,
    },
];

const TEPCO_PLANS: [Plan; 2] = [
    Plan {
        code: PlanCode::JuryoB,
        name: "Juryo Dento B",
        company: CompanyCode::Tepco,
        capacity: CapacityRule::Ampere(&AMPERE_VALUES),
        capacity_help: "30A is typical for an ordinary household.",
    },
    Plan {
        code: PlanCode::JuryoC,
        name: "Juryo Dento C",
        company: CompanyCode::Tepco,
        capacity: KVA_RULE,
        capacity_help: HIGH_CAPACITY_HELP,
    },
];

const KEPCO_PLANS: [Plan; 2] = [
    Plan {
        code: PlanCode::JuryoA,
        name: "Juryo Dento A",
        company: CompanyCode::Kepco,
        capacity: CapacityRule::NotApplicable,
        capacity_help: "Juryo Dento A does not need a contract capacity.",
    },
    Plan {
        code: PlanCode::JuryoB,
        name: "Juryo Dento B",
        company: CompanyCode::Kepco,
        capacity: KVA_RULE,
        capacity_help: HIGH_CAPACITY_HELP,
    },
];

pub static COMPANIES: [Company; 3] = [
    Company {
        code: CompanyCode::Tepco,
        name: "Tokyo Electric Power Company",
        area: Some(AreaCode::Tokyo),
        supported_plans: &TEPCO_PLANS,
    },
    Company {
        code: CompanyCode::Kepco,
        name: "Kansai Electric Power Company",
        area: Some(AreaCode::Kansai),
        supported_plans: &KEPCO_PLANS,
    },
    Company {
        code: CompanyCode::Other,
        name: "Other",
        area: None,
        supported_plans: &[],
    },
];

/// Fields cleared when the trigger field changes, in clearing order.
pub const RESET_RULES: [(FieldName, &[FieldName]); 3] = [
    (
        FieldName::PostalCode,
        &[
            FieldName::Area,
            FieldName::Company,
            FieldName::Plan,
            FieldName::Capacity,
        ],
    ),
    (FieldName::Company, &[FieldName::Plan, FieldName::Capacity]),
    (FieldName::Plan, &[FieldName::Capacity]),
];

pub fn area(code: AreaCode) -> &'static Area {
    match code {
        AreaCode::Tokyo => &AREAS[0],
        AreaCode::Kansai => &AREAS[1],
        AreaCode::Unsupported => &AREAS[2],
    }
}

pub fn company(code: CompanyCode) -> &'static Company {
    match code {
        CompanyCode::Tepco => &COMPANIES[0],
        CompanyCode::Kepco => &COMPANIES[1],
        CompanyCode::Other => &COMPANIES[2],
    }
}

/// Plans offered by `company`, in display order. Empty for `Other`.
pub fn plans_for(company_code: CompanyCode) -> &'static [Plan] {
    company(company_code).supported_plans
}

/// Looks up the plan `plan_code` as offered by `company_code`.
///
/// Returns `None` when the company does not offer that plan.
pub fn plan(
    company_code: CompanyCode,
    plan_code: PlanCode,
) -> Option<&'static Plan> {
    plans_for(company_code)
        .iter()
        .find(|plan| plan.code == plan_code)
}

/// Companies a customer in `area_code` can pick from.
///
/// Companies without a home area (the `Other` sentinel) are always offered
/// so customers of uncovered providers can say so.
pub fn companies_for_area(area_code: AreaCode) -> Vec<&'static Company> {
    COMPANIES
        .iter()
        .filter(|company| company.area.is_none_or(|area| area == area_code))
        .collect()
}
