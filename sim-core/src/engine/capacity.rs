//! Contract capacity options for a company and plan pair.

use serde::Serialize;

use crate::catalog;
use crate::models::{CapacityOption, CapacityUnit, CompanyCode, PlanCode};

const NOT_CONFIGURABLE_HELP: &str = "Contract capacity cannot be set for the selected plan.";

/// Outcome of [`generate_capacity_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityOptions {
    pub options: Vec<CapacityOption>,
    pub is_required: bool,
    pub unit: Option<CapacityUnit>,
    pub help_text: &'static str,
}

/// Lists the legal capacities for `company` and `plan`.
///
/// Only the four plans in the catalog carry a capacity rule. Any other
/// pair, including an unset side, an incompatible combination, or the
/// `Other` company, yields no options and no requirement.
///
/// # Examples
///
/// ```
/// use sim_core::engine::generate_capacity_options;
/// use sim_core::models::{CompanyCode, PlanCode};
///
/// let result = generate_capacity_options(Some(CompanyCode::Tepco), Some(PlanCode::JuryoB));
/// assert!(result.is_required);
/// assert_eq!(result.options[3].label, "30A");
/// ```
pub fn generate_capacity_options(
    company: Option<CompanyCode>,
    plan: Option<PlanCode>,
) -> CapacityOptions {
    let Some(plan) = company
        .zip(plan)
        .and_then(|(company, plan)| catalog::plan(company, plan))
    else {
        return CapacityOptions {
            options: Vec::new(),
            is_required: false,
            unit: None,
            help_text: NOT_CONFIGURABLE_HELP,
        };
    };

    CapacityOptions {
        options: plan.capacity.options(),
        is_required: plan.capacity.is_required(),
        unit: plan.capacity.unit(),
        help_text: plan.capacity_help,
    }
}

/// Returns `true` if the pair needs a contract capacity before the form
/// can move on.
pub fn is_capacity_required(
    company: Option<CompanyCode>,
    plan: Option<PlanCode>,
) -> bool {
    generate_capacity_options(company, plan).is_required
}
