//! Evaluates loaded forms without any user interaction.

use sim_core::engine::{
    FormState, SavingsCalculator, SavingsEstimate, analyze_form_state, can_submit, validate_form,
};
use sim_core::{FormData, FormErrors};
use tracing::debug;

/// Analysis of one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// 1-based row number (header = row 0).
    pub row: usize,
    pub data: FormData,
    pub state: FormState,
    pub errors: FormErrors,
    pub can_submit: bool,
    /// Present only for submittable rows.
    pub estimate: Option<SavingsEstimate>,
}

pub fn evaluate(
    forms: Vec<FormData>,
    calculator: &SavingsCalculator,
) -> Vec<BatchOutcome> {
    forms
        .into_iter()
        .enumerate()
        .map(|(idx, data)| {
            let state = analyze_form_state(&data);
            let errors = validate_form(&data);
            let can_submit = can_submit(&data, &errors);
            let estimate = data
                .electricity_bill
                .filter(|_| can_submit)
                .map(|bill| calculator.estimate(bill));
            debug!(row = idx + 1, can_submit, errors = errors.len(), "evaluated row");

            BatchOutcome {
                row: idx + 1,
                data,
                state,
                errors,
                can_submit,
                estimate,
            }
        })
        .collect()
}
