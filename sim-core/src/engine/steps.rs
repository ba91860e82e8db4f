//! Projection of the analyzer output into the user-facing step list.

use crate::engine::capacity::is_capacity_required;
use crate::engine::form_state::{FormState, analyze_form_state};
use crate::models::{FormData, FormErrors, FormStep, StepId};

/// Returns `true` when the capacity step should be left out of the list.
///
/// Only hides it once both company and plan are known and the pair needs
/// no capacity; an unfinished selection keeps the step visible.
fn hides_capacity(data: &FormData) -> bool {
    data.company.is_some()
        && data.plan.is_some()
        && !is_capacity_required(data.company, data.plan)
}

/// Builds the step list from an already computed `state`.
pub fn steps_for_state(
    state: &FormState,
    data: &FormData,
    errors: &FormErrors,
) -> Vec<FormStep> {
    let hide_capacity = hides_capacity(data);

    StepId::ORDER
        .into_iter()
        .filter(|step| !(hide_capacity && *step == StepId::Capacity))
        .map(|step| {
            let completed = state.is_completed(step);
            FormStep {
                id: step,
                name: step.name(),
                completed,
                enabled: step == StepId::PostalCode
                    || completed
                    || state.current_step == Some(step),
                has_error: errors.fields().any(|field| field.step() == step),
            }
        })
        .collect()
}

/// Analyzes `data` and returns its ordered step list with error flags.
pub fn project_steps(
    data: &FormData,
    errors: &FormErrors,
) -> Vec<FormStep> {
    steps_for_state(&analyze_form_state(data), data, errors)
}

/// The form may be submitted once every step is complete and no error of
/// any kind is outstanding.
pub fn can_submit(
    data: &FormData,
    errors: &FormErrors,
) -> bool {
    errors.is_empty() && analyze_form_state(data).is_form_complete
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{AreaCode, CompanyCode, FieldName, PlanCode};

    fn ids(steps: &[FormStep]) -> Vec<StepId> {
        steps.iter().map(|step| step.id).collect()
    }

    fn complete() -> FormData {
        FormData {
            postal_code: Some("1000001".to_string()),
            area: Some(AreaCode::Tokyo),
            company: Some(CompanyCode::Tepco),
            plan: Some(PlanCode::JuryoB),
            capacity: Some(30),
            electricity_bill: Some(dec!(5000)),
            email: Some("test@example.com".to_string()),
        }
    }

    // =========================================================================
    // project_steps
    // =========================================================================

    #[test]
    fn empty_form_lists_all_six_steps_with_only_the_first_enabled() {
        let steps = project_steps(&FormData::default(), &FormErrors::new());

        assert_eq!(ids(&steps), StepId::ORDER.to_vec());
        assert_eq!(
            steps.iter().map(|s| s.enabled).collect::<Vec<_>>(),
            vec![true, false, false, false, false, false]
        );
        assert!(steps.iter().all(|s| !s.completed && !s.has_error));
    }

    #[test]
    fn capacity_step_is_hidden_for_capacity_free_plans() {
        let data = FormData {
            postal_code: Some("5000001".to_string()),
            area: Some(AreaCode::Kansai),
            company: Some(CompanyCode::Kepco),
            plan: Some(PlanCode::JuryoA),
            ..FormData::default()
        };

        let steps = project_steps(&data, &FormErrors::new());

        assert_eq!(
            ids(&steps),
            vec![
                StepId::PostalCode,
                StepId::Company,
                StepId::Plan,
                StepId::ElectricityBill,
                StepId::Email
            ]
        );
        assert!(steps[3].enabled);
    }

    #[test]
    fn capacity_step_is_shown_when_plan_needs_it() {
        let steps = project_steps(&complete(), &FormErrors::new());

        assert!(ids(&steps).contains(&StepId::Capacity));
    }

    #[test]
    fn capacity_step_is_shown_until_company_and_plan_are_known() {
        let data = FormData {
            company: Some(CompanyCode::Kepco),
            ..FormData::default()
        };

        let steps = project_steps(&data, &FormErrors::new());

        assert!(ids(&steps).contains(&StepId::Capacity));
    }

    #[test]
    fn errors_flag_their_owning_step() {
        let mut errors = FormErrors::new();
        errors.insert(FieldName::Area, "mismatch");
        errors.insert(FieldName::Email, "bad");

        let steps = project_steps(&complete(), &errors);

        let flagged: Vec<StepId> = steps
            .iter()
            .filter(|step| step.has_error)
            .map(|step| step.id)
            .collect();
        assert_eq!(flagged, vec![StepId::PostalCode, StepId::Email]);
    }

    #[test]
    fn submit_errors_flag_no_step() {
        let mut errors = FormErrors::new();
        errors.insert_submit("failed");

        let steps = project_steps(&complete(), &errors);

        assert!(steps.iter().all(|step| !step.has_error));
    }

    // =========================================================================
    // can_submit
    // =========================================================================

    #[test]
    fn complete_form_without_errors_can_submit() {
        assert!(can_submit(&complete(), &FormErrors::new()));
    }

    #[test]
    fn incomplete_form_cannot_submit() {
        let data = FormData {
            email: None,
            ..complete()
        };

        assert!(!can_submit(&data, &FormErrors::new()));
    }

    #[test]
    fn any_error_blocks_submission() {
        let mut errors = FormErrors::new();
        errors.insert(FieldName::ElectricityBill, "too high");

        assert!(!can_submit(&complete(), &errors));
    }
}
