//! Field-reset cascade: which answers become stale when an upstream answer
//! changes.

use tracing::debug;

use crate::catalog::RESET_RULES;
use crate::models::{FieldName, FormData};

/// Lists the fields to clear after moving from `previous` to `next`.
///
/// Triggers are checked in [`RESET_RULES`] order and their dependents are
/// accumulated without duplicates, so a postal-code change followed by a
/// company change yields each dependent once. `area` only appears through
/// the postal-code rule; callers re-derive it instead of clearing it.
pub fn fields_to_reset(
    previous: &FormData,
    next: &FormData,
) -> Vec<FieldName> {
    let mut fields: Vec<FieldName> = Vec::new();

    for (trigger, dependents) in RESET_RULES {
        if !previous.differs_on(next, trigger) {
            continue;
        }

        for dependent in dependents {
            if !fields.contains(dependent) {
                fields.push(*dependent);
            }
        }
    }

    if !fields.is_empty() {
        debug!(fields = ?fields, "upstream change resets dependent fields");
    }

    fields
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::engine::analyze_form_state;
    use crate::models::{AreaCode, CompanyCode, PlanCode};

    fn filled() -> FormData {
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

    #[test]
    fn no_change_resets_nothing() {
        assert!(fields_to_reset(&filled(), &filled()).is_empty());
    }

    #[test]
    fn postal_code_change_resets_area_company_plan_and_capacity() {
        let next = FormData {
            postal_code: Some("5300001".to_string()),
            ..filled()
        };

        assert_eq!(
            fields_to_reset(&filled(), &next),
            vec![
                FieldName::Area,
                FieldName::Company,
                FieldName::Plan,
                FieldName::Capacity
            ]
        );
    }

    #[test]
    fn same_area_postal_change_still_resets() {
        let next = FormData {
            postal_code: Some("1000002".to_string()),
            ..filled()
        };

        assert_eq!(fields_to_reset(&filled(), &next).len(), 4);
    }

    #[test]
    fn company_change_resets_plan_and_capacity() {
        let next = FormData {
            company: Some(CompanyCode::Other),
            ..filled()
        };

        assert_eq!(
            fields_to_reset(&filled(), &next),
            vec![FieldName::Plan, FieldName::Capacity]
        );
    }

    #[test]
    fn plan_change_resets_capacity() {
        let next = FormData {
            plan: Some(PlanCode::JuryoC),
            ..filled()
        };

        assert_eq!(fields_to_reset(&filled(), &next), vec![FieldName::Capacity]);
    }

    #[test]
    fn stacked_triggers_do_not_duplicate() {
        let next = FormData {
            postal_code: Some("5300001".to_string()),
            company: Some(CompanyCode::Kepco),
            plan: Some(PlanCode::JuryoA),
            ..filled()
        };

        assert_eq!(
            fields_to_reset(&filled(), &next),
            vec![
                FieldName::Area,
                FieldName::Company,
                FieldName::Plan,
                FieldName::Capacity
            ]
        );
    }

    #[test]
    fn downstream_changes_reset_nothing() {
        let next = FormData {
            area: Some(AreaCode::Kansai),
            capacity: Some(40),
            electricity_bill: Some(dec!(7000)),
            email: Some("other@example.com".to_string()),
            ..filled()
        };

        assert!(fields_to_reset(&filled(), &next).is_empty());
    }

    fn edit() -> impl Strategy<Value = FormData> {
        (
            prop_oneof![Just("1000001"), Just("5300001"), Just("2000000")],
            prop_oneof![
                Just(None),
                Just(Some(CompanyCode::Tepco)),
                Just(Some(CompanyCode::Kepco)),
                Just(Some(CompanyCode::Other)),
            ],
            prop_oneof![
                Just(None),
                Just(Some(PlanCode::JuryoA)),
                Just(Some(PlanCode::JuryoB)),
                Just(Some(PlanCode::JuryoC)),
            ],
            proptest::option::of(prop_oneof![Just(6u32), Just(30u32)]),
        )
            .prop_map(|(postal_code, company, plan, capacity)| FormData {
                postal_code: Some(postal_code.to_string()),
                company,
                plan,
                capacity,
                ..filled()
            })
    }

    proptest! {
        #[test]
        fn resets_only_come_from_the_rule_table(next in edit()) {
            let reset = fields_to_reset(&filled(), &next);

            let allowed: Vec<FieldName> = RESET_RULES
                .iter()
                .filter(|(trigger, _)| filled().differs_on(&next, *trigger))
                .flat_map(|(_, dependents)| dependents.iter().copied())
                .collect();
            for field in &reset {
                prop_assert!(allowed.contains(field));
            }
            if reset.contains(&FieldName::Area) {
                prop_assert!(filled().differs_on(&next, FieldName::PostalCode));
            }
        }

        #[test]
        fn clearing_resets_matches_never_setting_them(next in edit()) {
            let reset = fields_to_reset(&filled(), &next);
            let kept = |field: FieldName| !reset.contains(&field);

            let mut cleared = next.clone();
            for field in &reset {
                cleared.clear(*field);
            }
            let never_set = FormData {
                postal_code: next.postal_code.clone(),
                area: next.area.filter(|_| kept(FieldName::Area)),
                company: next.company.filter(|_| kept(FieldName::Company)),
                plan: next.plan.filter(|_| kept(FieldName::Plan)),
                capacity: next.capacity.filter(|_| kept(FieldName::Capacity)),
                electricity_bill: next.electricity_bill,
                email: next.email.clone(),
            };

            prop_assert_eq!(analyze_form_state(&cleared), analyze_form_state(&never_set));
        }
    }
}
