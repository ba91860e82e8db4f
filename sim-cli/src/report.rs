//! Plain-text rendering for the terminal front end.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use sim_core::engine::{SavingsEstimate, generate_capacity_options};
use sim_core::{
    ErrorTarget, FieldName, FormData, FormErrors, FormSnapshot, FormStep, StepId, catalog,
};

use crate::batch::BatchOutcome;

/// Formats a yen amount with thousands separators, e.g. `¥12,345`.
pub fn format_yen(amount: Decimal) -> String {
    let whole = amount.round().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount.is_sign_negative() && !amount.round().is_zero() {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// Display text of `field` in `data`, or `None` when unset.
pub fn field_value(
    data: &FormData,
    field: FieldName,
) -> Option<String> {
    match field {
        FieldName::PostalCode => data.postal_code.clone(),
        FieldName::Area => data.area.map(|code| catalog::area(code).name.to_string()),
        FieldName::Company => data
            .company
            .map(|code| catalog::company(code).name.to_string()),
        FieldName::Plan => data.plan.map(|code| {
            data.company
                .and_then(|company| catalog::plan(company, code))
                .map_or_else(|| code.as_str().to_string(), |plan| plan.name.to_string())
        }),
        FieldName::Capacity => data.capacity.map(|value| {
            generate_capacity_options(data.company, data.plan)
                .unit
                .map_or_else(|| value.to_string(), |unit| format!("{value}{}", unit.symbol()))
        }),
        FieldName::ElectricityBill => data.electricity_bill.map(format_yen),
        FieldName::Email => data.email.clone(),
    }
}

fn step_marker(
    step: &FormStep,
    current: Option<StepId>,
) -> &'static str {
    if step.has_error {
        "[!]"
    } else if current == Some(step.id) {
        "[>]"
    } else if step.completed {
        "[x]"
    } else if step.enabled {
        "[ ]"
    } else {
        "[-]"
    }
}

pub fn render_errors(errors: &FormErrors) -> String {
    let mut out = String::new();
    for (target, message) in errors.iter() {
        let label = match target {
            ErrorTarget::Field(field) => field.label(),
            ErrorTarget::Submit => "Submit",
        };
        let _ = writeln!(out, "  ! {label}: {message}");
    }
    out
}

/// Step list with values, followed by any errors.
pub fn render_form(snapshot: &FormSnapshot) -> String {
    let mut out = String::new();

    for (idx, step) in snapshot.steps.iter().enumerate() {
        let marker = step_marker(step, snapshot.state.current_step);
        let value = field_value(&snapshot.data, step.id.field()).unwrap_or_default();
        let _ = writeln!(out, "{marker} {}. {:<26} {value}", idx + 1, step.name);
        if step.id == StepId::PostalCode
            && let Some(area) = field_value(&snapshot.data, FieldName::Area)
        {
            let _ = writeln!(out, "       {:<26} {area}", FieldName::Area.label());
        }
    }

    out.push_str(&render_errors(&snapshot.errors));
    if snapshot.can_submit {
        out.push_str("Ready to submit (:submit).\n");
    }
    out
}

/// Prompt for `field`, listing the choices valid for the current data.
pub fn render_prompt(
    field: FieldName,
    data: &FormData,
) -> String {
    let mut out = format!("{} ({})", field.label(), field.as_str());

    match field {
        FieldName::Company => {
            let choices = data
                .area
                .map(catalog::companies_for_area)
                .unwrap_or_default()
                .iter()
                .map(|company| format!("{} = {}", company.code.as_str(), company.name))
                .collect::<Vec<_>>();
            if !choices.is_empty() {
                let _ = write!(out, " [{}]", choices.join(", "));
            }
        }
        FieldName::Plan => {
            if let Some(company) = data.company {
                let choices = catalog::plans_for(company)
                    .iter()
                    .map(|plan| format!("{} = {}", plan.code.as_str(), plan.name))
                    .collect::<Vec<_>>();
                let _ = write!(out, " [{}]", choices.join(", "));
            }
        }
        FieldName::Capacity => {
            let options = generate_capacity_options(data.company, data.plan);
            let labels = options
                .options
                .iter()
                .map(|option| option.label.as_str())
                .collect::<Vec<_>>();
            let _ = write!(out, " [{}] {}", labels.join(" "), options.help_text);
        }
        FieldName::ElectricityBill => out.push_str(" [yen per month]"),
        FieldName::PostalCode | FieldName::Area | FieldName::Email => {}
    }

    out.push_str(": ");
    out
}

pub fn render_estimate(estimate: &SavingsEstimate) -> String {
    format!(
        "Current bill:     {}\nEstimated bill:   {}\nMonthly savings:  {}\nAnnual savings:   {}\n",
        format_yen(estimate.current_bill),
        format_yen(estimate.estimated_bill),
        format_yen(estimate.monthly_savings),
        format_yen(estimate.annual_savings),
    )
}

/// Reference data: areas, companies, plans, and capacity choices.
pub fn render_catalog() -> String {
    let mut out = String::from("Areas\n");
    for area in &catalog::AREAS {
        let prefix = area
            .postal_prefix
            .map_or_else(|| "other".to_string(), |p| format!("{p}xxxxxx"));
        let _ = writeln!(out, "  {:<12} {:<9} {}", area.code.as_str(), prefix, area.name);
    }

    out.push_str("\nCompanies\n");
    for company in &catalog::COMPANIES {
        let _ = writeln!(out, "  {:<6} {}", company.code.as_str(), company.name);
        for plan in company.supported_plans {
            let options = generate_capacity_options(Some(company.code), Some(plan.code));
            let capacity = match (options.options.first(), options.options.last()) {
                (Some(first), Some(last)) => format!("{} .. {}", first.label, last.label),
                _ => "no capacity".to_string(),
            };
            let _ = writeln!(
                out,
                "    {:<7} {:<14} {capacity}",
                plan.code.as_str(),
                plan.name
            );
        }
    }
    out
}

/// One summary line per batch row.
pub fn render_batch_line(outcome: &BatchOutcome) -> String {
    let status = if outcome.can_submit {
        "ready".to_string()
    } else if !outcome.errors.is_empty() {
        "invalid".to_string()
    } else {
        match outcome.state.next_required_field {
            Some(field) => format!("incomplete (next: {field})"),
            None => "incomplete".to_string(),
        }
    };

    let mut line = format!("row {}: {status}", outcome.row);
    if let Some(estimate) = &outcome.estimate {
        let _ = write!(
            line,
            ", saves {}/month",
            format_yen(estimate.monthly_savings)
        );
    }
    for (target, message) in outcome.errors.iter() {
        let _ = write!(line, "; {}: {message}", target.as_str());
    }
    line
}
