//! The form-state analyzer.
//!
//! Walks the six steps in their fixed order:
//!
//! | Step | Completed when |
//! |------------------|------------------------------------------------------|
//! | postal-code      | 7 characters and a serviced area |
//! | company          | postal-code done and a covered company chosen |
//! | plan             | company done and a plan chosen |
//! | capacity         | plan done and a capacity chosen, or none needed |
//! | electricity-bill | capacity ready and the bill is at least 1,000 yen |
//! | email            | electricity-bill done and the address looks valid |
//!
//! Each step only reads results already produced by the steps before it.
//! A second pass then re-checks every completion flag against the step's
//! ancestors, so an upstream change (for example switching the company to
//! `other` on a finished form) can never leave a later step marked done.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::trace;

use crate::catalog::{MIN_ELECTRICITY_BILL, POSTAL_CODE_LENGTH};
use crate::engine::area::detect_area;
use crate::engine::capacity::is_capacity_required;
use crate::engine::validation::is_email_shaped;
use crate::models::{CompanyCode, FieldName, FormData, StepId};

/// Everything derived from one [`FormData`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Fields currently open for input.
    pub enabled_fields: BTreeSet<FieldName>,
    pub completed_steps: BTreeSet<StepId>,
    /// The step the user is working on; `None` once the form is finished.
    pub current_step: Option<StepId>,
    /// The earliest field still waiting for a valid value.
    pub next_required_field: Option<FieldName>,
    pub is_form_complete: bool,
}

impl FormState {
    fn initial() -> Self {
        Self {
            enabled_fields: BTreeSet::from([FieldName::PostalCode]),
            completed_steps: BTreeSet::new(),
            current_step: None,
            next_required_field: None,
            is_form_complete: false,
        }
    }

    pub fn is_enabled(
        &self,
        field: FieldName,
    ) -> bool {
        self.enabled_fields.contains(&field)
    }

    pub fn is_completed(
        &self,
        step: StepId,
    ) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Claims `field` as the next required input unless an earlier step
    /// already did.
    fn require(
        &mut self,
        field: FieldName,
    ) {
        if self.next_required_field.is_none() {
            self.next_required_field = Some(field);
        }
    }

    /// Moves the cursor to `to` when it is unset or still on `from`.
    fn advance(
        &mut self,
        from: StepId,
        to: StepId,
    ) {
        if self.current_step.is_none() || self.current_step == Some(from) {
            self.current_step = Some(to);
        }
    }

    /// Parks the cursor on `step` and demands its field.
    fn block_at(
        &mut self,
        step: StepId,
    ) {
        self.current_step = Some(step);
        self.next_required_field = Some(step.field());
    }

    fn has_incomplete_ancestor(
        &self,
        step: StepId,
    ) -> bool {
        step.dependencies()
            .iter()
            .any(|dependency| !self.is_completed(*dependency))
    }
}

/// Analyzer over a borrowed snapshot.
///
/// Holds no state of its own; [`FormStateAnalyzer::analyze`] may be called
/// any number of times and always returns the same result.
#[derive(Debug, Clone, Copy)]
pub struct FormStateAnalyzer<'a> {
    data: &'a FormData,
}

impl<'a> FormStateAnalyzer<'a> {
    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    /// Runs the forward pass, the dependency re-check, and the completeness
    /// check, in that order.
    pub fn analyze(&self) -> FormState {
        let mut state = FormState::initial();

        self.postal_code_step(&mut state);
        self.company_step(&mut state);
        self.plan_step(&mut state);
        self.capacity_step(&mut state);
        self.electricity_bill_step(&mut state);
        self.email_step(&mut state);

        self.enforce_dependencies(&mut state);

        state.is_form_complete = StepId::ORDER
            .iter()
            .all(|step| state.is_completed(*step));

        trace!(
            completed = ?state.completed_steps,
            current = ?state.current_step,
            next = ?state.next_required_field,
            complete = state.is_form_complete,
            "analyzed form state"
        );

        state
    }

    /// Step 1: postal code and area detection.
    fn postal_code_step(
        &self,
        state: &mut FormState,
    ) {
        let Some(postal_code) = self
            .data
            .postal_code
            .as_deref()
            .filter(|code| code.chars().count() == POSTAL_CODE_LENGTH)
        else {
            state.block_at(StepId::PostalCode);
            return;
        };

        if !detect_area(postal_code).is_supported {
            state.block_at(StepId::PostalCode);
            return;
        }

        state.completed_steps.insert(StepId::PostalCode);
        state.enabled_fields.insert(FieldName::Company);
        if state.current_step.is_none() {
            state.current_step = Some(StepId::Company);
        }
    }

    /// Step 2: company. `Other` is a hard stop for everything after it.
    fn company_step(
        &self,
        state: &mut FormState,
    ) {
        if !state.is_completed(StepId::PostalCode) {
            return;
        }

        match self.data.company {
            None => {
                if state.is_enabled(FieldName::Company) {
                    state.require(FieldName::Company);
                }
            }
            Some(CompanyCode::Other) => {
                state.completed_steps.remove(&StepId::Company);
                state.block_at(StepId::Company);
            }
            Some(_) => {
                state.completed_steps.insert(StepId::Company);
                state.enabled_fields.insert(FieldName::Plan);
                state.advance(StepId::Company, StepId::Plan);
            }
        }
    }

    /// Step 3: plan. Plans without a capacity rule complete the capacity
    /// step on the spot.
    fn plan_step(
        &self,
        state: &mut FormState,
    ) {
        if !state.is_completed(StepId::Company) || self.data.plan.is_none() {
            if state.is_enabled(FieldName::Plan) {
                state.require(FieldName::Plan);
            }
            return;
        }

        state.completed_steps.insert(StepId::Plan);

        if is_capacity_required(self.data.company, self.data.plan) {
            state.enabled_fields.insert(FieldName::Capacity);
            state.advance(StepId::Plan, StepId::Capacity);
        } else {
            state.completed_steps.insert(StepId::Capacity);
            state.enabled_fields.insert(FieldName::ElectricityBill);
            state.advance(StepId::Plan, StepId::ElectricityBill);
        }
    }

    /// Step 4: capacity, only when step 3 opened it.
    fn capacity_step(
        &self,
        state: &mut FormState,
    ) {
        if !state.is_enabled(FieldName::Capacity) {
            return;
        }

        if self.data.capacity.is_none() {
            state.require(FieldName::Capacity);
            return;
        }

        state.completed_steps.insert(StepId::Capacity);
        state.enabled_fields.insert(FieldName::ElectricityBill);
        state.advance(StepId::Capacity, StepId::ElectricityBill);
    }

    /// Step 5: monthly bill.
    fn electricity_bill_step(
        &self,
        state: &mut FormState,
    ) {
        let capacity_ready =
            state.is_completed(StepId::Capacity) || !state.is_enabled(FieldName::Capacity);
        let bill_complete = self
            .data
            .electricity_bill
            .is_some_and(|bill| bill >= MIN_ELECTRICITY_BILL);

        if !capacity_ready || !bill_complete {
            state.require(FieldName::ElectricityBill);
            return;
        }

        state.completed_steps.insert(StepId::ElectricityBill);
        state.enabled_fields.insert(FieldName::Email);
        state.advance(StepId::ElectricityBill, StepId::Email);
    }

    /// Step 6: email. Completing it leaves no current step.
    fn email_step(
        &self,
        state: &mut FormState,
    ) {
        if !state.is_completed(StepId::ElectricityBill) {
            return;
        }

        if !self.data.email.as_deref().is_some_and(is_email_shaped) {
            state.require(FieldName::Email);
            return;
        }

        state.completed_steps.insert(StepId::Email);
        state.current_step = None;
    }

    /// Re-checks every completion flag against the step's ancestors.
    ///
    /// Also closes fields whose gating step fell back to incomplete and moves
    /// the cursor off any step that is no longer reachable.
    fn enforce_dependencies(
        &self,
        state: &mut FormState,
    ) {
        for step in StepId::ORDER {
            if state.is_completed(step) && state.has_incomplete_ancestor(step) {
                trace!(step = %step, "step invalidated by an incomplete ancestor");
                state.completed_steps.remove(&step);
            }
        }

        for field in FieldName::ALL {
            if let Some(gate) = field.enabled_by() {
                if !state.is_completed(gate) {
                    state.enabled_fields.remove(&field);
                }
            }
        }

        let first_incomplete = StepId::ORDER
            .into_iter()
            .find(|step| !state.is_completed(*step));
        let stale_cursor = match state.current_step {
            None => first_incomplete.is_some(),
            Some(step) => state.has_incomplete_ancestor(step),
        };
        if stale_cursor {
            state.current_step = first_incomplete;
        }
    }
}

/// Derives the full [`FormState`] for `data`.
///
/// Pure and idempotent; `data` is only borrowed.
pub fn analyze_form_state(data: &FormData) -> FormState {
    FormStateAnalyzer::new(data).analyze()
}
