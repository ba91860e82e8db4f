mod area;
mod capacity;
mod company;
mod errors;
mod field;
mod form_data;
mod form_step;
mod plan;

pub use area::{Area, AreaCode};
pub use capacity::{CapacityOption, CapacityRule, CapacityUnit};
pub use company::{Company, CompanyCode};
pub use errors::{ErrorTarget, FormErrors};
pub use field::FieldName;
pub use form_data::FormData;
pub use form_step::{FormStep, StepId};
pub use plan::{Plan, PlanCode};
