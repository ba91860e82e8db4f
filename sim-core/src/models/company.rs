use serde::{Deserialize, Serialize};

use super::{AreaCode, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyCode {
    Tepco,
    Kepco,
    /// Any provider the simulator does not cover. Never submittable.
    Other,
}

impl CompanyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tepco => "tepco",
            Self::Kepco => "kepco",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tepco" => Some(Self::Tepco),
            "kepco" => Some(Self::Kepco),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub code: CompanyCode,
    pub name: &'static str,
    /// Home service area. `None` for the `Other` sentinel, which is offered
    /// in every area.
    pub area: Option<AreaCode>,
    pub supported_plans: &'static [Plan],
}
