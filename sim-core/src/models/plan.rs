use serde::{Deserialize, Serialize};

use super::{CapacityRule, CompanyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanCode {
    #[serde(rename = "juryoA")]
    JuryoA,
    #[serde(rename = "juryoB")]
    JuryoB,
    #[serde(rename = "juryoC")]
    JuryoC,
}

impl PlanCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JuryoA => "juryoA",
            Self::JuryoB => "juryoB",
            Self::JuryoC => "juryoC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "juryoA" => Some(Self::JuryoA),
            "juryoB" => Some(Self::JuryoB),
            "juryoC" => Some(Self::JuryoC),
            _ => None,
        }
    }
}

/// A rate plan offered by one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub code: PlanCode,
    pub name: &'static str,
    pub company: CompanyCode,
    pub capacity: CapacityRule,
    pub capacity_help: &'static str,
}
