//! Buyer personas derived from the recommendation quiz.

use serde::{Serialize, Serializer};

/// Persona selected by the buyer's driving style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Economizer,
    SafetyFirst,
    Enthusiast,
    Standard,
}

/// How candidates are ranked for a persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// safety_grade desc, then reliability_score desc
    Safety,
    /// projected_annual_maintenance_cost asc, then resale value desc
    RunningCost,
    /// smart_score desc
    SmartScore,
}

impl Persona {
    /// Map a quiz driving style to a persona. Unrecognised styles are `Standard`.
    pub fn from_driving_style(style: &str) -> Self {
        match style {
            "City" => Self::Economizer,
            "Family" => Self::SafetyFirst,
            "Performance" => Self::Enthusiast,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economizer => "Economizer",
            Self::SafetyFirst => "Safety First",
            Self::Enthusiast => "Enthusiast",
            Self::Standard => "Standard",
        }
    }

    pub fn ranking(&self) -> Ranking {
        match self {
            Self::SafetyFirst => Ranking::Safety,
            Self::Economizer => Ranking::RunningCost,
            Self::Enthusiast | Self::Standard => Ranking::SmartScore,
        }
    }
}

impl Serialize for Persona {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
