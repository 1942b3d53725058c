//! Quiz-driven recommendations: request validation, candidate filter and
//! per-listing annotation.
//!
//! Annotation never mutates the listing it reads from. It produces a fresh
//! [`Annotation`] that the caller merges into the response.

use crate::error::{ValidationError, ValidationResult};
use crate::persona::Persona;

/// Candidates may exceed the budget by this factor
pub const BUDGET_TOLERANCE: f64 = 1.15;

/// Maintenance uplift applied to cars aged 13 to 18 years
pub const AGING_MAINTENANCE_FACTOR: f64 = 1.15;

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: i64 = 10;

const NOTE_SEPARATOR: &str = " | ";
pub const LOW_SAFETY_NOTE: &str = "⚠️ Low Safety Grade for Family use.";
pub const NEAR_SCRAPPING_NOTE: &str = "⚠️ Near Scrapping Age.";
pub const NEW_DRIVER_NOTE: &str = "ℹ️ Better options exist for new drivers.";

/// Experience level that triggers the new-driver note
const NEW_DRIVER: &str = "New";

/// Validated quiz answers
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub budget: f64,
    pub persona: Persona,
    pub experience_level: String,
}

impl Quiz {
    /// Validate raw quiz answers. Absent, empty, or zero values are missing.
    pub fn new(
        budget: Option<f64>,
        driving_style: Option<&str>,
        experience_level: Option<&str>,
    ) -> ValidationResult<Self> {
        let budget = budget
            .filter(|b| *b != 0.0 && !b.is_nan())
            .ok_or(ValidationError::MissingField { field: "budget" })?;
        let driving_style = driving_style
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingField { field: "drivingStyle" })?;
        let experience_level = experience_level
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingField { field: "experienceLevel" })?;

        if budget < 0.0 {
            return Err(ValidationError::NotPositive { field: "budget" });
        }

        Ok(Self {
            budget,
            persona: Persona::from_driving_style(driving_style),
            experience_level: experience_level.to_owned(),
        })
    }

    pub fn filter(&self) -> CandidateFilter {
        CandidateFilter::new(self.budget)
    }

    pub fn is_new_driver(&self) -> bool {
        self.experience_level == NEW_DRIVER
    }
}

/// Budget bound for recommendation candidates.
///
/// The store admits active, non-stolen listings priced at most
/// `budget * BUDGET_TOLERANCE`, compared in exact decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateFilter {
    budget: f64,
}

impl CandidateFilter {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn tolerance(&self) -> f64 {
        BUDGET_TOLERANCE
    }
}

/// The listing signals annotation reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSignals {
    pub year: Option<i32>,
    pub safety_grade: Option<i32>,
    pub smart_score: Option<f64>,
    pub negotiation_strategy: Option<String>,
    pub end_of_life_warning: Option<bool>,
    pub projected_annual_maintenance_cost: Option<f64>,
}

/// Response-only values replacing the listing's stored ones
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub negotiation_strategy: Option<String>,
    pub end_of_life_warning: Option<bool>,
    pub projected_annual_maintenance_cost: Option<f64>,
}

fn append_note(strategy: Option<String>, note: &str) -> Option<String> {
    match strategy {
        Some(s) if !s.is_empty() => Some(format!("{s}{NOTE_SEPARATOR}{note}")),
        _ => Some(note.to_owned()),
    }
}

/// Annotate one listing for `quiz`, given the current calendar year.
///
/// Notes are appended in a fixed order: low safety, near scrapping, new
/// driver. Unknown safety grade or smart score counts as below threshold.
/// Age over 18 flags end of life; 13..=18 inflates maintenance cost instead.
/// A listing with no year is treated as past scrapping age.
pub fn annotate(quiz: &Quiz, listing: &ListingSignals, current_year: i32) -> Annotation {
    let mut strategy = listing.negotiation_strategy.clone();
    let mut end_of_life = listing.end_of_life_warning;
    let mut maintenance = listing.projected_annual_maintenance_cost;

    if quiz.persona == Persona::SafetyFirst && listing.safety_grade.map_or(true, |g| g < 4) {
        strategy = append_note(strategy, LOW_SAFETY_NOTE);
    }

    let age = current_year - listing.year.unwrap_or(0);
    if age > 18 {
        end_of_life = Some(true);
        strategy = append_note(strategy, NEAR_SCRAPPING_NOTE);
    } else if age > 12 {
        maintenance = maintenance.map(|cost| cost * AGING_MAINTENANCE_FACTOR);
    }

    if quiz.is_new_driver() && listing.smart_score.map_or(true, |s| s < 6.0) {
        strategy = append_note(strategy, NEW_DRIVER_NOTE);
    }

    Annotation {
        negotiation_strategy: strategy,
        end_of_life_warning: end_of_life,
        projected_annual_maintenance_cost: maintenance,
    }
}
