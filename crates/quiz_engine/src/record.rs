use std::fmt::{Display, Formatter};
use std::str::FromStr;

use axis_aggregator::AxisCode;
use core_types::TraitVector;
use serde::{Deserialize, Serialize};

use crate::QuizOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Teens,
    Twenties,
    Thirties,
    Forties,
    FiftiesPlus,
    #[default]
    Undisclosed,
}

impl AgeBracket {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeBracket::Teens => "teens",
            AgeBracket::Twenties => "twenties",
            AgeBracket::Thirties => "thirties",
            AgeBracket::Forties => "forties",
            AgeBracket::FiftiesPlus => "fifties_plus",
            AgeBracket::Undisclosed => "undisclosed",
        }
    }
}

impl Display for AgeBracket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBracket {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "teens" | "10s" => Ok(AgeBracket::Teens),
            "twenties" | "20s" => Ok(AgeBracket::Twenties),
            "thirties" | "30s" => Ok(AgeBracket::Thirties),
            "forties" | "40s" => Ok(AgeBracket::Forties),
            "fifties_plus" | "50s" | "50+" => Ok(AgeBracket::FiftiesPlus),
            "undisclosed" | "" => Ok(AgeBracket::Undisclosed),
            other => Err(format!("unknown age bracket: {other}")),
        }
    }
}

/// Analytics row handed to a [`crate::SubmissionSink`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub age_bracket: AgeBracket,
    pub axis_code: AxisCode,
    pub profile_key: String,
    pub flavor_profile_key: String,
    pub traits: TraitVector,
    pub submitted_at_ms: u64,
}

impl SubmissionRecord {
    pub fn from_outcome(outcome: &QuizOutcome, age_bracket: AgeBracket, submitted_at_ms: u64) -> Self {
        Self {
            age_bracket,
            axis_code: outcome.axis_code,
            profile_key: outcome.trait_profile.key.clone(),
            flavor_profile_key: outcome.flavor_profile.key.clone(),
            traits: outcome.traits,
            submitted_at_ms,
        }
    }
}
