use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use axis_aggregator::{AxisAverages, AxisCode, axis_averages, code_from_averages};
use core_types::{AnswerSet, FlavorVector, TraitVector};
use log::{debug, info, warn};
use profile::{Selection, SelectionError, pick_best_profile};
use quiz_catalog::{CatalogError, ProfileEntry, QuizCatalog};
use serde::{Deserialize, Serialize};
use trait_projector::compute_trait_vector;

pub mod adapters;
pub mod ports;
mod record;

pub use adapters::{JsonLinesSink, MemorySink};
pub use ports::SubmissionSink;
pub use record::{AgeBracket, SubmissionRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    Catalog(CatalogError),
    Selection(SelectionError),
    Sink(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Selection(err) => write!(f, "selection failed: {err}"),
            Self::Sink(msg) => write!(f, "submission sink error: {msg}"),
        }
    }
}

impl Error for EngineError {}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<SelectionError> for EngineError {
    fn from(err: SelectionError) -> Self {
        Self::Selection(err)
    }
}

/// Owned summary of a selected catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileMatch {
    pub key: String,
    pub name: String,
    pub tagline: String,
    pub score: f64,
}

impl<V> From<&Selection<'_, V>> for ProfileMatch {
    fn from(selection: &Selection<'_, V>) -> Self {
        Self {
            key: selection.entry.key.clone(),
            name: selection.entry.name.clone(),
            tagline: selection.entry.tagline.clone(),
            score: selection.score,
        }
    }
}

/// Both scoring paths for one answer set. The axis code and the two
/// profile matches are independent outputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub axis_code: AxisCode,
    pub axis_averages: AxisAverages,
    pub traits: TraitVector,
    pub trait_profile: ProfileMatch,
    pub flavor: FlavorVector,
    pub flavor_profile: ProfileMatch,
}

#[derive(Clone, Debug)]
pub struct QuizEngine {
    catalog: Arc<QuizCatalog>,
}

impl QuizEngine {
    pub fn new(catalog: QuizCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn builtin() -> Result<Self, EngineError> {
        Ok(Self::new(QuizCatalog::builtin()?))
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    pub fn select_trait_profile(
        &self,
        traits: &TraitVector,
    ) -> Result<Selection<'_, TraitVector>, EngineError> {
        Ok(pick_best_profile(traits, &self.catalog.trait_profiles)?)
    }

    pub fn select_flavor_profile(
        &self,
        flavor: &FlavorVector,
    ) -> Result<Selection<'_, FlavorVector>, EngineError> {
        Ok(pick_best_profile(flavor, &self.catalog.flavor_profiles)?)
    }

    pub fn trait_entry(&self, key: &str) -> Option<&ProfileEntry<TraitVector>> {
        self.catalog.trait_profiles.iter().find(|entry| entry.key == key)
    }

    pub fn score(&self, answers: &AnswerSet) -> Result<QuizOutcome, EngineError> {
        let catalog = &self.catalog;

        let averages = axis_averages(&catalog.questions, answers);
        let axis_code = code_from_averages(&catalog.axes, &averages);
        let traits = compute_trait_vector(answers, &catalog.contributions);
        let flavor = averages.to_flavor_vector();

        let trait_profile = ProfileMatch::from(&self.select_trait_profile(&traits)?);
        let flavor_profile = ProfileMatch::from(&self.select_flavor_profile(&flavor)?);

        debug!(
            "scored {} answers: code={axis_code} profile={} flavor={}",
            answers.len(),
            trait_profile.key,
            flavor_profile.key
        );

        Ok(QuizOutcome {
            axis_code,
            axis_averages: averages,
            traits,
            trait_profile,
            flavor,
            flavor_profile,
        })
    }

    /// Scores `answers` and hands an analytics record to `sink`. A sink
    /// failure is logged and never alters the returned outcome.
    pub fn score_and_record(
        &self,
        answers: &AnswerSet,
        age_bracket: AgeBracket,
        sink: &dyn SubmissionSink,
        submitted_at_ms: u64,
    ) -> Result<QuizOutcome, EngineError> {
        let outcome = self.score(answers)?;
        let record = SubmissionRecord::from_outcome(&outcome, age_bracket, submitted_at_ms);
        match sink.record(&record) {
            Ok(()) => info!(
                "recorded submission: code={} profile={}",
                record.axis_code, record.profile_key
            ),
            Err(err) => warn!("failed to record submission: {err}"),
        }
        Ok(outcome)
    }
}
