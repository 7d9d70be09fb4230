use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use core_types::{AnswerSet, FlavorVector, ScoreError, TraitVector};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

mod model;
mod validate;

pub use model::{
    Axis, AxisPoles, AxisSet, ContributionTable, Pole, ProfileEntry, Question, TraitWeights,
};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogError {
    Io(String),
    Parse(String),
    InvalidQuestionId(u32),
    DuplicateQuestion(u32),
    AxisWithoutQuestions(Axis),
    DuplicateLetter(char),
    UnknownContribution(u32),
    EmptyProfiles(&'static str),
    DuplicateProfileKey(String),
    ReferenceOutOfRange { key: String, value: f64 },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "catalog io error: {msg}"),
            Self::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::InvalidQuestionId(id) => write!(f, "question id must be positive, got {id}"),
            Self::DuplicateQuestion(id) => write!(f, "duplicate question id {id}"),
            Self::AxisWithoutQuestions(axis) => {
                write!(f, "axis {} has no questions", axis.as_str())
            }
            Self::DuplicateLetter(letter) => write!(f, "pole letter {letter} is used twice"),
            Self::UnknownContribution(id) => {
                write!(f, "contribution row for unknown question {id}")
            }
            Self::EmptyProfiles(list) => write!(f, "{list} must not be empty"),
            Self::DuplicateProfileKey(key) => write!(f, "duplicate profile key {key}"),
            Self::ReferenceOutOfRange { key, value } => {
                write!(f, "profile {key} has reference component {value} outside 0..=1")
            }
        }
    }
}

impl Error for CatalogError {}

/// Read-only quiz configuration: axes, questions, trait weights and the two
/// profile catalogs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizCatalog {
    pub axes: AxisSet,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub contributions: ContributionTable,
    pub trait_profiles: Vec<ProfileEntry<TraitVector>>,
    pub flavor_profiles: Vec<ProfileEntry<FlavorVector>>,
}

impl QuizCatalog {
    /// The festival catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: QuizCatalog =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        debug!(
            "catalog parsed: {} questions, {} trait profiles, {} flavor profiles",
            catalog.questions.len(),
            catalog.trait_profiles.len(),
            catalog.flavor_profiles.len()
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CatalogError::Io(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&raw).inspect_err(|e| {
            warn!("rejected catalog {}: {e}", path.display());
        })?;
        info!("loaded catalog from {}", path.display());
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        validate::check_catalog(self)
    }

    /// Decodes positional responses in the order the questions are listed,
    /// whatever their ids are.
    pub fn answers_from_ordered(&self, values: &[u8]) -> Result<AnswerSet, ScoreError> {
        let ids = self.questions.iter().map(|q| q.id).collect::<Vec<_>>();
        AnswerSet::from_positional(&ids, values)
    }

    pub fn questions_on(&self, axis: Axis) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.axis == axis)
    }
}

#[cfg(test)]
mod tests {
    use core_types::{Answer, ScoreError};

    use crate::{Axis, CatalogError, QuizCatalog};

    fn renumbered(offset: u32) -> QuizCatalog {
        let mut catalog = QuizCatalog::builtin().unwrap();
        for question in &mut catalog.questions {
            question.id += offset;
        }
        catalog.contributions = std::mem::take(&mut catalog.contributions)
            .into_iter()
            .map(|(id, weights)| (id + offset, weights))
            .collect();
        catalog
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = QuizCatalog::builtin().unwrap();
        assert_eq!(catalog.questions.len(), 10);
        assert_eq!(catalog.trait_profiles.len(), 6);
        assert_eq!(catalog.flavor_profiles.len(), 6);
        for axis in Axis::ALL {
            assert!(catalog.questions_on(axis).count() >= 1);
        }
        assert_eq!(catalog.axes.alphabet().len(), 8);
    }

    #[test]
    fn builtin_catalog_has_reversed_questions_on_every_axis() {
        let catalog = QuizCatalog::builtin().unwrap();
        for axis in Axis::ALL {
            assert!(catalog.questions_on(axis).any(|q| q.reversed), "{axis:?}");
        }
    }

    #[test]
    fn ordered_answers_follow_question_ids() {
        let catalog = renumbered(100);
        catalog.validate().unwrap();
        let answers = catalog.answers_from_ordered(&[5, 4]).unwrap();
        assert_eq!(answers.get(101).map(Answer::value), Some(5));
        assert_eq!(answers.get(102).map(Answer::value), Some(4));
        assert_eq!(answers.get(1), None);
    }

    #[test]
    fn ordered_answers_follow_listing_order() {
        let mut catalog = QuizCatalog::builtin().unwrap();
        catalog.questions.reverse();
        let answers = catalog.answers_from_ordered(&[1, 2]).unwrap();
        assert_eq!(answers.get(10).map(Answer::value), Some(1));
        assert_eq!(answers.get(9).map(Answer::value), Some(2));
    }

    #[test]
    fn more_answers_than_questions_is_rejected() {
        let catalog = QuizCatalog::builtin().unwrap();
        let err = catalog.answers_from_ordered(&[3; 11]).unwrap_err();
        assert_eq!(err, ScoreError::TooManyAnswers { expected: 10, got: 11 });
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = QuizCatalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn unknown_axis_is_rejected_by_parser() {
        let mut value: serde_json::Value =
            serde_json::to_value(QuizCatalog::builtin().unwrap()).unwrap();
        value["questions"][0]["axis"] = serde_json::json!("umami");
        let err = QuizCatalog::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("quiz_catalog_missing_file.json");
        let err = QuizCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn load_round_trips_through_a_file() {
        let catalog = QuizCatalog::builtin().unwrap();
        let path = std::env::temp_dir().join(format!(
            "quiz_catalog_load_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();
        let loaded = QuizCatalog::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.questions, catalog.questions);
        assert_eq!(loaded.contributions, catalog.contributions);
        assert_eq!(
            loaded.trait_profiles.iter().map(|p| &p.key).collect::<Vec<_>>(),
            catalog.trait_profiles.iter().map(|p| &p.key).collect::<Vec<_>>()
        );
    }
}
