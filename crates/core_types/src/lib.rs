use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 5;
pub const SCALE_MID: u8 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreError {
    AnswerOutOfRange { question: Option<u32>, value: u8 },
    TooManyAnswers { expected: usize, got: usize },
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnswerOutOfRange {
                question: Some(id),
                value,
            } => write!(
                f,
                "answer {value} for question {id} is outside {SCALE_MIN}..={SCALE_MAX}"
            ),
            Self::AnswerOutOfRange { question: None, value } => {
                write!(f, "answer {value} is outside {SCALE_MIN}..={SCALE_MAX}")
            }
            Self::TooManyAnswers { expected, got } => {
                write!(f, "got {got} answers for {expected} questions")
            }
        }
    }
}

impl Error for ScoreError {}

/// A single response on the five-point scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Answer(u8);

impl Answer {
    pub const NEUTRAL: Answer = Answer(SCALE_MID);

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if (SCALE_MIN..=SCALE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError::AnswerOutOfRange {
                question: None,
                value,
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Mirrors the answer around the scale midpoint (1 <-> 5, 2 <-> 4).
    pub fn reversed(self) -> Self {
        Self(SCALE_MIN + SCALE_MAX - self.0)
    }
}

impl TryFrom<u8> for Answer {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Answer> for u8 {
    fn from(answer: Answer) -> Self {
        answer.0
    }
}

/// Responses keyed by question id. Questions that were never reached are
/// simply absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<u32, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from positional responses; the first value answers
    /// question 1.
    pub fn from_ordered(values: &[u8]) -> Result<Self, ScoreError> {
        values
            .iter()
            .enumerate()
            .try_fold(Self::new(), |set, (idx, &value)| {
                set.with_raw((idx + 1) as u32, value)
            })
    }

    /// Pairs the i-th value with `question_ids[i]`. Fewer values than ids is
    /// fine; the rest stay unanswered.
    pub fn from_positional(question_ids: &[u32], values: &[u8]) -> Result<Self, ScoreError> {
        if values.len() > question_ids.len() {
            return Err(ScoreError::TooManyAnswers {
                expected: question_ids.len(),
                got: values.len(),
            });
        }
        question_ids
            .iter()
            .zip(values)
            .try_fold(Self::new(), |set, (&id, &value)| set.with_raw(id, value))
    }

    fn with_raw(self, question: u32, value: u8) -> Result<Self, ScoreError> {
        let answer = Answer::new(value).map_err(|_| ScoreError::AnswerOutOfRange {
            question: Some(question),
            value,
        })?;
        Ok(self.with(question, answer))
    }

    pub fn insert(&mut self, question: u32, answer: Answer) -> Option<Answer> {
        self.answers.insert(question, answer)
    }

    pub fn with(mut self, question: u32, answer: Answer) -> Self {
        self.insert(question, answer);
        self
    }

    pub fn get(&self, question: u32) -> Option<Answer> {
        self.answers.get(&question).copied()
    }

    pub fn get_or_neutral(&self, question: u32) -> Answer {
        self.get(question).unwrap_or(Answer::NEUTRAL)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Answer)> + '_ {
        self.answers.iter().map(|(id, answer)| (*id, *answer))
    }
}

/// A vector whose components all live in `[0, MAX]`.
pub trait ScaledVector {
    const MAX: f64;

    fn components(&self) -> Vec<f64>;

    fn unit_components(&self) -> Vec<f64> {
        self.components()
            .into_iter()
            .map(|v| v / Self::MAX)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitDimension {
    Acidity,
    #[serde(alias = "sweet")]
    Sweetness,
    Body,
    Bitterness,
    Aroma,
}

impl TraitDimension {
    pub const ALL: [TraitDimension; 5] = [
        TraitDimension::Acidity,
        TraitDimension::Sweetness,
        TraitDimension::Body,
        TraitDimension::Bitterness,
        TraitDimension::Aroma,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TraitDimension::Acidity => "acidity",
            TraitDimension::Sweetness => "sweetness",
            TraitDimension::Body => "body",
            TraitDimension::Bitterness => "bitterness",
            TraitDimension::Aroma => "aroma",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitVector {
    pub acidity: f64,
    #[serde(alias = "sweet")]
    pub sweetness: f64,
    pub body: f64,
    pub bitterness: f64,
    pub aroma: f64,
}

impl TraitVector {
    pub const MAX: f64 = 5.0;

    pub fn get(&self, dim: TraitDimension) -> f64 {
        match dim {
            TraitDimension::Acidity => self.acidity,
            TraitDimension::Sweetness => self.sweetness,
            TraitDimension::Body => self.body,
            TraitDimension::Bitterness => self.bitterness,
            TraitDimension::Aroma => self.aroma,
        }
    }

    pub fn set(&mut self, dim: TraitDimension, value: f64) {
        let slot = match dim {
            TraitDimension::Acidity => &mut self.acidity,
            TraitDimension::Sweetness => &mut self.sweetness,
            TraitDimension::Body => &mut self.body,
            TraitDimension::Bitterness => &mut self.bitterness,
            TraitDimension::Aroma => &mut self.aroma,
        };
        *slot = value;
    }

    pub fn clamped(self) -> Self {
        Self {
            acidity: clamp_to(self.acidity, Self::MAX),
            sweetness: clamp_to(self.sweetness, Self::MAX),
            body: clamp_to(self.body, Self::MAX),
            bitterness: clamp_to(self.bitterness, Self::MAX),
            aroma: clamp_to(self.aroma, Self::MAX),
        }
    }
}

impl ScaledVector for TraitVector {
    const MAX: f64 = TraitVector::MAX;

    fn components(&self) -> Vec<f64> {
        TraitDimension::ALL.iter().map(|d| self.get(*d)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorDimension {
    Brightness,
    Texture,
    Sweetness,
    Aroma,
}

impl FlavorDimension {
    pub const ALL: [FlavorDimension; 4] = [
        FlavorDimension::Brightness,
        FlavorDimension::Texture,
        FlavorDimension::Sweetness,
        FlavorDimension::Aroma,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlavorDimension::Brightness => "brightness",
            FlavorDimension::Texture => "texture",
            FlavorDimension::Sweetness => "sweetness",
            FlavorDimension::Aroma => "aroma",
        }
    }
}

/// Four-dimension taste profile on a percentage scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlavorVector {
    pub brightness: f64,
    pub texture: f64,
    pub sweetness: f64,
    pub aroma: f64,
}

impl FlavorVector {
    pub const MAX: f64 = 100.0;

    pub fn get(&self, dim: FlavorDimension) -> f64 {
        match dim {
            FlavorDimension::Brightness => self.brightness,
            FlavorDimension::Texture => self.texture,
            FlavorDimension::Sweetness => self.sweetness,
            FlavorDimension::Aroma => self.aroma,
        }
    }

    pub fn set(&mut self, dim: FlavorDimension, value: f64) {
        match dim {
            FlavorDimension::Brightness => self.brightness = value,
            FlavorDimension::Texture => self.texture = value,
            FlavorDimension::Sweetness => self.sweetness = value,
            FlavorDimension::Aroma => self.aroma = value,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            brightness: clamp_to(self.brightness, Self::MAX),
            texture: clamp_to(self.texture, Self::MAX),
            sweetness: clamp_to(self.sweetness, Self::MAX),
            aroma: clamp_to(self.aroma, Self::MAX),
        }
    }
}

impl ScaledVector for FlavorVector {
    const MAX: f64 = FlavorVector::MAX;

    fn components(&self) -> Vec<f64> {
        FlavorDimension::ALL.iter().map(|d| self.get(*d)).collect()
    }
}

fn clamp_to(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
