use std::fmt::{Display, Formatter};

use core_types::{AnswerSet, FlavorVector, SCALE_MAX, SCALE_MID, SCALE_MIN};
use quiz_catalog::{Axis, AxisSet, Question};
use serde::{Deserialize, Serialize};

/// Mean effective answer per axis. Each value is in `[1, 5]` whenever the
/// axis has at least one question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisAverages {
    pub brightness: f64,
    pub texture: f64,
    pub sweetness: f64,
    pub aroma: f64,
}

impl AxisAverages {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Brightness => self.brightness,
            Axis::Texture => self.texture,
            Axis::Sweetness => self.sweetness,
            Axis::Aroma => self.aroma,
        }
    }

    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Brightness => self.brightness = value,
            Axis::Texture => self.texture = value,
            Axis::Sweetness => self.sweetness = value,
            Axis::Aroma => self.aroma = value,
        }
    }

    /// Maps each average linearly from `[1, 5]` onto `[0, 100]`.
    pub fn to_flavor_vector(&self) -> FlavorVector {
        let span = f64::from(SCALE_MAX - SCALE_MIN);
        let mut flavor = FlavorVector::default();
        for axis in Axis::ALL {
            let percent = (self.get(axis) - f64::from(SCALE_MIN)) / span * FlavorVector::MAX;
            flavor.set(axis.flavor_dimension(), percent);
        }
        flavor.clamped()
    }
}

/// Four pole letters in axis order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AxisCode([char; 4]);

impl AxisCode {
    pub fn letters(&self) -> [char; 4] {
        self.0
    }

    pub fn letter(&self, axis: Axis) -> char {
        match axis {
            Axis::Brightness => self.0[0],
            Axis::Texture => self.0[1],
            Axis::Sweetness => self.0[2],
            Axis::Aroma => self.0[3],
        }
    }
}

impl Display for AxisCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl From<AxisCode> for String {
    fn from(code: AxisCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for AxisCode {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let letters = raw.chars().collect::<Vec<_>>();
        <[char; 4]>::try_from(letters)
            .map(AxisCode)
            .map_err(|_| format!("axis code must have 4 letters, got {raw:?}"))
    }
}

/// Per-axis mean of effective answers. Unanswered questions count as the
/// scale midpoint and reversed questions are mirrored first.
pub fn axis_averages(questions: &[Question], answers: &AnswerSet) -> AxisAverages {
    let mut averages = AxisAverages::default();
    for axis in Axis::ALL {
        let mut sum = 0.0;
        let mut count = 0usize;
        for question in questions.iter().filter(|q| q.axis == axis) {
            let raw = answers.get_or_neutral(question.id);
            let effective = if question.reversed { raw.reversed() } else { raw };
            sum += f64::from(effective.value());
            count += 1;
        }
        averages.set(axis, sum / count.max(1) as f64);
    }
    averages
}

/// Right pole only when the average is strictly above the midpoint.
pub fn code_from_averages(axes: &AxisSet, averages: &AxisAverages) -> AxisCode {
    let mut letters = [' '; 4];
    for (slot, axis) in letters.iter_mut().zip(Axis::ALL) {
        let poles = axes.poles(axis);
        *slot = if averages.get(axis) > f64::from(SCALE_MID) {
            poles.right.letter
        } else {
            poles.left.letter
        };
    }
    AxisCode(letters)
}

pub fn compute_axis_code(axes: &AxisSet, questions: &[Question], answers: &AnswerSet) -> AxisCode {
    code_from_averages(axes, &axis_averages(questions, answers))
}
