use core_types::{AnswerSet, TraitDimension, TraitVector};
use quiz_catalog::ContributionTable;

#[derive(Clone, Copy, Debug, Default)]
struct Accumulator {
    sum: f64,
    weight: f64,
}

impl Accumulator {
    fn mean(self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            0.0
        }
    }
}

/// Projects answers onto the five trait dimensions.
///
/// Only questions present in both `answers` and `table` contribute. Each
/// dimension is the weighted sum of raw answers divided by the total weight
/// magnitude it received; a dimension no answered question touches is 0.
/// The result is always clamped into `[0, 5]`.
pub fn compute_trait_vector(answers: &AnswerSet, table: &ContributionTable) -> TraitVector {
    let mut acc = [Accumulator::default(); TraitDimension::ALL.len()];
    for (question, answer) in answers.iter() {
        let Some(weights) = table.get(&question) else {
            continue;
        };
        let raw = f64::from(answer.value());
        for (dim, weight) in weights {
            let slot = &mut acc[dimension_index(*dim)];
            slot.sum += raw * f64::from(*weight);
            slot.weight += f64::from(weight.unsigned_abs());
        }
    }

    let mut traits = TraitVector::default();
    for dim in TraitDimension::ALL {
        traits.set(dim, acc[dimension_index(dim)].mean());
    }
    traits.clamped()
}

fn dimension_index(dim: TraitDimension) -> usize {
    match dim {
        TraitDimension::Acidity => 0,
        TraitDimension::Sweetness => 1,
        TraitDimension::Body => 2,
        TraitDimension::Bitterness => 3,
        TraitDimension::Aroma => 4,
    }
}
