use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

use core_types::ScaledVector;
use quiz_catalog::ProfileEntry;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    EmptyCatalog,
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "profile catalog is empty"),
        }
    }
}

impl Error for SelectionError {}

/// The chosen catalog entry together with the vector that selected it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection<'a, V> {
    pub entry: &'a ProfileEntry<V>,
    pub input: V,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedProfile<'a, V> {
    pub entry: &'a ProfileEntry<V>,
    pub score: f64,
}

/// Negative squared euclidean distance on the unit scale. `reference` is
/// expected to be stored on the unit scale already.
pub fn similarity<V: ScaledVector>(user: &V, reference: &V) -> f64 {
    let distance: f64 = user
        .unit_components()
        .into_iter()
        .zip(reference.components())
        .map(|(u, r)| (u - r) * (u - r))
        .sum();
    -distance
}

/// Picks the entry closest to `user`. Equal scores keep the earlier entry.
pub fn pick_best_profile<'a, V>(
    user: &V,
    catalog: &'a [ProfileEntry<V>],
) -> Result<Selection<'a, V>, SelectionError>
where
    V: ScaledVector + Clone,
{
    let mut best: Option<(&ProfileEntry<V>, f64)> = None;
    for entry in catalog {
        let score = similarity(user, &entry.reference);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((entry, score));
        }
    }

    let (entry, score) = best.ok_or(SelectionError::EmptyCatalog)?;
    Ok(Selection {
        entry,
        input: user.clone(),
        score,
    })
}

/// Every entry scored against `user`, best first, catalog order on ties.
pub fn rank_profiles<'a, V: ScaledVector>(
    user: &V,
    catalog: &'a [ProfileEntry<V>],
) -> Vec<RankedProfile<'a, V>> {
    let mut ranked = catalog
        .iter()
        .enumerate()
        .map(|(idx, entry)| (idx, similarity(user, &entry.reference), entry))
        .collect::<Vec<_>>();
    ranked.sort_by(|(li, ls, _), (ri, rs, _)| {
        rs.partial_cmp(ls)
            .unwrap_or(Ordering::Equal)
            .then_with(|| li.cmp(ri))
    });
    ranked
        .into_iter()
        .map(|(_, score, entry)| RankedProfile { entry, score })
        .collect()
}

#[cfg(test)]
mod tests {
    use core_types::{FlavorVector, TraitVector};
    use proptest::prelude::*;
    use quiz_catalog::{ProfileEntry, QuizCatalog};

    use crate::{SelectionError, pick_best_profile, rank_profiles, similarity};

    fn traits(values: [f64; 5]) -> TraitVector {
        TraitVector {
            acidity: values[0],
            sweetness: values[1],
            body: values[2],
            bitterness: values[3],
            aroma: values[4],
        }
    }

    fn scaled(unit: &TraitVector) -> TraitVector {
        TraitVector {
            acidity: unit.acidity * 5.0,
            sweetness: unit.sweetness * 5.0,
            body: unit.body * 5.0,
            bitterness: unit.bitterness * 5.0,
            aroma: unit.aroma * 5.0,
        }
    }

    #[test]
    fn similarity_is_negative_squared_distance() {
        let user = traits([5.0, 0.0, 0.0, 0.0, 0.0]);
        let reference = traits([0.5, 0.0, 0.0, 0.0, 0.5]);
        assert_eq!(similarity(&user, &reference), -0.5);
        assert_eq!(similarity(&scaled(&reference), &reference), 0.0);
    }

    #[test]
    fn empty_catalog_fails_fast() {
        let catalog: Vec<ProfileEntry<TraitVector>> = Vec::new();
        let err = pick_best_profile(&TraitVector::default(), &catalog).unwrap_err();
        assert_eq!(err, SelectionError::EmptyCatalog);
    }

    #[test]
    fn ties_keep_the_earlier_entry() {
        let same = traits([0.2, 0.4, 0.6, 0.8, 1.0]);
        let catalog = vec![
            ProfileEntry::new("far", "Far", traits([1.0, 1.0, 0.0, 0.0, 0.0])),
            ProfileEntry::new("first", "First", same),
            ProfileEntry::new("second", "Second", same),
        ];
        let picked = pick_best_profile(&traits([2.5; 5]), &catalog).unwrap();
        assert_eq!(picked.entry.key, "first");

        let ranked = rank_profiles(&traits([2.5; 5]), &catalog);
        let keys = ranked.iter().map(|r| r.entry.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["first", "second", "far"]);
    }

    #[test]
    fn builtin_trait_profiles_select_themselves() {
        let catalog = QuizCatalog::builtin().unwrap();
        for entry in &catalog.trait_profiles {
            let picked = pick_best_profile(&scaled(&entry.reference), &catalog.trait_profiles)
                .unwrap();
            assert_eq!(picked.entry.key, entry.key);
            assert!(std::ptr::eq(picked.entry, entry));
        }
    }

    #[test]
    fn builtin_flavor_profiles_select_themselves() {
        let catalog = QuizCatalog::builtin().unwrap();
        for entry in &catalog.flavor_profiles {
            let r = entry.reference;
            let user = FlavorVector {
                brightness: r.brightness * 100.0,
                texture: r.texture * 100.0,
                sweetness: r.sweetness * 100.0,
                aroma: r.aroma * 100.0,
            };
            let picked = pick_best_profile(&user, &catalog.flavor_profiles).unwrap();
            assert_eq!(picked.entry.key, entry.key);
            assert_eq!(picked.input, user);
        }
    }

    proptest! {
        #[test]
        fn exact_match_is_selected(
            grid in proptest::collection::vec(proptest::array::uniform5(0u8..=10), 1..8),
            pick in any::<proptest::sample::Index>(),
        ) {
            let catalog = grid
                .iter()
                .enumerate()
                .map(|(i, cells)| {
                    let unit = cells.map(|c| f64::from(c) / 10.0);
                    ProfileEntry::new(&format!("p{i}"), "p", traits(unit))
                })
                .collect::<Vec<_>>();
            let k = pick.index(catalog.len());
            let user = traits(grid[k].map(|c| f64::from(c) / 2.0));

            let picked = pick_best_profile(&user, &catalog).unwrap();
            let idx = catalog.iter().position(|e| std::ptr::eq(e, picked.entry)).unwrap();
            prop_assert_eq!(picked.score, 0.0);
            prop_assert_eq!(picked.entry.reference, catalog[k].reference);
            prop_assert!(idx <= k);
            if grid[..k].iter().all(|g| g != &grid[k]) {
                prop_assert_eq!(idx, k);
            }
        }
    }
}
