use std::collections::BTreeSet;

use core_types::ScaledVector;

use crate::{Axis, CatalogError, ProfileEntry, QuizCatalog};

pub(crate) fn check_catalog(catalog: &QuizCatalog) -> Result<(), CatalogError> {
    let mut ids = BTreeSet::new();
    for question in &catalog.questions {
        if question.id == 0 {
            return Err(CatalogError::InvalidQuestionId(question.id));
        }
        if !ids.insert(question.id) {
            return Err(CatalogError::DuplicateQuestion(question.id));
        }
    }

    for axis in Axis::ALL {
        if catalog.questions_on(axis).next().is_none() {
            return Err(CatalogError::AxisWithoutQuestions(axis));
        }
    }

    let mut letters = BTreeSet::new();
    for letter in catalog.axes.alphabet() {
        if !letters.insert(letter) {
            return Err(CatalogError::DuplicateLetter(letter));
        }
    }

    if let Some(id) = catalog.contributions.keys().find(|id| !ids.contains(id)) {
        return Err(CatalogError::UnknownContribution(*id));
    }

    check_profiles(&catalog.trait_profiles, "trait_profiles")?;
    check_profiles(&catalog.flavor_profiles, "flavor_profiles")?;
    Ok(())
}

fn check_profiles<V: ScaledVector>(
    profiles: &[ProfileEntry<V>],
    list: &'static str,
) -> Result<(), CatalogError> {
    if profiles.is_empty() {
        return Err(CatalogError::EmptyProfiles(list));
    }
    let mut keys = BTreeSet::new();
    for entry in profiles {
        if !keys.insert(entry.key.as_str()) {
            return Err(CatalogError::DuplicateProfileKey(entry.key.clone()));
        }
        if let Some(value) = entry
            .reference
            .components()
            .into_iter()
            .find(|v| !(0.0..=1.0).contains(v))
        {
            return Err(CatalogError::ReferenceOutOfRange {
                key: entry.key.clone(),
                value,
            });
        }
    }
    Ok(())
}
