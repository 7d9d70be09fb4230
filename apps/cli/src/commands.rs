use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use core_types::{AnswerSet, ScaledVector};
use profile::rank_profiles;
use quiz_catalog::{Axis, QuizCatalog};
use quiz_engine::{AgeBracket, JsonLinesSink, QuizEngine};
use serde_json::{Value, json};

use crate::CliError;
use crate::config::Config;

pub struct Output {
    pub data: Value,
    pub text: String,
}

pub struct ScoreArgs {
    pub answers: String,
    pub age: AgeBracket,
    pub top: usize,
    pub record: bool,
}

/// Decodes `"4,2,5"` into answers for the first three questions in
/// catalog order.
pub fn parse_answers(catalog: &QuizCatalog, raw: &str) -> Result<AnswerSet, CliError> {
    let values = raw
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u8>()
                .map_err(|_| CliError::invalid("score", format!("not an answer: {v:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    catalog
        .answers_from_ordered(&values)
        .map_err(|e| CliError::invalid("score", e.to_string()))
}

pub fn questions(engine: &QuizEngine) -> Output {
    let catalog = engine.catalog();
    let mut text = String::new();
    for q in &catalog.questions {
        let poles = catalog.axes.poles(q.axis);
        let _ = writeln!(
            text,
            "{:>2}. [{}/{}] {}",
            q.id, poles.left.letter, poles.right.letter, q.text
        );
    }
    Output {
        data: json!({ "questions": catalog.questions, "axes": catalog.axes }),
        text: text.trim_end().to_string(),
    }
}

pub fn profiles(engine: &QuizEngine) -> Output {
    let catalog = engine.catalog();
    let mut text = String::from("[Trait profiles]\n");
    for p in &catalog.trait_profiles {
        let _ = writeln!(text, "{:<18} {} - {}", p.key, p.name, p.tagline);
    }
    text.push_str("\n[Flavor profiles]\n");
    for p in &catalog.flavor_profiles {
        let _ = writeln!(text, "{:<18} {} - {}", p.key, p.name, p.tagline);
    }
    Output {
        data: json!({
            "trait_profiles": catalog.trait_profiles,
            "flavor_profiles": catalog.flavor_profiles,
        }),
        text: text.trim_end().to_string(),
    }
}

pub fn score(engine: &QuizEngine, args: &ScoreArgs, config: &Config) -> Result<Output, CliError> {
    let answers = parse_answers(engine.catalog(), &args.answers)?;
    let outcome = if args.record {
        let sink = JsonLinesSink::new(&config.submissions);
        engine.score_and_record(&answers, args.age, &sink, now_ms())
    } else {
        engine.score(&answers)
    }
    .map_err(|e| CliError::engine("score", e))?;

    let top = args.top.max(1);
    let catalog = engine.catalog();
    let trait_ranking = rank_profiles(&outcome.traits, &catalog.trait_profiles)
        .into_iter()
        .take(top)
        .map(|r| json!({ "key": r.entry.key, "score": r.score }))
        .collect::<Vec<_>>();
    let flavor_ranking = rank_profiles(&outcome.flavor, &catalog.flavor_profiles)
        .into_iter()
        .take(top)
        .map(|r| json!({ "key": r.entry.key, "score": r.score }))
        .collect::<Vec<_>>();

    let mut text = format!("[Result]\nCode: {}\n", outcome.axis_code);
    for axis in Axis::ALL {
        let poles = catalog.axes.poles(axis);
        let letter = outcome.axis_code.letter(axis);
        let label = if letter == poles.right.letter {
            &poles.right.label
        } else {
            &poles.left.label
        };
        let _ = writeln!(
            text,
            "  {:<10} {:.2} -> {label}",
            axis.as_str(),
            outcome.axis_averages.get(axis)
        );
    }
    let traits = outcome
        .traits
        .components()
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(text, "Traits: [{traits}]");
    let _ = writeln!(
        text,
        "Coffee: {} ({})",
        outcome.trait_profile.name, outcome.trait_profile.tagline
    );
    let _ = write!(
        text,
        "Drink: {} ({})",
        outcome.flavor_profile.name, outcome.flavor_profile.tagline
    );

    Ok(Output {
        data: json!({
            "outcome": outcome,
            "ranking": { "traits": trait_ranking, "flavor": flavor_ranking },
            "recorded": args.record,
        }),
        text,
    })
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use quiz_catalog::QuizCatalog;

    use super::parse_answers;

    #[test]
    fn answers_are_positional_and_trimmed() {
        let catalog = QuizCatalog::builtin().unwrap();
        let set = parse_answers(&catalog, " 4, 2 ,5,").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(2).map(|a| a.value()), Some(2));
    }

    #[test]
    fn answers_land_on_catalog_question_ids() {
        let mut catalog = QuizCatalog::builtin().unwrap();
        for question in &mut catalog.questions {
            question.id += 100;
        }
        let set = parse_answers(&catalog, "4,2").unwrap();
        assert_eq!(set.get(101).map(|a| a.value()), Some(4));
        assert_eq!(set.get(102).map(|a| a.value()), Some(2));
        assert_eq!(set.get(1), None);
    }

    #[test]
    fn empty_answer_list_is_allowed() {
        let catalog = QuizCatalog::builtin().unwrap();
        assert!(parse_answers(&catalog, "").unwrap().is_empty());
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        let catalog = QuizCatalog::builtin().unwrap();
        assert!(parse_answers(&catalog, "3,6").is_err());
        assert!(parse_answers(&catalog, "3,x").is_err());
        assert!(parse_answers(&catalog, "-1").is_err());
        assert!(parse_answers(&catalog, "3,3,3,3,3,3,3,3,3,3,3").is_err());
    }
}
