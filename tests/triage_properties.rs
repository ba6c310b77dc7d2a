//! Engine-wide properties checked against the embedded reference table.
//!
//! Every subset of a symptom pool is evaluated for each species, and the
//! ranking invariants are asserted on every outcome.

use std::collections::BTreeSet;

use pet_triage::matching::engine::DEFAULT_RESULT_LIMIT;
use pet_triage::{
    CareDirective, EmergencyFlag, ObservedCase, Outcome, ReferenceStore, Species, TriageEngine,
    UrgencyTier,
};

const SYMPTOM_POOL: &[&str] = &[
    "呕吐",
    "腹泻",
    "食欲不振",
    "发烧",
    "咳嗽",
    "瘙痒",
    "打喷嚏",
    "排尿困难",
    "抽搐",
    "腹胀",
];

fn subsets<'a>(pool: &'a [&'a str]) -> impl Iterator<Item = Vec<String>> + 'a {
    (0u32..(1 << pool.len())).map(move |mask| {
        pool.iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, s)| (*s).to_string())
            .collect()
    })
}

#[test]
fn test_ranking_invariants_hold_for_every_subset() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    for species in [Species::Dog, Species::Cat] {
        let conditions = store.conditions_for(species).unwrap();

        for symptoms in subsets(SYMPTOM_POOL) {
            let case = ObservedCase::new(species).with_symptoms(symptoms.clone());
            let outcome = engine.evaluate(&case);

            if symptoms.is_empty() {
                assert!(matches!(outcome, Outcome::InsufficientInput { .. }));
                continue;
            }

            let observed: BTreeSet<&str> = symptoms.iter().map(String::as_str).collect();
            let overlapping = conditions
                .iter()
                .filter(|c| c.symptoms.iter().any(|s| observed.contains(s.as_str())))
                .count();

            if overlapping == 0 {
                assert!(
                    matches!(outcome, Outcome::NoMatch { .. }),
                    "{species} {symptoms:?}: expected no_match, got {}",
                    outcome.kind()
                );
                continue;
            }

            let results = outcome.results();
            assert_eq!(results.len(), overlapping.min(DEFAULT_RESULT_LIMIT));

            for r in results {
                let value = r.match_ratio.value();
                assert!(value > 0.0 && value <= 1.0, "ratio out of range: {value}");
                assert!(!r.matched_symptoms.is_empty());
                assert!(r
                    .matched_symptoms
                    .iter()
                    .all(|s| observed.contains(s.as_str())));
                assert_eq!(r.directive, r.urgency.directive());
            }

            for pair in results.windows(2) {
                assert!(
                    pair[0].match_ratio >= pair[1].match_ratio,
                    "{species} {symptoms:?}: results not sorted"
                );
            }
        }
    }
}

#[test]
fn test_emergency_dominates_every_input() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    for species in Species::ALL {
        for flag in EmergencyFlag::ALL {
            for symptoms in [vec![], vec!["呕吐".to_string()], vec!["不存在".to_string()]] {
                let case = ObservedCase::new(species)
                    .with_symptoms(symptoms)
                    .with_emergency_flags([flag]);
                assert!(matches!(engine.evaluate(&case), Outcome::Emergency { .. }));
            }
        }
    }
}

#[test]
fn test_unsupported_species_never_errors() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    for species in [Species::Rabbit, Species::Hamster, Species::Other] {
        let case = ObservedCase::new(species).with_symptoms(["呕吐"]);
        assert!(matches!(
            engine.evaluate(&case),
            Outcome::NoReferenceData { .. }
        ));
    }
}

#[test]
fn test_dog_digestive_example() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    let case = ObservedCase::new(Species::Dog).with_symptoms(["呕吐", "食欲不振", "腹胀"]);
    let outcome = engine.evaluate(&case);
    let results = outcome.results();

    assert_eq!(results[0].condition_name, "消化不良");
    assert!((results[0].match_ratio.value() - 0.75).abs() < 1e-12);

    let parvo = results
        .iter()
        .find(|r| r.condition_name == "犬细小病毒")
        .unwrap();
    assert!((parvo.match_ratio.value() - 0.2).abs() < 1e-12);
    assert_eq!(parvo.matched_symptoms, vec!["呕吐"]);
}

#[test]
fn test_dog_distemper_example() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    let case = ObservedCase::new(Species::Dog).with_symptoms(["发烧", "抽搐"]);
    let outcome = engine.evaluate(&case);
    let distemper = &outcome.results()[0];

    assert_eq!(distemper.condition_name, "犬瘟热");
    assert!((distemper.match_ratio.value() - 0.4).abs() < 1e-12);
    assert_eq!(distemper.urgency, UrgencyTier::High);
    assert_eq!(distemper.directive, CareDirective::SeekCareImmediately);
}

#[test]
fn test_repeated_evaluation_is_identical() {
    let store = ReferenceStore::load_embedded().unwrap();
    let engine = TriageEngine::new(&store);

    let case = ObservedCase::new(Species::Dog).with_symptoms(["呕吐", "发烧", "瘙痒"]);
    let first = engine.evaluate(&case);
    for _ in 0..10 {
        assert_eq!(engine.evaluate(&case), first);
    }
}

#[test]
fn test_shared_store_across_threads() {
    let store = ReferenceStore::load_embedded().unwrap();
    let case = ObservedCase::new(Species::Cat).with_symptoms(["打喷嚏", "咳嗽"]);
    let expected = TriageEngine::new(&store).evaluate(&case);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| TriageEngine::new(&store).evaluate(&case)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
