//! Builds quiz questions from the animal dataset.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Animal, ConservationStatus, Question, QuestionKind};

const DISTRACTORS: usize = 3;

/// Returns a uniformly random permutation of `items` (Fisher–Yates).
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Builds up to `count` questions, one per distinct animal, in random order.
/// The result is clamped to the dataset size.
pub fn build_questions<R: Rng + ?Sized>(
    animals: &[Animal],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let statuses = distinct_statuses(animals);
    let mut order: Vec<&Animal> = animals.iter().collect();
    order.shuffle(rng);

    order
        .into_iter()
        .take(count)
        .map(|animal| {
            if rng.gen_bool(0.5) {
                status_question(animal, &statuses, rng)
            } else {
                habitat_question(animal, animals, rng)
            }
        })
        .collect()
}

fn distinct_statuses(animals: &[Animal]) -> Vec<ConservationStatus> {
    let mut statuses = Vec::new();
    for animal in animals {
        if !statuses.contains(&animal.conservation_status) {
            statuses.push(animal.conservation_status);
        }
    }
    statuses
}

fn status_question<R: Rng + ?Sized>(
    animal: &Animal,
    statuses: &[ConservationStatus],
    rng: &mut R,
) -> Question {
    let answer = animal.conservation_status.label().to_string();
    let candidates: Vec<&str> = statuses
        .iter()
        .filter(|s| **s != animal.conservation_status)
        .map(|s| s.label())
        .collect();

    Question {
        kind: QuestionKind::Status,
        prompt: format!("Status konservasi untuk \"{}\" adalah...", animal.local_name),
        choices: with_distractors(&answer, &candidates, rng),
        answer,
        animal_id: animal.id.clone(),
    }
}

// Distractors are the raw habitat text of other animals and are not
// de-duplicated against each other.
fn habitat_question<R: Rng + ?Sized>(animal: &Animal, animals: &[Animal], rng: &mut R) -> Question {
    let candidates: Vec<&str> = animals
        .iter()
        .map(|a| a.habitat.as_str())
        .filter(|h| *h != animal.habitat)
        .collect();

    Question {
        kind: QuestionKind::Habitat,
        prompt: format!("Di mana habitat utama \"{}\"?", animal.local_name),
        choices: with_distractors(&animal.habitat, &candidates, rng),
        answer: animal.habitat.clone(),
        animal_id: animal.id.clone(),
    }
}

fn with_distractors<R: Rng + ?Sized>(answer: &str, candidates: &[&str], rng: &mut R) -> Vec<String> {
    let mut choices: Vec<String> = Vec::with_capacity(DISTRACTORS + 1);
    choices.push(answer.to_string());
    choices.extend(
        candidates
            .choose_multiple(rng, DISTRACTORS)
            .map(|c| c.to_string()),
    );
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::data::builtin_animals;

    #[test]
    fn test_count_within_dataset_gives_distinct_animals() {
        let animals = builtin_animals().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for count in 1..=animals.len() {
            let questions = build_questions(&animals, count, &mut rng);
            assert_eq!(questions.len(), count);
            let ids: HashSet<&str> = questions.iter().map(|q| q.animal_id.as_str()).collect();
            assert_eq!(ids.len(), count);
        }
    }

    #[test]
    fn test_count_is_clamped_to_dataset() {
        let animals = builtin_animals().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(build_questions(&animals, 50, &mut rng).len(), animals.len());
    }

    #[test]
    fn test_choices_are_four_distinct_with_single_answer() {
        let animals = builtin_animals().unwrap();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for question in build_questions(&animals, 12, &mut rng) {
                assert_eq!(question.choices.len(), 4, "{:?}", question);
                let unique: HashSet<&String> = question.choices.iter().collect();
                assert_eq!(unique.len(), 4, "{:?}", question);
                assert_eq!(
                    question.choices.iter().filter(|c| **c == question.answer).count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_answers_match_source_animal() {
        let animals = builtin_animals().unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for question in build_questions(&animals, 12, &mut rng) {
            let animal = animals.iter().find(|a| a.id == question.animal_id).unwrap();
            match question.kind {
                QuestionKind::Status => {
                    assert_eq!(question.answer, animal.conservation_status.label());
                    assert!(question.prompt.contains(&animal.local_name));
                }
                QuestionKind::Habitat => assert_eq!(question.answer, animal.habitat),
            }
        }
    }

    #[test]
    fn test_both_kinds_appear() {
        let animals = builtin_animals().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut kinds = HashSet::new();
        for _ in 0..10 {
            for q in build_questions(&animals, 12, &mut rng) {
                kinds.insert(format!("{:?}", q.kind));
            }
        }
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_few_statuses_yield_fewer_choices() {
        let mut animals = builtin_animals().unwrap();
        for animal in &mut animals {
            animal.conservation_status = if animal.id == "tarsius" {
                ConservationStatus::Vulnerable
            } else {
                ConservationStatus::Endangered
            };
        }
        let statuses = distinct_statuses(&animals);
        let tarsius = animals.iter().find(|a| a.id == "tarsius").unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let question = status_question(tarsius, &statuses, &mut rng);
        assert_eq!(question.choices.len(), 2);
        assert!(question.choices.contains(&"Vulnerable".to_string()));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let input: Vec<u32> = (0..100).chain(0..10).collect();
        let mut output = shuffled(&input, &mut rng);
        assert_eq!(output.len(), input.len());

        let mut sorted_input = input.clone();
        sorted_input.sort();
        output.sort();
        assert_eq!(output, sorted_input);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let animals = builtin_animals().unwrap();
        let a = build_questions(&animals, 8, &mut StdRng::seed_from_u64(42));
        let b = build_questions(&animals, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
