//! Integration tests for pass-forge

use std::collections::HashSet;
use std::io::Write;

use pass_forge::{
    mutate::{lower, reverse, swap_case, upper, CaseGenerator, FullLeetGenerator},
    pipeline::matches_crunch,
    strength, MutationConfig, MutationLevel, PassForgeError, Pipeline, RecipeMode, SortMode,
};
use proptest::prelude::*;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

async fn run(config: MutationConfig, input: &[&str]) -> Vec<String> {
    let pipeline = Pipeline::new(config).unwrap();
    let output = pipeline.run(words(input), Vec::new()).await.unwrap();
    String::from_utf8(output.writer)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn sorted(mut lines: Vec<String>) -> Vec<String> {
    lines.sort();
    lines
}

#[tokio::test]
async fn test_reverse_and_upper_scenario() {
    let config = MutationConfig {
        reverse: true,
        upper: true,
        ..Default::default()
    };
    let out = run(config, &["cat"]).await;
    assert_eq!(sorted(out), vec!["CAT", "cat", "tac"]);
}

#[tokio::test]
async fn test_crunch_mask_scenario() {
    let config = MutationConfig {
        reverse: true,
        punctuation: true,
        crunch_mask: Some("....".into()),
        ..Default::default()
    };
    let out = run(config, &["test", "word", "cat"]).await;
    assert!(out.iter().all(|w| w.len() == 4));
    let out: HashSet<String> = out.into_iter().collect();
    assert!(out.contains("test"));
    assert!(out.contains("word"));
    assert!(out.contains("cat!"));
    assert!(!out.contains("cat"));
}

#[tokio::test]
async fn test_min_strength_scenario() {
    let config = MutationConfig {
        min_strength: 3,
        ..Default::default()
    };
    let out = run(config.clone(), &["Password123!"]).await;
    assert_eq!(out, vec!["Password123!"]);

    let out = run(config, &["cat"]).await;
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_passphrase_scenario() {
    let config = MutationConfig {
        passphrase_count: 2,
        passphrase_separator: "-".into(),
        ..Default::default()
    };
    let out = run(config, &["a", "b"]).await;
    assert_eq!(sorted(out), vec!["a-a", "a-b", "b-a", "b-b"]);
}

#[tokio::test]
async fn test_recipe_scenario() {
    let config = MutationConfig {
        custom_recipe: vec!["reverse".into(), "upper".into()],
        ..Default::default()
    };
    let out = run(config, &["abc"]).await;
    assert_eq!(out, vec!["CBA"]);
}

#[tokio::test]
async fn test_strict_recipe_rejects_unknown_step() {
    let config = MutationConfig {
        custom_recipe: vec!["reverse".into(), "rot13".into()],
        recipe_mode: RecipeMode::Strict,
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let err = pipeline.run(words(&["abc"]), Vec::new()).await.unwrap_err();
    assert!(matches!(err, PassForgeError::Config { .. }));
}

#[tokio::test]
async fn test_sampled_passphrases() {
    let pool: Vec<String> = (0..200).map(|i| format!("w{}", i)).collect();
    let pool_refs: Vec<&str> = pool.iter().map(String::as_str).collect();
    let config = MutationConfig {
        passphrase_count: 2,
        passphrase_seed: Some(42),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let output = pipeline.run(words(&pool_refs), Vec::new()).await.unwrap();
    assert_eq!(output.metrics.submitted, 1000);
    assert!(output.metrics.emitted <= 1000);
    assert!(output.metrics.emitted > 900);
}

#[tokio::test]
async fn test_output_has_no_duplicates() {
    let config = MutationConfig {
        lower: true,
        upper: true,
        capital: true,
        swap: true,
        leet: true,
        threads: 4,
        ..Default::default()
    };
    let out = run(config, &["Test", "test", "TEST", "sail"]).await;
    let unique: HashSet<&String> = out.iter().collect();
    assert_eq!(unique.len(), out.len());
}

#[tokio::test]
async fn test_sorted_output_is_deterministic() {
    let config = MutationConfig {
        reverse: true,
        full_leet: true,
        sort_mode: SortMode::Efficacy,
        threads: 8,
        ..Default::default()
    };
    let first = run(config.clone(), &["password", "letmein", "dragon"]).await;
    let second = run(config, &["password", "letmein", "dragon"]).await;
    assert_eq!(first, second);

    let config = MutationConfig {
        reverse: true,
        sort_mode: SortMode::Alpha,
        ..Default::default()
    };
    let out = run(config, &["b", "c", "ab"]).await;
    assert_eq!(out, vec!["ab", "b", "ba", "c"]);
}

#[tokio::test]
async fn test_blacklist_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tac").unwrap();
    let blacklist = pass_forge::wordlist::load_blacklist(file.path()).unwrap();

    let config = MutationConfig {
        reverse: true,
        ..Default::default()
    }
    .with_blacklist(blacklist);
    let out = run(config, &["cat"]).await;
    assert_eq!(out, vec!["cat"]);
}

#[tokio::test]
async fn test_chained_level() {
    let config = MutationConfig {
        reverse: true,
        leet: true,
        mutation_level: MutationLevel::Chained,
        ..Default::default()
    };
    let out: HashSet<String> = run(config, &["pets"]).await.into_iter().collect();
    // reverse then leet
    assert!(out.contains("$73p"));
}

#[tokio::test]
async fn test_years_affixes() {
    let config = MutationConfig {
        years_range: Some("2020-2021".into()),
        ..Default::default()
    };
    let out = sorted(run(config, &["cat"]).await);
    assert_eq!(out, vec!["2020cat", "2021cat", "cat", "cat2020", "cat2021"]);
}

#[tokio::test]
async fn test_metrics_reported() {
    let config = MutationConfig {
        upper: true,
        min_length: 4,
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let output = pipeline
        .run(words(&["cat", "cats"]), Vec::new())
        .await
        .unwrap();
    assert_eq!(output.metrics.submitted, 4);
    assert_eq!(output.metrics.rejected, 2);
    assert_eq!(output.metrics.emitted, 2);
}

#[test]
fn test_sync_context_run() {
    let pipeline = Pipeline::new(MutationConfig {
        double: true,
        ..Default::default()
    })
    .unwrap();
    let output = tokio_test::block_on(pipeline.run(words(&["ab"]), Vec::new())).unwrap();
    assert_eq!(output.metrics.emitted, 2);
}

#[test]
fn test_invalid_config_rejected() {
    let result = Pipeline::new(MutationConfig {
        min_strength: 9,
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_library_initialization() {
    assert!(pass_forge::init().is_ok());
    assert!(!pass_forge::VERSION.is_empty());
}

proptest! {
    #[test]
    fn prop_case_transforms_idempotent(word in "[ -~]{0,16}") {
        prop_assert_eq!(lower(&lower(&word)), lower(&word));
        prop_assert_eq!(upper(&upper(&word)), upper(&word));
    }

    #[test]
    fn prop_reverse_involution(word in "\\PC{0,16}") {
        prop_assert_eq!(reverse(&reverse(&word)), word);
    }

    #[test]
    fn prop_swap_case_involution(word in "[a-zA-Z]{0,16}") {
        prop_assert_eq!(swap_case(&swap_case(&word)), word);
    }

    #[test]
    fn prop_strength_in_range(word in ".{0,32}") {
        prop_assert!(strength(&word) <= 4);
    }

    #[test]
    fn prop_crunch_requires_equal_length(mask in "[.#^%&a-z]{0,8}", word in "[ -~]{0,8}") {
        if mask.len() != word.len() {
            prop_assert!(!matches_crunch(&mask, &word));
        }
    }

    #[test]
    fn prop_full_leet_count(word in "[a-z]{0,8}") {
        let generator = FullLeetGenerator::new(&word);
        let expected = generator.total().unwrap();
        let all: Vec<String> = generator.collect();
        prop_assert_eq!(all.len() as u64, expected);
        prop_assert_eq!(all.iter().filter(|v| **v == word).count(), 1);
    }

    #[test]
    fn prop_all_cases_count(word in "[a-z0-9]{0,8}") {
        let all: Vec<String> = CaseGenerator::new(&word).collect();
        prop_assert_eq!(all.len(), 1usize << word.chars().count());
        let distinct: HashSet<&String> = all.iter().collect();
        let letters = word.chars().filter(|c| c.is_ascii_alphabetic()).count();
        prop_assert_eq!(distinct.len(), 1usize << letters);
    }
}
