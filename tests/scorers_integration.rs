mod common;

use common::{record, write_file};
use rr_scorers::config::Config;
use rr_scorers::plugin::Registry;
use rr_scorers::scoring::Scorers;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

const ALL_BUILTINS: &str = r#"
scorers:
  - type: document
    module: document_rating_scorer
    class: PopularityScorer
    init_args:
      name: Popularity
      short_name: pop
      description: Views and accepted answers
  - type: document
    module: document_size_scorer
    class: TotalDocumentWordsScorer
    init_args:
      short_name: words
  - type: query
    module: query_type_scorer
    class: ProperNounRatioScorer
    init_args: {}
  - type: query_document
    module: query_definition_scorer
    class: WhatIsScorer
    init_args:
      strategy: average
  - type: query_document
    module: query_definition_scorer
    class: QueryDefinitionScorer
    init_args:
      strategy: max
"#;

fn scorers_from(path: &Path) -> Scorers {
    let config = Config {
        scorers_path: path.to_path_buf(),
        ..Config::default()
    };
    Scorers::from_config(&config, &Registry::with_builtins().unwrap()).unwrap()
}

#[test]
fn test_all_builtins_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "scorers.yml", ALL_BUILTINS);
    let scorers = scorers_from(&path);

    assert_eq!(scorers.headers(), vec!["pop", "words", "pnrs", "wis", "qds"]);
    let fields: Vec<_> = scorers.required_fields().into_iter().collect();
    assert_eq!(fields, vec!["q", "text"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_builtins_score() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "scorers.yml", ALL_BUILTINS);
    let scorers = scorers_from(&path);

    let query = record(json!({ "q": "what is Tokio" }));
    let document = record(json!({
        "views": 6000,
        "accepted": 1,
        "text": ["Tokio is a runtime. It runs tasks. Tokio was built on mio."]
    }));

    let vector = scorers.score(&query, &document).await.unwrap();
    assert_eq!(vector.len(), 5);
    assert_eq!(vector.get(0), Some(1.0));
    // Stop words excluded: Tokio runtime runs tasks Tokio built mio
    assert_eq!(vector.get(1), Some(7.0));
    assert_eq!(vector.get(2), Some(1.0 / 3.0));
    assert_eq!(vector.get(3), Some(2.0 / 3.0));
    assert_eq!(vector.get(4), Some(1.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_popularity_tiers_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "scorers.json",
        r#"{"scorers": [{"type": "document", "module": "document_rating_scorer",
             "class": "PopularityScorer", "init_args": {"short_name": "ds"}}]}"#,
    );
    let scorers = scorers_from(&path);
    let query = record(json!({}));

    let cases = [
        (json!({ "views": 6000, "accepted": 1 }), 1.0),
        (json!({ "views": -1, "accepted": 1 }), 0.0),
        (json!({ "views": 10, "accepted": 1 }), 0.5),
        (json!({ "views": 3000, "accepted": 4 }), 0.75),
        (json!({ "views": 500, "accepted": -1 }), 0.25),
    ];
    for (document, expected) in cases {
        let vector = scorers.score(&query, &record(document.clone())).await.unwrap();
        assert_eq!(vector.values(), &[expected], "document {}", document);
    }

    // No tier covers an unanswered popular document
    let vector = scorers
        .score(&query, &record(json!({ "views": 6000, "accepted": 0 })))
        .await
        .unwrap();
    assert!(vector.is_missing(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_word_count_excludes_stop_words() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "scorers.yaml",
        r#"
scorers:
  - type: document
    module: document_size_scorer
    class: TotalDocumentWordsScorer
    init_args: { short_name: all, include_stop: true }
  - type: document
    module: document_size_scorer
    class: TotalDocumentWordsScorer
    init_args: { short_name: content }
"#,
    );
    let scorers = scorers_from(&path);

    let document = record(json!({ "text": "The cat sat on the mat." }));
    let vector = scorers.score(&record(json!({})), &document).await.unwrap();
    assert_eq!(vector.get(0), Some(6.0));
    assert_eq!(vector.get(1), Some(3.0));
}
