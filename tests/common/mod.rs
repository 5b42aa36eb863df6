#![allow(dead_code)]

use rr_scorers::plugin::{
    DocumentScorer, InitArgs, PluginError, QueryScorer, Record, Registry, ScorerDescriptor,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_MODULE: &str = "test_scorers";

/// Write a JSON scorer config into `dir` and return its path.
pub fn write_scorers_json(dir: &Path, scorers: Value) -> PathBuf {
    let path = dir.join("scorers.json");
    let content = serde_json::json!({ "scorers": scorers });
    std::fs::write(&path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
    path
}

/// Write raw scorer config text under `name` in `dir`.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}

fn descriptor(args: &InitArgs, default_short: &str) -> ScorerDescriptor {
    let text = |key: &str, fallback: &str| {
        args.get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };
    ScorerDescriptor::new(
        text("name", default_short),
        text("short_name", default_short),
        text("description", "test scorer"),
    )
    .unwrap()
}

fn number(args: &InitArgs, key: &str, fallback: f64) -> f64 {
    args.get(key).and_then(Value::as_f64).unwrap_or(fallback)
}

/// Document scorer returning a fixed value
pub struct ConstantDocumentScorer {
    descriptor: ScorerDescriptor,
    value: f64,
}

impl DocumentScorer for ConstantDocumentScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn score(&self, _document: &Record) -> Result<f64, PluginError> {
        Ok(self.value)
    }
}

/// Query scorer returning a fixed value, optionally after `sleep_ms`
pub struct ConstantQueryScorer {
    descriptor: ScorerDescriptor,
    value: f64,
    sleep: Duration,
}

impl QueryScorer for ConstantQueryScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn score(&self, _query: &Record) -> Result<f64, PluginError> {
        std::thread::sleep(self.sleep);
        Ok(self.value)
    }
}

/// Document scorer that sleeps `sleep_ms` before returning `value`
pub struct SleepingScorer {
    descriptor: ScorerDescriptor,
    sleep: Duration,
    value: f64,
    running: Arc<AtomicUsize>,
}

impl DocumentScorer for SleepingScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn score(&self, _document: &Record) -> Result<f64, PluginError> {
        self.running.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.sleep);
        self.running.fetch_sub(1, Ordering::SeqCst);
        Ok(self.value)
    }
}

/// Document scorer that always fails with `message`
pub struct FailingScorer {
    descriptor: ScorerDescriptor,
    message: String,
}

impl DocumentScorer for FailingScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn score(&self, _document: &Record) -> Result<f64, PluginError> {
        Err(PluginError::Failed(self.message.clone()))
    }
}

/// Document scorer that panics
pub struct PanickingScorer {
    descriptor: ScorerDescriptor,
}

impl DocumentScorer for PanickingScorer {
    fn descriptor(&self) -> &ScorerDescriptor {
        &self.descriptor
    }

    fn score(&self, _document: &Record) -> Result<f64, PluginError> {
        panic!("scorer blew up");
    }
}

/// Registry with the built-ins plus the test scorers under `test_scorers.*`.
///
/// Class names: ConstantDocument, ConstantQuery, Sleeping, Failing, Panicking.
/// Init args: name, short_name, description, value, sleep_ms, message.
/// `sleep_ms` applies to Sleeping and ConstantQuery.
pub fn test_registry() -> Registry {
    let mut registry = Registry::with_builtins().unwrap();
    register_test_scorers(&mut registry, Arc::new(AtomicUsize::new(0)));
    registry
}

/// Like [`test_registry`], sharing `running` with every sleeping scorer so
/// tests can observe how many run at once.
pub fn register_test_scorers(registry: &mut Registry, running: Arc<AtomicUsize>) {
    registry
        .register_document(TEST_MODULE, "ConstantDocument", |args| {
            Ok(ConstantDocumentScorer {
                descriptor: descriptor(args, "cd"),
                value: number(args, "value", 0.0),
            })
        })
        .unwrap();
    registry
        .register_query(TEST_MODULE, "ConstantQuery", |args| {
            Ok(ConstantQueryScorer {
                descriptor: descriptor(args, "cq"),
                value: number(args, "value", 0.0),
                sleep: Duration::from_millis(number(args, "sleep_ms", 0.0) as u64),
            })
        })
        .unwrap();
    registry
        .register_document(TEST_MODULE, "Sleeping", move |args| {
            Ok(SleepingScorer {
                descriptor: descriptor(args, "sleep"),
                sleep: Duration::from_millis(number(args, "sleep_ms", 0.0) as u64),
                value: number(args, "value", 1.0),
                running: Arc::clone(&running),
            })
        })
        .unwrap();
    registry
        .register_document(TEST_MODULE, "Failing", |args| {
            Ok(FailingScorer {
                descriptor: descriptor(args, "fail"),
                message: args
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("scorer failed")
                    .to_string(),
            })
        })
        .unwrap();
    registry
        .register_document(TEST_MODULE, "Panicking", |args| {
            Ok(PanickingScorer {
                descriptor: descriptor(args, "panic"),
            })
        })
        .unwrap();
}

/// Config entry for a test scorer
pub fn test_entry(kind: &str, class: &str, init_args: Value) -> Value {
    serde_json::json!({
        "type": kind,
        "module": TEST_MODULE,
        "class": class,
        "init_args": init_args,
    })
}
