// Scorer class registry
// Maps a stable (module, class) key from config to a constructor, replacing
// free-form module path lookup.

use crate::plugin::error::{ConfigError, Result};
use crate::plugin::loader::ScorerConfigEntry;
use crate::plugin::types::{
    DocumentScorer, InitArgs, QueryDocumentScorer, QueryScorer, Scorer,
};
use crate::scorers;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructor for one scorer class
pub type Factory = Arc<dyn Fn(&InitArgs) -> Result<Scorer> + Send + Sync>;

/// Registry key as written in config: `module` + `class`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassRef {
    pub module: String,
    pub class: String,
}

impl ClassRef {
    pub fn new(module: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.class)
    }
}

/// Registry of scorer factories
#[derive(Default)]
pub struct Registry {
    factories: HashMap<ClassRef, Factory>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in scorers
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        scorers::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a factory under `module.class`
    pub fn register<F>(&mut self, module: &str, class: &str, factory: F) -> Result<()>
    where
        F: Fn(&InitArgs) -> Result<Scorer> + Send + Sync + 'static,
    {
        let key = ClassRef::new(module, class);
        if self.factories.contains_key(&key) {
            return Err(ConfigError::AlreadyRegistered {
                module: key.module,
                class: key.class,
            });
        }

        tracing::debug!("Registered scorer class: {}", key);
        self.factories.insert(key, Arc::new(factory));
        Ok(())
    }

    /// Register a document scorer constructor
    pub fn register_document<T, F>(&mut self, module: &str, class: &str, factory: F) -> Result<()>
    where
        T: DocumentScorer + 'static,
        F: Fn(&InitArgs) -> Result<T> + Send + Sync + 'static,
    {
        self.register(module, class, move |args| {
            Ok(Scorer::Document(Arc::new(factory(args)?)))
        })
    }

    /// Register a query scorer constructor
    pub fn register_query<T, F>(&mut self, module: &str, class: &str, factory: F) -> Result<()>
    where
        T: QueryScorer + 'static,
        F: Fn(&InitArgs) -> Result<T> + Send + Sync + 'static,
    {
        self.register(module, class, move |args| {
            Ok(Scorer::Query(Arc::new(factory(args)?)))
        })
    }

    /// Register a query/document scorer constructor
    pub fn register_query_document<T, F>(
        &mut self,
        module: &str,
        class: &str,
        factory: F,
    ) -> Result<()>
    where
        T: QueryDocumentScorer + 'static,
        F: Fn(&InitArgs) -> Result<T> + Send + Sync + 'static,
    {
        self.register(module, class, move |args| {
            Ok(Scorer::QueryDocument(Arc::new(factory(args)?)))
        })
    }

    /// Check if a class is registered
    pub fn contains(&self, module: &str, class: &str) -> bool {
        self.factories.contains_key(&ClassRef::new(module, class))
    }

    /// All registered classes, sorted
    pub fn classes(&self) -> Vec<ClassRef> {
        let mut classes: Vec<ClassRef> = self.factories.keys().cloned().collect();
        classes.sort();
        classes
    }

    /// Resolve and construct the scorer for one config entry
    pub fn instantiate(&self, entry: &ScorerConfigEntry) -> Result<Scorer> {
        let key = ClassRef::new(entry.module.as_str(), entry.class.as_str());
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| ConfigError::UnresolvedClass {
                module: key.module.clone(),
                class: key.class.clone(),
            })?;

        factory(&entry.init_args)
    }
}

/// Deserialize a scorer's init args into its typed argument struct
pub fn parse_args<T: DeserializeOwned>(class: &str, args: &InitArgs) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(args.clone())).map_err(|e| {
        ConfigError::InitFailed {
            class: class.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::error::PluginError;
    use crate::plugin::types::{Record, ScorerDescriptor, ScorerKind};

    struct Fixed(ScorerDescriptor);

    impl QueryScorer for Fixed {
        fn descriptor(&self) -> &ScorerDescriptor {
            &self.0
        }

        fn score(&self, _query: &Record) -> std::result::Result<f64, PluginError> {
            Ok(1.0)
        }
    }

    fn fixed(_args: &InitArgs) -> Result<Fixed> {
        Ok(Fixed(ScorerDescriptor::new("Fixed", "fx", "Always one")?))
    }

    #[test]
    fn test_registry_empty() {
        let registry = Registry::new();
        assert!(registry.classes().is_empty());
        assert!(!registry.contains("any", "Thing"));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = Registry::new();
        registry.register_query("fixed", "Fixed", fixed).unwrap();
        let err = registry.register_query("fixed", "Fixed", fixed).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_instantiate_wraps_kind() {
        let mut registry = Registry::new();
        registry.register_query("fixed", "Fixed", fixed).unwrap();

        let entry = ScorerConfigEntry {
            kind: ScorerKind::Query,
            module: "fixed".to_string(),
            class: "Fixed".to_string(),
            init_args: InitArgs::new(),
        };
        let scorer = registry.instantiate(&entry).unwrap();
        assert_eq!(scorer.kind(), ScorerKind::Query);
        assert_eq!(scorer.descriptor().short_name(), "fx");
    }

    #[test]
    fn test_instantiate_unresolved() {
        let registry = Registry::new();
        let entry = ScorerConfigEntry {
            kind: ScorerKind::Document,
            module: "nowhere".to_string(),
            class: "Missing".to_string(),
            init_args: InitArgs::new(),
        };
        let err = registry.instantiate(&entry).unwrap_err();
        assert_eq!(err.to_string(), "Scorer class not found: nowhere.Missing");
    }

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::with_builtins().unwrap();
        assert!(registry.contains("document_rating_scorer", "PopularityScorer"));
        assert!(registry.contains("query_definition_scorer", "WhatIsScorer"));
        assert_eq!(registry.classes().len(), 5);
    }

    #[test]
    fn test_builtins_collision_is_reported() {
        let mut registry = Registry::new();
        registry
            .register_query("query_type_scorer", "ProperNounRatioScorer", fixed)
            .unwrap();
        let err = scorers::register_builtins(&mut registry).unwrap_err();
        match err {
            ConfigError::AlreadyRegistered { module, class } => {
                assert_eq!(module, "query_type_scorer");
                assert_eq!(class, "ProperNounRatioScorer");
            }
            other => panic!("expected AlreadyRegistered, got {:?}", other),
        }
    }
}
