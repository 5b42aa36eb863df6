// Scorer plugin system
// Capability contracts, class registry and the config loader

pub mod error;
pub mod loader;
pub mod registry;
pub mod types;

pub use error::{ConfigError, PluginError, Result, ScoreError};
pub use loader::{load, load_entries, ConfigFormat, ScorerConfigEntry, ScorerConfigFile};
pub use registry::{parse_args, ClassRef, Factory, Registry};
pub use types::{
    DocumentRecord, DocumentScorer, InitArgs, QueryDocumentScorer, QueryRecord, QueryScorer,
    Record, Scorer, ScorerDescriptor, ScorerKind, NO_SCORE,
};
