//! ## Crate layout
//! - `core`: field presence, codec, masks, merging, query translation and
//!   observability.
//! - `config`: TOML-backed engine configuration.
//! - `engine`: request orchestration over registered resource models.
//! - `error`: the stable public error taxonomy.
//!
//! The `prelude` module carries the vocabulary needed to declare resource
//! models and drive an [`Engine`].

pub use resmask_core as core;

pub mod config;
pub mod engine;
pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::EngineConfig;
pub use engine::{Engine, ListResponse};
pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::EngineConfig,
        core::{
            codec::{WireMessage, WireValue},
            prelude::*,
            query::{ListQuery, OrderTerm},
            store::{ListStore, StorePage, StoreError},
        },
        engine::{Engine, ListResponse},
    };
}
