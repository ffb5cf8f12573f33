//! Effect-based crew recommendations for Star Trek Fleet Command.
//!
//! Given a roster and an [EffectBundle](data::EffectBundle) of parsed ability
//! effects, ranks captain + two bridge officer crews for an activity intent.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod optimizer;
pub mod parallel;

pub use error::{EngineError, LoadError, Result};
