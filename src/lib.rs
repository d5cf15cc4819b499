// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod ingest;
pub mod media;
pub mod persistence;
pub mod pipeline;
pub mod quiz;
pub mod services;

pub use crate::core::lexicon::Lexicon;
pub use crate::error::{Error, Result};
