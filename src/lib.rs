//! # Cardex
//!
//! Load a trading-card catalog, filter it and project the result into list
//! and detail views for a terminal front-end.

extern crate self as cardex;

#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod filter;
pub mod logs;
pub mod render;
pub mod state;
pub mod store;
pub mod view;

pub use error::{Error, Result};
