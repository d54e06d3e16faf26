//! Chem Dash (workspace facade crate).
//!
//! Re-exports the workspace crates under `chem_dash::{core,adapter,types}` so the
//! binary, benches and integration tests share one import path.

pub mod logging;

pub use chem_dash_adapter as adapter;
pub use chem_dash_core as core;
pub use chem_dash_types as types;
