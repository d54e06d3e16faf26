//! Adapter module - headless session control over line-delimited JSON
//!
//! External drivers (scripts, bots, a future front end) control a session by
//! writing one JSON message per line and reading one JSON message per line
//! back. The binary speaks it over stdin/stdout.
//!
//! # Message Types
//!
//! ## Client → Game
//!
//! - **command**: apply a batch of actions (`pressUp`, `releaseUp`, `interact`,
//!   `start1`, `stop2`, `escape`, ...)
//! - **tick**: advance the lab by `dt_ms` milliseconds
//! - **observe**: request an observation
//!
//! ## Game → Client
//!
//! - **ack**: command or tick applied
//! - **observation**: scene, player, bench prompt, and column readouts
//! - **error**: `invalid_json`, `invalid_action`, `too_many_actions`,
//!   `out_of_order`, or `internal`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Game: {"type":"command","seq":1,"actions":["pressUp"]}
//! Game -> Client: {"type":"ack","seq":1,"status":"ok","applied":1}
//! Game -> Client: {"type":"observation","seq":1,"scene":"lab","player":{...},...}
//! Client -> Game: {"type":"observe","seq":2}
//! Game -> Client: {"type":"observation","seq":2,...,"columns":[{"index":1,"timer":"col1","remaining":30.0,"display":"30.0s",...}]}
//! ```
//!
//! # Environment Variables
//!
//! - `CHEM_DASH_TICK_MS`: self-tick interval (default 16)
//! - `CHEM_DASH_AUTO_TICK`: set to "0" or "false" to tick only on `tick` messages
//! - `CHEM_DASH_STREAM`: set to "0" or "false" to observe only on request

pub mod protocol;
pub mod server;

pub use chem_dash_core as core;
pub use chem_dash_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::{run_session, AdapterConfig, Connection};
