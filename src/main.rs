//! Chem Dash runner (default binary).
//!
//! Runs one headless session driven by line-delimited JSON on stdin and
//! answers on stdout. See `chem_dash::adapter` for the message set.

use anyhow::Result;
use tokio::io::{stdin, stdout, BufReader};

use chem_dash::adapter::{run_session, AdapterConfig};
use chem_dash::core::{Session, SessionConfig};
use chem_dash::types::SCREEN_TITLE;

#[tokio::main]
async fn main() -> Result<()> {
    chem_dash::logging::init();

    let session_config = SessionConfig::from_env();
    let adapter_config = AdapterConfig::from_env();
    tracing::info!(
        title = SCREEN_TITLE,
        column_secs = session_config.column_secs,
        tick_ms = adapter_config.tick_ms,
        "starting session"
    );

    let mut session = Session::new(session_config);
    run_session(adapter_config, &mut session, BufReader::new(stdin()), stdout()).await
}
