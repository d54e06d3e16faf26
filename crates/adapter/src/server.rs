//! Session server for the JSON adapter
//!
//! Reads client messages line by line from any async reader, applies them to a
//! [`Session`], and writes responses line by line. The binary wires this to
//! stdin/stdout; tests use an in-memory duplex pipe.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::core::config::positive;
use crate::core::{Clock, Session, SessionError};
use crate::protocol::*;
use crate::types::{MAX_ACTIONS_PER_COMMAND, TICK_MS};

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Self-tick interval in milliseconds
    pub tick_ms: u32,
    /// Advance the session on a fixed interval using measured wall time
    pub auto_tick: bool,
    /// Follow every command and tick with an observation
    pub stream_observations: bool,
    pub max_actions: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            auto_tick: true,
            stream_observations: true,
            max_actions: MAX_ACTIONS_PER_COMMAND,
        }
    }
}

impl AdapterConfig {
    /// Create from environment variables
    ///
    /// - `CHEM_DASH_TICK_MS`: self-tick interval (default 16)
    /// - `CHEM_DASH_AUTO_TICK`: "0"/"false" disables self-ticking
    /// - `CHEM_DASH_STREAM`: "0"/"false" disables streamed observations
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            tick_ms: positive(&lookup, "CHEM_DASH_TICK_MS").unwrap_or(defaults.tick_ms),
            auto_tick: flag(&lookup, "CHEM_DASH_AUTO_TICK").unwrap_or(defaults.auto_tick),
            stream_observations: flag(&lookup, "CHEM_DASH_STREAM")
                .unwrap_or(defaults.stream_observations),
            max_actions: defaults.max_actions,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1) as u64)
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid flag");
            None
        }
    }
}

/// Per-connection protocol state
#[derive(Debug, Clone)]
pub struct Connection {
    config: AdapterConfig,
    last_seq: Option<u64>,
    next_out_seq: u64,
}

impl Connection {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            last_seq: None,
            next_out_seq: 1,
        }
    }

    fn out_seq(&mut self) -> u64 {
        let seq = self.next_out_seq;
        self.next_out_seq += 1;
        seq
    }

    fn check_and_update_seq(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }

    /// Build an observation of `session`
    pub fn observe<C: Clock>(&mut self, session: &Session<C>) -> ServerMessage {
        match session.snapshot() {
            Ok(snapshot) => {
                let seq = self.out_seq();
                ServerMessage::Observation(ObservationMessage::from_snapshot(seq, &snapshot))
            }
            Err(e) => create_error(None, ErrorCode::Internal, e.to_string()),
        }
    }

    /// Handle one inbound line, returning the messages to send back in order
    pub fn handle_line<C: Clock>(
        &mut self,
        session: &mut Session<C>,
        line: &str,
    ) -> Vec<ServerMessage> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let msg = match serde_json::from_str::<ClientMessage>(line) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting malformed line");
                return vec![create_error(
                    extract_seq_best_effort(line),
                    ErrorCode::InvalidJson,
                    e.to_string(),
                )];
            }
        };

        let seq = msg.seq();
        if !self.check_and_update_seq(seq) {
            tracing::warn!(seq, last = ?self.last_seq, "rejecting out-of-order message");
            return vec![create_error(
                Some(seq),
                ErrorCode::OutOfOrder,
                "seq must increase",
            )];
        }

        let mut out = Vec::with_capacity(2);
        match msg {
            ClientMessage::Command(cmd) => {
                let actions = match parse_actions(&cmd.actions, self.config.max_actions) {
                    Ok(actions) => actions,
                    Err((code, message)) => {
                        tracing::warn!(seq, reason = %message, "rejecting command");
                        out.push(create_error(Some(seq), code, message));
                        return out;
                    }
                };

                let mut applied = 0;
                for action in actions {
                    if let Err(e) = session.apply(action) {
                        out.push(internal_error(seq, e));
                        return out;
                    }
                    applied += 1;
                }
                out.push(create_ack(seq, applied));
            }
            ClientMessage::Tick(tick) => {
                session.tick(Duration::from_millis(tick.dt_ms as u64));
                out.push(create_ack(seq, 0));
            }
            ClientMessage::Observe(_) => {
                out.push(self.observe(session));
                return out;
            }
        }

        if self.config.stream_observations {
            out.push(self.observe(session));
        }
        out
    }
}

fn internal_error(seq: u64, e: SessionError) -> ServerMessage {
    tracing::error!(seq, error = %e, "session error");
    create_error(Some(seq), ErrorCode::Internal, e.to_string())
}

async fn write_messages<W: AsyncWrite + Unpin>(
    writer: &mut W,
    messages: &[ServerMessage],
) -> Result<()> {
    for msg in messages {
        let mut line = serde_json::to_string(msg).context("serialize message")?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await.context("write message")?;
    }
    writer.flush().await.context("flush output")?;
    Ok(())
}

/// Drive `session` from `reader` until EOF or until the session quits.
///
/// On quit a final observation is written before returning.
pub async fn run_session<C, R, W>(
    config: AdapterConfig,
    session: &mut Session<C>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let auto_tick = config.auto_tick;
    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last_tick = tokio::time::Instant::now();

    let mut conn = Connection::new(config);
    let mut lines = reader.lines();

    tracing::info!(auto_tick, "adapter session started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read input")? else {
                    tracing::info!("input closed");
                    break;
                };
                let messages = conn.handle_line(session, &line);
                write_messages(&mut writer, &messages).await?;
            }
            now = ticker.tick(), if auto_tick => {
                session.tick(now.duration_since(last_tick));
                last_tick = now;
            }
        }

        if session.should_quit() {
            let last = conn.observe(session);
            write_messages(&mut writer, &[last]).await?;
            tracing::info!("session quit");
            break;
        }
    }

    Ok(())
}
