//! External network probes.
//!
//! A fixed catalogue of five probes is run against a
//! [`ConfigRequest`][crate::request::ConfigRequest]:
//!
//! | name             | command                                   |
//! |------------------|-------------------------------------------|
//! | `dig_host1`      | `dig @<dns_ip> <host1_prefix>.<domain>`   |
//! | `dig_host2`      | `dig @<dns_ip> <host2_prefix>.<domain>`   |
//! | `reverse_lookup` | `dig -x <host_ip>`                        |
//! | `ping_host1`     | `ping -c 4 <host1_prefix>.<domain>`       |
//! | `ping_host2`     | `ping -c 4 <host2_prefix>.<domain>`       |
//!
//! Commands are split on whitespace and executed directly, never through a shell. Each probe
//! gets its own wall-clock timeout. A probe that times out or can't be launched is recorded as a
//! failed [`ProbeResult`]; it never aborts the rest of the batch.

use crate::request::ConfigRequest;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod process;
pub mod runner;

pub use process::ProcessExecutor;
pub use runner::run_all;

/// The per-probe timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The return code recorded for probes that never produced an exit status.
pub const NO_EXIT_CODE: i32 = -1;

const PING_COUNT: u8 = 4;

/// The probes in the diagnostic catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Probe {
    DigHost1,
    DigHost2,
    ReverseLookup,
    PingHost1,
    PingHost2,
}

impl Probe {
    pub const ALL: [Probe; 5] = [
        Probe::DigHost1,
        Probe::DigHost2,
        Probe::ReverseLookup,
        Probe::PingHost1,
        Probe::PingHost2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Probe::DigHost1 => "dig_host1",
            Probe::DigHost2 => "dig_host2",
            Probe::ReverseLookup => "reverse_lookup",
            Probe::PingHost1 => "ping_host1",
            Probe::PingHost2 => "ping_host2",
        }
    }

    /// The command line for this probe against `req`.
    pub fn command(self, req: &ConfigRequest) -> ProbeCommand {
        let line = match self {
            Probe::DigHost1 => format!("dig @{} {}", req.dns_ip(), req.host1_name()),
            Probe::DigHost2 => format!("dig @{} {}", req.dns_ip(), req.host2_name()),
            Probe::ReverseLookup => format!("dig -x {}", req.host_ip()),
            Probe::PingHost1 => format!("ping -c {PING_COUNT} {}", req.host1_name()),
            Probe::PingHost2 => format!("ping -c {PING_COUNT} {}", req.host2_name()),
        };
        ProbeCommand::new(line)
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command line to execute without shell interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommand {
    line: String,
}

impl ProbeCommand {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// The exact invocation, as recorded in [`ProbeResult::command`].
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The program and its arguments, split on whitespace.
    pub fn argv(&self) -> Option<(&str, Vec<&str>)> {
        let mut parts = self.line.split_whitespace();
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Why a probe produced no exit status.
#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("Command timed out")]
    Timeout(Duration),

    #[error("{0}")]
    Launch(#[from] std::io::Error),

    #[error("empty command")]
    EmptyCommand,

    #[error("probe task failed: {0}")]
    Task(String),
}

/// The raw outcome of running one probe.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub command: String,
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    /// A probe that ran to completion. `success` is `return_code == 0`.
    pub fn completed(
        command: &ProbeCommand,
        return_code: i32,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            command: command.line().to_string(),
            return_code,
            stdout,
            stderr,
            success: return_code == 0,
            error: None,
        }
    }

    /// A probe that never produced an exit status.
    ///
    /// Timeouts leave both streams empty. Any other failure puts its description in `stderr`.
    pub fn failed(command: &ProbeCommand, err: &ProbeError) -> Self {
        let description = err.to_string();
        let stderr = match err {
            ProbeError::Timeout(_) => String::new(),
            _ => description.clone(),
        };
        Self {
            command: command.line().to_string(),
            return_code: NO_EXIT_CODE,
            stdout: String::new(),
            stderr,
            success: false,
            error: Some(description),
        }
    }
}

/// Executes probe commands.
///
/// Implementations must be total: every failure is folded into the returned [`ProbeResult`].
#[async_trait::async_trait]
pub trait ProbeExecutor {
    async fn execute(&self, command: &ProbeCommand, timeout: Duration) -> ProbeResult;
}

/// A [`ProbeExecutor`] shared by concurrently running probe tasks.
#[allow(clippy::module_name_repetitions)]
pub type DynProbeExecutor = Arc<dyn ProbeExecutor + Send + Sync>;
