//! The full diagnostics pipeline: run every probe, interpret its output and summarize it.

use crate::interpret::{self, ParsedRecord};
use crate::narrate::narrate;
use crate::probe::{self, DynProbeExecutor, ProbeResult};
use crate::request::ConfigRequest;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// One probe's raw result, its parsed output and a narrative summary.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub result: ProbeResult,
    pub parsed: ParsedRecord,
    pub summary: String,
}

impl ProbeReport {
    pub fn new(probe_name: &str, result: ProbeResult) -> Self {
        let parsed = interpret::parse(probe_name, &result.stdout);
        let summary = narrate(probe_name, &result, &parsed);
        Self {
            result,
            parsed,
            summary,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DiagnosticsReport {
    /// True only if every probe succeeded.
    pub success: bool,
    pub probes: BTreeMap<String, ProbeReport>,
}

impl DiagnosticsReport {
    pub fn from_results(results: BTreeMap<String, ProbeResult>) -> Self {
        let probes: BTreeMap<String, ProbeReport> = results
            .into_iter()
            .map(|(name, result)| {
                let report = ProbeReport::new(&name, result);
                (name, report)
            })
            .collect();
        Self {
            success: probes.values().all(|p| p.result.success),
            probes,
        }
    }
}

/// Run the probe catalogue against `req` and interpret every result.
pub async fn run(
    executor: DynProbeExecutor,
    req: &ConfigRequest,
    timeout: Duration,
) -> DiagnosticsReport {
    let report = DiagnosticsReport::from_results(probe::run_all(executor, req, timeout).await);
    tracing::info!(
        "diagnostics for {} finished: {}",
        req.domain(),
        if report.success { "all probes passed" } else { "some probes failed" }
    );
    report
}
