use crate::probe::{DynProbeExecutor, Probe, ProbeError, ProbeResult};
use crate::request::ConfigRequest;
use std::collections::BTreeMap;
use std::time::Duration;

/// Run every probe in the catalogue against `req`, concurrently, one task per probe.
///
/// The returned map always holds exactly one entry per [`Probe::ALL`] member, keyed by
/// [`Probe::name`]. Total latency is bounded by `timeout`, not by the sum of the probe timeouts.
pub async fn run_all(
    executor: DynProbeExecutor,
    req: &ConfigRequest,
    timeout: Duration,
) -> BTreeMap<String, ProbeResult> {
    let tasks: Vec<_> = Probe::ALL
        .iter()
        .map(|&probe| {
            let command = probe.command(req);
            let executor = executor.clone();
            tracing::debug!("starting probe {probe}: \"{command}\"");
            let handle = tokio::spawn({
                let command = command.clone();
                async move { executor.execute(&command, timeout).await }
            });
            (probe, command, handle)
        })
        .collect();

    let mut results = BTreeMap::new();
    for (probe, command, handle) in tasks {
        let result = match handle.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!("probe {probe} task failed: {err}");
                ProbeResult::failed(&command, &ProbeError::Task(err.to_string()))
            }
        };
        tracing::debug!(
            "probe {probe} finished with return code {}",
            result.return_code
        );
        results.insert(probe.name().to_string(), result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeCommand, ProbeExecutor};
    use std::sync::Arc;

    /// Answers `dig` probes successfully, times out `ping_host2` and panics on `ping_host1`.
    struct ScriptedExecutor;

    #[async_trait::async_trait]
    impl ProbeExecutor for ScriptedExecutor {
        async fn execute(&self, command: &ProbeCommand, timeout: Duration) -> ProbeResult {
            let line = command.line();
            if line.starts_with("dig") {
                ProbeResult::completed(command, 0, "; ok".into(), String::new())
            } else if line.ends_with("web2.example.com") {
                ProbeResult::failed(command, &ProbeError::Timeout(timeout))
            } else {
                panic!("scripted failure for {line}")
            }
        }
    }

    #[tokio::test]
    async fn batch_always_has_five_entries() {
        let req = ConfigRequest::new("192.168.1.10", "192.168.1.20", "example.com", "web1", "web2")
            .unwrap();
        let results = run_all(Arc::new(ScriptedExecutor), &req, Duration::from_secs(1)).await;

        assert_eq!(results.len(), 5);
        for probe in Probe::ALL {
            assert!(results.contains_key(probe.name()), "missing {probe}");
        }
        assert!(results["dig_host1"].success);
        assert!(results["reverse_lookup"].success);

        let timed_out = &results["ping_host2"];
        assert!(!timed_out.success);
        assert_eq!(timed_out.error.as_deref(), Some("Command timed out"));

        let panicked = &results["ping_host1"];
        assert!(!panicked.success);
        assert_eq!(panicked.command, "ping -c 4 web1.example.com");
        assert!(panicked.error.as_deref().unwrap().starts_with("probe task failed"));
    }
}
