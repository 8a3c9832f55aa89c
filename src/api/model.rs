use crate::diagnostics::DiagnosticsReport;
use crate::error::Error;
use crate::interpret::ParsedRecord;
use crate::request::ConfigRequest;
use crate::zone::ZoneArtifacts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five fields every generation or diagnostics request carries. Missing fields deserialize
/// as empty strings so that they're reported as [`Error::MissingFields`] rather than as a JSON
/// data error.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct TargetInput {
    #[serde(default)]
    pub dns_ip: String,
    #[serde(default)]
    pub host_ip: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub host1_prefix: String,
    #[serde(default)]
    pub host2_prefix: String,
}

impl TargetInput {
    pub fn to_request(&self) -> Result<ConfigRequest, Error> {
        ConfigRequest::new(
            &self.dns_ip,
            &self.host_ip,
            &self.domain,
            &self.host1_prefix,
            &self.host2_prefix,
        )
    }
}

/// `/generate-dns-config` request body. Login details for the two machines may be sent along;
/// passwords are accepted and dropped.
#[derive(Deserialize, Debug, Clone, Default)]
pub(super) struct GenerateConfigRequest {
    #[serde(flatten)]
    pub target: TargetInput,
    pub dns_interface: Option<String>,
    pub dns_username: Option<String>,
    pub host_interface: Option<String>,
    pub host_username: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct Configurations {
    pub named_conf_zones: String,
    pub options_config: String,
    pub forward_zone: String,
    pub reverse_zone: String,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct FileNames {
    pub forward_zone_file: String,
    pub reverse_zone_file: String,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct MachineInfo {
    pub ip: String,
    pub interface: Option<String>,
    pub username: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct ConnectionInfo {
    pub dns_server: MachineInfo,
    pub host_server: MachineInfo,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct GenerateConfigResult {
    pub success: bool,
    pub configurations: Configurations,
    pub file_names: FileNames,
    pub permission_commands: Vec<String>,
    pub connection_info: ConnectionInfo,
}

impl GenerateConfigResult {
    pub fn new(
        input: GenerateConfigRequest,
        artifacts: ZoneArtifacts,
        permission_commands: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            configurations: Configurations {
                named_conf_zones: artifacts.named_conf_zones,
                options_config: artifacts.options_config,
                forward_zone: artifacts.forward_zone,
                reverse_zone: artifacts.reverse_zone,
            },
            file_names: FileNames {
                forward_zone_file: artifacts.forward_zone_file,
                reverse_zone_file: artifacts.reverse_zone_file,
            },
            permission_commands,
            connection_info: ConnectionInfo {
                dns_server: MachineInfo {
                    ip: input.target.dns_ip,
                    interface: input.dns_interface,
                    username: input.dns_username,
                },
                host_server: MachineInfo {
                    ip: input.target.host_ip,
                    interface: input.host_interface,
                    username: input.host_username,
                },
            },
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct ProbeSummary {
    pub command: String,
    pub success: bool,
    pub return_code: i32,
    pub rich_summary: String,
    pub parsed_data: ParsedRecord,
    pub raw_stdout: String,
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct TestDnsResult {
    pub success: bool,
    pub timestamp: String,
    pub test_results: BTreeMap<String, ProbeSummary>,
    pub input_parameters: TargetInput,
}

impl TestDnsResult {
    pub fn new(input: TargetInput, report: DiagnosticsReport, timestamp: String) -> Self {
        let test_results = report
            .probes
            .into_iter()
            .map(|(name, probe)| {
                let summary = ProbeSummary {
                    command: probe.result.command,
                    success: probe.result.success,
                    return_code: probe.result.return_code,
                    rich_summary: probe.summary,
                    parsed_data: probe.parsed,
                    raw_stdout: probe.result.stdout,
                    stderr: probe.result.stderr,
                    error: probe.result.error,
                };
                (name, summary)
            })
            .collect();
        Self {
            success: report.success,
            timestamp,
            test_results,
            input_parameters: input,
        }
    }
}

/// `/network-config` request body. `interface` falls back to the configured default.
#[derive(Deserialize, Debug, Clone, Default)]
pub(super) struct NetworkConfigRequest {
    #[serde(default)]
    pub dns_ip: String,
    #[serde(default)]
    pub domain: String,
    pub interface: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(super) struct NetworkConfigResult {
    pub success: bool,
    pub network_commands: Vec<String>,
    pub firewall_commands: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_target_fields_are_reported_as_missing() {
        let input: TargetInput =
            serde_json::from_value(json!({"dns_ip": "10.0.0.1", "domain": "example.com"}))
                .unwrap();
        assert!(matches!(input.to_request(), Err(Error::MissingFields)));
    }

    #[test]
    fn generate_request_drops_passwords() {
        let input: GenerateConfigRequest = serde_json::from_value(json!({
            "dns_ip": "192.168.1.10",
            "dns_interface": "eno1",
            "dns_username": "root",
            "dns_password": "hunter2",
            "host_ip": "192.168.1.20",
            "host_interface": "eno2",
            "host_username": "admin",
            "host_password": "hunter3",
            "domain": "example.com",
            "host1_prefix": "web1",
            "host2_prefix": "web2"
        }))
        .unwrap();
        let req = input.target.to_request().unwrap();
        let artifacts = crate::zone::generate(&req, time::macros::date!(2024 - 01 - 02)).unwrap();
        let result = GenerateConfigResult::new(input, artifacts, vec![]);

        let body = serde_json::to_string(&result).unwrap();
        assert!(!body.contains("hunter"));
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["connection_info"]["dns_server"]["interface"], "eno1");
        assert_eq!(body["file_names"]["reverse_zone_file"], "db.192.168.1");
    }
}
