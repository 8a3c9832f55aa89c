//! Plain language summaries of probe outcomes.

use crate::interpret::{LookupRecord, ParsedRecord, ProbeFamily, ReachabilityRecord};
use crate::probe::ProbeResult;
use std::fmt::Display;

const NOT_AVAILABLE: &str = "N/A";
const NOERROR: &str = "NOERROR";

/// Summarize one probe as a sentence or short paragraph.
///
/// Never empty. Any field missing from `parsed` is rendered as `N/A` rather than dropping the
/// clause that mentions it. A `parsed` record of the wrong family for `probe_name` is treated
/// as an empty record of the right one.
pub fn narrate(probe_name: &str, result: &ProbeResult, parsed: &ParsedRecord) -> String {
    match (ProbeFamily::of(probe_name), parsed) {
        (Some(ProbeFamily::Lookup), ParsedRecord::Lookup(rec)) => lookup(probe_name, result, rec),
        (Some(ProbeFamily::Lookup), _) => lookup(probe_name, result, &LookupRecord::default()),
        (Some(ProbeFamily::Reachability), ParsedRecord::Reachability(rec)) => {
            reachability(probe_name, result, rec)
        }
        (Some(ProbeFamily::Reachability), _) => {
            reachability(probe_name, result, &ReachabilityRecord::default())
        }
        (None, _) => format!(
            "Test {probe_name} completed with return code {}.",
            result.return_code
        ),
    }
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn lookup(probe_name: &str, result: &ProbeResult, rec: &LookupRecord) -> String {
    let reverse = probe_name == "reverse_lookup";
    let subject = if reverse {
        "Reverse DNS lookup".to_string()
    } else {
        format!(
            "DNS query for {}",
            probe_name.strip_prefix("dig_").unwrap_or(probe_name)
        )
    };

    if !result.success || rec.status.as_deref() != Some(NOERROR) {
        return match &rec.status {
            Some(status) if status != NOERROR => {
                format!("{subject} failed or returned an error status ({status}).")
            }
            _ => format!("{subject} failed or returned an error status."),
        };
    }

    let Some(answer) = rec.answers.first() else {
        let kind = if reverse { "PTR" } else { "answer" };
        return format!("{subject} completed but no {kind} records found.");
    };

    let resolution = if reverse {
        format!(
            "The address '{}' resolved to the PTR record {}",
            answer.name,
            or_na(answer.value.as_deref())
        )
    } else {
        format!(
            "The domain '{}' resolved to IP address {}",
            answer.name,
            or_na(answer.value.as_deref())
        )
    };
    format!(
        "{subject} was successful. {resolution} with a TTL of {} seconds. \
         Query completed in {} milliseconds from DNS server {}. \
         Response size was {} bytes.",
        or_na(answer.ttl),
        or_na(rec.query_time_ms),
        or_na(rec.server.as_ref().map(|s| s.ip.as_str())),
        or_na(rec.message_size_bytes),
    )
}

/// Floats keep their fractional part even when whole (`0.0`, not `0`).
fn decimal_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:?}"))
}

fn reachability(probe_name: &str, result: &ProbeResult, rec: &ReachabilityRecord) -> String {
    let target = probe_name.strip_prefix("ping_").unwrap_or(probe_name);
    if !result.success || rec.received.unwrap_or(0) == 0 {
        return format!("Ping test to {target} failed or experienced significant packet loss.");
    }

    let stats = rec.rtt_stats.as_ref();
    format!(
        "Ping test to {target} was successful. Target IP {} responded to {} out of {} packets \
         ({}% packet loss). Round-trip times: minimum {}ms, average {}ms, maximum {}ms.",
        or_na(rec.target_ip.as_deref()),
        or_na(rec.received),
        or_na(rec.transmitted),
        decimal_or_na(rec.packet_loss_percent),
        decimal_or_na(stats.map(|s| s.min)),
        decimal_or_na(stats.map(|s| s.avg)),
        decimal_or_na(stats.map(|s| s.max)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::{self, Answer, RttStats, Server};
    use crate::probe::ProbeCommand;

    fn ok(line: &str) -> ProbeResult {
        ProbeResult::completed(&ProbeCommand::new(line), 0, String::new(), String::new())
    }

    fn failed(line: &str) -> ProbeResult {
        ProbeResult::completed(&ProbeCommand::new(line), 1, String::new(), String::new())
    }

    fn resolved() -> LookupRecord {
        LookupRecord {
            query_time_ms: Some(23),
            server: Some(Server {
                ip: "192.168.1.10".into(),
                port: "53".into(),
            }),
            status: Some("NOERROR".into()),
            flags: Some("qr aa rd ra".into()),
            message_size_bytes: Some(61),
            answers: vec![Answer {
                name: "web1.example.com".into(),
                ttl: Some(86_400),
                class: "IN".into(),
                record_type: "A".into(),
                value: Some("192.168.1.10".into()),
            }],
        }
    }

    #[test]
    fn successful_lookup_names_every_field() {
        let text = narrate(
            "dig_host1",
            &ok("dig @192.168.1.10 web1.example.com"),
            &ParsedRecord::Lookup(resolved()),
        );
        assert_eq!(
            text,
            "DNS query for host1 was successful. The domain 'web1.example.com' resolved to IP \
             address 192.168.1.10 with a TTL of 86400 seconds. Query completed in 23 \
             milliseconds from DNS server 192.168.1.10. Response size was 61 bytes."
        );
    }

    #[test]
    fn missing_lookup_fields_become_na() {
        let rec = LookupRecord {
            status: Some("NOERROR".into()),
            answers: vec![Answer {
                name: "web1.example.com".into(),
                ttl: None,
                class: "IN".into(),
                record_type: "A".into(),
                value: None,
            }],
            ..LookupRecord::default()
        };
        let text = narrate("dig_host1", &ok("dig"), &ParsedRecord::Lookup(rec));
        assert!(text.contains("resolved to IP address N/A with a TTL of N/A seconds"));
        assert!(text.contains("in N/A milliseconds from DNS server N/A"));
        assert!(text.contains("Response size was N/A bytes."));
    }

    #[test]
    fn lookup_without_answers() {
        let rec = LookupRecord {
            answers: vec![],
            ..resolved()
        };
        assert_eq!(
            narrate("dig_host2", &ok("dig"), &ParsedRecord::Lookup(rec.clone())),
            "DNS query for host2 completed but no answer records found."
        );
        assert_eq!(
            narrate("reverse_lookup", &ok("dig -x"), &ParsedRecord::Lookup(rec)),
            "Reverse DNS lookup completed but no PTR records found."
        );
    }

    #[test]
    fn failed_lookup() {
        let nx = LookupRecord {
            status: Some("NXDOMAIN".into()),
            ..LookupRecord::default()
        };
        assert_eq!(
            narrate("dig_host1", &ok("dig"), &ParsedRecord::Lookup(nx)),
            "DNS query for host1 failed or returned an error status (NXDOMAIN)."
        );
        assert_eq!(
            narrate("dig_host1", &failed("dig"), &ParsedRecord::Lookup(resolved())),
            "DNS query for host1 failed or returned an error status."
        );
    }

    #[test]
    fn reverse_lookup_uses_ptr_phrasing() {
        let out = "20.1.168.192.in-addr.arpa.\t86400\tIN\tPTR\tweb2.example.com.\n\
                   ;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 1\n";
        let parsed = interpret::parse("reverse_lookup", out);
        let text = narrate("reverse_lookup", &ok("dig -x 192.168.1.20"), &parsed);
        assert!(text.starts_with("Reverse DNS lookup was successful."));
        assert!(text.contains("resolved to the PTR record web2.example.com."));
    }

    #[test]
    fn successful_ping() {
        let out = "PING web1.example.com (192.168.1.10) 56(84) bytes of data.\n\
                   4 packets transmitted, 4 received, 0% packet loss, time 3060ms\n\
                   rtt min/avg/max/mdev = 0.123/0.456/0.789/0.012 ms\n";
        let parsed = interpret::parse("ping_host1", out);
        assert_eq!(
            narrate("ping_host1", &ok("ping"), &parsed),
            "Ping test to host1 was successful. Target IP 192.168.1.10 responded to 4 out of 4 \
             packets (0.0% packet loss). Round-trip times: minimum 0.123ms, average 0.456ms, \
             maximum 0.789ms."
        );
    }

    #[test]
    fn whole_ping_figures_keep_their_decimal_point() {
        let parsed = ParsedRecord::Reachability(ReachabilityRecord {
            target_ip: Some("192.168.1.20".into()),
            transmitted: Some(4),
            received: Some(3),
            packet_loss_percent: Some(25.0),
            rtt_stats: Some(RttStats {
                min: 1002.0,
                avg: 1500.5,
                max: 2003.0,
                mdev: 400.0,
            }),
            ..ReachabilityRecord::default()
        });
        assert_eq!(
            narrate("ping_host2", &ok("ping"), &parsed),
            "Ping test to host2 was successful. Target IP 192.168.1.20 responded to 3 out of 4 \
             packets (25.0% packet loss). Round-trip times: minimum 1002.0ms, average 1500.5ms, \
             maximum 2003.0ms."
        );
    }

    #[test]
    fn ping_without_replies_fails() {
        let parsed = ParsedRecord::Reachability(ReachabilityRecord {
            transmitted: Some(4),
            received: Some(0),
            packet_loss_percent: Some(100.0),
            ..ReachabilityRecord::default()
        });
        assert_eq!(
            narrate("ping_host2", &ok("ping"), &parsed),
            "Ping test to host2 failed or experienced significant packet loss."
        );
    }

    #[test]
    fn unknown_probe_reports_return_code() {
        assert_eq!(
            narrate("traceroute", &failed("traceroute"), &ParsedRecord::Unrecognized),
            "Test traceroute completed with return code 1."
        );
    }

    #[test]
    fn never_empty_for_empty_records() {
        let records = [
            ParsedRecord::Unrecognized,
            ParsedRecord::Lookup(LookupRecord::default()),
            ParsedRecord::Reachability(ReachabilityRecord::default()),
        ];
        for name in ["dig_host1", "reverse_lookup", "ping_host1", "other"] {
            for result in [ok(name), failed(name)] {
                for rec in &records {
                    assert!(!narrate(name, &result, rec).is_empty());
                }
            }
        }

        let bare_success = ParsedRecord::Reachability(ReachabilityRecord {
            received: Some(1),
            ..ReachabilityRecord::default()
        });
        let text = narrate("ping_host1", &ok("ping"), &bare_success);
        assert!(text.contains("Target IP N/A responded to 1 out of N/A packets (N/A% packet loss)"));
        assert!(text.contains("minimum N/Ams, average N/Ams, maximum N/Ams."));
    }
}
