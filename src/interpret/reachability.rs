//! `ping` output.
//!
//! ```text
//! PING web1.example.com (192.168.1.10) 56(84) bytes of data.
//! 64 bytes from web1.example.com (192.168.1.10): icmp_seq=1 ttl=64 time=0.045 ms
//!
//! --- web1.example.com ping statistics ---
//! 4 packets transmitted, 4 received, 0% packet loss, time 3060ms
//! rtt min/avg/max/mdev = 0.045/0.052/0.061/0.006 ms
//! ```

use crate::interpret::{after, is_decimal, leading, trailing};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RttStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub mdev: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ReachabilityRecord {
    pub target_ip: Option<String>,
    pub transmitted: Option<u32>,
    pub received: Option<u32>,
    pub packet_loss_percent: Option<f64>,
    pub rtt_samples_ms: Vec<f64>,
    pub rtt_stats: Option<RttStats>,
}

impl ReachabilityRecord {
    fn scan(mut self, line: &str) -> Self {
        if let Some(ip) = target_ip(line) {
            self.target_ip = Some(ip.to_string());
        }
        if let Some(ms) = reply_time(line) {
            self.rtt_samples_ms.push(ms);
        }
        if let Some((transmitted, received, loss)) = packet_counts(line) {
            self.transmitted = Some(transmitted);
            self.received = Some(received);
            self.packet_loss_percent = Some(loss);
        }
        if let Some(stats) = rtt_stats(line) {
            self.rtt_stats = Some(stats);
        }
        self
    }
}

pub fn parse(stdout: &str) -> ReachabilityRecord {
    stdout
        .lines()
        .map(str::trim)
        .fold(ReachabilityRecord::default(), ReachabilityRecord::scan)
}

fn target_ip(line: &str) -> Option<&str> {
    if !line.contains("bytes of data") {
        return None;
    }
    let rest = after(line, "PING ")?;
    let ip = after(rest, " (")?.split(')').next()?;
    (!ip.is_empty()).then_some(ip)
}

fn reply_time(line: &str) -> Option<f64> {
    if !line.contains("bytes from") {
        return None;
    }
    let rest = after(line, "time=")?;
    let ms = leading(rest, is_decimal)?;
    rest[ms.len()..].starts_with(" ms").then(|| ms.parse().ok())?
}

/// `<n> packets transmitted, <n> received, [...] <f>% packet loss`.
///
/// All three values are required. Segments between `received` and the loss (e.g. `+4 errors`)
/// are skipped.
fn packet_counts(line: &str) -> Option<(u32, u32, f64)> {
    if !line.contains("packets transmitted") {
        return None;
    }
    let mut transmitted = None;
    let mut received = None;
    let mut loss = None;
    for segment in line.split(',').map(str::trim) {
        if let Some(n) = segment.strip_suffix(" packets transmitted") {
            transmitted = trailing(n, |c| c.is_ascii_digit()).and_then(|n| n.parse().ok());
        } else if let Some(n) = segment.strip_suffix(" received") {
            received = n.parse().ok();
        } else if let Some(pct) = segment.strip_suffix("% packet loss") {
            loss = pct.parse().ok();
        }
    }
    Some((transmitted?, received?, loss?))
}

/// `rtt min/avg/max/mdev = <f>/<f>/<f>/<f> ms`, possibly followed by `, pipe <n>`.
fn rtt_stats(line: &str) -> Option<RttStats> {
    if !line.contains("rtt min/avg/max/mdev") {
        return None;
    }
    let (values, _) = after(line, "= ")?.split_once(" ms")?;
    let parsed: Vec<f64> = values
        .split('/')
        .map(|v| -> Option<f64> {
            leading(v, is_decimal)
                .filter(|d| d.len() == v.len())?
                .parse()
                .ok()
        })
        .collect::<Option<_>>()?;
    match parsed[..] {
        [min, avg, max, mdev] => Some(RttStats {
            min,
            avg,
            max,
            mdev,
        }),
        _ => None,
    }
}
