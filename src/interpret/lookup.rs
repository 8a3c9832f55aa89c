//! `dig` output.
//!
//! ```text
//! ;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 4120
//! ;; flags: qr aa rd ra; QUERY: 1, ANSWER: 1, AUTHORITY: 0, ADDITIONAL: 1
//!
//! ;; ANSWER SECTION:
//! web1.example.com.	86400	IN	A	192.168.1.10
//!
//! ;; Query time: 23 msec
//! ;; SERVER: 192.168.1.10#53(192.168.1.10)
//! ;; MSG SIZE  rcvd: 61
//! ```

use crate::interpret::{after, leading};
use serde::Serialize;

/// The name server that answered a query.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub ip: String,
    pub port: String,
}

/// One resource record from a tab separated answer line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: String,
    pub ttl: Option<u32>,
    pub class: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupRecord {
    pub query_time_ms: Option<u64>,
    pub server: Option<Server>,
    pub status: Option<String>,
    pub flags: Option<String>,
    pub message_size_bytes: Option<u64>,
    pub answers: Vec<Answer>,
}

impl LookupRecord {
    /// Apply every matcher to one trimmed line. A later match overwrites an earlier one.
    fn scan(mut self, line: &str) -> Self {
        if let Some(ms) = query_time(line) {
            self.query_time_ms = Some(ms);
        }
        if let Some(server) = server(line) {
            self.server = Some(server);
        }
        if let Some(status) = after(line, "status: ").and_then(|s| leading(s, is_word)) {
            self.status = Some(status.to_string());
        }
        if let Some(flags) = flags(line) {
            self.flags = Some(flags);
        }
        if let Some(size) = message_size(line) {
            self.message_size_bytes = Some(size);
        }
        if let Some(answer) = answer(line) {
            self.answers.push(answer);
        }
        self
    }
}

pub fn parse(stdout: &str) -> LookupRecord {
    stdout
        .lines()
        .map(str::trim)
        .fold(LookupRecord::default(), LookupRecord::scan)
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn digits(s: &str) -> Option<&str> {
    leading(s, |c| c.is_ascii_digit())
}

fn query_time(line: &str) -> Option<u64> {
    let rest = after(line, "Query time: ")?;
    let ms = digits(rest)?;
    rest[ms.len()..].starts_with(" msec").then(|| ms.parse().ok())?
}

fn server(line: &str) -> Option<Server> {
    let rest = after(line, "SERVER: ")?;
    let (ip, port) = rest.split_once('#')?;
    if ip.is_empty() {
        return None;
    }
    Some(Server {
        ip: ip.to_string(),
        port: digits(port)?.to_string(),
    })
}

fn flags(line: &str) -> Option<String> {
    let rest = after(line, "flags: ")?;
    let flags = rest.split(';').next().unwrap_or_default().trim();
    (!flags.is_empty()).then(|| flags.to_string())
}

fn message_size(line: &str) -> Option<u64> {
    let rest = after(line, "MSG SIZE")?;
    digits(after(rest, "rcvd: ")?)?.parse().ok()
}

fn answer(line: &str) -> Option<Answer> {
    if line.is_empty() || line.starts_with(';') || !line.contains('\t') {
        return None;
    }
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }
    let ttl = fields[1];
    Some(Answer {
        name: fields[0].trim_end_matches('.').to_string(),
        ttl: if !ttl.is_empty() && ttl.chars().all(|c| c.is_ascii_digit()) {
            ttl.parse().ok()
        } else {
            None
        },
        class: fields[2].to_string(),
        record_type: fields[3].to_string(),
        value: fields.get(4).map(ToString::to_string),
    })
}
