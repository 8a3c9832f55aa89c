//! Interpretation of probe output.
//!
//! `dig` and `ping` print semi-structured text. Each parser here is a single pass over the
//! lines of that text with a handful of independent marker matchers; whatever a matcher finds is
//! stored in an optional field of the record and anything it doesn't find stays absent. Parsing
//! never fails, even for empty or truncated output.

use serde::Serialize;

pub mod lookup;
pub mod reachability;

pub use lookup::{Answer, LookupRecord, Server};
pub use reachability::{ReachabilityRecord, RttStats};

/// The kind of output a probe produces, chosen by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFamily {
    /// `dig_*` and `reverse_lookup`.
    Lookup,
    /// `ping_*`.
    Reachability,
}

impl ProbeFamily {
    pub fn of(probe_name: &str) -> Option<Self> {
        if probe_name.starts_with("dig_") || probe_name == "reverse_lookup" {
            Some(ProbeFamily::Lookup)
        } else if probe_name.starts_with("ping_") {
            Some(ProbeFamily::Reachability)
        } else {
            None
        }
    }
}

/// The typed view of one probe's stdout.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(untagged)]
pub enum ParsedRecord {
    Lookup(LookupRecord),
    Reachability(ReachabilityRecord),
    #[default]
    Unrecognized,
}

/// Parse `stdout` with the parser for `probe_name`'s family.
pub fn parse(probe_name: &str, stdout: &str) -> ParsedRecord {
    match ProbeFamily::of(probe_name) {
        Some(ProbeFamily::Lookup) => ParsedRecord::Lookup(lookup::parse(stdout)),
        Some(ProbeFamily::Reachability) => ParsedRecord::Reachability(reachability::parse(stdout)),
        None => ParsedRecord::Unrecognized,
    }
}

/// The text following the first occurrence of `marker` in `line`.
fn after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|i| &line[i + marker.len()..])
}

/// The leading run of characters in `s` matching `pred`, if non-empty.
fn leading(s: &str, pred: impl Fn(char) -> bool) -> Option<&str> {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    (end > 0).then(|| &s[..end])
}

/// The trailing run of characters in `s` matching `pred`, if non-empty.
fn trailing(s: &str, pred: impl Fn(char) -> bool) -> Option<&str> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|&(_, c)| pred(c))
        .last()
        .map(|(i, _)| i)?;
    Some(&s[start..])
}

fn is_decimal(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_by_name() {
        assert_eq!(ProbeFamily::of("dig_host1"), Some(ProbeFamily::Lookup));
        assert_eq!(ProbeFamily::of("reverse_lookup"), Some(ProbeFamily::Lookup));
        assert_eq!(ProbeFamily::of("ping_host2"), Some(ProbeFamily::Reachability));
        assert_eq!(ProbeFamily::of("traceroute"), None);
    }

    #[test]
    fn unknown_probe_is_unrecognized() {
        assert_eq!(parse("traceroute", "anything"), ParsedRecord::Unrecognized);
    }

    #[test]
    fn token_helpers() {
        assert_eq!(after("a: b", "a: "), Some("b"));
        assert_eq!(leading("123 msec", |c| c.is_ascii_digit()), Some("123"));
        assert_eq!(leading("msec", |c| c.is_ascii_digit()), None);
        assert_eq!(trailing("count 42", |c| c.is_ascii_digit()), Some("42"));
        assert_eq!(trailing("42", |c| c.is_ascii_digit()), Some("42"));
        assert_eq!(trailing("count ", |c| c.is_ascii_digit()), None);
    }
}
