//! The validated operator input shared by configuration generation and diagnostics.

use crate::error::Error;
use crate::zone::address;
use std::net::Ipv4Addr;
use trust_dns_proto::rr::Name;

/// A DNS server + host pair to configure or probe.
///
/// Construct with [`ConfigRequest::new`], which checks that every field is present, that both
/// addresses are IPv4 dotted quads, that `domain` is a valid DNS name and that both prefixes are
/// single DNS labels. Once built a request is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRequest {
    dns_ip: Ipv4Addr,
    host_ip: Ipv4Addr,
    domain: String,
    host1_prefix: String,
    host2_prefix: String,
}

impl ConfigRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] if any field is empty, [`Error::InvalidAddress`] if
    /// either IP is not a dotted quad and [`Error::InvalidName`] if the domain or a prefix is
    /// not a usable DNS name.
    pub fn new(
        dns_ip: &str,
        host_ip: &str,
        domain: &str,
        host1_prefix: &str,
        host2_prefix: &str,
    ) -> Result<Self, Error> {
        let fields = [dns_ip, host_ip, domain, host1_prefix, host2_prefix];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::MissingFields);
        }

        Ok(Self {
            dns_ip: address::parse(dns_ip)?,
            host_ip: address::parse(host_ip)?,
            domain: valid_domain(domain)?,
            host1_prefix: valid_label(host1_prefix)?,
            host2_prefix: valid_label(host2_prefix)?,
        })
    }

    pub fn dns_ip(&self) -> Ipv4Addr {
        self.dns_ip
    }

    pub fn host_ip(&self) -> Ipv4Addr {
        self.host_ip
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn host1_prefix(&self) -> &str {
        &self.host1_prefix
    }

    pub fn host2_prefix(&self) -> &str {
        &self.host2_prefix
    }

    /// `<host1_prefix>.<domain>`, without a trailing dot.
    pub fn host1_name(&self) -> String {
        format!("{}.{}", self.host1_prefix, self.domain)
    }

    /// `<host2_prefix>.<domain>`, without a trailing dot.
    pub fn host2_name(&self) -> String {
        format!("{}.{}", self.host2_prefix, self.domain)
    }
}

/// Check `domain` parses as a DNS name and return it without a trailing dot.
pub(crate) fn valid_domain(domain: &str) -> Result<String, Error> {
    let domain = domain.trim().trim_end_matches('.');
    match Name::from_ascii(domain) {
        Ok(name) if name.num_labels() > 0 => Ok(domain.to_string()),
        _ => Err(Error::InvalidName(domain.to_string())),
    }
}

fn valid_label(prefix: &str) -> Result<String, Error> {
    let prefix = prefix.trim();
    match Name::from_ascii(prefix) {
        Ok(name) if name.num_labels() == 1 => Ok(prefix.to_string()),
        _ => Err(Error::InvalidName(prefix.to_string())),
    }
}
