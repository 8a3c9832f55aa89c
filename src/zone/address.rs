//! IPv4 arithmetic for reverse zones and query ACLs.

use crate::error::Error;
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;
use std::str::FromStr;

const REVERSE_ZONE_PREFIX_LEN: u8 = 24;

/// Parse a dotted-quad IPv4 address.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if `ip` is not exactly four decimal octets.
pub fn parse(ip: &str) -> Result<Ipv4Addr, Error> {
    Ipv4Addr::from_str(ip.trim()).map_err(|_| Error::InvalidAddress(ip.to_string()))
}

/// The `in-addr.arpa` zone holding PTR records for the /24 of `ip`, e.g.
/// `192.168.1.10` → `1.168.192.in-addr.arpa`.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if `ip` is not an IPv4 dotted quad.
pub fn reverse_zone_name(ip: &str) -> Result<String, Error> {
    parse(ip).map(reverse_zone)
}

/// The /24 network containing `ip`, e.g. `192.168.1.10` → `192.168.1.0/24`.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if `ip` is not an IPv4 dotted quad.
pub fn network_prefix(ip: &str) -> Result<String, Error> {
    let addr = parse(ip)?;
    network(addr).map_err(|_| Error::InvalidAddress(ip.to_string()))
}

pub(crate) fn reverse_zone(addr: Ipv4Addr) -> String {
    let [a, b, c, _] = addr.octets();
    format!("{c}.{b}.{a}.in-addr.arpa")
}

pub(crate) fn network(addr: Ipv4Addr) -> Result<String, ipnetwork::IpNetworkError> {
    let net = Ipv4Network::new(addr, REVERSE_ZONE_PREFIX_LEN)?;
    Ok(format!("{}/{}", net.network(), net.prefix()))
}

/// The first three octets, e.g. `192.168.1.10` → `192.168.1`. Names the reverse zone file.
pub(crate) fn network_stem(addr: Ipv4Addr) -> String {
    let [a, b, c, _] = addr.octets();
    format!("{a}.{b}.{c}")
}

/// The host octet, used as the PTR owner name inside the reverse zone.
pub(crate) fn last_octet(addr: Ipv4Addr) -> String {
    addr.octets()[3].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_zone_name_reverses_network_octets() {
        assert_eq!(
            reverse_zone_name("192.168.1.10").unwrap(),
            "1.168.192.in-addr.arpa"
        );
        assert_eq!(reverse_zone_name("10.42.0.243").unwrap(), "0.42.10.in-addr.arpa");
    }

    #[test]
    fn network_prefix_zeroes_host_octet() {
        assert_eq!(network_prefix("192.168.1.10").unwrap(), "192.168.1.0/24");
        assert_eq!(network_prefix("10.42.0.255").unwrap(), "10.42.0.0/24");
    }

    #[test]
    fn octet_helpers() {
        let addr = Ipv4Addr::new(172, 16, 5, 77);
        assert_eq!(network_stem(addr), "172.16.5");
        assert_eq!(last_octet(addr), "77");
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["999.1.1.1", "", "abc", "1.2.3", "1.2.3.4.5", "::1"] {
            assert!(
                matches!(reverse_zone_name(bad), Err(Error::InvalidAddress(_))),
                "{bad} should be rejected"
            );
            assert!(
                matches!(network_prefix(bad), Err(Error::InvalidAddress(_))),
                "{bad} should be rejected"
            );
        }
    }
}
