//! Host network and firewall commands for pointing a machine at the new DNS server.

use crate::error::Error;
use crate::request::valid_domain;
use crate::zone::address;

/// `nmcli` commands setting `dns_ip` as the resolver and `domain` as the search domain of
/// `interface`, then bringing the connection back up.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] for a malformed `dns_ip`, [`Error::InvalidName`] for a
/// malformed `domain`, and [`Error::MissingFields`] if `interface` is empty.
pub fn network_commands(dns_ip: &str, domain: &str, interface: &str) -> Result<Vec<String>, Error> {
    let dns_ip = address::parse(dns_ip)?;
    let domain = valid_domain(domain)?;
    let interface = interface.trim();
    if interface.is_empty() {
        return Err(Error::MissingFields);
    }

    Ok(vec![
        format!("nmcli con mod \"{interface}\" ipv4.dns \"{dns_ip}\""),
        format!("nmcli con mod \"{interface}\" ipv4.dns-search \"{domain}\""),
        format!("nmcli con up \"{interface}\""),
    ])
}

/// `firewall-cmd` commands opening DNS and allowing echo requests through.
pub fn firewall_commands() -> Vec<String> {
    [
        "sudo firewall-cmd --permanent --add-service=dns",
        "sudo firewall-cmd --reload",
        "sudo firewall-cmd --permanent --add-icmp-block=echo-reply",
        "sudo firewall-cmd --permanent --remove-icmp-block=echo-request",
        "sudo firewall-cmd --reload",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}
