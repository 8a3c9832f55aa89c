use crate::error::Error;
use crate::request::ConfigRequest;
use crate::zone::address;
use crate::zone::render::{
    NamedZones, Options, RecordData, ResourceRecord, Soa, ZoneFile, ZoneStanza, ZONE_DIRECTORY,
};
use serde::Serialize;
use std::net::Ipv4Addr;
use time::{Date, OffsetDateTime};

const DEFAULT_TTL: u32 = 86_400;
const SOA_REFRESH: u32 = 3_600; // 1 hour.
const SOA_RETRY: u32 = 1_800; // 30 minutes.
const SOA_EXPIRE: u32 = 1_209_600; // 2 weeks.
const SOA_MINIMUM: u32 = 86_400; // 1 day.
const SERIAL_REVISION: u8 = 1;
const DNS_PORT: u16 = 53;
const FORWARDERS: [Ipv4Addr; 2] = [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)];

/// The four generated `named` artifacts and the zone file names they refer to.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ZoneArtifacts {
    pub named_conf_zones: String,
    pub options_config: String,
    pub forward_zone: String,
    pub reverse_zone: String,
    pub forward_zone_file: String,
    pub reverse_zone_file: String,
}

/// Generate every artifact for `req` with a serial derived from `date`.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the /24 of the DNS server address can't be derived. No
/// partial output is returned.
pub fn generate(req: &ConfigRequest, date: Date) -> Result<ZoneArtifacts, Error> {
    Ok(ZoneArtifacts {
        named_conf_zones: named_conf_zones(req),
        options_config: options_config(req)?,
        forward_zone: forward_zone(req, date),
        reverse_zone: reverse_zone(req, date),
        forward_zone_file: forward_zone_file(req),
        reverse_zone_file: reverse_zone_file(req),
    })
}

/// [`generate`] with today's date, in local time when the offset can be determined.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_today(req: &ConfigRequest) -> Result<ZoneArtifacts, Error> {
    generate(req, today())
}

pub(crate) fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// `YYYYMMDD` followed by a fixed two digit revision.
///
/// The revision is always `01`, so regenerating on the same day does not advance the serial.
pub fn serial_number(date: Date) -> String {
    format!(
        "{:04}{:02}{:02}{SERIAL_REVISION:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn forward_zone_file(req: &ConfigRequest) -> String {
    format!("db.{}", req.domain())
}

pub fn reverse_zone_file(req: &ConfigRequest) -> String {
    format!("db.{}", address::network_stem(req.dns_ip()))
}

pub fn named_conf_zones(req: &ConfigRequest) -> String {
    NamedZones(vec![
        ZoneStanza {
            name: req.domain().to_string(),
            file: forward_zone_file(req),
        },
        ZoneStanza {
            name: address::reverse_zone(req.dns_ip()),
            file: reverse_zone_file(req),
        },
    ])
    .to_string()
}

/// # Errors
///
/// Returns [`Error::InvalidAddress`] if the /24 of the DNS server address can't be derived.
pub fn options_config(req: &ConfigRequest) -> Result<String, Error> {
    let dns_ip = req.dns_ip();
    let allow_query =
        address::network(dns_ip).map_err(|_| Error::InvalidAddress(dns_ip.to_string()))?;
    Ok(Options {
        listen_addr: dns_ip,
        listen_port: DNS_PORT,
        allow_query,
        forwarders: FORWARDERS.to_vec(),
    }
    .to_string())
}

pub fn forward_zone(req: &ConfigRequest, date: Date) -> String {
    // NB: host1 resolves to the DNS server's own address, not to the host address.
    ZoneFile {
        default_ttl: DEFAULT_TTL,
        soa: soa(req, date, "Serial (YYYYMMDDnn)"),
        name_servers: name_servers(req),
        records_heading: "A records",
        records: vec![
            ResourceRecord::new("ns1", RecordData::A(req.dns_ip())),
            ResourceRecord::new(req.host1_prefix(), RecordData::A(req.dns_ip())),
            ResourceRecord::new(req.host2_prefix(), RecordData::A(req.host_ip())),
        ],
    }
    .to_string()
}

pub fn reverse_zone(req: &ConfigRequest, date: Date) -> String {
    ZoneFile {
        default_ttl: DEFAULT_TTL,
        soa: soa(req, date, "Serial"),
        name_servers: name_servers(req),
        records_heading: "PTR records",
        records: vec![
            ResourceRecord::new(
                address::last_octet(req.dns_ip()),
                RecordData::Ptr(format!("{}.", req.host1_name())),
            ),
            ResourceRecord::new(
                address::last_octet(req.host_ip()),
                RecordData::Ptr(format!("{}.", req.host2_name())),
            ),
        ],
    }
    .to_string()
}

/// Commands an operator runs after copying the zone files into place. Never executed here.
pub fn permission_commands(req: &ConfigRequest) -> Vec<String> {
    let forward = format!("{ZONE_DIRECTORY}/{}", forward_zone_file(req));
    let reverse = format!("{ZONE_DIRECTORY}/{}", reverse_zone_file(req));
    vec![
        format!("sudo chown root:named {forward}"),
        format!("sudo chmod 640 {forward}"),
        format!("sudo chown root:named {reverse}"),
        format!("sudo chmod 640 {reverse}"),
        "sudo named-checkconf".to_string(),
        format!("sudo named-checkzone {} {forward}", req.domain()),
        format!(
            "sudo named-checkzone {} {reverse}",
            address::reverse_zone(req.dns_ip())
        ),
        "sudo systemctl enable --now named".to_string(),
    ]
}

fn soa(req: &ConfigRequest, date: Date, serial_note: &'static str) -> Soa {
    Soa {
        primary_ns: format!("ns1.{}.", req.domain()),
        admin: format!("admin.{}.", req.domain()),
        serial: serial_number(date),
        serial_note,
        refresh: SOA_REFRESH,
        retry: SOA_RETRY,
        expire: SOA_EXPIRE,
        minimum: SOA_MINIMUM,
    }
}

fn name_servers(req: &ConfigRequest) -> Vec<ResourceRecord> {
    vec![ResourceRecord::new(
        "@",
        RecordData::Ns(format!("ns1.{}.", req.domain())),
    )]
}
