//! Structured `named` configuration values and their text renderings.
//!
//! Each artifact kind has exactly one [`Display`][fmt::Display] implementation, so the same value
//! always renders to the same bytes. Nothing here validates input: values are built from an
//! already validated [`ConfigRequest`][crate::request::ConfigRequest].

use std::fmt;
use std::net::Ipv4Addr;

pub const ZONE_DIRECTORY: &str = "/var/named";

const OWNER_WIDTH: usize = 8;
const TYPE_WIDTH: usize = 8;
const SOA_INDENT: &str = "                        ";
const SOA_VALUE_WIDTH: usize = 11;

/// Start of Authority timing and identity for a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub primary_ns: String,
    pub admin: String,
    pub serial: String,
    pub serial_note: &'static str,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Ns(String),
    A(Ipv4Addr),
    Ptr(String),
}

impl RecordData {
    fn kind(&self) -> &'static str {
        match self {
            RecordData::Ns(_) => "NS",
            RecordData::A(_) => "A",
            RecordData::Ptr(_) => "PTR",
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Ns(target) | RecordData::Ptr(target) => f.write_str(target),
            RecordData::A(addr) => write!(f, "{addr}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub owner: String,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(owner: impl Into<String>, data: RecordData) -> Self {
        Self {
            owner: owner.into(),
            data,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            column(&self.owner, OWNER_WIDTH),
            column("IN", OWNER_WIDTH),
            column(self.data.kind(), TYPE_WIDTH),
            self.data
        )
    }
}

/// A complete zone file: default TTL, SOA, name servers and one block of data records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFile {
    pub default_ttl: u32,
    pub soa: Soa,
    pub name_servers: Vec<ResourceRecord>,
    pub records_heading: &'static str,
    pub records: Vec<ResourceRecord>,
}

impl fmt::Display for ZoneFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let soa = &self.soa;
        writeln!(f, "{}{}", column("$TTL", OWNER_WIDTH), self.default_ttl)?;
        writeln!(
            f,
            "{}{}{}{} {} (",
            column("@", OWNER_WIDTH),
            column("IN", OWNER_WIDTH),
            column("SOA", TYPE_WIDTH),
            soa.primary_ns,
            soa.admin
        )?;
        soa_line(f, &soa.serial, soa.serial_note)?;
        soa_line(f, &soa.refresh.to_string(), "Refresh")?;
        soa_line(f, &soa.retry.to_string(), "Retry")?;
        soa_line(f, &soa.expire.to_string(), "Expire")?;
        soa_line(f, &format!("{} )", soa.minimum), "Minimum TTL")?;

        writeln!(f)?;
        writeln!(f, "; Name servers")?;
        for ns in &self.name_servers {
            writeln!(f, "{ns}")?;
        }

        writeln!(f)?;
        writeln!(f, "; {}", self.records_heading)?;
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

fn soa_line(f: &mut fmt::Formatter<'_>, value: &str, note: &str) -> fmt::Result {
    writeln!(f, "{SOA_INDENT}{}; {note}", column(value, SOA_VALUE_WIDTH))
}

/// Left-align `s` in a column of `width`, always leaving at least one space after it.
fn column(s: &str, width: usize) -> String {
    let width = width.max(s.len() + 1);
    format!("{s:<width$}")
}

/// A master zone declaration for `named.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStanza {
    pub name: String,
    pub file: String,
}

impl fmt::Display for ZoneStanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "zone \"{}\" {{", self.name)?;
        writeln!(f, "    type master;")?;
        writeln!(f, "    file \"{ZONE_DIRECTORY}/{}\";", self.file)?;
        writeln!(f, "    allow-transfer {{ none; }};")?;
        writeln!(f, "}};")
    }
}

/// The zone declarations appended to `named.conf`, separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedZones(pub Vec<ZoneStanza>);

impl fmt::Display for NamedZones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stanza) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stanza}")?;
        }
        Ok(())
    }
}

/// The `options { ... };` block of `named.conf`.
///
/// Always recursive, IPv4 only, DNSSEC off, and forwarding only to `forwarders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub listen_addr: Ipv4Addr,
    pub listen_port: u16,
    pub allow_query: String,
    pub forwarders: Vec<Ipv4Addr>,
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loopback = Ipv4Addr::LOCALHOST;
        writeln!(f, "options {{")?;
        writeln!(f, "    directory \"{ZONE_DIRECTORY}\";")?;
        writeln!(f, "    recursion yes;")?;
        writeln!(f)?;
        writeln!(f, "    allow-query {{ {}; {loopback}; }};", self.allow_query)?;
        writeln!(
            f,
            "    listen-on port {} {{ {}; {loopback}; }};",
            self.listen_port, self.listen_addr
        )?;
        writeln!(f, "    listen-on-v6 {{ none; }};")?;
        writeln!(f)?;
        writeln!(f, "    dnssec-enable no;")?;
        writeln!(f, "    dnssec-validation no;")?;
        writeln!(f)?;
        writeln!(f, "    forwarders {{")?;
        for forwarder in &self.forwarders {
            writeln!(f, "        {forwarder};")?;
        }
        writeln!(f, "    }};")?;
        writeln!(f)?;
        writeln!(f, "    forward only;")?;
        writeln!(f, "}};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_columns_align() {
        let rr = ResourceRecord::new("ns1", RecordData::A(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(rr.to_string(), "ns1     IN      A       10.0.0.1");
    }

    #[test]
    fn long_owner_keeps_a_separator() {
        let rr = ResourceRecord::new("fileserver", RecordData::Ptr("fs.example.com.".into()));
        assert_eq!(
            rr.to_string(),
            "fileserver IN      PTR     fs.example.com."
        );
    }

    #[test]
    fn soa_block_layout() {
        let zone = ZoneFile {
            default_ttl: 86_400,
            soa: Soa {
                primary_ns: "ns1.example.com.".into(),
                admin: "admin.example.com.".into(),
                serial: "2024030101".into(),
                serial_note: "Serial",
                refresh: 3_600,
                retry: 1_800,
                expire: 1_209_600,
                minimum: 86_400,
            },
            name_servers: vec![ResourceRecord::new(
                "@",
                RecordData::Ns("ns1.example.com.".into()),
            )],
            records_heading: "A records",
            records: vec![],
        };
        let text = zone.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "$TTL    86400");
        assert_eq!(
            lines[1],
            "@       IN      SOA     ns1.example.com. admin.example.com. ("
        );
        assert_eq!(lines[2], "                        2024030101 ; Serial");
        assert_eq!(lines[3], "                        3600       ; Refresh");
        assert_eq!(lines[5], "                        1209600    ; Expire");
        assert_eq!(lines[6], "                        86400 )    ; Minimum TTL");
        assert_eq!(lines[8], "; Name servers");
        assert_eq!(lines[9], "@       IN      NS      ns1.example.com.");
        assert_eq!(lines[11], "; A records");
    }
}
