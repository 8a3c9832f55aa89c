//! `named` (BIND) configuration generation.
//!
//! From a [`ConfigRequest`][crate::request::ConfigRequest] four artifacts are produced:
//!
//! * zone declarations to append to `named.conf`,
//! * an `options` block,
//! * the forward zone file for the domain (`db.<domain>`),
//! * the reverse zone file for the DNS server's /24 (`db.<a.b.c>`).
//!
//! E.g. for DNS server `192.168.1.10`, host `192.168.1.20`, domain `example.com` and prefixes
//! `web1`/`web2`, the reverse zone file looks like:
//!
//! ```text
//! $TTL    86400
//! @       IN      SOA     ns1.example.com. admin.example.com. (
//!                         2024030701 ; Serial
//!                         3600       ; Refresh
//!                         1800       ; Retry
//!                         1209600    ; Expire
//!                         86400 )    ; Minimum TTL
//!
//! ; Name servers
//! @       IN      NS      ns1.example.com.
//!
//! ; PTR records
//! 10      IN      PTR     web1.example.com.
//! 20      IN      PTR     web2.example.com.
//! ```
//!
//! Alongside the artifacts, [`generator::permission_commands`] lists the shell commands an
//! operator runs to install them, and [`network`] the host network and firewall commands. None
//! of these commands are executed by zonecrab.

pub mod address;
pub mod generator;
pub mod network;
pub mod render;

pub use generator::{generate, generate_today, serial_number, ZoneArtifacts};
