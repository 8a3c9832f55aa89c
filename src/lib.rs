//! zonecrab
//!
//! Generates [BIND] configuration for a DNS server + host pair on a local network, and runs and
//! interprets a fixed set of `dig`/`ping` diagnostics against it.
//!
//! The core is synchronous and transport agnostic:
//!
//! * [`zone`] derives `named.conf` zones, the `options` block and both zone files from a
//!   [`ConfigRequest`],
//! * [`probe`] executes the diagnostic commands with a bounded timeout,
//! * [`interpret`] parses their output into typed records,
//! * [`narrate`] turns each record into a readable summary.
//!
//! [`api`] exposes all of it over HTTP.
//!
//! [BIND]: https://www.isc.org/bind/
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpret;
pub mod narrate;
pub mod probe;
pub mod request;
pub mod zone;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use probe::ProcessExecutor;
pub use request::ConfigRequest;
