//! HTTP API for generating DNS configuration and running diagnostics.
//!
//! # API Endpoints
//!
//! ## `/health` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body
//!   `{"status":"healthy","service":"DNS Configuration API"}` when the service is operational.
//!
//! ## `/generate-dns-config` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   {
//!     "dns_ip": "192.168.1.10", "host_ip": "192.168.1.20", "domain": "example.com",
//!     "host1_prefix": "web1", "host2_prefix": "web2",
//!     "dns_interface": "eno1", "dns_username": "root",
//!     "host_interface": "eno1", "host_username": "root"
//!   }
//!   ```
//!
//!  The interface and username fields are optional and only echoed back under
//!  `connection_info`. Returns the four [generated artifacts][crate::zone] under
//!  `configurations`, the zone file names under `file_names` and the eight
//!  `permission_commands` to install them. Nothing is written to disk or executed.
//!
//! ## `/test-dns` (POST)
//!
//!   Expects the five target fields (`dns_ip`, `host_ip`, `domain`, `host1_prefix`,
//!   `host2_prefix`) and runs every [probe][crate::probe] against them. Returns:
//!
//!   ```json
//!   {
//!     "success": false,
//!     "timestamp": "2024-03-05T10:12:01.123Z",
//!     "test_results": {
//!       "dig_host1": {
//!         "command": "dig @192.168.1.10 web1.example.com",
//!         "success": true,
//!         "return_code": 0,
//!         "rich_summary": "DNS query for host1 was successful. ...",
//!         "parsed_data": { "query_time_ms": 23, ... },
//!         "raw_stdout": "...",
//!         "stderr": ""
//!       },
//!       ...
//!     },
//!     "input_parameters": { ... }
//!   }
//!   ```
//!
//!  `success` is true only if all five probes succeeded. The response always has five entries
//!  under `test_results`.
//!
//! ## `/network-config` (POST)
//!
//!   Expects `{"dns_ip": "...", "domain": "...", "interface": "eno1"}`, with `interface`
//!   optional. Returns the `nmcli` `network_commands` and `firewall_commands` that point a host
//!   at the DNS server.
//!
//! Missing or malformed target fields return HTTP 400 (Bad Request) with a JSON body of the
//! form `{"error": "..."}`.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
