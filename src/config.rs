use crate::error::Error;
use ipnetwork::IpNetwork;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: Duration,
    #[serde(default = "default_interface")]
    pub default_interface: String,
}

fn default_probe_timeout() -> Duration {
    crate::probe::DEFAULT_TIMEOUT
}

fn default_interface() -> String {
    "eno1".to_string()
}

lazy_static! {
    // NOTE(XXX): Once the "ip" feature has stabilized we can use Ipv6Addr.is_unique_local[0].
    //            Presently this feature is unstable so we home-roll. See also RFC 4193[1].
    // [0]: https://doc.rust-lang.org/std/net/struct.Ipv6Addr.html#method.is_unique_local
    // [1]: https://www.rfc-editor.org/rfc/rfc4193.html
    static ref IPV6_UNIQUE_LOCAL_NETWORK: IpNetwork = IpNetwork::from_str("fc00::/7").unwrap();
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.bind_addr_is_secure()?;
        self.timeouts_are_ordered()
    }

    fn bind_addr_is_secure(&self) -> Result<(), Error> {
        match self.api_bind_addr {
            SocketAddr::V4(v4_addr) => {
                let ip = v4_addr.ip();
                if !ip.is_loopback() && !ip.is_private() {
                    return Err(Error::InsecureAPIBind(IpAddr::V4(*ip)));
                }
                Ok(())
            }
            SocketAddr::V6(v6_addr) => {
                let ip = v6_addr.ip();
                if !ip.is_loopback() && !IPV6_UNIQUE_LOCAL_NETWORK.contains(IpAddr::V6(*ip)) {
                    return Err(Error::InsecureAPIBind(IpAddr::V6(*ip)));
                }
                Ok(())
            }
        }
    }

    fn timeouts_are_ordered(&self) -> Result<(), Error> {
        if self.api_timeout <= self.probe_timeout {
            return Err(Error::ApiTimeoutTooShort {
                api: self.api_timeout,
                probe: self.probe_timeout,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Config {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = parse(r#"{"api_bind_addr": "127.0.0.1:5000", "api_timeout": 60}"#);
        assert_eq!(config.probe_timeout, Duration::from_secs(30));
        assert_eq!(config.default_interface, "eno1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn private_bind_is_accepted() {
        let config = parse(r#"{"api_bind_addr": "10.42.0.1:5000", "api_timeout": 60}"#);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn public_bind_is_rejected() {
        let config = parse(r#"{"api_bind_addr": "8.8.8.8:5000", "api_timeout": 60}"#);
        assert!(matches!(
            config.validate(),
            Err(Error::InsecureAPIBind(IpAddr::V4(_)))
        ));
    }

    #[test]
    fn unique_local_v6_bind_is_accepted() {
        let config = parse(r#"{"api_bind_addr": "[fd00::1]:5000", "api_timeout": 60}"#);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn api_timeout_must_exceed_probe_timeout() {
        let config = parse(
            r#"{"api_bind_addr": "127.0.0.1:5000", "api_timeout": 30, "probe_timeout": 30}"#,
        );
        assert!(matches!(
            config.validate(),
            Err(Error::ApiTimeoutTooShort { .. })
        ));
    }
}
