//! mDNS TXT record parsing for touch remotes.

use dacp_core::{DiscoveryError, TouchRemote};
use std::collections::HashMap;
use std::net::IpAddr;

/// TXT key holding the remote's display name.
pub const DEVICE_NAME_KEY: &str = "DvNm";

/// TXT key holding the pairing identifier.
pub const PAIR_ID_KEY: &str = "Pair";

/// Parser for `_touch-remote._tcp` TXT records.
pub struct TxtRecordParser;

impl TxtRecordParser {
    /// Build a `TouchRemote` from a resolved service.
    ///
    /// `service_name` only appears in errors. The first IPv4 address wins; remotes
    /// reachable only over IPv6 are rejected.
    pub fn parse_touch_remote(
        service_name: &str,
        txt: &HashMap<String, String>,
        addresses: &[IpAddr],
        port: u16,
    ) -> Result<TouchRemote, DiscoveryError> {
        let name = txt
            .get(DEVICE_NAME_KEY)
            .ok_or(DiscoveryError::MissingProperty(DEVICE_NAME_KEY))?;
        let pair_id = txt
            .get(PAIR_ID_KEY)
            .ok_or(DiscoveryError::MissingProperty(PAIR_ID_KEY))?;

        let address = addresses
            .iter()
            .find_map(|addr| match addr {
                IpAddr::V4(v4) => Some(*v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| DiscoveryError::NoAddress(service_name.to_string()))?;

        Ok(TouchRemote::new(name.as_str(), address, port, pair_id.as_str()))
    }

    /// Instance name without the service type and domain.
    pub fn instance_name(fullname: &str) -> &str {
        fullname
            .strip_suffix(crate::TOUCH_REMOTE_SERVICE_TYPE)
            .map(|s| s.trim_end_matches('.'))
            .unwrap_or(fullname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn make_txt(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    mod parse_touch_remote {
        use super::*;

        #[test]
        fn parses_ios_remote_record() {
            let txt = make_txt(&[
                ("DvNm", "Kitchen iPhone"),
                ("RemV", "10000"),
                ("DvTy", "iPhone"),
                ("RemN", "Remote"),
                ("txtvers", "1"),
                ("Pair", "D89F3C2D8E7A4B11"),
            ]);
            let remote = TxtRecordParser::parse_touch_remote(
                "ABCDEF",
                &txt,
                &[IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))],
                50123,
            )
            .unwrap();

            assert_eq!(remote.name, "Kitchen iPhone");
            assert_eq!(remote.pair_id, "D89F3C2D8E7A4B11");
            assert_eq!(remote.address, Ipv4Addr::new(192, 168, 1, 20));
            assert_eq!(remote.port, 50123);
        }

        #[test]
        fn prefers_ipv4_address() {
            let txt = make_txt(&[("DvNm", "iPad"), ("Pair", "0000000000000001")]);
            let addresses = [
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)),
            ];
            let remote = TxtRecordParser::parse_touch_remote("x", &txt, &addresses, 1024).unwrap();
            assert_eq!(remote.address, Ipv4Addr::new(10, 0, 0, 7));
        }

        #[test]
        fn error_on_missing_device_name() {
            let txt = make_txt(&[("Pair", "0000000000000001")]);
            let err = TxtRecordParser::parse_touch_remote(
                "x",
                &txt,
                &[IpAddr::V4(Ipv4Addr::LOCALHOST)],
                1024,
            )
            .unwrap_err();
            assert!(matches!(err, DiscoveryError::MissingProperty("DvNm")));
        }

        #[test]
        fn error_on_missing_pair_id() {
            let txt = make_txt(&[("DvNm", "iPad")]);
            let err = TxtRecordParser::parse_touch_remote(
                "x",
                &txt,
                &[IpAddr::V4(Ipv4Addr::LOCALHOST)],
                1024,
            )
            .unwrap_err();
            assert!(matches!(err, DiscoveryError::MissingProperty("Pair")));
        }

        #[test]
        fn error_on_ipv6_only() {
            let txt = make_txt(&[("DvNm", "iPad"), ("Pair", "1")]);
            let err = TxtRecordParser::parse_touch_remote(
                "ABCDEF",
                &txt,
                &[IpAddr::V6(Ipv6Addr::LOCALHOST)],
                1024,
            )
            .unwrap_err();
            assert!(matches!(err, DiscoveryError::NoAddress(name) if name == "ABCDEF"));
        }
    }

    mod instance_name {
        use super::*;

        #[test]
        fn strips_service_type() {
            assert_eq!(
                TxtRecordParser::instance_name("0D1E2F3A4B5C6D7E._touch-remote._tcp.local."),
                "0D1E2F3A4B5C6D7E"
            );
        }

        #[test]
        fn leaves_other_names_alone() {
            assert_eq!(
                TxtRecordParser::instance_name("foo._http._tcp.local."),
                "foo._http._tcp.local."
            );
        }
    }
}
