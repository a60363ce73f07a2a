//! SSRF (Server-Side Request Forgery) protection.
//!
//! A page may only be fetched when every address its host resolves to is public.
//! Literal hosts are checked up front and on each redirect; names are checked
//! inside the client's resolver so the checked addresses are the ones dialed.

use std::net::{IpAddr, SocketAddr};
use std::sync::LazyLock;

use ipnet::IpNet;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use url::{Host, Url};

/// Ranges the std `is_*` helpers do not cover.
static RESERVED_NETS: LazyLock<Vec<IpNet>> = LazyLock::new(|| {
    [
        "100.64.0.0/10",   // carrier-grade NAT
        "192.0.0.0/24",    // IETF protocol assignments
        "192.0.2.0/24",    // TEST-NET-1
        "198.18.0.0/15",   // benchmarking
        "198.51.100.0/24", // TEST-NET-2
        "203.0.113.0/24",  // TEST-NET-3
        "240.0.0.0/4",     // reserved
        "2001:db8::/32",   // IPv6 documentation
        "fc00::/7",        // IPv6 unique local
        "fe80::/10",       // IPv6 link-local
    ]
    .iter()
    .filter_map(|net| net.parse().ok())
    .collect()
});

/// Error type for SSRF validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SsrfError {
    #[error("blocked IP: {0} (private/reserved)")]
    BlockedIp(IpAddr),

    #[error("DNS resolution failed for {host}: {reason}")]
    DnsError { host: String, reason: String },

    #[error("URL has no host")]
    MissingHost,
}

/// Check if an IP address is private, reserved, or otherwise blocked.
///
/// This covers loopback, RFC 1918, link-local, multicast, broadcast, unspecified,
/// carrier-grade NAT, documentation/benchmark ranges, and IPv6 unique-local.
/// IPv4-mapped IPv6 addresses are judged by their IPv4 form.
pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    let ip = match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(IpAddr::V6(v6), IpAddr::V4),
        v4 => v4,
    };

    let std_blocked = match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_multicast() || v6.is_unspecified(),
    };

    std_blocked || RESERVED_NETS.iter().any(|net| net.contains(&ip))
}

/// Validate that an IP address is not private or reserved.
pub fn validate_ip(ip: IpAddr) -> Result<(), SsrfError> {
    if is_private_or_reserved(ip) { Err(SsrfError::BlockedIp(ip)) } else { Ok(()) }
}

/// Check the parts of `url`'s host that need no DNS: literal addresses and
/// `localhost` names.
///
/// Domain names are judged later by [`PublicResolver`] when the connection is made.
pub fn check_literal_host(url: &Url) -> Result<(), SsrfError> {
    match url.host().ok_or(SsrfError::MissingHost)? {
        Host::Ipv4(v4) => validate_ip(IpAddr::V4(v4)),
        Host::Ipv6(v6) => validate_ip(IpAddr::V6(v6)),
        Host::Domain(domain) if is_localhost(domain) => Err(SsrfError::BlockedIp(IpAddr::from([127, 0, 0, 1]))),
        Host::Domain(_) => Ok(()),
    }
}

fn is_localhost(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    domain.eq_ignore_ascii_case("localhost") || domain.to_ascii_lowercase().ends_with(".localhost")
}

/// Resolve `host` and require every answer to be public.
///
/// One private answer blocks the host.
pub async fn resolve_public(host: &str) -> Result<Vec<SocketAddr>, SsrfError> {
    if is_localhost(host) {
        return Err(SsrfError::BlockedIp(IpAddr::from([127, 0, 0, 1])));
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| SsrfError::DnsError { host: host.to_string(), reason: e.to_string() })?
        .collect();

    if addrs.is_empty() {
        return Err(SsrfError::DnsError { host: host.to_string(), reason: "no addresses".to_string() });
    }

    for addr in &addrs {
        validate_ip(addr.ip())?;
    }

    Ok(addrs)
}

/// DNS resolver for the HTTP client that only hands out public addresses.
///
/// The connection uses exactly the addresses that were checked, on the first
/// request and on every redirect hop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicResolver;

impl Resolve for PublicResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            match resolve_public(name.as_str()).await {
                Ok(addrs) => Ok(Box::new(addrs.into_iter()) as Addrs),
                Err(e) => Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
            }
        })
    }
}
