//! RFC 1918 private address classification.

use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// `10.0.0.0/8`, `172.16.0.0/12` and `192.168.0.0/16`.
pub fn private_ranges() -> [Ipv4Net; 3] {
    [
        Ipv4Net::new_assert(Ipv4Addr::new(10, 0, 0, 0), 8),
        Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 12),
        Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 0, 0), 16),
    ]
}

/// Whether the address falls inside any private range.
pub fn is_private(addr: Ipv4Addr) -> bool {
    private_ranges().iter().any(|net| net.contains(&addr))
}
