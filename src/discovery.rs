//! Neighbor discovery: probe a bounded IPv4 subnet × port range for
//! reachable peers, grounded in the original `FindNeighbors`/`IsFoundHost`
//! helpers (`blockchain_server/pkg/utils/utils.go`) and reworked as async
//! TCP probes fanned out with `peer::probe_reachable`.

use crate::peer::probe_reachable;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::ops::Range;

/// Best-effort local, non-loopback IPv4 address for this process. Falls
/// back to loopback if no outbound route can be determined (e.g. in a
/// sandboxed test environment).
pub fn local_ipv4() -> Ipv4Addr {
    // No real traffic is sent; UDP "connect" just selects the local route
    // the kernel would use to reach that destination, a standard trick for
    // discovering the outbound-facing address without opening a listener.
    let probe = || -> std::io::Result<Ipv4Addr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect("8.8.8.8:80")?;
        match socket.local_addr()?.ip() {
            IpAddr::V4(v4) => Ok(v4),
            IpAddr::V6(_) => Ok(Ipv4Addr::LOCALHOST),
        }
    };
    probe().unwrap_or(Ipv4Addr::LOCALHOST)
}

/// Scan `A.B.C.(1+ip):port` for `ip` in `ip_range` and `port` in
/// `port_range`, skipping this node's own `host:port`. Preserves the
/// original's `lastIp = 1` offset exactly (SPEC_FULL.md §9.6).
///
/// If `my_host` does not parse as an IPv4 dotted quad, the scan yields no
/// neighbors (mirrors the original's silent-clear behavior when its regex
/// match fails).
pub async fn find_neighbors(
    my_host: Ipv4Addr,
    my_port: u16,
    ip_range: Range<u8>,
    port_range: Range<u16>,
) -> HashSet<String> {
    let octets = my_host.octets();
    let prefix = format!("{}.{}.{}", octets[0], octets[1], octets[2]);
    let my_address = format!("{my_host}:{my_port}");

    let mut neighbors = HashSet::new();
    for port in port_range {
        for ip in ip_range.clone() {
            let last_octet = 1u16 + ip as u16;
            if last_octet > 255 {
                continue;
            }
            let guess_host = format!("{prefix}.{last_octet}");
            let guess_target = format!("{guess_host}:{port}");
            if guess_target == my_address {
                continue;
            }
            if probe_reachable(&guess_host, port).await {
                neighbors.insert(guess_target);
            }
        }
    }
    neighbors
}
