// Attribute formatting for container sensors

use crate::models::Port;
use chrono::{Local, TimeZone};

const CREATED_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// `"{public|N/A}->{private}/{protocol}"` per mapping; mappings bound to an address
/// containing `:` (IPv6 duplicates) are left out.
pub fn format_ports(ports: &[Port]) -> Vec<String> {
    ports
        .iter()
        .filter(|p| !p.ip.as_deref().unwrap_or_default().contains(':'))
        .map(|p| {
            let public = p
                .public_port
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!("{}->{}/{}", public, p.private_port, p.protocol)
        })
        .collect()
}

/// Unix seconds rendered in local time without offset, e.g. `20231114T22:13:20`.
/// Out-of-range timestamps render as the raw number.
pub fn format_created(created: i64) -> String {
    match Local.timestamp_opt(created, 0).earliest() {
        Some(dt) => dt.format(CREATED_FORMAT).to_string(),
        None => created.to_string(),
    }
}
