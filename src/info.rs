use std::collections::HashMap;

use serde::Serialize;

/// Best-effort server telemetry extracted from raw INFO fields.
///
/// Every value is a display string; `-` stands in for anything the server
/// did not report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub version: String,
    pub mode: String,
    pub used_memory: String,
    pub total_memory: String,
    pub clients: String,
}

impl ServerInfo {
    pub(crate) fn from_raw(fields: &HashMap<String, String>) -> Self {
        Self {
            version: field(fields, "redis_version"),
            mode: field(fields, "redis_mode"),
            used_memory: human_or_bytes(fields, &["used_memory_human"], &["used_memory"]),
            total_memory: human_or_bytes(
                fields,
                &["total_system_memory_human", "maxmemory_human"],
                &["total_system_memory", "maxmemory"],
            ),
            clients: field(fields, "connected_clients"),
        }
    }
}

fn field(fields: &HashMap<String, String>, name: &str) -> String {
    match fields.get(name) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => "-".to_string(),
    }
}

/// Prefers a human-readable field, falls back to a raw byte count rendered
/// as `<n> bytes`, then to the placeholder.
fn human_or_bytes(
    fields: &HashMap<String, String>,
    human_names: &[&str],
    byte_names: &[&str],
) -> String {
    for name in human_names {
        if let Some(value) = fields.get(*name) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    for name in byte_names {
        if let Some(value) = fields.get(*name) {
            if !value.is_empty() {
                return format!("{value} bytes");
            }
        }
    }
    "-".to_string()
}
