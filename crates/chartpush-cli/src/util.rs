//! Shared utility functions for CLI commands

use serde_json::Value;

/// Extract a human-readable message from a repository response body
///
/// ChartMuseum answers failures with `{"error": "..."}`; anything else is
/// shown as-is, falling back to the status reason when the body is empty.
#[must_use]
pub fn server_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(error)) = map.get("error") {
            return error.clone();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("no response body").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a byte size as a human-readable string
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_json_error() {
        assert_eq!(
            server_message(r#"{"error":"file already exists"}"#, Some("Conflict")),
            "file already exists"
        );
    }

    #[test]
    fn test_server_message_plain_body() {
        assert_eq!(server_message("  bad gateway\n", None), "bad gateway");
        assert_eq!(server_message(r#"{"saved":false}"#, None), r#"{"saved":false}"#);
    }

    #[test]
    fn test_server_message_empty_body() {
        assert_eq!(server_message("", Some("Not Found")), "Not Found");
        assert_eq!(server_message("", None), "no response body");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5242880), "5.00 MB");
    }
}
