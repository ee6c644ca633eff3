use serde::Serialize;

/// Runs `log_action` with `value` as pretty JSON, only when DEBUG is enabled.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize + ?Sized,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}

/// First `max_chars` characters of a response body, lossily decoded.
pub(crate) fn body_preview(bytes: &[u8], max_chars: usize) -> String {
    let raw_body = String::from_utf8_lossy(bytes);
    format!("{:.len$}", raw_body, len = max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_by_chars() {
        assert_eq!(body_preview("héllo world".as_bytes(), 5), "héllo");
        assert_eq!(body_preview(b"short", 300), "short");
    }
}
