use serde::Serialize;

/// Upper bound for payload previews written to the log.
pub(crate) const PAYLOAD_PREVIEW_CHARS: usize = 4096;

/// Hands a pretty-printed, length-capped JSON rendering of `value` to `log_action`.
///
/// Serialization only happens when the DEBUG level is enabled.
pub(crate) fn debug_json_preview<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    let preview = match pretty.char_indices().nth(PAYLOAD_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...<truncated>", &pretty[..idx]),
        None => pretty,
    };
    log_action(preview.as_str());
}
