//! Topic input validation, shared by the add and remove flows.

/// Longest topic accepted, in characters
pub const MAX_TOPIC_CHARS: usize = 200;

/// Normalizes user-entered topic text: trims surrounding whitespace and
/// rejects blank or overlong input. The trimmed text is the topic's identity.
pub fn normalize_topic(raw: &str) -> Result<String, &'static str> {
    let topic = raw.trim();
    if topic.is_empty() {
        return Err("Topic cannot be empty");
    }
    if topic.chars().count() > MAX_TOPIC_CHARS {
        return Err("Topic is too long");
    }
    if topic.chars().any(char::is_control) {
        return Err("Topic cannot contain control characters");
    }
    Ok(topic.to_string())
}

/// Checks text used to find an existing topic. Stored topics may predate the
/// rules in `normalize_topic`, so only blank text is refused.
pub fn validate_lookup(raw: &str) -> Result<(), &'static str> {
    if raw.trim().is_empty() {
        return Err("Topic cannot be empty");
    }
    Ok(())
}
