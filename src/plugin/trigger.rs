//! Trigger matching for the like command.

/// Regex form of the trigger, for hosts that route commands by pattern.
pub const LIKE_COMMAND_PATTERN: &str = r"^(((/|#)(like))|(/|#)?(赞我|麦麦赞我))$";

/// Whether `text` invokes the like command.
///
/// `like` needs a `/` or `#` prefix; `赞我` and `麦麦赞我` accept one
/// optionally. Surrounding whitespace is ignored.
#[must_use]
pub fn is_like_trigger(text: &str) -> bool {
    let command = text.trim();
    match command.strip_prefix(['/', '#']) {
        Some(rest) => matches!(rest, "like" | "赞我" | "麦麦赞我"),
        None => matches!(command, "赞我" | "麦麦赞我"),
    }
}
