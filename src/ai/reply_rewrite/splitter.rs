//! Splits rewritten text into chat-sized segments.

const SENTENCE_ENDINGS: [char; 7] = ['。', '！', '？', '!', '?', '～', '~'];

/// Splits `text` into the segments that should be sent as separate messages.
///
/// With `enable_splitter` unset the trimmed text is a single segment. When
/// set, text is cut after line breaks and sentence-final punctuation; runs
/// of punctuation stay attached to their sentence and blank pieces are
/// dropped.
#[must_use]
pub fn split_reply(text: &str, enable_splitter: bool) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !enable_splitter {
        return vec![trimmed.to_owned()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();

    while let Some(character) = chars.next() {
        if character == '\n' {
            push_segment(&mut segments, &mut current);
            continue;
        }
        current.push(character);
        let next_continues_run = chars
            .peek()
            .is_some_and(|next| SENTENCE_ENDINGS.contains(next));
        if SENTENCE_ENDINGS.contains(&character) && !next_continues_run {
            push_segment(&mut segments, &mut current);
        }
    }
    push_segment(&mut segments, &mut current);

    segments
}

fn push_segment(segments: &mut Vec<String>, current: &mut String) {
    let piece = current.trim();
    if !piece.is_empty() {
        segments.push(piece.to_owned());
    }
    current.clear();
}
