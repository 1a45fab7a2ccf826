//! Terminal output sanitization.
//!
//! Message content is user-controlled. Anything printed by the CLI goes
//! through [`sanitize`] so stored ANSI escape sequences cannot clear the
//! screen, move the cursor or recolour the terminal.

/// Remove ANSI CSI sequences and control characters other than tab and newlines
///
/// # Examples
///
/// ```
/// use message_history::utils::terminal::sanitize;
///
/// assert_eq!(sanitize("\x1b[31mRed\x1b[0m text"), "Red text");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI runs until its final alphabetic byte
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        out.push(ch);
    }

    out
}

/// First line of `text`, sanitized and cut to `max_chars` with an ellipsis
pub fn preview(text: &str, max_chars: usize) -> String {
    let first_line = sanitize(text.lines().next().unwrap_or(""));
    let more_lines = text.lines().nth(1).is_some();

    if first_line.chars().count() > max_chars {
        let cut: String = first_line.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else if more_lines {
        format!("{} …", first_line)
    } else {
        first_line
    }
}
