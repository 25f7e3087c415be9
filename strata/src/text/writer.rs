//! Writer-side post-processing.
//!
//! A companion toolchain's own writer always terminates its files with
//! exactly two line-ending sequences. To emit text that compares equal
//! to such files, the padding is applied to fully rendered text rather
//! than by mutating tokens.

/// Rewrites `text` so it ends with exactly two `newline` sequences,
/// regardless of how many terminators the content naturally produced.
///
/// # Examples
///
/// ```
/// use strata::text::pad_double_newline;
///
/// assert_eq!(pad_double_newline("A=1", "\n"), "A=1\n\n");
/// assert_eq!(pad_double_newline("A=1\n\n\n\n", "\n"), "A=1\n\n");
/// assert_eq!(pad_double_newline("A=1\r\n", "\r\n"), "A=1\r\n\r\n");
/// ```
#[must_use]
pub fn pad_double_newline(text: &str, newline: &str) -> String {
    let mut body = text;
    loop {
        if let Some(stripped) = body.strip_suffix("\r\n") {
            body = stripped;
        } else if let Some(stripped) = body.strip_suffix('\n') {
            body = stripped;
        } else if let Some(stripped) = body.strip_suffix('\r') {
            body = stripped;
        } else {
            break;
        }
    }
    let mut out = String::with_capacity(body.len() + 2 * newline.len());
    out.push_str(body);
    out.push_str(newline);
    out.push_str(newline);
    out
}
