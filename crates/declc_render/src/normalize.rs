//! Whitespace normalization of rendered code.

/// Normalizes whitespace in generated code.
///
/// Strips trailing whitespace, drops blank lines at the start, after a line
/// ending in `{` and before a line starting with `}`, collapses runs of
/// blank lines, and ends the text with exactly one newline.
#[must_use]
pub fn normalize(code: &str) -> String {
    let lines: Vec<&str> = code.lines().map(str::trim_end).collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            let after_open = kept
                .last()
                .is_none_or(|prev| prev.is_empty() || prev.ends_with('{'));
            let before_close = lines[i + 1..]
                .iter()
                .find(|next| !next.is_empty())
                .is_none_or(|next| next.trim_start().starts_with('}'));
            if after_open || before_close {
                continue;
            }
        }
        kept.push(line);
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}
