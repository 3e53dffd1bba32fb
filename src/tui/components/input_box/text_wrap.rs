//! Wrapping and cursor geometry for the composer.
//!
//! Pure functions over `&str`; the composer owns the buffer and the cursor.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the composer scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Border (1) + padding (1) before the first content column
pub(super) const CONTENT_OFFSET_X: u16 = 2;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Content width inside borders and padding; 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display rows. A trailing newline yields an empty last row.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut rows: Vec<String> = Vec::new();
    for logical in text.split('\n') {
        if logical.is_empty() {
            rows.push(String::new());
        } else {
            rows.extend(
                textwrap::wrap(logical, wrap_options(width))
                    .into_iter()
                    .map(|row| row.into_owned()),
            );
        }
    }
    rows
}

/// Row and column of the byte offset `pos` once `text` is wrapped at `width`.
pub(super) fn cursor_row_col(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let before = &text[..pos];
    let logical_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let rows_above = wrap_rows(&before[..logical_start], width).len().saturating_sub(1);

    // Column is counted from the raw text; textwrap drops trailing spaces
    let current = &before[logical_start..];
    if width == 0 || current.is_empty() {
        return (rows_above as u16, 0);
    }
    let segments = textwrap::wrap(current, wrap_options(width));
    let chars_before: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|s| s.chars().count())
        .sum();
    let col = current.chars().count().saturating_sub(chars_before);
    let row = rows_above + segments.len().saturating_sub(1);
    (row as u16, col as u16)
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Byte range `(start, end)` of the logical line containing `pos`.
pub(super) fn line_bounds(text: &str, pos: usize) -> (usize, usize) {
    let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[pos..]
        .find('\n')
        .map(|i| pos + i)
        .unwrap_or(text.len());
    (start, end)
}

/// Byte offset `chars` characters into `line`, clamped to its end.
pub(super) fn offset_at_char(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
