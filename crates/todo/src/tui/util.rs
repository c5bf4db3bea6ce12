use std::borrow::Cow;

use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;

/// Terminal columns `text` occupies. Wide characters (CJK, most emoji) count as two.
pub(super) fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Shorten `input` to at most `max_width` terminal columns, ending with `...`
/// when anything was cut. Graphemes are never split.
pub(super) fn truncate_with_ellipsis(input: &str, max_width: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_WIDTH: usize = 3;

    if max_width == 0 {
        return Cow::Owned(String::new());
    }

    if display_width(input) <= max_width {
        return Cow::Borrowed(input);
    }

    let (budget, ellipsis) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut used = 0;
    let mut truncated = String::new();
    for grapheme in input.graphemes(true) {
        let width = display_width(grapheme);
        if used + width > budget {
            break;
        }
        used += width;
        truncated.push_str(grapheme);
    }
    truncated.push_str(ellipsis);
    Cow::Owned(truncated)
}

/// Join `segments` with `separator`, keeping only the leading segments that
/// fit in `max_width` columns. A segment is either shown whole or not at all.
pub(super) fn fit_segments(segments: &[String], separator: &str, max_width: usize) -> String {
    let mut line = String::new();
    let mut used = 0;
    for segment in segments {
        let extra = if line.is_empty() { 0 } else { display_width(separator) };
        let width = extra + display_width(segment);
        if used + width > max_width {
            break;
        }
        if !line.is_empty() {
            line.push_str(separator);
        }
        line.push_str(segment);
        used += width;
    }
    line
}

/// Drop the last grapheme of `text`, so combined characters go in one keypress.
pub(super) fn pop_grapheme(text: &mut String) {
    if let Some((index, _)) = text.grapheme_indices(true).next_back() {
        text.truncate(index);
    }
}
