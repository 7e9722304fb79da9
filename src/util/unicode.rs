//! Grapheme- and width-aware helpers for cursor movement in the editor.
//! Offsets are byte offsets into UTF-8 text; columns are terminal cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies
const TAB_WIDTH: usize = 4;

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        TAB_WIDTH
    } else {
        UnicodeWidthStr::width(g)
    }
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Next grapheme boundary after `byte_offset`. None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Previous grapheme boundary before `byte_offset`. None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(byte_offset - g.len())
}

/// Display column of a byte offset
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    let mut end = byte_offset.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    display_width(&s[..end])
}

/// Byte offset of a display column. A column inside a wide grapheme maps to
/// that grapheme's start; a column past the end maps to `s.len()`.
pub fn display_col_to_byte_offset(s: &str, target_col: usize) -> usize {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        col += grapheme_width(g);
        if col > target_col {
            return i;
        }
    }
    s.len()
}

/// Start of the word before `byte_offset` (whitespace-delimited)
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let Some(head) = s.get(..byte_offset) else {
        return 0;
    };
    let graphemes: Vec<(usize, &str)> = head.grapheme_indices(true).collect();
    let mut idx = graphemes.len();
    while idx > 0 && is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(0, |(i, _)| *i)
}

/// Start of the next word after `byte_offset` (whitespace-delimited)
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let Some(tail) = s.get(byte_offset..) else {
        return s.len();
    };
    let mut graphemes = tail.grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_blank(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_blank(g)).is_some() {}
    graphemes
        .peek()
        .map_or(s.len(), |(i, _)| byte_offset + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_mixed_text() {
        assert_eq!(display_width("- abc"), 5);
        assert_eq!(display_width("次に"), 4);
        assert_eq!(display_width("a\tb"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn grapheme_steps_skip_combining_marks() {
        // "e" + combining acute accent is one grapheme of three bytes
        let s = "ae\u{301}b";
        assert_eq!(next_grapheme_boundary(s, 1), Some(4));
        assert_eq!(prev_grapheme_boundary(s, 4), Some(1));
        assert_eq!(next_grapheme_boundary(s, s.len()), None);
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn emoji_is_one_step() {
        let s = "⏰x";
        assert_eq!(next_grapheme_boundary(s, 0), Some("⏰".len()));
        assert_eq!(prev_grapheme_boundary(s, "⏰".len()), Some(0));
    }

    #[test]
    fn columns_and_offsets() {
        let s = "- 日本語";
        assert_eq!(byte_offset_to_display_col(s, 2), 2);
        assert_eq!(byte_offset_to_display_col(s, 5), 4);
        assert_eq!(display_col_to_byte_offset(s, 4), 5);
        // inside the wide character snaps back to its start
        assert_eq!(display_col_to_byte_offset(s, 3), 2);
        assert_eq!(display_col_to_byte_offset(s, 99), s.len());
    }

    #[test]
    fn word_boundaries() {
        let s = "write the report";
        assert_eq!(word_boundary_left(s, s.len()), 10);
        assert_eq!(word_boundary_left(s, 10), 6);
        assert_eq!(word_boundary_left(s, 3), 0);
        assert_eq!(word_boundary_right(s, 0), 6);
        assert_eq!(word_boundary_right(s, 6), 10);
        assert_eq!(word_boundary_right(s, 12), s.len());
    }
}
