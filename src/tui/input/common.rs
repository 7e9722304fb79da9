use crate::util::unicode;

/// Convert (line, display column) to a byte offset in a multi-line buffer,
/// snapping to a grapheme boundary and clamping to the line's end.
pub fn offset_for_line_col(text: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, l) in text.split('\n').enumerate() {
        if i == line {
            return offset + unicode::display_col_to_byte_offset(l, col);
        }
        offset += l.len() + 1;
    }
    text.len()
}

/// Convert a byte offset to (line, display column) in a multi-line buffer.
pub fn cursor_line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut remaining = offset.min(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if remaining <= line.len() {
            return (i, unicode::byte_offset_to_display_col(line, remaining));
        }
        remaining -= line.len() + 1;
    }
    (0, 0)
}

/// Move the cursor one line up or down, keeping its display column
pub(super) fn vertical_move(text: &str, offset: usize, delta: i32) -> usize {
    let (line, col) = cursor_line_col(text, offset);
    let line_count = text.split('\n').count();
    let target = line as i64 + delta as i64;
    if target < 0 || target >= line_count as i64 {
        return offset;
    }
    offset_for_line_col(text, target as usize, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_round_trips_ascii() {
        let text = "- a\n  - bcd\n- e";
        assert_eq!(cursor_line_col(text, 0), (0, 0));
        assert_eq!(cursor_line_col(text, 8), (1, 4));
        assert_eq!(offset_for_line_col(text, 1, 4), 8);
        assert_eq!(cursor_line_col(text, text.len()), (2, 3));
    }

    #[test]
    fn columns_are_display_cells() {
        // each CJK character is two cells wide
        let text = "- 日本\n- abcdef";
        assert_eq!(cursor_line_col(text, "- 日本".len()), (0, 6));
        let below = offset_for_line_col(text, 1, 6);
        assert_eq!(&text[below..], "ef");
    }

    #[test]
    fn vertical_move_clamps_to_shorter_line() {
        let text = "- abcdef\n- x";
        let end_of_first = "- abcdef".len();
        assert_eq!(vertical_move(text, end_of_first, 1), text.len());
        assert_eq!(vertical_move(text, 0, -1), 0);
        assert_eq!(vertical_move(text, text.len(), 1), text.len());
    }

    #[test]
    fn vertical_move_lands_on_char_boundary() {
        let text = "abc\n日本";
        // column 1 falls inside the first wide character
        let off = vertical_move(text, 1, 1);
        assert_eq!(off, 4);
        assert!(text.is_char_boundary(off));
    }
}
