use crate::parse::bullet::{BULLET_MARKER, BulletLine};

/// Spaces added or removed per indent step
pub const INDENT_STEP: usize = 2;

/// Keys with structural meaning inside a task field.
/// Everything else is plain text input handled by the host widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKey {
    Tab,
}

/// Result of a structural edit: the whole new text plus where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub text: String,
    /// Byte offset into `text`
    pub cursor: usize,
}

/// Apply a structural keystroke to the line under the cursor.
///
/// Tab indents the line by two spaces (Shift+Tab removes two, never going
/// below zero), makes sure it carries exactly one `- ` marker, and puts the
/// cursor at the start of the line's content. Only that line changes.
pub fn on_structural_key(text: &str, cursor: usize, key: StructuralKey, shift: bool) -> LineEdit {
    match key {
        StructuralKey::Tab => reindent_line(text, cursor, shift),
    }
}

fn reindent_line(text: &str, cursor: usize, outdent: bool) -> LineEdit {
    let cursor = floor_char_boundary(text, cursor);
    let (line_start, line_end) = line_bounds(text, cursor);
    let line = &text[line_start..line_end];

    let mut parsed = BulletLine::parse(line);
    parsed.indent = if outdent {
        parsed.indent.saturating_sub(INDENT_STEP)
    } else {
        parsed.indent + INDENT_STEP
    };
    let indent = parsed.indent;
    let new_line = parsed.with_marker().render();

    let content_start = (indent + BULLET_MARKER.len()).min(new_line.len());

    let mut new_text = String::with_capacity(text.len() + INDENT_STEP);
    new_text.push_str(&text[..line_start]);
    new_text.push_str(&new_line);
    new_text.push_str(&text[line_end..]);

    LineEdit {
        text: new_text,
        cursor: line_start + content_start,
    }
}

/// Byte range of the line containing `cursor`, excluding its newline
pub fn line_bounds(text: &str, cursor: usize) -> (usize, usize) {
    let start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);
    let end = text[cursor..].find('\n').map_or(text.len(), |i| cursor + i);
    (start, end)
}

/// Clamp `offset` into `text` and move it back to a char boundary
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tab(text: &str, cursor: usize) -> LineEdit {
        on_structural_key(text, cursor, StructuralKey::Tab, false)
    }

    fn shift_tab(text: &str, cursor: usize) -> LineEdit {
        on_structural_key(text, cursor, StructuralKey::Tab, true)
    }

    #[test]
    fn tab_indents_bulleted_line() {
        let edit = tab("- item", 3);
        assert_eq!(edit.text, "  - item");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn tab_adds_missing_marker() {
        let edit = tab("item", 0);
        assert_eq!(edit.text, "  - item");
        assert_eq!(edit.cursor, 4);

        let edit = tab("-item", 5);
        assert_eq!(edit.text, "  - item");
    }

    #[test]
    fn tab_on_empty_text_creates_marker() {
        let edit = tab("", 0);
        assert_eq!(edit.text, "  - ");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn only_the_cursor_line_changes() {
        let text = "- a\n- b\n- c";
        // cursor inside "- b"
        let edit = tab(text, 5);
        assert_eq!(edit.text, "- a\n  - b\n- c");
        assert_eq!(edit.cursor, 4 + 4);
    }

    #[test]
    fn cursor_at_line_end_belongs_to_that_line() {
        let text = "- a\n- b";
        let edit = tab(text, 3);
        assert_eq!(edit.text, "  - a\n- b");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn cursor_after_newline_edits_following_line() {
        let edit = tab("- a\n", 4);
        assert_eq!(edit.text, "- a\n  - ");
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn shift_tab_outdents() {
        let edit = shift_tab("- a\n    - b", 10);
        assert_eq!(edit.text, "- a\n  - b");
        assert_eq!(edit.cursor, 4 + 4);
    }

    #[test]
    fn shift_tab_floors_at_zero() {
        let mut edit = LineEdit {
            text: "   - deep".to_string(),
            cursor: 6,
        };
        for _ in 0..5 {
            edit = shift_tab(&edit.text, edit.cursor);
        }
        assert_eq!(edit.text, "- deep");
        assert_eq!(edit.cursor, 2);
    }

    #[test]
    fn tab_then_shift_tab_restores_bulleted_line() {
        let nested = "  - keep";
        let there = tab(nested, 0);
        let back = shift_tab(&there.text, there.cursor);
        assert_eq!(back.text, nested);
    }

    #[test]
    fn keeps_trailing_text_and_multibyte_content() {
        let text = "- 一\n微修正  ";
        let edit = tab(text, text.len());
        assert_eq!(edit.text, "- 一\n  - 微修正  ");
        assert_eq!(&edit.text[edit.cursor..], "微修正  ");
    }

    #[test]
    fn cursor_inside_multibyte_char_is_clamped() {
        let text = "一二";
        // byte 1 is inside '一'
        let edit = tab(text, 1);
        assert_eq!(edit.text, "  - 一二");
        assert_eq!(edit.cursor, 4);
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let edit = tab("- x", 99);
        assert_eq!(edit.text, "  - x");
    }

    #[test]
    fn line_bounds_handles_edges() {
        assert_eq!(line_bounds("ab\ncd", 0), (0, 2));
        assert_eq!(line_bounds("ab\ncd", 2), (0, 2));
        assert_eq!(line_bounds("ab\ncd", 3), (3, 5));
        assert_eq!(line_bounds("ab\ncd", 5), (3, 5));
        assert_eq!(line_bounds("", 0), (0, 0));
    }
}
