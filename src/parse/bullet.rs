/// The two-character list marker every normalized line starts with
pub const BULLET_MARKER: &str = "- ";

/// A single line split into indent, marker and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletLine {
    /// Number of leading spaces (tabs are not expanded)
    pub indent: usize,
    /// Whether the line starts with a `-` marker
    pub marker: bool,
    /// Text after the marker (or after the indent when there is no marker)
    pub content: String,
}

impl BulletLine {
    /// Decompose a line.
    ///
    /// `- foo` keeps everything after the marker verbatim; for a dash with no
    /// following space (`-foo`) the content is trimmed on the left.
    pub fn parse(line: &str) -> BulletLine {
        let rest = line.trim_start_matches(' ');
        let indent = line.len() - rest.len();
        let rest = rest.trim_start();

        if let Some(content) = rest.strip_prefix(BULLET_MARKER) {
            BulletLine {
                indent,
                marker: true,
                content: content.to_string(),
            }
        } else if let Some(content) = rest.strip_prefix('-') {
            BulletLine {
                indent,
                marker: true,
                content: content.trim_start().to_string(),
            }
        } else {
            BulletLine {
                indent,
                marker: false,
                content: rest.to_string(),
            }
        }
    }

    /// The same line with its marker forced on
    pub fn with_marker(self) -> BulletLine {
        BulletLine {
            marker: true,
            ..self
        }
    }

    pub fn render(&self) -> String {
        let marker = if self.marker { BULLET_MARKER } else { "" };
        format!("{}{}{}", " ".repeat(self.indent), marker, self.content)
    }
}

/// Ensure a single line starts (after its indent) with exactly one `- ` marker.
/// A blank line becomes a bare marker.
pub fn ensure_bullet_line(line: &str) -> String {
    if line.trim().is_empty() {
        return BULLET_MARKER.to_string();
    }
    BulletLine::parse(line).with_marker().render()
}

/// Normalize free-form task text into a canonical bulleted block.
///
/// Trailing whitespace is trimmed, blank lines are dropped, and every
/// remaining line gets a `- ` marker after its leading spaces. Blank input
/// yields `"- "`, never an empty string.
pub fn normalize(raw: &str) -> String {
    let rows: Vec<String> = raw
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(ensure_bullet_line)
        .collect();

    if rows.is_empty() {
        BULLET_MARKER.to_string()
    } else {
        rows.join("\n")
    }
}
