use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // positions, muted text
    pub secondary: (u8, u8, u8), // record ids, group headers
    pub tag: (u8, u8, u8),       // tag names
    pub highlight: (u8, u8, u8), // search matches
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        tag: (137, 180, 250),       // Blue
        highlight: (243, 139, 168), // Pink
    };
}

/// Formatting context passed through the printing paths
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env() -> Self {
        let use_color = std::env::var("NO_COLOR").is_err();
        Self::new(use_color)
    }

    /// Muted styling for list positions. Takes the already padded cell so
    /// the escape codes do not throw off column alignment.
    pub fn format_position(&self, cell: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.primary;
            Paint::rgb(cell, r, g, b).to_string()
        } else {
            cell.to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            Paint::rgb(id, r, g, b).bold().to_string()
        } else {
            id.to_string()
        }
    }

    pub fn format_tag(&self, tag: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.tag;
            Paint::rgb(tag, r, g, b).bold().to_string()
        } else {
            tag.to_string()
        }
    }

    pub fn highlight_match(&self, text: &str, query: Option<&str>) -> String {
        let Some(q) = query else { return text.to_string() };
        if q.is_empty() || !self.use_color {
            return text.to_string();
        }

        let q_lower = q.to_lowercase();
        let mut out = String::new();
        let mut cursor = 0;

        while let Some((start, end)) = find_folded(&text[cursor..], &q_lower) {
            out.push_str(&text[cursor..cursor + start]);

            let (r, g, b) = self.palette.highlight;
            let matched = &text[cursor + start..cursor + end];
            out.push_str(&Paint::rgb(matched, r, g, b).to_string());

            cursor += end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// Byte span of the first substring of `haystack` whose lowercase form
/// matches `needle_lower`. Offsets always fall on char boundaries of
/// `haystack`, even where case folding changes byte lengths ('ẞ' folds
/// to the shorter 'ß', 'İ' to the longer "i\u{307}").
fn find_folded(haystack: &str, needle_lower: &str) -> Option<(usize, usize)> {
    for (start, _) in haystack.char_indices() {
        let mut folded = String::new();
        for (offset, ch) in haystack[start..].char_indices() {
            folded.extend(ch.to_lowercase());
            if folded.len() >= needle_lower.len() {
                if folded.starts_with(needle_lower) {
                    return Some((start, start + offset + ch.len_utf8()));
                }
                break;
            }
            if !needle_lower.starts_with(folded.as_str()) {
                break;
            }
        }
    }
    None
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out =
        text.chars().take(max_width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}
