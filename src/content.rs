//! Renderable tab content.
//!
//! Tabs delegate their body to a `TabContent` implementation; the renderer
//! only ever asks for display lines at a given width. `TextContent` is the
//! built-in implementation used for files and the demo tabs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Content that can be rendered inside a panel's body.
pub trait TabContent {
    /// Produce display lines wrapped to `width` terminal cells.
    fn lines(&self, width: u16) -> Vec<String>;
}

/// Plain text content, word-wrapped to the panel width.
pub struct TextContent {
    text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TabContent for TextContent {
    fn lines(&self, width: u16) -> Vec<String> {
        let width = width.max(1) as usize;
        let mut out = Vec::new();

        for raw in self.text.lines() {
            if raw.trim().is_empty() {
                out.push(String::new());
                continue;
            }

            // Lines that already fit keep their formatting
            if raw.width() <= width {
                out.push(raw.to_string());
                continue;
            }

            let mut line = String::new();
            let mut line_width = 0usize;

            for word in raw.split_whitespace() {
                let word_width = word.width();

                if word_width > width {
                    // Word wider than the panel: flush and hard-split
                    if !line.is_empty() {
                        out.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    let mut chunk = String::new();
                    let mut chunk_width = 0usize;
                    for ch in word.chars() {
                        let cw = ch.width().unwrap_or(0);
                        if chunk_width + cw > width && !chunk.is_empty() {
                            out.push(std::mem::take(&mut chunk));
                            chunk_width = 0;
                        }
                        chunk.push(ch);
                        chunk_width += cw;
                    }
                    line = chunk;
                    line_width = chunk_width;
                    continue;
                }

                let sep = if line.is_empty() { 0 } else { 1 };
                if line_width + sep + word_width > width {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                } else if sep == 1 {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(word);
                line_width += word_width;
            }

            if !line.is_empty() {
                out.push(line);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let content = TextContent::new("one two three four");
        let lines = content.lines(9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn hard_splits_overlong_words() {
        let content = TextContent::new("abcdefghij");
        let lines = content.lines(4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn preserves_blank_lines() {
        let content = TextContent::new("a\n\nb");
        let lines = content.lines(10);
        assert_eq!(lines, vec!["a", "", "b"]);
    }
}
