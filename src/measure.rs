//! A measurer for use without a shaping engine.

use folio_render_core::{Line, Paragraph, RenderError, Span, TextBlock, TextMeasurer, TextOptions};

/// Measures every character with the same advance, a fraction of the font
/// size, and wraps greedily at whitespace. A word wider than the line is
/// placed on a line of its own. Each `\n` starts a new paragraph.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one character as a multiple of the font size.
    pub advance: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl FixedAdvanceMeasurer {
    fn width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.advance
    }

    fn line(&self, text: String, options: &TextOptions) -> Line {
        let width = self.width(&text, options.font_size);
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span { text, width }]
        };
        Line {
            spans,
            width,
            height: options.line_height,
            ascent: options.ascent,
        }
    }

    fn paragraph(&self, text: &str, options: &TextOptions) -> Paragraph {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            let limit = match options.max_width {
                Some(max) if lines.is_empty() => Some(max - options.first_line_inset),
                other => other,
            };
            let fits = limit.is_none_or(|l| self.width(&candidate, options.font_size) <= l);
            if fits || current.is_empty() {
                current = candidate;
            } else {
                lines.push(self.line(std::mem::take(&mut current), options));
                current = word.to_string();
            }
        }
        // A blank paragraph still advances by one line.
        if !current.is_empty() || lines.is_empty() {
            lines.push(self.line(current, options));
        }
        Paragraph { lines }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, options: &TextOptions) -> Result<TextBlock, RenderError> {
        if options.font_size <= 0.0 {
            return Err(RenderError::Argument(format!(
                "font size {} must be positive",
                options.font_size
            )));
        }
        let paragraphs = text
            .split('\n')
            .map(|p| self.paragraph(p, options))
            .collect();
        Ok(TextBlock {
            paragraphs,
            align: options.align,
            first_line_inset: options.first_line_inset,
        })
    }
}
