//! Emission of measured text blocks.

use crate::emitter::ContentEmitter;
use folio_render_core::{Line, OperatorSink, RenderError, TextBlock};
use folio_style::TextAlign;
use folio_types::Rect;
use lopdf::{Object, StringFormat};

/// A line drawn under or through one line of text, in content space.
#[derive(Debug, Clone, Copy)]
struct Decoration {
    x: f32,
    baseline: f32,
    width: f32,
}

/// Horizontal offset of a line from the left edge of `bounds_width`.
///
/// Left aligned lines start at the block's inset on the first line of a
/// paragraph and at zero otherwise. Right and centered lines are placed from
/// the line's own width.
fn line_offset(block: &TextBlock, bounds_width: f32, line: &Line, first_in_paragraph: bool) -> f32 {
    match block.align {
        TextAlign::Left if first_in_paragraph => block.first_line_inset,
        TextAlign::Left => 0.0,
        TextAlign::Right => bounds_width - line.width,
        TextAlign::Center => (bounds_width - line.width) / 2.0,
    }
}

impl<S: OperatorSink> ContentEmitter<'_, S> {
    /// Writes a measured block inside `bounds` using the current font.
    ///
    /// The first line is positioned absolutely with its baseline at
    /// `bounds.y + ascent`. Each later line moves relative to the previous
    /// one: horizontally by the change in alignment offset, vertically by the
    /// distance between baselines.
    pub fn fill_text(&mut self, block: &TextBlock, bounds: Rect) -> Result<(), RenderError> {
        if block.is_empty() {
            return Ok(());
        }
        let font = self
            .current_font()
            .cloned()
            .ok_or_else(|| RenderError::Argument("fill_text requires a current font".to_string()))?;

        let mut decorations = Vec::new();
        let mut previous: Option<(f32, f32)> = None;
        let mut top = bounds.y;

        self.begin_text()?;
        for paragraph in &block.paragraphs {
            for (index, line) in paragraph.lines.iter().enumerate() {
                let offset = line_offset(block, bounds.width, line, index == 0);
                let baseline = top + line.ascent;
                match previous {
                    None => {
                        let x = self.device_x(bounds.x + offset);
                        let y = self.device_y(baseline);
                        self.op("Td", vec![x.into(), y.into()])?;
                    }
                    Some((previous_offset, previous_baseline)) => {
                        self.op(
                            "Td",
                            vec![
                                (offset - previous_offset).into(),
                                (previous_baseline - baseline).into(),
                            ],
                        )?;
                    }
                }
                for span in line.spans.iter().filter(|s| !s.text.is_empty()) {
                    self.op(
                        "Tj",
                        vec![Object::String(to_win_ansi(&span.text), StringFormat::Literal)],
                    )?;
                }
                decorations.push(Decoration {
                    x: bounds.x + offset,
                    baseline,
                    width: line.width,
                });
                previous = Some((offset, baseline));
                top += line.height;
            }
        }
        self.end_text()?;

        if font.underlined() || font.struck_out() {
            let thickness = (font.size / 18.0).max(0.5);
            for d in decorations.iter().filter(|d| d.width > 0.0) {
                if font.underlined() {
                    let y = d.baseline + font.descent() * 0.5;
                    self.rectangle(Rect::new(d.x, y, d.width, thickness))?;
                }
                if font.struck_out() {
                    let y = d.baseline - font.ascent() * 0.35;
                    self.rectangle(Rect::new(d.x, y, d.width, thickness))?;
                }
            }
            self.op("f", vec![])?;
        }
        Ok(())
    }
}

/// Encodes text as WinAnsi bytes for a literal string operand. Characters
/// without a WinAnsi code become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) <= 255 => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_maps_typographic_quotes() {
        assert_eq!(to_win_ansi("“é”"), vec![0x93, 0xE9, 0x94]);
        assert_eq!(to_win_ansi("漢"), b"?".to_vec());
    }
}
