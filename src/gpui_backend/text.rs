use gpui::{SharedString, TextRun, Window, font, px};

use crate::axis::TextMeasurer;

pub(crate) const FONT_FAMILY: &str = ".SystemUIFont";

/// Measures label text with the window's text system.
pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, size);
        }
        let run = TextRun {
            len: text.len(),
            font: font(FONT_FAMILY),
            color: gpui::black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped = self.window.text_system().shape_line(
            SharedString::from(text.to_string()),
            px(size),
            &[run],
            None,
        );
        let width = f32::from(shaped.width);
        let height = f32::from(shaped.ascent + shaped.descent);
        (width, height.max(size))
    }
}
