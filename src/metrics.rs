//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
//! Text measurement capability plus the caret and truncation helpers built on top of it.
use std::rc::Rc;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Identifies a font known to the renderer and its metrics.
pub struct FontId(pub usize);

/// Measures glyph runs for a given font.
pub trait TextMetrics {
    /// Returns the advance width of `text` in pixels.
    fn text_width(&self, font: FontId, text: &str) -> i32;
    /// Returns the height of one line of text in pixels.
    fn line_height(&self, font: FontId) -> i32;
}

/// Shared handle to the active text metrics.
pub type MetricsHandle = Rc<dyn TextMetrics>;

/// Ellipsis appended to truncated runs.
pub const ELLIPSIS: &str = "...";

#[derive(Copy, Clone, Debug)]
/// Fixed-advance metrics used by headless hosts and tests.
pub struct MonospaceMetrics {
    /// Advance of every character in pixels.
    pub advance: i32,
    /// Line height in pixels.
    pub line_height: i32,
}

impl MonospaceMetrics {
    /// Creates metrics with the given advance and line height.
    pub fn new(advance: i32, line_height: i32) -> Self { Self { advance, line_height } }
}

impl Default for MonospaceMetrics {
    fn default() -> Self { Self::new(8, 16) }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, _font: FontId, text: &str) -> i32 { text.chars().count() as i32 * self.advance }

    fn line_height(&self, _font: FontId) -> i32 { self.line_height }
}

/// Returns the x offset of the caret placed at byte index `caret`, relative to the start of the run.
pub fn caret_x(metrics: &dyn TextMetrics, font: FontId, text: &str, caret: usize) -> i32 {
    let mut caret = caret.min(text.len());
    while !text.is_char_boundary(caret) {
        caret -= 1;
    }
    metrics.text_width(font, &text[..caret])
}

/// Maps an x offset (relative to the start of the run) to the nearest glyph edge.
pub fn caret_from_x(metrics: &dyn TextMetrics, font: FontId, text: &str, x: i32) -> usize {
    if x <= 0 {
        return 0;
    }
    let mut prev_w = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        let w = metrics.text_width(font, &text[..next]);
        if x < (prev_w + w) / 2 {
            return idx;
        }
        prev_w = w;
    }
    text.len()
}

/// Shortens `text` so it fits into `max_w` pixels, appending [`ELLIPSIS`] when characters were dropped.
pub fn truncate_to_width(metrics: &dyn TextMetrics, font: FontId, text: &str, max_w: i32) -> String {
    if metrics.text_width(font, text) <= max_w {
        return text.to_string();
    }
    let budget = max_w - metrics.text_width(font, ELLIPSIS);
    if budget <= 0 {
        return String::new();
    }
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if metrics.text_width(font, &text[..next]) > budget {
            break;
        }
        end = next;
    }
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&text[..end]);
    out.push_str(ELLIPSIS);
    out
}

#[cfg(feature = "builder")]
mod fontdue_metrics {
    use super::*;
    use std::{fs, io, path::Path};

    /// TrueType metrics backed by `fontdue`. Fonts are registered in order and addressed by [`FontId`].
    pub struct FontdueMetrics {
        fonts: Vec<(fontdue::Font, f32)>,
    }

    impl FontdueMetrics {
        /// Creates an empty metrics table.
        pub fn new() -> Self { Self { fonts: Vec::new() } }

        /// Registers a font from raw TTF/OTF bytes at the given pixel size.
        pub fn add_font(&mut self, bytes: &[u8], size: f32) -> io::Result<FontId> {
            let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            self.fonts.push((font, size));
            Ok(FontId(self.fonts.len() - 1))
        }

        /// Registers a font loaded from disk.
        pub fn load_font<P: AsRef<Path>>(&mut self, path: P, size: f32) -> io::Result<FontId> {
            let bytes = fs::read(path)?;
            self.add_font(&bytes, size)
        }

        fn font(&self, font: FontId) -> Option<&(fontdue::Font, f32)> { self.fonts.get(font.0) }
    }

    impl Default for FontdueMetrics {
        fn default() -> Self { Self::new() }
    }

    impl TextMetrics for FontdueMetrics {
        fn text_width(&self, font: FontId, text: &str) -> i32 {
            match self.font(font) {
                Some((f, size)) => text.chars().map(|ch| f.metrics(ch, *size).advance_width).sum::<f32>().ceil() as i32,
                None => 0,
            }
        }

        fn line_height(&self, font: FontId) -> i32 {
            match self.font(font) {
                Some((f, size)) => match f.horizontal_line_metrics(*size) {
                    Some(lm) => lm.new_line_size.ceil() as i32,
                    None => size.ceil() as i32,
                },
                None => 0,
            }
        }
    }
}

#[cfg(feature = "builder")]
pub use fontdue_metrics::FontdueMetrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_x_uses_prefix_width() {
        let m = MonospaceMetrics::default();
        assert_eq!(caret_x(&m, FontId(0), "hello", 0), 0);
        assert_eq!(caret_x(&m, FontId(0), "hello", 3), 24);
        assert_eq!(caret_x(&m, FontId(0), "hello", 99), 40);
    }

    #[test]
    fn caret_from_x_snaps_to_nearest_edge() {
        let m = MonospaceMetrics::default();
        assert_eq!(caret_from_x(&m, FontId(0), "hello", -5), 0);
        assert_eq!(caret_from_x(&m, FontId(0), "hello", 3), 0);
        assert_eq!(caret_from_x(&m, FontId(0), "hello", 5), 1);
        assert_eq!(caret_from_x(&m, FontId(0), "hello", 17), 2);
        assert_eq!(caret_from_x(&m, FontId(0), "hello", 400), 5);
    }

    #[test]
    fn caret_from_x_respects_char_boundaries() {
        let m = MonospaceMetrics::default();
        let text = "héllo";
        let idx = caret_from_x(&m, FontId(0), text, 13);
        assert!(text.is_char_boundary(idx));
        assert_eq!(idx, 3);
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let m = MonospaceMetrics::default();
        assert_eq!(truncate_to_width(&m, FontId(0), "short", 100), "short");
        // 10 chars available, 3 taken by the ellipsis
        assert_eq!(truncate_to_width(&m, FontId(0), "a very long label", 80), "a very ...");
        assert_eq!(truncate_to_width(&m, FontId(0), "abcdef", 16), "");
    }
}
