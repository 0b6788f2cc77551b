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
use crate::*;

/// Width of the scroll track drawn along the right edge of an open list.
pub(crate) const LIST_SCROLLBAR_WIDTH: i32 = 8;
/// Gap between the track and the list's right edge.
const LIST_SCROLLBAR_MARGIN: i32 = 2;
const MIN_THUMB: i32 = 4;

pub(crate) fn scrollbar_max_scroll(content_len: i32, view_len: i32) -> i32 { (content_len - view_len).max(0) }

/// Track rectangle for a list occupying `list`.
pub(crate) fn list_scrollbar_track(list: Recti) -> Recti {
    rect(list.x + list.width - LIST_SCROLLBAR_WIDTH - LIST_SCROLLBAR_MARGIN, list.y, LIST_SCROLLBAR_WIDTH, list.height)
}

/// Thumb inside `base` for `view_len` of `content_len` entries scrolled by `scroll` entries.
pub(crate) fn scrollbar_thumb(base: Recti, view_len: i32, content_len: i32, scroll: i32) -> Recti {
    let mut thumb = rect(base.x + 1, base.y, base.width - 2, base.height);
    let base_len = base.height;
    if base_len <= 0 || content_len <= 0 || view_len <= 0 {
        return thumb;
    }

    let thumb_len = (base_len.saturating_mul(view_len) / content_len).clamp(MIN_THUMB.min(base_len), base_len);
    thumb.height = thumb_len;

    let max_scroll = scrollbar_max_scroll(content_len, view_len);
    if max_scroll > 0 {
        let track_len = base_len - thumb_len;
        if track_len > 0 {
            thumb.y += scroll.clamp(0, max_scroll) * track_len / max_scroll;
        }
    }

    thumb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_spans_track_proportionally() {
        let base = rect(0, 0, 8, 160);
        let top = scrollbar_thumb(base, 8, 16, 0);
        assert_eq!((top.x, top.y, top.width, top.height), (1, 0, 6, 80));
        let bottom = scrollbar_thumb(base, 8, 16, 8);
        assert_eq!(bottom.y + bottom.height, 160);
        let past = scrollbar_thumb(base, 8, 16, 99);
        assert_eq!(past.y, bottom.y);
    }

    #[test]
    fn thumb_keeps_minimum_size() {
        let thumb = scrollbar_thumb(rect(0, 0, 8, 40), 2, 1000, 0);
        assert_eq!(thumb.height, MIN_THUMB);
        assert_eq!(scrollbar_max_scroll(3, 8), 0);
    }

    #[test]
    fn track_hugs_right_edge() {
        let t = list_scrollbar_track(rect(10, 20, 100, 60));
        assert_eq!((t.x, t.y, t.width, t.height), (100, 20, 8, 60));
    }
}
