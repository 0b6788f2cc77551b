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
//! Single-line text buffer with caret, selection, validation and clipboard editing.
//!
//! Indices are UTF-8 byte offsets and always sit on a char boundary.
use crate::clipboard::{read_text, write_text};
use crate::{Clipboard, InputSnapshot, Key};

/// Predicate receiving the prospective full text of an edit; returning `false` rejects the edit.
pub type Validator = Box<dyn Fn(&str) -> bool>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Selection endpoints: `anchor` stays put while `head` follows the caret.
pub struct Selection {
    /// Fixed end.
    pub anchor: usize,
    /// Moving end.
    pub head: usize,
}

impl Selection {
    /// Returns the endpoints ordered low to high.
    pub fn ordered(&self) -> (usize, usize) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    /// Returns `true` when both ends coincide.
    pub fn is_empty(&self) -> bool { self.anchor == self.head }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Direction of a word jump.
pub enum WordDirection {
    /// Towards the start of the text.
    Left,
    /// Towards the end of the text.
    Right,
}

fn is_insertable(ch: char) -> bool { !ch.is_control() }

fn prev_boundary(buf: &str, cursor: usize) -> usize {
    if cursor == 0 {
        return 0;
    }
    let mut new_cursor = cursor - 1;
    while new_cursor > 0 && !buf.is_char_boundary(new_cursor) {
        new_cursor -= 1;
    }
    new_cursor
}

fn next_boundary(buf: &str, cursor: usize) -> usize {
    if cursor >= buf.len() {
        return buf.len();
    }
    let mut new_cursor = cursor + 1;
    while new_cursor < buf.len() && !buf.is_char_boundary(new_cursor) {
        new_cursor += 1;
    }
    new_cursor
}

fn char_before(buf: &str, cursor: usize) -> Option<char> { buf[..cursor].chars().next_back() }

fn char_after(buf: &str, cursor: usize) -> Option<char> { buf[cursor..].chars().next() }

/// Start of the word left of `cursor`, skipping any whitespace first.
pub(crate) fn word_left(buf: &str, cursor: usize) -> usize {
    let mut pos = cursor;
    while matches!(char_before(buf, pos), Some(ch) if ch.is_whitespace()) {
        pos = prev_boundary(buf, pos);
    }
    while matches!(char_before(buf, pos), Some(ch) if !ch.is_whitespace()) {
        pos = prev_boundary(buf, pos);
    }
    pos
}

/// Start of the next word right of `cursor`: skips the current word, then the whitespace after it.
pub(crate) fn word_right(buf: &str, cursor: usize) -> usize {
    let mut pos = cursor;
    while matches!(char_after(buf, pos), Some(ch) if !ch.is_whitespace()) {
        pos = next_boundary(buf, pos);
    }
    while matches!(char_after(buf, pos), Some(ch) if ch.is_whitespace()) {
        pos = next_boundary(buf, pos);
    }
    pos
}

/// Editable single-line text with a caret and an optional selection.
///
/// Every successful mutation marks the buffer dirty; rejected or no-op edits leave it untouched.
pub struct TextEditBuffer {
    text: String,
    caret: usize,
    selection: Option<Selection>,
    max_len: Option<usize>,
    validator: Option<Validator>,
    dirty: bool,
}

impl Default for TextEditBuffer {
    fn default() -> Self { Self::new() }
}

impl TextEditBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            selection: None,
            max_len: None,
            validator: None,
            dirty: false,
        }
    }

    /// Creates a buffer holding `text` with the caret at its end.
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.text = text.to_string();
        buf.caret = buf.text.len();
        buf
    }

    /// Limits the text to `max_len` characters.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Installs a validation predicate.
    pub fn with_validator<F: Fn(&str) -> bool + 'static>(mut self, validator: F) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Changes the character limit.
    pub fn set_max_len(&mut self, max_len: Option<usize>) { self.max_len = max_len; }

    /// Replaces the validation predicate.
    pub fn set_validator(&mut self, validator: Option<Validator>) { self.validator = validator; }

    /// Current text.
    pub fn text(&self) -> &str { &self.text }

    /// Caret byte offset.
    pub fn caret(&self) -> usize { self.caret }

    /// Byte length of the text.
    pub fn len(&self) -> usize { self.text.len() }

    /// Returns `true` when the text is empty.
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Raw selection state, including a collapsed selection that is still being extended.
    pub fn raw_selection(&self) -> Option<Selection> { self.selection }

    /// Ordered, non-empty selection span.
    pub fn selection(&self) -> Option<(usize, usize)> {
        match self.selection {
            Some(sel) if !sel.is_empty() => Some(sel.ordered()),
            _ => None,
        }
    }

    /// Returns `true` if a non-empty span is selected.
    pub fn has_selection(&self) -> bool { self.selection().is_some() }

    /// Selected text, if any.
    pub fn selected_text(&self) -> Option<&str> { self.selection().map(|(lo, hi)| &self.text[lo..hi]) }

    /// Returns `true` if the text changed since the last [`TextEditBuffer::take_dirty`].
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Reports and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool { std::mem::replace(&mut self.dirty, false) }

    /// Replaces the whole text, moving the caret to the end and dropping the selection. Bypasses validation.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.dirty = true;
        }
        self.caret = self.text.len();
        self.selection = None;
    }

    /// Drops the selection, leaving the caret where it is.
    pub fn clear_selection(&mut self) { self.selection = None; }

    /// Selects the whole text with the caret at the end.
    pub fn select_all(&mut self) {
        self.caret = self.text.len();
        self.selection = if self.text.is_empty() { None } else { Some(Selection { anchor: 0, head: self.caret }) };
    }

    fn accepts(&self, prospective: &str) -> bool {
        if let Some(max) = self.max_len {
            if prospective.chars().count() > max {
                return false;
            }
        }
        match &self.validator {
            Some(validate) => validate(prospective),
            None => true,
        }
    }

    /// Replaces the selection (or inserts at the caret) with `s` if the result passes the length limit and validator.
    fn splice(&mut self, s: &str) -> bool {
        let (lo, hi) = self.selection().unwrap_or((self.caret, self.caret));
        let mut prospective = String::with_capacity(self.text.len() + s.len());
        prospective.push_str(&self.text[..lo]);
        prospective.push_str(s);
        prospective.push_str(&self.text[hi..]);
        if !self.accepts(&prospective) {
            return false;
        }
        self.text = prospective;
        self.caret = lo + s.len();
        self.selection = None;
        self.dirty = true;
        true
    }

    /// Inserts one character at the caret, replacing any selection. Control characters are rejected.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !is_insertable(ch) {
            return false;
        }
        let mut tmp = [0u8; 4];
        self.splice(ch.encode_utf8(&mut tmp))
    }

    /// Inserts each character of `text` in turn; returns `true` if any was accepted.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars() {
            changed |= self.insert_char(ch);
        }
        changed
    }

    /// Pastes `text` as one edit. Line breaks and other control characters are stripped first.
    pub fn paste(&mut self, text: &str) -> bool {
        let clean: String = text.chars().filter(|ch| is_insertable(*ch)).collect();
        if clean.is_empty() {
            return false;
        }
        self.splice(&clean)
    }

    /// Removes the selected span, collapsing the caret to its start.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some((lo, hi)) => {
                self.text.replace_range(lo..hi, "");
                self.caret = lo;
                self.selection = None;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Deletes the selection or the character before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        self.selection = None;
        if self.caret == 0 {
            return false;
        }
        let start = prev_boundary(&self.text, self.caret);
        self.text.replace_range(start..self.caret, "");
        self.caret = start;
        self.dirty = true;
        true
    }

    /// Deletes the selection or the character after the caret.
    pub fn delete(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        self.selection = None;
        if self.caret >= self.text.len() {
            return false;
        }
        let end = next_boundary(&self.text, self.caret);
        self.text.replace_range(self.caret..end, "");
        self.dirty = true;
        true
    }

    /// Moves the caret to `pos`, extending the selection from the pre-move caret when `extend` is set.
    pub fn set_caret(&mut self, pos: usize, extend: bool) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        if extend {
            let anchor = self.selection.map(|s| s.anchor).unwrap_or(self.caret);
            self.selection = Some(Selection { anchor, head: pos });
        } else {
            self.selection = None;
        }
        self.caret = pos;
    }

    /// Moves the caret by `delta` characters. At either end of the text this is a no-op.
    pub fn move_caret(&mut self, delta: i32, extend: bool) -> bool {
        let mut pos = self.caret;
        for _ in 0..delta.unsigned_abs() {
            pos = if delta < 0 { prev_boundary(&self.text, pos) } else { next_boundary(&self.text, pos) };
        }
        if pos == self.caret {
            return false;
        }
        self.set_caret(pos, extend);
        true
    }

    /// Jumps the caret to the neighbouring word boundary.
    pub fn move_caret_by_word(&mut self, dir: WordDirection, extend: bool) -> bool {
        let pos = match dir {
            WordDirection::Left => word_left(&self.text, self.caret),
            WordDirection::Right => word_right(&self.text, self.caret),
        };
        if pos == self.caret {
            return false;
        }
        self.set_caret(pos, extend);
        true
    }

    /// Moves the caret to the start of the text.
    pub fn move_to_start(&mut self, extend: bool) { self.set_caret(0, extend); }

    /// Moves the caret to the end of the text.
    pub fn move_to_end(&mut self, extend: bool) { self.set_caret(self.text.len(), extend); }

    /// Returns a copy of the selected text.
    pub fn copy(&self) -> Option<String> { self.selected_text().map(str::to_string) }

    /// Removes the selected text and returns it.
    pub fn cut(&mut self) -> Option<String> {
        let text = self.copy()?;
        self.delete_selection();
        Some(text)
    }
}

#[derive(Default, Copy, Clone, Debug)]
pub(crate) struct TextEditOutcome {
    pub changed: bool,
    pub moved: bool,
    pub submit: bool,
}

/// Applies this frame's typed text and editing keys to `buf`.
///
/// Typed characters go in first, then keys in arrival order. Keys the buffer does not own (Up, Down, Escape)
/// are left for the widget.
pub(crate) fn apply_text_input(buf: &mut TextEditBuffer, input: &InputSnapshot, clipboard: &mut dyn Clipboard) -> TextEditOutcome {
    let mut out = TextEditOutcome::default();
    let ctrl = input.key_mods.is_ctrl();
    let shift = input.key_mods.is_shift();

    if !ctrl && buf.insert_text(&input.text_input) {
        out.changed = true;
    }

    for key in &input.pressed_keys {
        match (*key, ctrl) {
            (Key::A, true) => {
                buf.select_all();
                out.moved = true;
            }
            (Key::C, true) => {
                if let Some(text) = buf.copy() {
                    write_text(clipboard, &text);
                }
            }
            (Key::X, true) => {
                if let Some(text) = buf.copy() {
                    if write_text(clipboard, &text) {
                        out.changed |= buf.delete_selection();
                    }
                }
            }
            (Key::V, true) => {
                if let Some(text) = read_text(clipboard) {
                    out.changed |= buf.paste(&text);
                }
            }
            (Key::Left, true) => out.moved |= buf.move_caret_by_word(WordDirection::Left, shift),
            (Key::Right, true) => out.moved |= buf.move_caret_by_word(WordDirection::Right, shift),
            (Key::Left, false) => out.moved |= buf.move_caret(-1, shift),
            (Key::Right, false) => out.moved |= buf.move_caret(1, shift),
            (Key::Home, _) => {
                buf.move_to_start(shift);
                out.moved = true;
            }
            (Key::End, _) => {
                buf.move_to_end(shift);
                out.moved = true;
            }
            (Key::Backspace, _) => out.changed |= buf.backspace(),
            (Key::Delete, _) => out.changed |= buf.delete(),
            (Key::Enter, _) => out.submit = true,
            _ => (),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyMode, MemoryClipboard, NoClipboard};

    fn assert_invariants(buf: &TextEditBuffer) {
        assert!(buf.caret() <= buf.len());
        assert!(buf.text().is_char_boundary(buf.caret()));
        if let Some((lo, hi)) = buf.selection() {
            assert!(lo <= hi && hi <= buf.len());
        }
    }

    fn keys(keys: &[Key], mods: KeyMode) -> InputSnapshot {
        InputSnapshot {
            pressed_keys: keys.to_vec(),
            key_mods: mods,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn word_left_from_end_lands_on_word_start() {
        let mut buf = TextEditBuffer::with_text("foo bar");
        assert_eq!(buf.caret(), 7);
        assert!(buf.move_caret_by_word(WordDirection::Left, false));
        assert_eq!(buf.caret(), 4);
        assert!(buf.move_caret_by_word(WordDirection::Left, false));
        assert_eq!(buf.caret(), 0);
        assert!(!buf.move_caret_by_word(WordDirection::Left, false));
    }

    #[test]
    fn word_left_handles_leading_whitespace_and_trailing_gaps() {
        assert_eq!(word_left(" foo", 4), 1);
        assert_eq!(word_left("foo bar  ", 9), 4);
        assert_eq!(word_right("foo bar", 0), 4);
        assert_eq!(word_right("foo bar", 4), 7);
        assert_eq!(word_right("foo \tbar", 1), 5);
    }

    #[test]
    fn insert_replaces_selection() {
        let mut buf = TextEditBuffer::with_text("hello");
        buf.select_all();
        assert!(buf.insert_char('x'));
        assert_eq!(buf.text(), "x");
        assert_eq!(buf.caret(), 1);
        assert!(!buf.has_selection());
        assert!(buf.take_dirty());
        assert!(!buf.take_dirty());
        assert_invariants(&buf);
    }

    #[test]
    fn validator_and_max_len_reject_silently() {
        let mut buf = TextEditBuffer::new().with_max_len(3).with_validator(|s| s.chars().all(|c| c.is_ascii_digit()));
        assert!(buf.insert_text("12"));
        assert!(!buf.insert_char('a'));
        assert!(buf.insert_char('3'));
        assert!(!buf.insert_char('4'));
        assert_eq!(buf.text(), "123");
        assert!(!buf.paste("9"));
        buf.take_dirty();
        assert!(!buf.insert_char('\n'));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn paste_strips_control_chars_and_checks_whole_result() {
        let mut buf = TextEditBuffer::new().with_max_len(6);
        assert!(buf.paste("ab\r\ncd"));
        assert_eq!(buf.text(), "abcd");
        assert!(!buf.paste("xyz"));
        assert_eq!(buf.text(), "abcd");
        assert!(!buf.paste("\n"));
    }

    #[test]
    fn deletion_collapses_selection_to_start() {
        let mut buf = TextEditBuffer::with_text("abcdef");
        buf.set_caret(1, false);
        buf.set_caret(4, true);
        assert_eq!(buf.selection(), Some((1, 4)));
        assert!(buf.backspace());
        assert_eq!(buf.text(), "aef");
        assert_eq!(buf.caret(), 1);
        assert!(buf.delete());
        assert_eq!(buf.text(), "af");
        buf.move_to_start(false);
        assert!(!buf.backspace());
        buf.move_to_end(false);
        assert!(!buf.delete());
        assert_invariants(&buf);
    }

    #[test]
    fn shift_arrows_anchor_at_pre_move_caret() {
        let mut buf = TextEditBuffer::with_text("abcd");
        buf.move_caret(-1, true);
        buf.move_caret(-1, true);
        assert_eq!(buf.raw_selection(), Some(Selection { anchor: 4, head: 2 }));
        assert_eq!(buf.selection(), Some((2, 4)));
        // a plain move drops the selection and moves from the caret, not the selection edge
        buf.move_caret(1, false);
        assert_eq!(buf.caret(), 3);
        assert!(!buf.has_selection());
        buf.move_to_end(false);
        assert!(!buf.move_caret(1, false));
    }

    #[test]
    fn multibyte_text_keeps_caret_on_boundaries() {
        let mut buf = TextEditBuffer::with_text("añb");
        buf.move_caret(-1, false);
        buf.move_caret(-1, false);
        assert_eq!(buf.caret(), 1);
        assert!(buf.delete());
        assert_eq!(buf.text(), "ab");
        buf.set_caret(99, false);
        assert_eq!(buf.caret(), 2);
        buf.insert_char('é');
        buf.backspace();
        assert_eq!(buf.text(), "ab");
        assert_invariants(&buf);
    }

    #[test]
    fn clipboard_shortcuts_round_trip() {
        let mut cb = MemoryClipboard::new();
        let mut buf = TextEditBuffer::with_text("hello world");
        buf.move_caret_by_word(WordDirection::Left, true);
        let out = apply_text_input(&mut buf, &keys(&[Key::X], KeyMode::CTRL), &mut cb);
        assert!(out.changed);
        assert_eq!(buf.text(), "hello ");
        apply_text_input(&mut buf, &keys(&[Key::Home], KeyMode::NONE), &mut cb);
        apply_text_input(&mut buf, &keys(&[Key::V], KeyMode::CTRL), &mut cb);
        assert_eq!(buf.text(), "worldhello ");
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn cut_keeps_text_when_clipboard_write_fails() {
        let mut cb = NoClipboard;
        let mut buf = TextEditBuffer::with_text("keep");
        buf.select_all();
        let out = apply_text_input(&mut buf, &keys(&[Key::X], KeyMode::CTRL), &mut cb);
        assert!(!out.changed);
        assert_eq!(buf.text(), "keep");
        let out = apply_text_input(&mut buf, &keys(&[Key::V], KeyMode::CTRL), &mut cb);
        assert!(!out.changed);
    }

    #[test]
    fn typed_text_precedes_keys() {
        let mut cb = MemoryClipboard::new();
        let mut buf = TextEditBuffer::new();
        let input = InputSnapshot {
            text_input: "ab".into(),
            pressed_keys: vec![Key::Backspace, Key::Enter],
            ..InputSnapshot::default()
        };
        let out = apply_text_input(&mut buf, &input, &mut cb);
        assert_eq!(buf.text(), "a");
        assert!(out.changed && out.submit);
    }
}
