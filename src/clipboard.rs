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
//! Clipboard capability used by text fields for copy, cut and paste.
use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Reasons a clipboard operation can fail.
pub enum ClipboardError {
    /// No clipboard exists on this host.
    Unavailable,
    /// The clipboard holds no text.
    Empty,
    /// The platform clipboard reported an error.
    Backend(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard unavailable"),
            Self::Empty => write!(f, "clipboard is empty"),
            Self::Backend(msg) => write!(f, "clipboard backend error: {}", msg),
        }
    }
}

impl Error for ClipboardError {}

/// Text clipboard provider.
pub trait Clipboard {
    /// Reads the current clipboard text.
    fn read(&mut self) -> Result<String, ClipboardError>;
    /// Replaces the clipboard text.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Default, Clone, Debug)]
/// In-process clipboard, shared by every widget of one context.
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self { Self::default() }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        match &self.text {
            Some(t) if !t.is_empty() => Ok(t.clone()),
            _ => Err(ClipboardError::Empty),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default, Copy, Clone, Debug)]
/// Clipboard for hosts without one; every operation fails with [`ClipboardError::Unavailable`].
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> { Err(ClipboardError::Unavailable) }

    fn write(&mut self, _text: &str) -> Result<(), ClipboardError> { Err(ClipboardError::Unavailable) }
}

#[cfg(feature = "system-clipboard")]
/// Platform clipboard backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Opens the platform clipboard.
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError::Backend(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) if text.is_empty() => Err(ClipboardError::Empty),
            Ok(text) => {
                tracing::debug!("Pasted {} bytes from clipboard", text.len());
                Ok(text)
            }
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => Err(ClipboardError::Backend(e.to_string())),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text.to_string()).map_err(|e| ClipboardError::Backend(e.to_string()))?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// Reads clipboard text, logging and swallowing failures.
pub(crate) fn read_text(clipboard: &mut dyn Clipboard) -> Option<String> {
    match clipboard.read() {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("paste skipped: {}", e);
            None
        }
    }
}

/// Writes clipboard text, logging failures. Returns `true` on success.
pub(crate) fn write_text(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.write(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("copy skipped: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trips() {
        let mut cb = MemoryClipboard::new();
        assert_eq!(cb.read(), Err(ClipboardError::Empty));
        cb.write("hello").unwrap();
        assert_eq!(cb.read().unwrap(), "hello");
    }

    #[test]
    fn helpers_swallow_failures() {
        let mut cb = NoClipboard;
        assert!(!write_text(&mut cb, "x"));
        assert_eq!(read_text(&mut cb), None);
        assert_eq!(ClipboardError::Unavailable.to_string(), "clipboard unavailable");
    }
}
