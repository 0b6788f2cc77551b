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
//! Case-insensitive substring filtering over a candidate list.

#[derive(Clone, Debug, PartialEq)]
/// Candidate entry of a filterable list.
pub struct DropdownOption<T = ()> {
    /// Text shown in the list and copied into the field on selection.
    pub display: String,
    /// Machine value; also matched by the filter.
    pub value: String,
    /// Opaque payload handed back on selection.
    pub data: T,
}

impl DropdownOption<()> {
    /// Creates an option without payload.
    pub fn new(display: &str, value: &str) -> Self { Self::with_data(display, value, ()) }
}

impl<T> DropdownOption<T> {
    /// Creates an option carrying `data`.
    pub fn with_data(display: &str, value: &str, data: T) -> Self {
        Self {
            display: display.to_string(),
            value: value.to_string(),
            data,
        }
    }

    /// Returns `true` if `key` equals this option's value or display text.
    pub fn is_keyed_by(&self, key: &str) -> bool { self.value == key || self.display == key }
}

/// Returns `true` if either field of `option` contains the already lowercased `needle`.
pub fn option_matches<T>(option: &DropdownOption<T>, needle: &str) -> bool {
    option.display.to_lowercase().contains(needle) || option.value.to_lowercase().contains(needle)
}

/// Indices into `all` of the options matching `query`, in original order. An empty query keeps everything.
pub fn filter_options<T>(all: &[DropdownOption<T>], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..all.len()).collect();
    }
    let needle = query.to_lowercase();
    all.iter().enumerate().filter(|(_, option)| option_matches(option, &needle)).map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Vec<DropdownOption> { vec![DropdownOption::new("Dragon", "d"), DropdownOption::new("Eagle", "e")] }

    #[test]
    fn empty_query_keeps_order() {
        let all = animals();
        assert_eq!(filter_options(&all, ""), vec![0, 1]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let all = animals();
        let hits = filter_options(&all, "RAG");
        assert_eq!(hits, vec![0]);
        assert_eq!(all[hits[0]], DropdownOption::new("Dragon", "d"));
        // "eAGle" contains the needle as well
        assert_eq!(filter_options(&all, "AG"), vec![0, 1]);
    }

    #[test]
    fn value_field_also_matches() {
        let all = vec![DropdownOption::new("Iron Sword", "weapon_01"), DropdownOption::new("Shield", "armor_01")];
        assert_eq!(filter_options(&all, "WEAPON"), vec![0]);
        assert_eq!(filter_options(&all, "_01"), vec![0, 1]);
        assert!(filter_options(&all, "zzz").is_empty());
    }
}
