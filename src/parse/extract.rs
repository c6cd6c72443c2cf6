//! Balanced-object extraction.
//!
//! Finds syntactically complete top-level `{...}` objects inside arbitrary
//! text, tolerant of nested braces and quoted/escaped strings. This is a
//! pure text scan; JSON decoding happens later in the parser.

/// A complete top-level object found in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSpan<'a> {
    /// The object text, from `{` through its matching `}`.
    pub text: &'a str,
    /// Byte offset just past the closing brace, relative to the scanned text.
    pub end: usize,
}

/// Lazy left-to-right scan for balanced top-level objects.
///
/// The iterator is finite and non-restartable: once an opening brace is
/// found whose object never completes before the input ends, iteration
/// stops and nothing past the previous object is consumed — the caller
/// supplies more text on a later scan.
#[derive(Debug)]
pub struct BalancedObjects<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> BalancedObjects<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for BalancedObjects<'a> {
    type Item = JsonSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.text[self.pos..].find('{')?;

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escape = false;

        for (offset, ch) in self.text[start..].char_indices() {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                // A backslash escapes exactly the next character, including
                // another backslash or a quote.
                '\\' if in_string => escape = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + offset + 1;
                        self.pos = end;
                        return Some(JsonSpan {
                            text: &self.text[start..end],
                            end,
                        });
                    }
                }
                _ => {}
            }
        }

        // Unterminated object: report no further results.
        self.pos = self.text.len();
        None
    }
}
