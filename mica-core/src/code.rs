//! Code-point alphabet and character classification.
//!
//! The tokenizer does not run over raw `char`s: it runs over [`Code`]s, a
//! small alphabet that adds three sentinels to the Unicode scalar values.
//! `Eof` marks the end of input, `LineEnding` stands for a normalized line
//! break, and `VirtualSpace` models tab-stop expansion without materializing
//! a tab as multiple real characters.
//!
//! Classification is pure: predicates take a `Code` and return a bool, no
//! state anywhere.

/// Number of columns a tab advances to (CommonMark tab stop).
pub const TAB_SIZE: usize = 4;

/// A single unit of tokenizer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Code {
    /// End of input. Synthesized by the tokenizer past the last code;
    /// never stored in a preprocessed sequence.
    Eof,
    /// A normalized line break (`\n`, `\r`, or `\r\n` in the source).
    LineEnding,
    /// Padding emitted after a tab to fill out its tab stop.
    VirtualSpace,
    /// An ordinary Unicode scalar value.
    Char(char),
}

/// Whether `code` is a markdown space: space, tab, or virtual space.
///
/// Never matches `Eof` or `LineEnding`.
#[inline]
pub fn is_markdown_space(code: Code) -> bool {
    matches!(code, Code::Char(' ') | Code::Char('\t') | Code::VirtualSpace)
}

/// Whether `code` ends a line.
///
/// `Eof` counts: at the document boundary the end of input behaves like a
/// line ending.
#[inline]
pub fn is_line_ending(code: Code) -> bool {
    matches!(code, Code::LineEnding | Code::Eof)
}

/// Whether `code` is a markdown space or ends a line.
#[inline]
pub fn is_line_ending_or_space(code: Code) -> bool {
    is_line_ending(code) || is_markdown_space(code)
}

/// Flatten a source string into the code-point alphabet.
///
/// Line breaks are collapsed to [`Code::LineEnding`] (`\r\n` pairs become a
/// single code). A tab becomes the tab character followed by enough
/// [`Code::VirtualSpace`] padding to reach the next tab stop, so constructs
/// that count columns can count codes instead.
///
/// The terminating `Eof` is positional, not stored: the tokenizer reports
/// `Eof` for any index at or past the end of the returned sequence. Because
/// the output is a flat sequence, tokenizing it is byte-for-byte identical
/// however the original input was chunked.
pub fn preprocess(input: &str) -> Vec<Code> {
    let mut codes = Vec::with_capacity(input.len());
    let mut column: usize = 1;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                codes.push(Code::LineEnding);
                column = 1;
            }
            '\n' => {
                codes.push(Code::LineEnding);
                column = 1;
            }
            '\t' => {
                codes.push(Code::Char('\t'));
                column += 1;
                while (column - 1) % TAB_SIZE != 0 {
                    codes.push(Code::VirtualSpace);
                    column += 1;
                }
            }
            _ => {
                codes.push(Code::Char(ch));
                column += 1;
            }
        }
    }

    codes
}

/// Re-slice the original text for a code range.
///
/// `LineEnding` serializes as `\n`. Virtual spaces serialize as spaces when
/// `expand_virtual` is set (column-faithful, used for prefix measurement)
/// and disappear otherwise (character-faithful).
pub fn slice_serialize(codes: &[Code], start: usize, end: usize, expand_virtual: bool) -> String {
    let mut out = String::with_capacity(end.saturating_sub(start));
    for code in &codes[start..end] {
        match code {
            Code::Char(ch) => out.push(*ch),
            Code::LineEnding => out.push('\n'),
            Code::VirtualSpace => {
                if expand_virtual {
                    out.push(' ');
                }
            }
            Code::Eof => unreachable!("eof is never stored in a code sequence"),
        }
    }
    out
}
