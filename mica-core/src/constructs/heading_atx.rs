//! ATX headings: `# foo` through `###### foo`.
//!
//! The opening run is one to six `#` and must be followed by a space, a
//! line ending, or the end of input - `#foo` is not a heading and falls
//! back to plain content. In interrupt mode the rule succeeds as soon as
//! the opening run qualifies; the rest of the line is the interrupted
//! content's problem.
//!
//! The resolver runs once the whole heading's extent is known: it trims a
//! leading and a trailing whitespace token off the content, drops an
//! optional closing `#` run (`# foo #` and `# foo ##` both read "foo"),
//! and wraps what remains as heading text with a nested text-content span
//! for later inline tokenization.

use crate::code::{is_line_ending, is_line_ending_or_space, is_markdown_space, Code};
use crate::construct::Construct;
use crate::event::{
    chunked_splice, ContentType, Event, EventKind, ResolveContext, TokenType,
};
use crate::tokenizer::{State, StateFn, Tokenizer};

use super::factory_space::factory_space;

/// CommonMark allows at most six `#` in the opening run.
const OPENING_SEQUENCE_MAX: usize = 6;

pub static HEADING_ATX: Construct = Construct {
    name: "headingAtx",
    tokenize: tokenize_heading_atx,
    resolve: Some(resolve_heading_atx),
    resolve_all: None,
    partial: false,
};

fn tokenize_heading_atx<'a>(_tokenizer: &mut Tokenizer<'a>) -> State<'a> {
    State::Next(Box::new(|tokenizer, code| {
        debug_assert_eq!(code, Code::Char('#'), "expected `#`");
        tokenizer.enter(TokenType::AtxHeading);
        tokenizer.enter(TokenType::AtxHeadingSequence);
        State::Next(sequence_open(0))
    }))
}

/// In the opening `#` run.
fn sequence_open<'a>(size: usize) -> StateFn<'a> {
    Box::new(move |tokenizer, code| {
        if code == Code::Char('#') && size < OPENING_SEQUENCE_MAX {
            tokenizer.consume(code);
            State::Next(sequence_open(size + 1))
        } else if is_line_ending_or_space(code) {
            tokenizer.exit(TokenType::AtxHeadingSequence);
            if tokenizer.interrupt {
                State::Ok
            } else {
                State::Next(at_break())
            }
        } else {
            // Seventh `#`, or anything glued to the run: not a heading.
            State::Nok
        }
    })
}

/// Between parts of the heading.
fn at_break<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if code == Code::Char('#') {
            tokenizer.enter(TokenType::AtxHeadingSequence);
            State::Next(sequence_further())
        } else if is_line_ending(code) {
            tokenizer.exit(TokenType::AtxHeading);
            State::Ok
        } else if is_markdown_space(code) {
            State::Next(factory_space(at_break(), TokenType::Whitespace, None))
        } else {
            tokenizer.enter(TokenType::AtxHeadingText);
            State::Next(data())
        }
    })
}

/// In a `#` run after the opening one.
fn sequence_further<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if code == Code::Char('#') {
            tokenizer.consume(code);
            State::Next(sequence_further())
        } else {
            tokenizer.exit(TokenType::AtxHeadingSequence);
            State::Next(at_break())
        }
    })
}

/// In heading text.
fn data<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if code == Code::Char('#') || is_line_ending_or_space(code) {
            tokenizer.exit(TokenType::AtxHeadingText);
            State::Next(at_break())
        } else {
            tokenizer.consume(code);
            State::Next(data())
        }
    })
}

/// Trim the opening/closing furniture and wrap the content.
///
/// Operates on the flat enter/exit pairs between `events[0]` (enter
/// heading) and the final exit: index 3 is the first event after the
/// opening sequence, `len - 2` the last before the heading closes.
fn resolve_heading_atx(events: &mut Vec<Event>, _context: &ResolveContext<'_>) {
    if events.len() < 4 {
        return;
    }
    let mut content_end = events.len() - 2;
    let mut content_start = 3;

    // Leading whitespace belongs to the opening.
    if events[content_start].token_type == TokenType::Whitespace {
        content_start += 2;
    }

    // Trailing whitespace belongs to the closing.
    if content_end - 2 > content_start && events[content_end].token_type == TokenType::Whitespace {
        content_end -= 2;
    }

    // An optional closing `#` run counts only when it is all there is, or
    // when whitespace separates it from real content.
    if events[content_end].token_type == TokenType::AtxHeadingSequence
        && (content_start == content_end - 1
            || (content_end > content_start + 4
                && events[content_end - 2].token_type == TokenType::Whitespace))
    {
        content_end -= if content_start + 1 == content_end { 2 } else { 4 };
    }

    if content_end > content_start {
        let start = events[content_start].point;
        let end = events[content_end].point;
        let replacement = vec![
            Event {
                kind: EventKind::Enter,
                token_type: TokenType::AtxHeadingText,
                point: start,
                content_type: None,
            },
            Event {
                kind: EventKind::Enter,
                token_type: TokenType::ChunkText,
                point: start,
                content_type: Some(ContentType::Text),
            },
            Event::exit(TokenType::ChunkText, end),
            Event::exit(TokenType::AtxHeadingText, end),
        ];
        chunked_splice(events, content_start, content_end - content_start + 1, replacement);
    }
}
