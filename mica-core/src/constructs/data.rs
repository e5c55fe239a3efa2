//! The data construct: literal content nothing else claimed.
//!
//! This is the wildcard fallback that keeps the grammar total. It consumes
//! at least one code unconditionally (so a trigger whose candidates all
//! failed still makes progress), then runs until the next line ending,
//! end of input, or registered trigger. Stopping at triggers is for
//! position-oriented drivers (text), which re-dispatch candidates at the
//! marker; the line-oriented flow driver just chains runs to the line
//! ending and lets the resolve-all merge the seams.

use crate::code::Code;
use crate::construct::Construct;
use crate::event::{chunked_splice, Event, EventKind, ResolveContext, TokenType};
use crate::tokenizer::{State, StateFn, Tokenizer};

pub static DATA: Construct = Construct {
    name: "data",
    tokenize: tokenize_data,
    resolve: None,
    resolve_all: Some(resolve_all_data),
    partial: false,
};

fn tokenize_data<'a>(_tokenizer: &mut Tokenizer<'a>) -> State<'a> {
    State::Next(Box::new(|tokenizer, code| {
        debug_assert!(
            !matches!(code, Code::Eof | Code::LineEnding),
            "data invoked at a line boundary",
        );
        tokenizer.enter(TokenType::Data);
        tokenizer.consume(code);
        State::Next(inside())
    }))
}

fn inside<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        let done = matches!(code, Code::Eof | Code::LineEnding)
            || tokenizer.constructs().is_trigger(code);
        if done {
            tokenizer.exit(TokenType::Data);
            State::Ok
        } else {
            tokenizer.consume(code);
            State::Next(inside())
        }
    })
}

/// Merge adjacent data tokens left behind by markers whose constructs all
/// failed, so consumers see one span instead of a seam per marker.
fn resolve_all_data(events: &mut Vec<Event>, _context: &ResolveContext<'_>) {
    let mut index = 0;
    while index + 1 < events.len() {
        let seam = events[index].kind == EventKind::Exit
            && events[index].token_type == TokenType::Data
            && events[index + 1].kind == EventKind::Enter
            && events[index + 1].token_type == TokenType::Data;
        if seam {
            chunked_splice(events, index, 2, Vec::new());
        } else {
            index += 1;
        }
    }
}
