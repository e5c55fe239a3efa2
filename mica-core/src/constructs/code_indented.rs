//! Indented code blocks: lines prefixed by at least four columns.
//!
//! The first line must open with a four-column prefix (tab-stop aware: a
//! tab can supply several columns). Blank first lines never reach this
//! construct - they are filtered upstream. Content is verbatim to the end
//! of the line; at each line ending a partial construct speculatively
//! consumes the break and tries to find another qualifying prefix, folding
//! intervening blank lines in as it goes. Failure rolls back to before the
//! line ending and the block closes there - the engine never commits to
//! "this is still code" until a qualifying next line is confirmed.
//!
//! Lazy lines fail the continuation outright, whatever their indentation:
//! a line already claimed by an enclosing container cannot continue code.

use crate::code::{is_line_ending, is_markdown_space, Code, TAB_SIZE};
use crate::construct::Construct;
use crate::event::{EventKind, TokenType};
use crate::tokenizer::{State, StateFn, Tokenizer};

use super::factory_space::factory_space;

pub static CODE_INDENTED: Construct = Construct {
    name: "codeIndented",
    tokenize: tokenize_code_indented,
    resolve: None,
    resolve_all: None,
    partial: false,
};

/// Line-break continuation: consume the ending and require the next
/// qualifying prefix. Only ever attempted from inside the block.
static FURTHER_START: Construct = Construct {
    name: "codeIndentedFurtherStart",
    tokenize: tokenize_further_start,
    resolve: None,
    resolve_all: None,
    partial: true,
};

fn tokenize_code_indented<'a>(_tokenizer: &mut Tokenizer<'a>) -> State<'a> {
    State::Next(Box::new(|tokenizer, code| {
        debug_assert!(is_markdown_space(code), "expected space");
        tokenizer.enter(TokenType::CodeIndented);
        State::Next(factory_space(
            after_prefix(),
            TokenType::LinePrefix,
            Some(TAB_SIZE),
        ))
    }))
}

/// After the opening run of spaces: qualify or bail.
fn after_prefix<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, _code| {
        if prefix_is_full(tokenizer) {
            State::Next(at_break())
        } else {
            State::Nok
        }
    })
}

/// At the start of content, a line ending, or the end of the block.
fn at_break<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| match code {
        Code::Eof => State::Next(after()),
        Code::LineEnding => tokenizer.attempt(&[&FURTHER_START], at_break(), after()),
        _ => {
            tokenizer.enter(TokenType::CodeFlowValue);
            State::Next(inside())
        }
    })
}

/// In verbatim content.
fn inside<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if is_line_ending(code) {
            tokenizer.exit(TokenType::CodeFlowValue);
            State::Next(at_break())
        } else {
            tokenizer.consume(code);
            State::Next(inside())
        }
    })
}

fn after<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, _code| {
        tokenizer.exit(TokenType::CodeIndented);
        State::Ok
    })
}

fn tokenize_further_start<'a>(_tokenizer: &mut Tokenizer<'a>) -> State<'a> {
    State::Next(further_start())
}

/// At a line ending (or just past one), looking for the next code line.
fn further_start<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        // A lazy line cannot continue code, however it is indented.
        if tokenizer.lazy().is_lazy(tokenizer.now().line) {
            return State::Nok;
        }
        match code {
            Code::LineEnding => {
                tokenizer.enter(TokenType::LineEnding);
                tokenizer.consume(code);
                tokenizer.exit(TokenType::LineEnding);
                State::Next(further_start())
            }
            _ => State::Next(factory_space(
                further_after_prefix(),
                TokenType::LinePrefix,
                Some(TAB_SIZE),
            )),
        }
    })
}

fn further_after_prefix<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if prefix_is_full(tokenizer) {
            State::Ok
        } else if code == Code::LineEnding {
            // A blank (or under-indented, whitespace-only) line: fold it in
            // and keep looking.
            State::Next(further_start())
        } else {
            State::Nok
        }
    })
}

/// Whether the freshest event pair is a four-column line prefix.
fn prefix_is_full(tokenizer: &Tokenizer<'_>) -> bool {
    let events = tokenizer.events();
    let len = events.len();
    len >= 2
        && events[len - 1].kind == EventKind::Exit
        && events[len - 1].token_type == TokenType::LinePrefix
        && events[len - 2].kind == EventKind::Enter
        && events[len - 2].token_type == TokenType::LinePrefix
        && events[len - 1].point.index - events[len - 2].point.index >= TAB_SIZE
}
