//! Entry points, the content drivers, and the lazy-continuation oracle.
//!
//! The full document/container parser is a collaborator, not part of this
//! crate; what lives here are the minimal drivers the engine needs to run
//! a pass. Flow is line-oriented: at each line start a whitespace-only
//! line is taken as furniture, then the registered candidates for the
//! line's first code are attempted in priority order, and a line nothing
//! claims is plain content through to its ending. Text is
//! position-oriented: candidates fire wherever their trigger occurs. Both
//! grammars are total - there is no failure path out of a pass.

use std::collections::BTreeSet;

use crate::code::{is_line_ending, is_markdown_space, preprocess, slice_serialize, Code};
use crate::construct::{Construct, ConstructMap};
use crate::constructs::{self, factory_space, DATA};
use crate::event::{ContentType, Event, Point, TokenType};
use crate::subtokenize::subtokenize;
use crate::tokenizer::{State, StateFn, Tokenizer};

// ============================================================================
// Lazy-continuation oracle
// ============================================================================

/// Answers whether a physical line is lazy: locally it could continue the
/// current multi-line construct, but an enclosing container has already
/// claimed it. Supplied by the surrounding container parser; the engine
/// stays agnostic to container rules by asking instead of knowing.
pub trait LazyOracle {
    fn is_lazy(&self, line: usize) -> bool;
}

/// Oracle for content with no enclosing containers: nothing is ever lazy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotLazy;

impl LazyOracle for NotLazy {
    #[inline]
    fn is_lazy(&self, _line: usize) -> bool {
        false
    }
}

/// Set-backed oracle, keyed by absolute line number.
#[derive(Debug, Clone, Default)]
pub struct LazyLines {
    lines: BTreeSet<usize>,
}

impl LazyLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `line` (1-based) as lazy.
    pub fn mark(&mut self, line: usize) {
        self.lines.insert(line);
    }
}

impl LazyOracle for LazyLines {
    #[inline]
    fn is_lazy(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }
}

impl FromIterator<usize> for LazyLines {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        LazyLines { lines: iter.into_iter().collect() }
    }
}

// ============================================================================
// Options and results
// ============================================================================

/// Everything a parse needs from its collaborators: a construct map per
/// content type and the lazy oracle.
pub struct ParseOptions<'o> {
    pub flow: ConstructMap,
    pub text: ConstructMap,
    pub lazy: &'o dyn LazyOracle,
}

impl ParseOptions<'_> {
    pub fn map_for(&self, content_type: ContentType) -> &ConstructMap {
        match content_type {
            ContentType::Flow => &self.flow,
            ContentType::Text => &self.text,
        }
    }
}

impl Default for ParseOptions<'static> {
    fn default() -> Self {
        ParseOptions {
            flow: constructs::flow_constructs(),
            text: constructs::text_constructs(),
            lazy: &NotLazy,
        }
    }
}

/// A finished parse: the preprocessed input plus the fully-resolved events.
#[derive(Debug)]
pub struct Parsed {
    pub codes: Vec<Code>,
    pub events: Vec<Event>,
}

impl Parsed {
    /// The original text for a token span, virtual spaces expanded.
    pub fn slice(&self, start: Point, end: Point) -> String {
        slice_serialize(&self.codes, start.index, end.index, true)
    }
}

// ============================================================================
// Content drivers
// ============================================================================

/// The driver for one pass of `content_type`. Used for the top-level flow
/// pass and for every nested content pass.
pub fn content_start<'a>(content_type: ContentType) -> StateFn<'a> {
    match content_type {
        ContentType::Flow => flow_start(),
        ContentType::Text => text_start(),
    }
}

/// A whitespace-only remainder of a line. Partial: attempted by the flow
/// driver at line starts, never registered as a candidate.
static BLANK_LINE: Construct = Construct {
    name: "blankLine",
    tokenize: tokenize_blank_line,
    resolve: None,
    resolve_all: None,
    partial: true,
};

fn tokenize_blank_line<'a>(_tokenizer: &mut Tokenizer<'a>) -> State<'a> {
    State::Next(factory_space(
        Box::new(|_, code| if is_line_ending(code) { State::Ok } else { State::Nok }),
        TokenType::Whitespace,
        None,
    ))
}

/// At a line start (or the start of the pass). The only place the flow
/// grammar decides anything: blank line, construct, or plain content.
fn flow_start<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| match code {
        Code::Eof => State::Ok,
        Code::LineEnding => {
            tokenizer.enter(TokenType::LineEnding);
            tokenizer.consume(code);
            tokenizer.exit(TokenType::LineEnding);
            State::Next(flow_start())
        }
        _ if is_markdown_space(code) => tokenizer.attempt(
            &[&BLANK_LINE],
            flow_start(),
            Box::new(|tokenizer, code| flow_line(tokenizer, code)),
        ),
        _ => flow_line(tokenizer, code),
    })
}

/// Dispatch the candidates triggered by the first code of a line; a line
/// nothing claims is plain content.
fn flow_line<'a>(tokenizer: &mut Tokenizer<'a>, code: Code) -> State<'a> {
    let candidates = tokenizer.constructs().candidates(code);
    if candidates.is_empty() {
        wildcard(tokenizer, flow_rest())
    } else {
        tokenizer.attempt(
            candidates,
            flow_start(),
            Box::new(|tokenizer, _| wildcard(tokenizer, flow_rest())),
        )
    }
}

/// Mid-line in unclaimed flow content: data runs to the line ending, no
/// candidate dispatch. Adjacent runs merge in the data resolve-all.
fn flow_rest<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| {
        if is_line_ending(code) {
            State::Next(flow_start())
        } else {
            wildcard(tokenizer, flow_rest())
        }
    })
}

/// Per-position driver for inline content: at every position, try the
/// candidates for the current code, fall back to data.
fn text_start<'a>() -> StateFn<'a> {
    Box::new(|tokenizer, code| match code {
        Code::Eof => State::Ok,
        Code::LineEnding => {
            tokenizer.enter(TokenType::LineEnding);
            tokenizer.consume(code);
            tokenizer.exit(TokenType::LineEnding);
            State::Next(text_start())
        }
        _ => {
            let candidates = tokenizer.constructs().candidates(code);
            if candidates.is_empty() {
                wildcard(tokenizer, text_start())
            } else {
                tokenizer.attempt(
                    candidates,
                    text_start(),
                    Box::new(|tokenizer, _| wildcard(tokenizer, text_start())),
                )
            }
        }
    })
}

/// Run the wildcard bucket, with the data construct as the guarantee of
/// progress.
fn wildcard<'a>(tokenizer: &mut Tokenizer<'a>, ok: StateFn<'a>) -> State<'a> {
    let others = tokenizer.constructs().others();
    let candidates: Vec<&'static Construct> = if others.is_empty() {
        vec![&DATA]
    } else {
        others.to_vec()
    };
    tokenizer.attempt(
        &candidates,
        ok,
        Box::new(|_, _| {
            debug_assert!(false, "wildcard bucket must contain a total fallback");
            State::Nok
        }),
    )
}

// ============================================================================
// Entry points
// ============================================================================

/// Tokenize `input` with the default construct maps and no containers.
pub fn parse(input: &str) -> Parsed {
    parse_with(input, &ParseOptions::default())
}

/// Tokenize `input`: preprocess, run the flow pass, then expand tagged
/// content spans to fixpoint.
pub fn parse_with(input: &str, options: &ParseOptions<'_>) -> Parsed {
    let codes = preprocess(input);
    let mut tokenizer = Tokenizer::new(&codes, &options.flow, options.lazy);
    tokenizer.run(State::Next(content_start(ContentType::Flow)));
    let mut events = tokenizer.finish();
    while subtokenize(&mut events, &codes, options) {}
    Parsed { codes, events }
}
