//! The tokenizer core: cursor, open-token stack, effects, and backtracking.
//!
//! States are unary functions of the current code that return the next
//! state. The driver always dispatches the *current* code: a state that
//! consumes advances the cursor, a state that does not gets re-dispatched
//! the same code - the continuation-passing shape of the grammar, with
//! boxed closures carrying whatever local counters a rule needs.
//!
//! Speculation is frame-based. [`Tokenizer::attempt`] snapshots (cursor,
//! event length, stack depth), runs candidates in priority order, keeps the
//! first success and rolls everything back on failure; [`Tokenizer::check`]
//! is the same but rolls back even on success. Failed speculative parses
//! leave no trace - that is the backtracking primitive the grammar's
//! ambiguity resolution is built on.
//!
//! There is no fatal parse error anywhere in here. `Nok` is an ordinary
//! control path; the only panics are invariant violations (a construct
//! closing a token it never opened, consuming a stale code), which are
//! engine or construct bugs, never malformed input.

use crate::code::Code;
use crate::construct::{Construct, ConstructMap};
use crate::event::{ContentType, Event, EventKind, Point, ResolveContext, TokenType};
use crate::parse::LazyOracle;

/// A state bound to the running tokenizer. Called with the current code;
/// returns what to do next.
pub type StateFn<'a> = Box<dyn FnMut(&mut Tokenizer<'a>, Code) -> State<'a> + 'a>;

/// Outcome of one state dispatch.
pub enum State<'a> {
    /// Keep going: dispatch the current code to this state.
    Next(StateFn<'a>),
    /// The active construct matched.
    Ok,
    /// The active construct did not match. Normal, recoverable, expected.
    Nok,
}

impl std::fmt::Debug for State<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Next(_) => f.write_str("Next"),
            State::Ok => f.write_str("Ok"),
            State::Nok => f.write_str("Nok"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptKind {
    /// Keep effects on success.
    Attempt,
    /// Pure lookahead: roll back either way.
    Check,
}

/// Index-based snapshot; rollback is truncation plus cursor restore, no
/// cloning of buffers.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    point: Point,
    events: usize,
    stack: usize,
}

/// One live speculation: the candidate being run, the ones still queued
/// behind it, and the continuations to resume with.
struct Frame<'a> {
    kind: AttemptKind,
    snapshot: Snapshot,
    current: &'static Construct,
    /// Lower-priority candidates, reversed so `pop` yields priority order.
    remaining: Vec<&'static Construct>,
    ok: Option<StateFn<'a>>,
    nok: Option<StateFn<'a>>,
}

/// The character-by-character driver for one content pass.
///
/// Owns the event buffer, the open-token stack, and the cursor exclusively;
/// constructs only touch them through the effects API. Nested content
/// passes get their own instance (see [`crate::subtokenize`]).
pub struct Tokenizer<'a> {
    codes: &'a [Code],
    /// Exclusive end of this pass's range; the cursor reports `Eof` there.
    last: usize,
    point: Point,
    events: Vec<Event>,
    stack: Vec<TokenType>,
    frames: Vec<Frame<'a>>,
    resolve_alls: Vec<&'static Construct>,
    constructs: &'a ConstructMap,
    lazy: &'a dyn LazyOracle,
    /// Whether a construct is being asked to interrupt in-progress content.
    /// Set by the caller orchestrating content models, read by constructs
    /// with stricter interruption grammar.
    pub interrupt: bool,
}

impl<'a> Tokenizer<'a> {
    /// A tokenizer over the whole code sequence.
    pub fn new(codes: &'a [Code], constructs: &'a ConstructMap, lazy: &'a dyn LazyOracle) -> Self {
        Self::new_at(codes, Point::start(), codes.len(), constructs, lazy)
    }

    /// A tokenizer scoped to `[start.index, last)`, reporting positions in
    /// the coordinates of the original input. This is how nested content
    /// passes stay position-faithful.
    pub fn new_at(
        codes: &'a [Code],
        start: Point,
        last: usize,
        constructs: &'a ConstructMap,
        lazy: &'a dyn LazyOracle,
    ) -> Self {
        debug_assert!(start.index <= last && last <= codes.len(), "pass range out of bounds");
        Tokenizer {
            codes,
            last,
            point: start,
            events: Vec::new(),
            stack: Vec::new(),
            frames: Vec::new(),
            resolve_alls: Vec::new(),
            constructs,
            lazy,
            interrupt: false,
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// The code at the cursor; `Eof` at or past the end of the pass range.
    #[inline]
    pub fn current(&self) -> Code {
        if self.point.index < self.last {
            self.codes[self.point.index]
        } else {
            Code::Eof
        }
    }

    /// The cursor position.
    #[inline]
    pub fn now(&self) -> Point {
        self.point
    }

    /// The construct registration for this pass.
    #[inline]
    pub fn constructs(&self) -> &'a ConstructMap {
        self.constructs
    }

    /// The lazy-continuation oracle for this pass.
    #[inline]
    pub fn lazy(&self) -> &'a dyn LazyOracle {
        self.lazy
    }

    /// Events emitted so far. Constructs may inspect the tail (e.g. to
    /// measure a prefix just produced) but mutate only through effects.
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Open a token of `token_type` at the cursor.
    pub fn enter(&mut self, token_type: TokenType) {
        self.enter_with_content(token_type, None);
    }

    /// Open a token tagged for later subtokenization.
    pub fn enter_with_content(&mut self, token_type: TokenType, content_type: Option<ContentType>) {
        self.stack.push(token_type);
        self.events.push(Event {
            kind: EventKind::Enter,
            token_type,
            point: self.point,
            content_type,
        });
    }

    /// Close the innermost open token, which must be of `token_type`.
    pub fn exit(&mut self, token_type: TokenType) {
        let open = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("exit {token_type:?} with no open token"));
        debug_assert_eq!(
            open, token_type,
            "exit {token_type:?} does not close the open {open:?}",
        );
        self.events.push(Event::exit(token_type, self.point));
    }

    /// Advance past `code`, which must be the code currently dispatched.
    pub fn consume(&mut self, code: Code) {
        debug_assert_eq!(code, self.current(), "consume called with a stale code");
        debug_assert!(code != Code::Eof, "eof cannot be consumed");
        match code {
            Code::LineEnding => {
                self.point.line += 1;
                self.point.column = 1;
            }
            _ => self.point.column += 1,
        }
        self.point.index += 1;
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    /// Try `candidates` in order from the current position. The first one
    /// whose state machine reaches `Ok` keeps its effects and control passes
    /// to `ok` (dispatched the code the construct finished on). If every
    /// candidate reaches `Nok`, all effects are rolled back and control
    /// passes to `nok`.
    pub fn attempt(
        &mut self,
        candidates: &[&'static Construct],
        ok: StateFn<'a>,
        nok: StateFn<'a>,
    ) -> State<'a> {
        self.push_frame(AttemptKind::Attempt, candidates, ok, nok)
    }

    /// Like [`Tokenizer::attempt`], but rolls back even on success: pure
    /// lookahead, answering "would this match here" without a trace.
    pub fn check(
        &mut self,
        candidates: &[&'static Construct],
        ok: StateFn<'a>,
        nok: StateFn<'a>,
    ) -> State<'a> {
        self.push_frame(AttemptKind::Check, candidates, ok, nok)
    }

    fn push_frame(
        &mut self,
        kind: AttemptKind,
        candidates: &[&'static Construct],
        ok: StateFn<'a>,
        nok: StateFn<'a>,
    ) -> State<'a> {
        debug_assert!(!candidates.is_empty(), "attempt with no candidates");
        let snapshot = self.snapshot();
        let current = candidates[0];
        let mut remaining = candidates[1..].to_vec();
        remaining.reverse();
        let entry = (current.tokenize)(self);
        self.frames.push(Frame {
            kind,
            snapshot,
            current,
            remaining,
            ok: Some(ok),
            nok: Some(nok),
        });
        entry
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            point: self.point,
            events: self.events.len(),
            stack: self.stack.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.point = snapshot.point;
        self.events.truncate(snapshot.events);
        self.stack.truncate(snapshot.stack);
    }

    /// The innermost speculation succeeded: keep effects (unless checking),
    /// run the construct's resolver over exactly its range, queue its
    /// resolve-all, resume with the success continuation.
    fn succeed(&mut self, mut frame: Frame<'a>) -> State<'a> {
        match frame.kind {
            AttemptKind::Check => self.restore(frame.snapshot),
            AttemptKind::Attempt => {
                debug_assert_eq!(
                    self.stack.len(),
                    frame.snapshot.stack,
                    "construct `{}` left the token stack unbalanced",
                    frame.current.name,
                );
                if let Some(resolver) = frame.current.resolve {
                    let mut produced = self.events.split_off(frame.snapshot.events);
                    resolver(&mut produced, &ResolveContext::new(self.codes));
                    self.events.append(&mut produced);
                }
                if frame.current.resolve_all.is_some()
                    && !self.resolve_alls.iter().any(|c| std::ptr::eq(*c, frame.current))
                {
                    self.resolve_alls.push(frame.current);
                }
            }
        }
        State::Next(frame.ok.take().expect("ok continuation resumed twice"))
    }

    /// The innermost candidate failed: roll back, move on to the next
    /// candidate, or give up to the failure continuation.
    fn fail(&mut self, mut frame: Frame<'a>) -> State<'a> {
        self.restore(frame.snapshot);
        if let Some(next) = frame.remaining.pop() {
            frame.current = next;
            let entry = (next.tokenize)(self);
            self.frames.push(frame);
            entry
        } else {
            State::Next(frame.nok.take().expect("nok continuation resumed twice"))
        }
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Run `state` to completion over this pass's range.
    ///
    /// Strictly left-to-right, one code per dispatch; "suspension" exists
    /// only between dispatches. A top-level `Nok` is a driver bug - the
    /// grammar is total, so a content model must always have a fallback.
    pub fn run(&mut self, state: State<'a>) {
        let mut state = state;
        loop {
            match state {
                State::Next(mut state_fn) => {
                    let code = self.current();
                    state = state_fn(self, code);
                }
                State::Ok => match self.frames.pop() {
                    Some(frame) => state = self.succeed(frame),
                    None => break,
                },
                State::Nok => match self.frames.pop() {
                    Some(frame) => state = self.fail(frame),
                    None => {
                        debug_assert!(false, "total grammar reached a top-level nok");
                        break;
                    }
                },
            }
        }
    }

    /// Finish the pass: run each queued resolve-all once over the whole
    /// buffer, hand the events over.
    pub fn finish(mut self) -> Vec<Event> {
        debug_assert!(self.frames.is_empty(), "finish during an open speculation");
        debug_assert!(self.stack.is_empty(), "finish with open tokens: {:?}", self.stack);
        let resolve_alls = std::mem::take(&mut self.resolve_alls);
        let ctx = ResolveContext::new(self.codes);
        for construct in resolve_alls {
            if let Some(resolver) = construct.resolve_all {
                resolver(&mut self.events, &ctx);
            }
        }
        self.events
    }
}
