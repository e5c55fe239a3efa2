//! Tokens, events, and the chunked event splice.
//!
//! This is a SAX-style model: the tokenizer's output is a flat sequence of
//! enter/exit boundaries, with no tree accumulation. An enter event carries
//! the token's start position, the matching exit carries its end position;
//! the pair defines a span over the original input. Tokens never own text,
//! only positions - text is re-sliced from the code sequence on demand.
//!
//! Resolvers rewrite finished event ranges through [`chunked_splice`], which
//! behaves like one atomic splice but works in bounded batches so rewriting
//! a span comparable to the whole buffer stays usable on long documents.

use crate::code::{slice_serialize, Code};

// ============================================================================
// Positions and tokens
// ============================================================================

/// A position in the input: 1-based line and column, plus the index into the
/// preprocessed code sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

impl Point {
    /// Start of input.
    pub fn start() -> Self {
        Point { line: 1, column: 1, index: 0 }
    }
}

/// The fixed token vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenType {
    /// A whole ATX heading: `## foo`.
    AtxHeading,
    /// A run of `#` markers inside an ATX heading.
    AtxHeadingSequence,
    /// Heading content between the markers.
    AtxHeadingText,
    /// A span tagged for text-content subtokenization.
    ChunkText,
    /// A whole indented code block.
    CodeIndented,
    /// One line of verbatim code content.
    CodeFlowValue,
    /// Literal content nothing else claimed.
    Data,
    /// A line break.
    LineEnding,
    /// Indentation at the start of a line.
    LinePrefix,
    /// A run of spaces/tabs inside a construct.
    Whitespace,
}

/// Tag on a token whose text is re-tokenized later under another grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Block-level grammar.
    Flow,
    /// Inline grammar.
    Text,
}

// ============================================================================
// Events
// ============================================================================

/// Which boundary of a token an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Enter,
    Exit,
}

/// One token boundary.
///
/// Exactly one `Enter` and one `Exit` exist per token and they are
/// well-nested. `point` is the start position on an enter and the end
/// position on an exit. `content_type` is only ever set on an enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub token_type: TokenType,
    pub point: Point,
    pub content_type: Option<ContentType>,
}

impl Event {
    pub fn enter(token_type: TokenType, point: Point) -> Self {
        Event { kind: EventKind::Enter, token_type, point, content_type: None }
    }

    pub fn exit(token_type: TokenType, point: Point) -> Self {
        Event { kind: EventKind::Exit, token_type, point, content_type: None }
    }
}

/// Input handle passed to resolvers, for re-slicing token text.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    codes: &'a [Code],
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(codes: &'a [Code]) -> Self {
        ResolveContext { codes }
    }

    /// The text between two points, virtual spaces expanded.
    pub fn slice(&self, start: Point, end: Point) -> String {
        slice_serialize(self.codes, start.index, end.index, true)
    }
}

// ============================================================================
// Chunked splice
// ============================================================================

/// Batch size for [`chunked_splice`]. Bounds the size of any single
/// underlying edit; callers cannot observe the batching.
const SPLICE_CHUNK_SIZE: usize = 10_000;

/// Replace `events[start..start + delete_count]` with `insert`.
///
/// Observationally a single atomic splice: relative order outside the edited
/// range is preserved. Internally both the deletion and the insertion happen
/// in batches of at most [`SPLICE_CHUNK_SIZE`] events, so resolvers can
/// rewrite very large ranges without one unbounded bulk operation.
///
/// Nesting balance of the whole buffer is the caller's obligation: `insert`
/// must be balanced relative to what it replaces.
pub fn chunked_splice(events: &mut Vec<Event>, start: usize, delete_count: usize, insert: Vec<Event>) {
    debug_assert!(start <= events.len(), "splice start out of bounds");
    let delete_count = delete_count.min(events.len() - start);

    let mut deleted = 0;
    while deleted < delete_count {
        let batch = (delete_count - deleted).min(SPLICE_CHUNK_SIZE);
        events.drain(start..start + batch);
        deleted += batch;
    }

    let mut at = start;
    let mut insert = insert.into_iter();
    loop {
        let batch: Vec<Event> = insert.by_ref().take(SPLICE_CHUNK_SIZE).collect();
        if batch.is_empty() {
            break;
        }
        let len = batch.len();
        events.splice(at..at, batch);
        at += len;
    }
}
