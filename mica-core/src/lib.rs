//! mica Core Tokenizer
//!
//! Streaming, event-based CommonMark tokenizer. Emits enter/exit token
//! boundaries without building an AST; grammar rules are pluggable
//! constructs tried with ordered priority and full backtracking.
//!
//! # Architecture
//!
//! - **code.rs** - Code-point alphabet, classification, preprocessing
//! - **event.rs** - Tokens, events, chunked splice
//! - **construct.rs** - The construct contract and trigger registration
//! - **tokenizer.rs** - Cursor, effects API, attempt/check backtracking
//! - **subtokenize.rs** - Nested re-tokenization of tagged content spans
//! - **parse.rs** - Entry points, content drivers, lazy-continuation oracle
//! - **constructs/** - Bundled grammar rules and default maps
//!
//! # Example
//!
//! ```
//! use mica_core::{parse, EventKind, TokenType};
//!
//! let parsed = parse("# Hello");
//! let heading = parsed
//!     .events
//!     .iter()
//!     .position(|e| e.kind == EventKind::Enter && e.token_type == TokenType::AtxHeading)
//!     .unwrap();
//! assert_eq!(parsed.events[heading].point.line, 1);
//! ```

pub mod code;
pub mod construct;
pub mod constructs;
pub mod event;
pub mod parse;
pub mod subtokenize;
pub mod tokenizer;

pub use code::{
    is_line_ending, is_line_ending_or_space, is_markdown_space, preprocess, slice_serialize, Code,
    TAB_SIZE,
};
pub use construct::{Construct, ConstructMap, Resolver, Tokenize};
pub use event::{chunked_splice, ContentType, Event, EventKind, Point, ResolveContext, TokenType};
pub use parse::{content_start, parse, parse_with, LazyLines, LazyOracle, NotLazy, ParseOptions, Parsed};
pub use subtokenize::subtokenize;
pub use tokenizer::{State, StateFn, Tokenizer};
