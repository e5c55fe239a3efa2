//! Nested re-tokenization of tagged content spans.
//!
//! Block and inline grammar are layered independently: a block construct
//! marks a span with a content type instead of parsing it, and this pass
//! later runs a fresh tokenizer over exactly that span's code range with
//! the construct set registered for that content type. The nested events
//! are spliced into the parent buffer where the tagged span sat.
//!
//! Each nested pass is its own tokenizer instance with its own buffer; it
//! touches the parent buffer once, via splice, after it finishes. From the
//! parent's perspective the whole thing is a synchronous, atomic
//! sub-computation.

use crate::code::Code;
use crate::event::{chunked_splice, Event, EventKind};
use crate::parse::{content_start, ParseOptions};
use crate::tokenizer::{State, Tokenizer};

/// Expand every content-tagged token in `events` one level.
///
/// Returns whether anything was expanded; callers loop to fixpoint so
/// content nested inside freshly produced events is expanded too.
pub fn subtokenize(events: &mut Vec<Event>, codes: &[Code], options: &ParseOptions<'_>) -> bool {
    let mut expanded = false;
    let mut index = 0;

    while index < events.len() {
        let event = events[index];
        let content_type = match (event.kind, event.content_type) {
            (EventKind::Enter, Some(content_type)) => content_type,
            _ => {
                index += 1;
                continue;
            }
        };

        // Tagged tokens are leaves: their exit is adjacent.
        let exit = events[index + 1];
        debug_assert!(
            exit.kind == EventKind::Exit && exit.token_type == event.token_type,
            "content-tagged token {:?} is not a leaf",
            event.token_type,
        );

        let mut inner = Tokenizer::new_at(
            codes,
            event.point,
            exit.point.index,
            options.map_for(content_type),
            options.lazy,
        );
        inner.run(State::Next(content_start(content_type)));
        let sub = inner.finish();

        let len = sub.len();
        chunked_splice(events, index, 2, sub);
        index += len;
        expanded = true;
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::preprocess;
    use crate::event::{ContentType, Point, TokenType};

    #[test]
    fn expands_a_tagged_span_in_place() {
        let codes = preprocess("ab");
        let options = ParseOptions::default();
        let mut events = vec![
            Event {
                kind: EventKind::Enter,
                token_type: TokenType::ChunkText,
                point: Point::start(),
                content_type: Some(ContentType::Text),
            },
            Event::exit(TokenType::ChunkText, Point { line: 1, column: 3, index: 2 }),
        ];

        assert!(subtokenize(&mut events, &codes, &options));
        // The chunk pair is gone, replaced by the nested pass's data token.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].token_type, TokenType::Data);
        assert_eq!(events[0].point.index, 0);
        assert_eq!(events[1].point.index, 2);
        // Nothing left to expand.
        assert!(!subtokenize(&mut events, &codes, &options));
    }

    #[test]
    fn empty_span_just_disappears() {
        let codes = preprocess("x");
        let options = ParseOptions::default();
        let point = Point { line: 1, column: 2, index: 1 };
        let mut events = vec![
            Event {
                kind: EventKind::Enter,
                token_type: TokenType::ChunkText,
                point,
                content_type: Some(ContentType::Text),
            },
            Event::exit(TokenType::ChunkText, point),
        ];

        assert!(subtokenize(&mut events, &codes, &options));
        assert!(events.is_empty());
    }

    #[test]
    fn nested_positions_stay_in_parent_coordinates() {
        let codes = preprocess("xx\nabc");
        let options = ParseOptions::default();
        let start = Point { line: 2, column: 1, index: 3 };
        let end = Point { line: 2, column: 4, index: 6 };
        let mut events = vec![
            Event {
                kind: EventKind::Enter,
                token_type: TokenType::ChunkText,
                point: start,
                content_type: Some(ContentType::Text),
            },
            Event::exit(TokenType::ChunkText, end),
        ];

        subtokenize(&mut events, &codes, &options);
        assert_eq!(events[0].point, start);
        assert_eq!(events[1].point, end);
    }
}
