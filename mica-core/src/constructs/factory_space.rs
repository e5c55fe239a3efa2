//! Reusable whitespace-run fragment.
//!
//! Not a full construct: a parameterized state-machine factory other rules
//! compose wherever their grammar says "optional run of spaces/tabs". If
//! the first code is not markdown space it emits nothing and succeeds
//! immediately; otherwise it opens a token of the given type, consumes up
//! to `max` space codes, closes it, and succeeds. The first non-matching
//! code is re-dispatched to the continuation either way.

use crate::code::is_markdown_space;
use crate::event::TokenType;
use crate::tokenizer::{State, StateFn};

/// Build the whitespace-run state. `max` caps the run length; `None` is
/// unbounded.
pub fn factory_space<'a>(ok: StateFn<'a>, token_type: TokenType, max: Option<usize>) -> StateFn<'a> {
    let limit = max.unwrap_or(usize::MAX);
    let mut ok = Some(ok);
    Box::new(move |tokenizer, code| {
        if is_markdown_space(code) {
            tokenizer.enter(token_type);
            State::Next(prefix(0, limit, token_type, ok.take()))
        } else {
            State::Next(ok.take().expect("space run resumed twice"))
        }
    })
}

fn prefix<'a>(
    size: usize,
    limit: usize,
    token_type: TokenType,
    mut ok: Option<StateFn<'a>>,
) -> StateFn<'a> {
    Box::new(move |tokenizer, code| {
        if is_markdown_space(code) && size < limit {
            tokenizer.consume(code);
            State::Next(prefix(size + 1, limit, token_type, ok.take()))
        } else {
            tokenizer.exit(token_type);
            State::Next(ok.take().expect("space run resumed twice"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{preprocess, Code};
    use crate::construct::ConstructMap;
    use crate::event::EventKind;
    use crate::parse::NotLazy;
    use crate::tokenizer::Tokenizer;

    fn run_space(input: &str, max: Option<usize>) -> (Vec<crate::event::Event>, usize) {
        let codes = preprocess(input);
        let map = ConstructMap::new();
        let mut tokenizer = Tokenizer::new(&codes, &map, &NotLazy);
        tokenizer.run(State::Next(factory_space(
            Box::new(|_, _| State::Ok),
            TokenType::Whitespace,
            max,
        )));
        let index = tokenizer.now().index;
        (tokenizer.finish(), index)
    }

    #[test]
    fn no_space_no_events() {
        let (events, index) = run_space("x", None);
        assert!(events.is_empty());
        assert_eq!(index, 0);
    }

    #[test]
    fn unbounded_run() {
        let (events, index) = run_space("      x", None);
        assert_eq!(events.len(), 2);
        assert_eq!(index, 6);
    }

    #[test]
    fn bounded_run_stops_at_max() {
        // Seven spaces, cap of four: the token covers exactly four and the
        // remaining three are left for whatever comes next.
        let (events, index) = run_space("       x", Some(4));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Enter);
        assert_eq!(events[0].point.index, 0);
        assert_eq!(events[1].kind, EventKind::Exit);
        assert_eq!(events[1].point.index, 4);
        assert_eq!(index, 4);
    }

    #[test]
    fn tab_counts_per_column() {
        // A tab at column 1 expands to four codes, filling a cap of four.
        let (events, index) = run_space("\tx", Some(4));
        assert_eq!(events[1].point.index, 4);
        assert_eq!(index, 4);
        let codes = preprocess("\tx");
        assert_eq!(codes[index], Code::Char('x'));
    }

    #[test]
    fn stops_at_line_ending() {
        let (events, index) = run_space("  \n", None);
        assert_eq!(events[1].point.index, 2);
        assert_eq!(index, 2);
    }
}
