//! Shared helpers for integration tests.

pub mod loader;

#[allow(unused_imports)]
pub use loader::{load_fixtures_by_name, ExpectedEvent, TestCase};

use mica_core::{EventKind, Parsed, Point, TokenType};

/// Token types whose text is worth asserting on; structural wrappers and
/// line furniture compare by name only.
fn carries_content(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Data | TokenType::CodeFlowValue | TokenType::AtxHeadingSequence
    )
}

/// Format events for comparison: `"Enter AtxHeading"`, `"Exit Data \"foo\""`.
pub fn format_events(parsed: &Parsed) -> Vec<String> {
    let mut stack: Vec<Point> = Vec::new();
    let mut out = Vec::with_capacity(parsed.events.len());
    for event in &parsed.events {
        match event.kind {
            EventKind::Enter => {
                stack.push(event.point);
                out.push(format!("Enter {:?}", event.token_type));
            }
            EventKind::Exit => {
                let start = stack.pop().expect("exit without enter");
                if carries_content(event.token_type) {
                    let text = parsed.slice(start, event.point);
                    out.push(format!("Exit {:?} {:?}", event.token_type, text));
                } else {
                    out.push(format!("Exit {:?}", event.token_type));
                }
            }
        }
    }
    assert!(stack.is_empty(), "unbalanced event stream");
    out
}

/// Parse and format in one go.
#[allow(dead_code)]
pub fn tokenize_to_strings(input: &str) -> Vec<String> {
    format_events(&mica_core::parse(input))
}
