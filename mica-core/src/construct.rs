//! The construct contract and trigger registration.
//!
//! A construct is one grammar rule: a state-machine entry point plus
//! optional post-hoc rewriting hooks. Constructs are stateless `'static`
//! descriptors - all per-parse state lives in the state closures they
//! build - so the same descriptor can be registered in any number of maps
//! and identity is simply pointer identity.
//!
//! A [`ConstructMap`] holds, per trigger code, an ordered candidate list;
//! the order is grammar precedence. The map is supplied by the caller (the
//! surrounding content-model driver), not baked into the engine; built-in
//! defaults for the bundled constructs live in [`crate::constructs`].

use std::collections::BTreeMap;

use crate::code::Code;
use crate::event::{Event, ResolveContext};
use crate::tokenizer::{State, Tokenizer};

/// Builds a construct's entry state, bound to the running tokenizer.
pub type Tokenize = for<'r, 'a> fn(&'r mut Tokenizer<'a>) -> State<'a>;

/// Rewrites a finished range of events in place.
pub type Resolver = for<'r, 'c> fn(&'r mut Vec<Event>, &ResolveContext<'c>);

/// A pluggable grammar rule.
pub struct Construct {
    /// Diagnostic name, used in invariant-violation messages.
    pub name: &'static str,
    /// Entry point of the rule's state machine.
    pub tokenize: Tokenize,
    /// Runs once, right after this construct succeeds, over exactly the
    /// events it produced.
    pub resolve: Option<Resolver>,
    /// Runs once per content pass, after all constructs of the pass have
    /// tokenized, over the whole event buffer.
    pub resolve_all: Option<Resolver>,
    /// Partial constructs only produce structural effects for an enclosing
    /// construct. They may be attempted as sub-parses but never registered
    /// as top-level candidates.
    pub partial: bool,
}

impl std::fmt::Debug for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Construct")
            .field("name", &self.name)
            .field("partial", &self.partial)
            .finish()
    }
}

/// Ordered construct registration: trigger code -> candidate list, plus a
/// wildcard bucket for "any other code".
#[derive(Debug, Default, Clone)]
pub struct ConstructMap {
    triggers: BTreeMap<char, Vec<&'static Construct>>,
    virtual_space: Vec<&'static Construct>,
    others: Vec<&'static Construct>,
}

impl ConstructMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `construct` for `trigger`, after anything already there.
    ///
    /// Registering a partial construct is a caller bug: partials have no
    /// stand-alone token and cannot be a top-level grammar alternative.
    pub fn register(&mut self, trigger: Code, construct: &'static Construct) {
        debug_assert!(
            !construct.partial,
            "partial construct `{}` cannot be registered as a candidate",
            construct.name,
        );
        match trigger {
            Code::Char(ch) => self.triggers.entry(ch).or_default().push(construct),
            Code::VirtualSpace => self.virtual_space.push(construct),
            Code::Eof | Code::LineEnding => {
                debug_assert!(false, "line endings and eof are driver territory, not triggers");
            }
        }
    }

    /// Register `construct` in the wildcard bucket, tried when no trigger
    /// candidate matches.
    pub fn register_other(&mut self, construct: &'static Construct) {
        debug_assert!(
            !construct.partial,
            "partial construct `{}` cannot be registered as a candidate",
            construct.name,
        );
        self.others.push(construct);
    }

    /// The ordered candidates for `code`. Empty when nothing triggers here.
    pub fn candidates(&self, code: Code) -> &[&'static Construct] {
        match code {
            Code::Char(ch) => self.triggers.get(&ch).map(Vec::as_slice).unwrap_or(&[]),
            Code::VirtualSpace => &self.virtual_space,
            Code::Eof | Code::LineEnding => &[],
        }
    }

    /// The wildcard candidates.
    pub fn others(&self) -> &[&'static Construct] {
        &self.others
    }

    /// Whether `code` has trigger candidates. The data fallback uses this to
    /// know where to stop so registered constructs get another chance.
    pub fn is_trigger(&self, code: Code) -> bool {
        !self.candidates(code).is_empty()
    }
}
