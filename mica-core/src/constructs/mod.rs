//! Bundled grammar rules and the default construct maps.
//!
//! Each rule lives in its own module and only consumes the construct
//! contract plus the effects API - nothing here has special access to the
//! tokenizer. The default maps wire the bundled rules to their trigger
//! codes; callers with their own grammar build a [`ConstructMap`] from
//! scratch instead.

mod code_indented;
mod data;
mod factory_space;
mod heading_atx;

pub use code_indented::CODE_INDENTED;
pub use data::DATA;
pub use factory_space::factory_space;
pub use heading_atx::HEADING_ATX;

use crate::code::Code;
use crate::construct::{Construct, ConstructMap};

/// Trigger table for flow content. Indented code also fires on virtual
/// space, which has no char key; see [`flow_constructs`].
static FLOW_TRIGGERS: phf::Map<char, &'static [&'static Construct]> = phf::phf_map! {
    '#' => &[&HEADING_ATX],
    ' ' => &[&CODE_INDENTED],
    '\t' => &[&CODE_INDENTED],
};

/// The default block-level construct map: ATX headings, indented code, and
/// the data fallback.
pub fn flow_constructs() -> ConstructMap {
    let mut map = ConstructMap::new();
    for (ch, list) in FLOW_TRIGGERS.entries() {
        for construct in *list {
            map.register(Code::Char(*ch), construct);
        }
    }
    map.register(Code::VirtualSpace, &CODE_INDENTED);
    map.register_other(&DATA);
    map
}

/// The default inline construct map: data only. Inline grammar plugs in
/// here as further constructs are registered.
pub fn text_constructs() -> ConstructMap {
    let mut map = ConstructMap::new();
    map.register_other(&DATA);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_defaults() {
        let map = flow_constructs();
        assert!(map.is_trigger(Code::Char('#')));
        assert!(map.is_trigger(Code::Char(' ')));
        assert!(map.is_trigger(Code::Char('\t')));
        assert!(map.is_trigger(Code::VirtualSpace));
        assert!(!map.is_trigger(Code::Char('a')));
        assert_eq!(map.others().len(), 1);
    }

    #[test]
    fn text_defaults() {
        let map = text_constructs();
        assert!(!map.is_trigger(Code::Char('#')));
        assert_eq!(map.others().len(), 1);
    }
}
