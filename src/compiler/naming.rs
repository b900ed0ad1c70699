//! Stable, collision-free naming for generated holders.

use std::collections::{HashMap, HashSet};

use crate::ids::ElementId;

/// Assigns JS identifier-safe names to element holders and other
/// generated bindings, guaranteeing no two distinct ids ever receive the
/// same name, and remembering the assignment so later emission stages
/// (bindings, events) can look up the holder a given element was given.
#[derive(Debug, Default)]
pub(crate) struct Namer {
    seen: HashSet<String>,
    assigned: HashMap<String, String>,
    fallback_counter: u64,
}

impl Namer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a holder name from an element id's numeric counter segment
    /// (`element_3_1700000000` → `e3`). Ids that don't conform to the
    /// minted shape (hand-constructed IR) fall back to a private counter.
    /// Idempotent: calling this twice for the same id returns the same name.
    pub fn element_holder(&mut self, id: &ElementId) -> String {
        if let Some(existing) = self.assigned.get(id.as_str()) {
            return existing.clone();
        }
        let base = match id.as_str().split('_').nth(1) {
            Some(segment) if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => {
                format!("e{segment}")
            }
            _ => {
                let name = format!("e_u{}", self.fallback_counter);
                self.fallback_counter += 1;
                name
            }
        };
        let name = self.dedupe(base);
        self.assigned.insert(id.as_str().to_string(), name.clone());
        name
    }

    /// Looks up a holder previously assigned by [`Self::element_holder`],
    /// without minting a new one.
    pub fn existing_holder(&self, id: &ElementId) -> Option<&str> {
        self.assigned.get(id.as_str()).map(String::as_str)
    }

    fn dedupe(&mut self, base: String) -> String {
        if self.seen.insert(base.clone()) {
            return base;
        }
        loop {
            let candidate = format!("{base}_{}", self.fallback_counter);
            self.fallback_counter += 1;
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// camelCases a kebab- or snake-case CSS property name (`background-color`
/// → `backgroundColor`) for assignment through the `style` object.
pub(crate) fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_holder_uses_counter_segment() {
        let mut namer = Namer::new();
        let id = ElementId::mint(3, 1000);
        assert_eq!(namer.element_holder(&id), "e3");
    }

    #[test]
    fn element_holder_dedupes_conflicting_hand_built_ids() {
        let mut namer = Namer::new();
        let a = ElementId::from("weird-id");
        let b = ElementId::from("weird-id-2");
        let first = namer.element_holder(&a);
        let second = namer.element_holder(&b);
        assert_ne!(first, second);
    }

    #[test]
    fn camel_case_converts_kebab_and_snake() {
        assert_eq!(camel_case("background-color"), "backgroundColor");
        assert_eq!(camel_case("font_size"), "fontSize");
        assert_eq!(camel_case("color"), "color");
    }
}
