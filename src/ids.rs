//! Identifier types minted by the store.
//!
//! Every entity id has the shape `"{type}_{counter}_{creation-timestamp}"`.
//! Counters are per-type and monotonic for the lifetime of a [`crate::store::Store`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Monotonic per-process fallback clock used when no timestamp is supplied.
///
/// The store never reads the system clock directly (that would make
/// `compile()` output depend on wall time); callers that care about
/// real timestamps pass them in via [`crate::store::StoreConfig`].
static FALLBACK_TICK: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_fallback_tick() -> u64 {
    FALLBACK_TICK.fetch_add(1, Ordering::Relaxed)
}

macro_rules! id_type {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Mints a new id of this type from a per-type counter and a timestamp.
            pub fn mint(counter: u64, timestamp: u64) -> Self {
                Self(format!(concat!($prefix, "_{}_{}"), counter, timestamp))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type!(ElementId, "element");
id_type!(VariableId, "variable");
id_type!(BindingId, "binding");
id_type!(EventId, "event");
id_type!(GroupId, "group");

/// A variable's name. Names are unique across all three variable
/// partitions and are themselves used as the dependency-analysis key.
pub type VariableName = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_formats_type_counter_timestamp() {
        let id = ElementId::mint(3, 1000);
        assert_eq!(id.as_str(), "element_3_1000");
    }

    #[test]
    fn distinct_id_types_do_not_collide_in_a_map() {
        // Different newtypes can't alias even with the same counter/timestamp,
        // so "does this id exist" checks operate on typed keys rather than
        // raw strings.
        let e = ElementId::mint(1, 1);
        let v = VariableId::mint(1, 1);
        assert_eq!(e.as_str(), v.as_str());
        assert_ne!(std::any::type_name::<ElementId>(), std::any::type_name::<VariableId>());
    }
}
