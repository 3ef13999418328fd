//! Typed ids for netlist objects.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Unwraps the raw index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A net in the [`Design`](crate::Design).
    NetId,
    "n"
);

define_id!(
    /// A device in the [`Design`](crate::Design).
    DeviceId,
    "d"
);

define_id!(
    /// A naming scope (module instance, function body, ...).
    ScopeId,
    "s"
);

define_id!(
    /// A user function definition.
    FuncId,
    "f"
);
