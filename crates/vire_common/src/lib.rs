//! Shared foundational types for the vire synthesis workspace.
//!
//! Interned identifiers, 4-state logic values, packed constant vectors, and
//! the internal-error result type used for broken compiler invariants.

#![warn(missing_docs)]

pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{InternalError, VireResult};
