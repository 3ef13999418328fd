//! Value domains of nets and expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of value a net or expression carries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum ValueDomain {
    /// Untyped; never valid on both arms of a ternary.
    #[default]
    NoType,
    /// 4-state bit vector.
    Logic,
    /// Scalar real number. Real nets are always width 1.
    Real,
}

impl ValueDomain {
    /// Returns `true` for [`ValueDomain::Real`].
    pub fn is_real(self) -> bool {
        self == ValueDomain::Real
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueDomain::NoType => "no type",
            ValueDomain::Logic => "logic",
            ValueDomain::Real => "real",
        })
    }
}
