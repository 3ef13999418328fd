//! User function signatures.

use crate::ids::{FuncId, ScopeId};
use crate::types::ValueDomain;
use serde::{Deserialize, Serialize};
use vire_common::Ident;

/// Shape of one value crossing a function boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FuncPort {
    /// Port name.
    pub name: Ident,
    /// Width in bits (1 for reals).
    pub width: u32,
    /// Value domain.
    pub domain: ValueDomain,
    /// Signedness.
    pub signed: bool,
}

/// Signature of a user function as seen by a call site.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FuncDef {
    /// Own id.
    pub id: FuncId,
    /// Function name.
    pub name: Ident,
    /// Body scope.
    pub scope: ScopeId,
    /// Return value; `name` is the function name.
    pub result: FuncPort,
    /// Input ports in declaration order.
    pub ports: Vec<FuncPort>,
}
