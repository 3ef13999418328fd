//! Naming scopes.

use crate::ids::ScopeId;
use serde::{Deserialize, Serialize};
use vire_common::Ident;

/// A naming scope: module instance, function body or named block.
///
/// Synthesis names its temporaries through [`Scope::local_symbol`], which
/// hands out `_s0`, `_s1`, ... in creation order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scope {
    /// Own id.
    pub id: ScopeId,
    /// Scope name.
    pub name: Ident,
    /// Enclosing scope; `None` for the root.
    pub parent: Option<ScopeId>,
    next_local: u32,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, name: Ident, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            name,
            parent,
            next_local: 0,
        }
    }

    /// Returns a fresh compiler-generated name.
    pub fn local_symbol(&mut self) -> String {
        let n = self.next_local;
        self.next_local += 1;
        format!("_s{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_symbols_are_sequential() {
        let mut scope = Scope::new(ScopeId::from_raw(0), Ident::from_raw(0), None);
        assert_eq!(scope.local_symbol(), "_s0");
        assert_eq!(scope.local_symbol(), "_s1");
        assert_eq!(scope.local_symbol(), "_s2");
    }
}
