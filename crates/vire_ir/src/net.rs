//! Nets: the wires between device pins.

use crate::device::PinName;
use crate::ids::{DeviceId, NetId, ScopeId};
use crate::types::ValueDomain;
use serde::{Deserialize, Serialize};
use vire_common::Ident;
use vire_source::Span;

/// How a net came into existence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NetKind {
    /// Declared in source.
    Wire,
    /// Created by synthesis to carry an intermediate value.
    Implicit,
}

/// One device pin attached to a net.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PinRef {
    /// Device owning the pin.
    pub device: DeviceId,
    /// Which pin.
    pub pin: PinName,
}

/// Word nets of a memory, one per address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayWords {
    /// Index written first in the declaration (`mem[first:last]`).
    pub first: i64,
    /// Index written second.
    pub last: i64,
    /// `words[a]` is the net stored at address `a`.
    pub words: Vec<NetId>,
}

impl ArrayWords {
    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` for a memory with no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Maps a source index to a zero-based address.
    ///
    /// Addresses count from `first` toward `last`, so `mem[7:0]` puts index 7
    /// at address 0.
    pub fn address(&self, index: i64) -> Option<usize> {
        let offset = if self.first <= self.last {
            index.checked_sub(self.first)?
        } else {
            self.first.checked_sub(index)?
        };
        let addr = usize::try_from(offset).ok()?;
        (addr < self.words.len()).then_some(addr)
    }

    /// The word net at source index `index`.
    pub fn word(&self, index: i64) -> Option<NetId> {
        self.address(index).map(|a| self.words[a])
    }
}

/// A net in the structural netlist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Net {
    /// Own id.
    pub id: NetId,
    /// Name, unique within `scope`.
    pub name: Ident,
    /// Owning scope.
    pub scope: ScopeId,
    /// Declared or synthesized.
    pub kind: NetKind,
    /// Bit width; always 1 for real nets.
    pub width: u32,
    /// Value domain.
    pub domain: ValueDomain,
    /// Two's-complement interpretation.
    pub signed: bool,
    /// Compiler-generated, not visible to the user.
    pub local: bool,
    /// Every pin connected to this net, in connection order.
    pub endpoints: Vec<PinRef>,
    /// Present when this net names a memory.
    pub array: Option<ArrayWords>,
    /// Source location.
    pub span: Span,
}

/// What a device pin connects to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NetRef {
    /// The whole net.
    Net(NetId),
    /// One bit of a net.
    Bit {
        /// Source net.
        net: NetId,
        /// Bit index, 0 being the LSB.
        index: u32,
    },
}

impl NetRef {
    /// The underlying net.
    pub fn net(self) -> NetId {
        match self {
            NetRef::Net(net) | NetRef::Bit { net, .. } => net,
        }
    }
}

impl From<NetId> for NetRef {
    fn from(net: NetId) -> Self {
        NetRef::Net(net)
    }
}
