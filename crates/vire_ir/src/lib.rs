//! Expression trees and the structural netlist.
//!
//! The input side is the typed [`Expr`] tree handed over by elaboration. The
//! output side is a [`Design`]: nets joined by primitive [`Device`]s, each
//! device kind publishing a pin contract that the design enforces on
//! insertion. [`graph::ConnectivityGraph`] gives consumers a read-only
//! petgraph view of the result.

#![warn(missing_docs)]

pub mod arena;
pub mod design;
pub mod device;
pub mod expr;
pub mod func;
pub mod graph;
pub mod ids;
pub mod net;
pub mod scope;
pub mod types;

pub use arena::{Arena, ArenaId};
pub use design::Design;
pub use device::{
    AddSubDir, CompareOutput, Device, DeviceKind, GateKind, PartBase, Pin, PinDirection, PinName,
    ReduceKind,
};
pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use func::{FuncDef, FuncPort};
pub use graph::{ConnectivityGraph, GraphNode};
pub use ids::{DeviceId, FuncId, NetId, ScopeId};
pub use net::{ArrayWords, Net, NetKind, NetRef, PinRef};
pub use scope::Scope;
pub use types::ValueDomain;
