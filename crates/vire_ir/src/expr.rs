//! Typed, width-resolved expression trees.
//!
//! These trees are produced by elaboration and consumed read-only by
//! synthesis. Every node already carries its final width, value domain and
//! signedness, so synthesis never infers them.

use crate::ids::{FuncId, NetId, ScopeId};
use crate::types::ValueDomain;
use serde::{Deserialize, Serialize};
use std::fmt;
use vire_common::LogicVec;
use vire_source::Span;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `&`
    BitAnd,
    /// `~&`
    BitNand,
    /// `|`
    BitOr,
    /// `~|`
    BitNor,
    /// `^`
    BitXor,
    /// `~^`
    BitXnor,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `===`
    CaseEq,
    /// `!==`
    CaseNe,
    /// `**`
    Pow,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `&&`
    LogicAnd,
    /// `||`
    LogicOr,
    /// `<<` and `<<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    AShr,
}

impl BinaryOp {
    /// Source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitNand => "~&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitNor => "~|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitXnor => "~^",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::CaseEq => "===",
            BinaryOp::CaseNe => "!==",
            BinaryOp::Pow => "**",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::LogicAnd => "&&",
            BinaryOp::LogicOr => "||",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::AShr => ">>>",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `~`
    BitNot,
    /// `-`
    Neg,
    /// `&`
    RedAnd,
    /// `|`
    RedOr,
    /// `^`
    RedXor,
    /// `~&`
    RedNand,
    /// `~|`
    RedNor,
    /// `~^`
    RedXnor,
    /// `!`
    LogicNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::BitNot => "~",
            UnaryOp::Neg => "-",
            UnaryOp::RedAnd => "&",
            UnaryOp::RedOr => "|",
            UnaryOp::RedXor => "^",
            UnaryOp::RedNand => "~&",
            UnaryOp::RedNor => "~|",
            UnaryOp::RedXnor => "~^",
            UnaryOp::LogicNot => "!",
        })
    }
}

/// Expression node kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Bit-vector literal.
    Const(LogicVec),
    /// Real literal.
    RealConst(f64),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Unary operation or reduction.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// `{repeat{parts...}}`; `parts[0]` is the leftmost (most significant) operand.
    Concat {
        /// Operands in source order.
        parts: Vec<Expr>,
        /// Repeat count, at least 1.
        repeat: u32,
    },
    /// Part-select `expr[base +: width]`, or a pure width change when `base` is `None`.
    Select {
        /// Selected value.
        expr: Box<Expr>,
        /// Bit offset.
        base: Option<Box<Expr>>,
    },
    /// `cond ? true_val : false_val`.
    Ternary {
        /// Condition.
        cond: Box<Expr>,
        /// Value when the condition holds.
        true_val: Box<Expr>,
        /// Value otherwise.
        false_val: Box<Expr>,
    },
    /// Reference to a declared net, or to one word of a memory.
    Signal {
        /// The net, or the memory net when `word` is set.
        net: NetId,
        /// Word index into the memory.
        word: Option<Box<Expr>>,
    },
    /// `$name(args...)`.
    SysFunc {
        /// Function name including the `$`.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
    },
    /// Call to a user function.
    UserFunc {
        /// Called function.
        func: FuncId,
        /// Scope of the call site.
        scope: ScopeId,
        /// Arguments in port order.
        args: Vec<Expr>,
    },
    /// Unresolved parameter reference.
    Param(String),
    /// Hierarchical scope reference.
    ScopeRef(ScopeId),
    /// Event expression.
    Event,
}

/// An expression with its resolved type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Node kind.
    pub kind: ExprKind,
    /// Width in bits (1 for reals).
    pub width: u32,
    /// Value domain.
    pub domain: ValueDomain,
    /// Signedness.
    pub signed: bool,
    /// Source location.
    pub span: Span,
}

impl Expr {
    /// Creates a node with a dummy span.
    pub fn new(kind: ExprKind, width: u32, domain: ValueDomain, signed: bool) -> Self {
        Self {
            kind,
            width,
            domain,
            signed,
            span: Span::DUMMY,
        }
    }

    /// Sets the span.
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Bit-vector literal sized by `value`.
    pub fn constant(value: LogicVec, signed: bool) -> Self {
        let width = value.width();
        Self::new(ExprKind::Const(value), width, ValueDomain::Logic, signed)
    }

    /// Real literal.
    pub fn real(value: f64) -> Self {
        Self::new(ExprKind::RealConst(value), 1, ValueDomain::Real, false)
    }

    /// Plain net reference.
    pub fn net(net: NetId, width: u32, domain: ValueDomain, signed: bool) -> Self {
        Self::new(ExprKind::Signal { net, word: None }, width, domain, signed)
    }

    /// Binary node.
    pub fn binary(
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
        width: u32,
        domain: ValueDomain,
        signed: bool,
    ) -> Self {
        let kind = ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        Self::new(kind, width, domain, signed)
    }

    /// Unary node.
    pub fn unary(op: UnaryOp, operand: Expr, width: u32, domain: ValueDomain, signed: bool) -> Self {
        let kind = ExprKind::Unary {
            op,
            operand: Box::new(operand),
        };
        Self::new(kind, width, domain, signed)
    }

    /// The literal value, if this is a bit-vector constant.
    pub fn as_const(&self) -> Option<&LogicVec> {
        match &self.kind {
            ExprKind::Const(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for real-valued nodes.
    pub fn is_real(&self) -> bool {
        self.domain.is_real()
    }
}
