//! Expression synthesis: walks an [`Expr`] tree and builds devices and nets.
//!
//! Every rule returns `Ok(Some(net))` for the net carrying the value,
//! `Ok(None)` after emitting a counted diagnostic, or `Err` when the input
//! breaks an invariant elaboration guarantees. Children are visited
//! left-to-right, depth-first.

use crate::binary::synth_binary;
use crate::coerce::{const_net, crop_to_width, extend, fit_to_width, real_literal};
use crate::errors;
use vire_common::{InternalError, VireResult};
use vire_config::SynthConfig;
use vire_diagnostics::Diagnostic;
use vire_ir::{
    Design, DeviceKind, Expr, ExprKind, FuncId, GateKind, NetId, NetRef, PartBase, PinName,
    ReduceKind, ScopeId, UnaryOp, ValueDomain,
};

/// State threaded through one synthesis walk.
pub(crate) struct SynthCtx<'a> {
    pub(crate) design: &'a mut Design,
    pub(crate) config: &'a SynthConfig,
}

impl SynthCtx<'_> {
    /// Emits `diag` and returns the failure marker.
    pub(crate) fn fail(&self, diag: Diagnostic) -> VireResult<Option<NetId>> {
        log::debug!("{} [{}]: {}", diag.severity, diag.code, diag.message);
        self.design.emit(diag);
        Ok(None)
    }
}

/// Synthesizes `expr`, returning the net that carries its value.
pub(crate) fn synth_expr(cx: &mut SynthCtx<'_>, expr: &Expr) -> VireResult<Option<NetId>> {
    log::trace!("synthesizing {} ({} bits, {})", kind_name(&expr.kind), expr.width, expr.domain);
    match &expr.kind {
        ExprKind::Const(value) => {
            let root = cx.design.root_scope();
            const_net(cx.design, root, value.clone(), expr.signed, expr.span).map(Some)
        }
        ExprKind::RealConst(value) => real_literal(cx.design, *value, expr.span).map(Some),
        ExprKind::Binary { op, lhs, rhs } => synth_binary(cx, expr, *op, lhs, rhs),
        ExprKind::Unary { op, operand } => synth_unary(cx, expr, *op, operand),
        ExprKind::Concat { parts, repeat } => synth_concat(cx, expr, parts, *repeat),
        ExprKind::Select { expr: sub, base } => synth_select(cx, expr, sub, base.as_deref()),
        ExprKind::Ternary {
            cond,
            true_val,
            false_val,
        } => synth_ternary(cx, expr, cond, true_val, false_val),
        ExprKind::Signal { net, word } => synth_signal(cx, expr, *net, word.as_deref()),
        ExprKind::SysFunc { name, .. } => cx.fail(errors::sorry_system_function(name, expr.span)),
        ExprKind::UserFunc { func, scope, args } => synth_user_func(cx, expr, *func, *scope, args),
        ExprKind::Param(name) => cx.fail(errors::internal_cannot_synthesize(
            &format!("parameter reference `{name}`"),
            expr.span,
        )),
        ExprKind::ScopeRef(_) => cx.fail(errors::internal_cannot_synthesize(
            "scope reference",
            expr.span,
        )),
        ExprKind::Event => cx.fail(errors::internal_cannot_synthesize(
            "event expression",
            expr.span,
        )),
    }
}

fn kind_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Const(_) => "constant",
        ExprKind::RealConst(_) => "real constant",
        ExprKind::Binary { .. } => "binary",
        ExprKind::Unary { .. } => "unary",
        ExprKind::Concat { .. } => "concatenation",
        ExprKind::Select { .. } => "select",
        ExprKind::Ternary { .. } => "ternary",
        ExprKind::Signal { .. } => "signal",
        ExprKind::SysFunc { .. } => "system function",
        ExprKind::UserFunc { .. } => "function call",
        ExprKind::Param(_) => "parameter",
        ExprKind::ScopeRef(_) => "scope reference",
        ExprKind::Event => "event",
    }
}

fn reduce_kind(op: UnaryOp) -> Option<ReduceKind> {
    match op {
        UnaryOp::RedAnd => Some(ReduceKind::And),
        UnaryOp::RedOr => Some(ReduceKind::Or),
        UnaryOp::RedXor => Some(ReduceKind::Xor),
        UnaryOp::RedNor | UnaryOp::LogicNot => Some(ReduceKind::Nor),
        UnaryOp::RedXnor => Some(ReduceKind::Xnor),
        // `~&` lowers to an XNOR reduction; existing netlists depend on it.
        UnaryOp::RedNand => Some(ReduceKind::Xnor),
        UnaryOp::BitNot | UnaryOp::Neg => None,
    }
}

fn synth_unary(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: UnaryOp,
    operand: &Expr,
) -> VireResult<Option<NetId>> {
    if op == UnaryOp::Neg {
        return cx.fail(errors::internal_cannot_synthesize(
            "arithmetic negation",
            expr.span,
        ));
    }
    let Some(input) = synth_expr(cx, operand)? else {
        return Ok(None);
    };
    let net = cx.design.net(input);
    if net.domain.is_real() {
        return cx.fail(errors::error_real_unary(op, expr.span));
    }
    let (scope, width) = (net.scope, net.width);

    match reduce_kind(op) {
        None => {
            let out = cx
                .design
                .add_local_net(scope, width, ValueDomain::Logic, expr.signed, expr.span)?;
            cx.design.add_device(
                scope,
                DeviceKind::Logic {
                    gate: GateKind::Not,
                    width,
                    inputs: 1,
                },
                vec![(PinName::Out, out.into()), (PinName::In(0), input.into())],
                expr.span,
            )?;
            Ok(Some(out))
        }
        Some(mode) => {
            let out = cx
                .design
                .add_local_net(scope, 1, ValueDomain::Logic, false, expr.span)?;
            cx.design.add_device(
                scope,
                DeviceKind::Reduce {
                    mode,
                    input_width: width,
                },
                vec![(PinName::In(0), input.into()), (PinName::Out, out.into())],
                expr.span,
            )?;
            Ok(Some(out))
        }
    }
}

fn synth_concat(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    parts: &[Expr],
    repeat: u32,
) -> VireResult<Option<NetId>> {
    if parts.is_empty() {
        return Err(InternalError::new("concatenation without operands"));
    }
    let mut nets = Vec::with_capacity(parts.len());
    let mut failed = 0usize;
    for part in parts {
        match synth_expr(cx, part)? {
            Some(net) => nets.push(net),
            None => failed += 1,
        }
    }
    if failed > 0 {
        log::debug!("{failed} of {} concatenation operands failed", parts.len());
        return Ok(None);
    }

    let first = cx.design.net(nets[0]);
    let (scope, domain) = (first.scope, first.domain);
    let out = cx
        .design
        .add_local_net(scope, expr.width, domain, expr.signed, expr.span)?;

    // In(0) is the least significant input, so each repetition lists the
    // operands last-to-first.
    let mut conns = vec![(PinName::Out, NetRef::from(out))];
    let mut pin = 0u32;
    for _ in 0..repeat {
        for net in nets.iter().rev() {
            conns.push((PinName::In(pin), (*net).into()));
            pin += 1;
        }
    }
    cx.design.add_device(
        scope,
        DeviceKind::Concat {
            width: expr.width,
            inputs: pin,
        },
        conns,
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_select(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    sub: &Expr,
    base: Option<&Expr>,
) -> VireResult<Option<NetId>> {
    let Some(mut net) = synth_expr(cx, sub)? else {
        return Ok(None);
    };

    if let Some(base) = base {
        let vector = cx.design.net(net);
        let (scope, vector_width, domain) = (vector.scope, vector.width, vector.domain);
        let (part_base, base_net) = match base.as_const().and_then(|v| v.to_i64(base.signed)) {
            Some(offset) => {
                if offset < 0 || offset + i64::from(expr.width) > i64::from(vector_width) {
                    return cx.fail(errors::internal_part_base(
                        offset,
                        expr.width,
                        vector_width,
                        expr.span,
                    ));
                }
                (PartBase::Const(offset as u32), None)
            }
            None => {
                let Some(base_net) = synth_expr(cx, base)? else {
                    return Ok(None);
                };
                let base_width = cx.design.net(base_net).width;
                (PartBase::Dynamic { base_width }, Some(base_net))
            }
        };
        let part = cx
            .design
            .add_local_net(scope, expr.width, domain, expr.signed, expr.span)?;
        let mut conns = vec![
            (PinName::Vector, NetRef::from(net)),
            (PinName::Part, part.into()),
        ];
        if let Some(base_net) = base_net {
            conns.push((PinName::Base, base_net.into()));
        }
        cx.design.add_device(
            scope,
            DeviceKind::PartSelect {
                width: expr.width,
                vector_width,
                base: part_base,
            },
            conns,
            expr.span,
        )?;
        net = part;
    }

    let width = cx.design.net(net).width;
    if width < expr.width {
        net = extend(cx.design, net, expr.width, expr.signed, expr.span)?;
    } else if width > expr.width {
        net = crop_to_width(cx.design, net, expr.width, expr.span)?;
    }
    Ok(Some(net))
}

fn synth_ternary(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    cond: &Expr,
    true_val: &Expr,
    false_val: &Expr,
) -> VireResult<Option<NetId>> {
    let csig = synth_expr(cx, cond)?;
    let tsig = synth_expr(cx, true_val)?;
    let fsig = synth_expr(cx, false_val)?;
    let (Some(csig), Some(tsig), Some(fsig)) = (csig, tsig, fsig) else {
        return Ok(None);
    };

    let true_domain = cx.design.net(tsig).domain;
    let false_domain = cx.design.net(fsig).domain;
    if true_domain != false_domain {
        return cx.fail(errors::error_ternary_domains(
            true_domain,
            false_domain,
            expr.span,
            true_val.span,
            false_val.span,
        ));
    }
    if true_domain == ValueDomain::NoType {
        return cx.fail(errors::internal_ternary_untyped(expr.span));
    }

    let sel = cx.design.net(csig);
    if sel.width != 1 {
        return Err(InternalError::new(format!(
            "ternary condition {csig} is {} bits wide",
            sel.width
        )));
    }
    let scope = sel.scope;

    let tsig = fit_to_width(cx.design, tsig, expr.width, true_val.span)?;
    let fsig = fit_to_width(cx.design, fsig, expr.width, false_val.span)?;
    let width = cx.design.net(tsig).width;
    let out = cx
        .design
        .add_local_net(scope, width, true_domain, expr.signed, expr.span)?;
    cx.design.add_device(
        scope,
        DeviceKind::Mux {
            width,
            size: 2,
            sel_width: 1,
        },
        vec![
            (PinName::Sel, csig.into()),
            (PinName::Data(0), fsig.into()),
            (PinName::Data(1), tsig.into()),
            (PinName::Result, out.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_signal(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    net: NetId,
    word: Option<&Expr>,
) -> VireResult<Option<NetId>> {
    let Some(word) = word else {
        return Ok(Some(net));
    };
    let memory = cx
        .design
        .nets
        .try_get(net)
        .ok_or_else(|| InternalError::new(format!("unknown net {net}")))?;
    let Some(words) = memory.array.as_ref() else {
        return Err(InternalError::new(format!("word select on non-array {net}")));
    };

    // An index with x/z bits selects no fixed word, so it goes to the array reader.
    if let Some(index) = word.as_const().filter(|index| index.is_definite()) {
        return index
            .to_i64(word.signed)
            .and_then(|i| words.word(i))
            .map(Some)
            .ok_or_else(|| InternalError::new(format!("index {index} is not a word of {net}")));
    }

    let (scope, width, signed) = (memory.scope, memory.width, memory.signed);
    let count = u32::try_from(words.len())
        .map_err(|_| InternalError::new(format!("{net} has too many words")))?;
    let Some(addr) = synth_expr(cx, word)? else {
        return Ok(None);
    };
    let addr_width = cx.design.net(addr).width;
    let out = cx
        .design
        .add_local_net(scope, width, ValueDomain::Logic, signed, expr.span)?;
    cx.design.add_device(
        scope,
        DeviceKind::ArrayRead {
            memory: net,
            words: count,
            width,
            addr_width,
        },
        vec![(PinName::Address, addr.into()), (PinName::Result, out.into())],
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_user_func(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    func: FuncId,
    scope: ScopeId,
    args: &[Expr],
) -> VireResult<Option<NetId>> {
    let def = cx
        .design
        .funcs
        .try_get(func)
        .cloned()
        .ok_or_else(|| InternalError::new(format!("unknown function {func}")))?;
    let name = cx.design.name(def.name).to_owned();
    if args.len() != def.ports.len() {
        return Err(InternalError::new(format!(
            "call to `{name}` passes {} arguments for {} ports",
            args.len(),
            def.ports.len()
        )));
    }

    let mut nets = Vec::with_capacity(args.len());
    let mut failed = false;
    for (index, arg) in args.iter().enumerate() {
        match synth_expr(cx, arg)? {
            Some(net) => nets.push(net),
            None => {
                cx.design
                    .emit(errors::error_function_port(index, &name, arg.span));
                failed = true;
            }
        }
    }
    if failed {
        return Ok(None);
    }

    let result = def.result;
    let out = cx
        .design
        .add_local_net(scope, result.width, result.domain, result.signed, expr.span)?;
    let mut conns = vec![(PinName::Result, NetRef::from(out))];
    for (index, ((net, port), arg)) in nets.into_iter().zip(&def.ports).zip(args).enumerate() {
        let fitted = fit_to_width(cx.design, net, port.width, arg.span)?;
        conns.push((PinName::Arg(index as u32), fitted.into()));
    }
    cx.design.add_device(
        scope,
        DeviceKind::UserFunc {
            func,
            result_width: result.width,
            arg_widths: def.ports.iter().map(|p| p.width).collect(),
        },
        conns,
        expr.span,
    )?;
    Ok(Some(out))
}
