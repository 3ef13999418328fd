//! Binary operator rules and the shared operand resolver.

use crate::coerce::{const_net, pad_to_width, real_literal};
use crate::errors;
use crate::synth_expr::{synth_expr, SynthCtx};
use vire_common::{InternalError, Logic, LogicVec, VireResult};
use vire_ir::{
    AddSubDir, BinaryOp, CompareOutput, DeviceKind, Expr, GateKind, NetId, NetRef, PartBase,
    PinName, ValueDomain,
};

/// Both operands of an arithmetic or compare operator, after domain unification.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BinaryArgs {
    /// Operands are real.
    pub(crate) real: bool,
    pub(crate) lsig: NetId,
    pub(crate) rsig: NetId,
}

/// Synthesizes both operands in a common domain.
///
/// If either side is declared real, both must end up real: non-real constants
/// are promoted to real literals, anything else non-real is unsupported. Both
/// operands are always attempted so each reports its own failure.
pub(crate) fn resolve_binary_args(
    cx: &mut SynthCtx<'_>,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<BinaryArgs>> {
    let real = lhs.is_real() || rhs.is_real();
    let lsig = resolve_operand(cx, lhs, real)?;
    let rsig = resolve_operand(cx, rhs, real)?;
    Ok(match (lsig, rsig) {
        (Some(lsig), Some(rsig)) => Some(BinaryArgs { real, lsig, rsig }),
        _ => None,
    })
}

fn resolve_operand(cx: &mut SynthCtx<'_>, operand: &Expr, real: bool) -> VireResult<Option<NetId>> {
    if !real || operand.is_real() {
        return synth_expr(cx, operand);
    }
    match operand.as_const() {
        Some(value) => {
            let value = value.as_f64(operand.signed);
            real_literal(cx.design, value, operand.span).map(Some)
        }
        None => cx.fail(errors::sorry_bit_to_real(operand.span)),
    }
}

pub(crate) fn synth_binary(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    use BinaryOp::*;
    match op {
        Add | Sub => synth_add_sub(cx, expr, op, lhs, rhs),
        BitAnd | BitNand | BitOr | BitNor | BitXor | BitXnor => {
            synth_bitwise(cx, expr, op, lhs, rhs)
        }
        Lt | Gt | Le | Ge | Eq | Ne | CaseEq | CaseNe => synth_compare(cx, expr, op, lhs, rhs),
        Pow | Mul | Div | Mod => synth_arith(cx, expr, op, lhs, rhs),
        LogicAnd | LogicOr => synth_logical(cx, expr, op, lhs, rhs),
        Shl | Shr | AShr => synth_shift(cx, expr, op, lhs, rhs),
    }
}

fn synth_add_sub(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let Some(args) = resolve_binary_args(cx, lhs, rhs)? else {
        return Ok(None);
    };
    let width = if args.real { 1 } else { expr.width };
    let left = cx.design.net(args.lsig);
    let (scope, domain, lw) = (left.scope, left.domain, left.width);
    let rw = cx.design.net(args.rsig).width;
    if width < lw || width < rw {
        return Err(InternalError::new(format!(
            "`{op}` result is {width} bits, narrower than its operands ({lw} and {rw} bits)"
        )));
    }

    let lsig = pad_to_width(cx.design, args.lsig, width, lhs.span)?;
    let rsig = pad_to_width(cx.design, args.rsig, width, rhs.span)?;
    let out = cx
        .design
        .add_local_net(scope, width, domain, expr.signed, expr.span)?;
    let direction = if op == BinaryOp::Sub {
        AddSubDir::Sub
    } else {
        AddSubDir::Add
    };
    cx.design.add_device(
        scope,
        DeviceKind::AddSub { width, direction },
        vec![
            (PinName::DataA, lsig.into()),
            (PinName::DataB, rsig.into()),
            (PinName::Result, out.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_bitwise(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let lsig = synth_expr(cx, lhs)?;
    let rsig = synth_expr(cx, rhs)?;
    let (Some(lsig), Some(rsig)) = (lsig, rsig) else {
        return Ok(None);
    };
    let (left, right) = (cx.design.net(lsig), cx.design.net(rsig));
    if left.domain.is_real() || right.domain.is_real() {
        return cx.fail(errors::error_real_bitwise(op, expr.span));
    }
    if left.width != right.width {
        let diag = errors::internal_bitwise_widths(
            op,
            (left.width, lhs.span),
            (right.width, rhs.span),
            expr.span,
        );
        return cx.fail(diag);
    }
    let (scope, width) = (left.scope, left.width);

    let gate = match op {
        BinaryOp::BitAnd => GateKind::And,
        BinaryOp::BitNand => GateKind::Nand,
        BinaryOp::BitOr => GateKind::Or,
        BinaryOp::BitNor => GateKind::Nor,
        BinaryOp::BitXor => GateKind::Xor,
        BinaryOp::BitXnor => GateKind::Xnor,
        other => return Err(InternalError::new(format!("`{other}` is not bitwise"))),
    };
    let out = cx
        .design
        .add_local_net(scope, width, ValueDomain::Logic, expr.signed, expr.span)?;
    cx.design.add_device(
        scope,
        DeviceKind::Logic {
            gate,
            width,
            inputs: 2,
        },
        vec![
            (PinName::Out, out.into()),
            (PinName::In(0), lsig.into()),
            (PinName::In(1), rsig.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

fn compare_output(op: BinaryOp) -> Option<CompareOutput> {
    match op {
        BinaryOp::Lt => Some(CompareOutput::Alb),
        BinaryOp::Gt => Some(CompareOutput::Agb),
        BinaryOp::Le => Some(CompareOutput::Aleb),
        BinaryOp::Ge => Some(CompareOutput::Ageb),
        BinaryOp::Eq | BinaryOp::CaseEq => Some(CompareOutput::Aeb),
        BinaryOp::Ne | BinaryOp::CaseNe => Some(CompareOutput::Aneb),
        _ => None,
    }
}

fn synth_compare(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let Some(args) = resolve_binary_args(cx, lhs, rhs)? else {
        return Ok(None);
    };
    if args.real && matches!(op, BinaryOp::CaseEq | BinaryOp::CaseNe) {
        return cx.fail(errors::error_case_equality_real(op, expr.span));
    }

    let left = cx.design.net(args.lsig);
    let (scope, lw) = (left.scope, left.width);
    let rw = cx.design.net(args.rsig).width;
    let width = if args.real { 1 } else { lw.max(rw) };
    let lsig = pad_to_width(cx.design, args.lsig, width, lhs.span)?;
    let rsig = pad_to_width(cx.design, args.rsig, width, rhs.span)?;
    let out = cx
        .design
        .add_local_net(scope, 1, ValueDomain::Logic, false, expr.span)?;

    // Single-bit equality is just a gate.
    if !args.real && width == 1 {
        let gate = match op {
            BinaryOp::Eq | BinaryOp::CaseEq => Some(GateKind::Xnor),
            BinaryOp::Ne | BinaryOp::CaseNe => Some(GateKind::Xor),
            _ => None,
        };
        if let Some(gate) = gate {
            cx.design.add_device(
                scope,
                DeviceKind::Logic {
                    gate,
                    width: 1,
                    inputs: 2,
                },
                vec![
                    (PinName::Out, out.into()),
                    (PinName::In(0), lsig.into()),
                    (PinName::In(1), rsig.into()),
                ],
                expr.span,
            )?;
            return Ok(Some(out));
        }
    }

    let output = compare_output(op)
        .ok_or_else(|| InternalError::new(format!("`{op}` is not a comparison")))?;
    cx.design.add_device(
        scope,
        DeviceKind::Compare {
            width,
            signed: lhs.signed && rhs.signed,
            output,
        },
        vec![
            (PinName::DataA, lsig.into()),
            (PinName::DataB, rsig.into()),
            (output.pin(), out.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_arith(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let Some(args) = resolve_binary_args(cx, lhs, rhs)? else {
        return Ok(None);
    };
    if op == BinaryOp::Mod && args.real && !cx.config.generation.allows_real_modulus() {
        return cx.fail(errors::error_real_modulus(expr.span));
    }

    let left = cx.design.net(args.lsig);
    let (scope, domain, width_a) = (left.scope, left.domain, left.width);
    let width_b = cx.design.net(args.rsig).width;
    let width = if args.real { 1 } else { expr.width };
    let signed = expr.signed;
    let kind = match op {
        BinaryOp::Pow => DeviceKind::Pow {
            width,
            width_a,
            width_b,
            signed,
        },
        BinaryOp::Mul => DeviceKind::Mult {
            width,
            width_a,
            width_b,
            signed,
        },
        BinaryOp::Div => DeviceKind::Divide {
            width,
            width_a,
            width_b,
            signed,
        },
        BinaryOp::Mod => DeviceKind::Modulo {
            width,
            width_a,
            width_b,
            signed,
        },
        other => return Err(InternalError::new(format!("`{other}` is not arithmetic"))),
    };
    let out = cx
        .design
        .add_local_net(scope, width, domain, signed, expr.span)?;
    cx.design.add_device(
        scope,
        kind,
        vec![
            (PinName::DataA, args.lsig.into()),
            (PinName::DataB, args.rsig.into()),
            (PinName::Result, out.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

fn synth_logical(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let lsig = synth_expr(cx, lhs)?;
    let rsig = synth_expr(cx, rhs)?;
    let (Some(lsig), Some(rsig)) = (lsig, rsig) else {
        return Ok(None);
    };
    let (left, right) = (cx.design.net(lsig), cx.design.net(rsig));
    if left.domain.is_real() || right.domain.is_real() {
        return cx.fail(errors::sorry_logical_real(op, expr.span));
    }
    let (scope, lw, rw) = (left.scope, left.width, right.width);
    let out = cx
        .design
        .add_local_net(scope, 1, ValueDomain::Logic, false, expr.span)?;

    let (gate, inputs): (GateKind, Vec<NetRef>) = if op == BinaryOp::LogicOr {
        // One OR input per operand bit.
        let bits = (0..lw)
            .map(|index| NetRef::Bit { net: lsig, index })
            .chain((0..rw).map(|index| NetRef::Bit { net: rsig, index }))
            .collect();
        (GateKind::Or, bits)
    } else {
        if lw != 1 || rw != 1 {
            return Err(InternalError::new(format!(
                "`&&` operands must be reduced to one bit, got {lw} and {rw} bits"
            )));
        }
        (GateKind::And, vec![lsig.into(), rsig.into()])
    };

    let mut conns = vec![(PinName::Out, NetRef::from(out))];
    conns.extend(
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| (PinName::In(i as u32), input)),
    );
    cx.design.add_device(
        scope,
        DeviceKind::Logic {
            gate,
            width: 1,
            inputs: conns.len() as u32 - 1,
        },
        conns,
        expr.span,
    )?;
    Ok(Some(out))
}

/// Shift amount of a constant right operand; `u64::MAX` stands in for
/// values with a set bit at or above position 64.
fn constant_amount(value: &LogicVec) -> Option<u64> {
    if !value.is_definite() {
        return None;
    }
    let mut amount = 0u64;
    for index in 0..value.width() {
        if value.get(index) == Logic::One {
            if index >= 64 {
                return Some(u64::MAX);
            }
            amount |= 1 << index;
        }
    }
    Some(amount)
}

fn synth_shift(
    cx: &mut SynthCtx<'_>,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> VireResult<Option<NetId>> {
    let Some(lsig) = synth_expr(cx, lhs)? else {
        return Ok(None);
    };
    let left = cx.design.net(lsig);
    if left.domain.is_real() {
        return cx.fail(errors::error_shift_real(op, expr.span));
    }
    let (scope, lw, lsigned) = (left.scope, left.width, left.signed);
    let width = expr.width;
    if lw != width {
        return Err(InternalError::new(format!(
            "`{op}` shifts a {lw}-bit value into a {width}-bit result"
        )));
    }
    let right = op != BinaryOp::Shl;

    // Signed arithmetic shifts fill with the sign bit, which needs a real shifter.
    let amount = if op == BinaryOp::AShr && expr.signed {
        None
    } else {
        rhs.as_const().and_then(constant_amount)
    };

    if let Some(amount) = amount {
        if amount == 0 {
            return Ok(Some(lsig));
        }
        if amount >= u64::from(width) {
            let zero = LogicVec::zeros(width);
            return const_net(cx.design, scope, zero, expr.signed, expr.span).map(Some);
        }
        // amount < width, so it fits.
        let amount = amount as u32;
        let kept = width - amount;
        let pad = const_net(cx.design, scope, LogicVec::zeros(amount), false, expr.span)?;
        let part = cx
            .design
            .add_local_net(scope, kept, ValueDomain::Logic, lsigned, expr.span)?;
        cx.design.add_device(
            scope,
            DeviceKind::PartSelect {
                width: kept,
                vector_width: width,
                base: PartBase::Const(if right { amount } else { 0 }),
            },
            vec![(PinName::Vector, lsig.into()), (PinName::Part, part.into())],
            expr.span,
        )?;
        let out = cx
            .design
            .add_local_net(scope, width, ValueDomain::Logic, expr.signed, expr.span)?;
        let (low, high) = if right { (part, pad) } else { (pad, part) };
        cx.design.add_device(
            scope,
            DeviceKind::Concat { width, inputs: 2 },
            vec![
                (PinName::Out, out.into()),
                (PinName::In(0), low.into()),
                (PinName::In(1), high.into()),
            ],
            expr.span,
        )?;
        return Ok(Some(out));
    }

    let Some(rsig) = synth_expr(cx, rhs)? else {
        return Ok(None);
    };
    let width_dist = cx.design.net(rsig).width;
    let out = cx
        .design
        .add_local_net(scope, width, ValueDomain::Logic, expr.signed, expr.span)?;
    cx.design.add_device(
        scope,
        DeviceKind::Shift {
            width,
            width_dist,
            right,
            signed: op == BinaryOp::AShr,
        },
        vec![
            (PinName::Data(0), lsig.into()),
            (PinName::Distance, rsig.into()),
            (PinName::Result, out.into()),
        ],
        expr.span,
    )?;
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vire_config::{Generation, SynthConfig};
    use vire_ir::{Design, ExprKind};
    use vire_source::Span;

    fn run_with(design: &mut Design, expr: &Expr, config: &SynthConfig) -> Option<NetId> {
        let mut cx = SynthCtx { design, config };
        synth_expr(&mut cx, expr).unwrap()
    }

    fn run(design: &mut Design, expr: &Expr) -> Option<NetId> {
        run_with(design, expr, &SynthConfig::default())
    }

    fn logic(design: &mut Design, name: &str, width: u32, signed: bool) -> (NetId, Expr) {
        let root = design.root_scope();
        let net = design
            .add_signal(root, name, width, ValueDomain::Logic, signed, Span::DUMMY)
            .unwrap();
        (net, Expr::net(net, width, ValueDomain::Logic, signed))
    }

    fn real(design: &mut Design, name: &str) -> (NetId, Expr) {
        let root = design.root_scope();
        let net = design
            .add_signal(root, name, 1, ValueDomain::Real, false, Span::DUMMY)
            .unwrap();
        (net, Expr::net(net, 1, ValueDomain::Real, false))
    }

    fn count(design: &Design, label: &str) -> usize {
        design
            .devices
            .values()
            .filter(|d| d.kind.label() == label)
            .count()
    }

    #[test]
    fn resolver_promotes_constants() {
        let mut design = Design::new("top");
        let (r, er) = real(&mut design, "r");
        let k = Expr::constant(LogicVec::from_u64(0b1110, 4), true);
        let config = SynthConfig::default();
        let mut cx = SynthCtx {
            design: &mut design,
            config: &config,
        };
        let args = resolve_binary_args(&mut cx, &er, &k).unwrap().unwrap();
        assert!(args.real);
        assert_eq!(args.lsig, r);
        let literal = design
            .devices
            .values()
            .find_map(|d| match d.kind {
                DeviceKind::Literal { value } => Some(value),
                _ => None,
            })
            .unwrap();
        assert_eq!(literal, -2.0);
    }

    #[test]
    fn resolver_rejects_variable_bits_but_tries_both() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 4, false);
        let (_, eb) = logic(&mut design, "b", 4, false);
        let (_, er) = real(&mut design, "r");
        let e = Expr::binary(
            BinaryOp::Lt,
            ea,
            Expr::binary(BinaryOp::Add, eb, er, 1, ValueDomain::Real, false),
            1,
            ValueDomain::Logic,
            false,
        );
        assert_eq!(run(&mut design, &e), None);
        // `a` cannot become real, and neither can `b` inside the right operand.
        assert_eq!(design.errors(), 2);
        assert!(design
            .sink()
            .diagnostics()
            .iter()
            .all(|d| d.code == errors::S301));
        assert!(design.devices.is_empty());
    }

    #[test]
    fn add_pads_narrow_operand() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 4, false);
        let (_, eb) = logic(&mut design, "b", 8, false);
        let e = Expr::binary(BinaryOp::Sub, ea, eb, 8, ValueDomain::Logic, false);
        let out = run(&mut design, &e).unwrap();
        assert_eq!(design.net(out).width, 8);
        let adder = design
            .devices
            .values()
            .find(|d| d.kind.label() == "addsub")
            .unwrap();
        assert_eq!(
            adder.kind,
            DeviceKind::AddSub {
                width: 8,
                direction: AddSubDir::Sub
            }
        );
        let a_in = adder.pin(PinName::DataA).unwrap().net();
        assert_eq!(design.net(a_in).width, 8);
    }

    #[test]
    fn add_narrower_than_operand_is_fatal() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 8, false);
        let (_, eb) = logic(&mut design, "b", 8, false);
        let e = Expr::binary(BinaryOp::Add, ea, eb, 4, ValueDomain::Logic, false);
        let config = SynthConfig::default();
        let mut cx = SynthCtx {
            design: &mut design,
            config: &config,
        };
        assert!(synth_expr(&mut cx, &e).is_err());
    }

    #[test]
    fn real_add_is_scalar() {
        let mut design = Design::new("top");
        let (_, er) = real(&mut design, "r");
        let e = Expr::binary(BinaryOp::Add, er, Expr::real(0.5), 1, ValueDomain::Real, false);
        let out = run(&mut design, &e).unwrap();
        assert_eq!(design.net(out).domain, ValueDomain::Real);
        assert_eq!(count(&design, "addsub"), 1);
    }

    #[test]
    fn bitwise_gates() {
        for (op, gate) in [
            (BinaryOp::BitAnd, GateKind::And),
            (BinaryOp::BitNand, GateKind::Nand),
            (BinaryOp::BitOr, GateKind::Or),
            (BinaryOp::BitNor, GateKind::Nor),
            (BinaryOp::BitXor, GateKind::Xor),
            (BinaryOp::BitXnor, GateKind::Xnor),
        ] {
            let mut design = Design::new("top");
            let (_, ea) = logic(&mut design, "a", 3, false);
            let (_, eb) = logic(&mut design, "b", 3, false);
            let e = Expr::binary(op, ea, eb, 3, ValueDomain::Logic, false);
            run(&mut design, &e).unwrap();
            assert_eq!(
                design.devices.values().next().unwrap().kind,
                DeviceKind::Logic {
                    gate,
                    width: 3,
                    inputs: 2
                }
            );
        }
    }

    #[test]
    fn compare_pads_to_wider_operand() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 3, true);
        let (_, eb) = logic(&mut design, "b", 6, true);
        let e = Expr::binary(BinaryOp::Lt, ea, eb, 1, ValueDomain::Logic, false);
        let out = run(&mut design, &e).unwrap();
        assert_eq!(design.net(out).width, 1);
        let cmp = design
            .devices
            .values()
            .find(|d| d.kind.label() == "compare")
            .unwrap();
        assert_eq!(
            cmp.kind,
            DeviceKind::Compare {
                width: 6,
                signed: true,
                output: CompareOutput::Alb
            }
        );
        assert_eq!(cmp.pin(PinName::Alb), Some(NetRef::Net(out)));
        assert_eq!(count(&design, "sign-extend"), 1);
    }

    #[test]
    fn case_equality_rejects_reals() {
        let mut design = Design::new("top");
        let (_, er) = real(&mut design, "r");
        let e = Expr::binary(BinaryOp::CaseEq, er, Expr::real(1.0), 1, ValueDomain::Logic, false);
        assert_eq!(run(&mut design, &e), None);
        assert_eq!(design.sink().diagnostics()[0].code, errors::E302);
        assert_eq!(count(&design, "compare"), 0);
    }

    #[test]
    fn real_equality_uses_comparator() {
        let mut design = Design::new("top");
        let (_, er) = real(&mut design, "r");
        let e = Expr::binary(BinaryOp::Eq, er, Expr::real(1.0), 1, ValueDomain::Logic, false);
        let out = run(&mut design, &e).unwrap();
        assert_eq!(design.net(out).domain, ValueDomain::Logic);
        assert_eq!(count(&design, "compare"), 1);
        assert_eq!(count(&design, "logic"), 0);
    }

    #[test]
    fn arithmetic_devices_carry_operand_widths() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 8, true);
        let (_, eb) = logic(&mut design, "b", 4, true);
        let e = Expr::binary(BinaryOp::Mul, ea, eb, 12, ValueDomain::Logic, true);
        run(&mut design, &e).unwrap();
        assert_eq!(
            design.devices.values().next().unwrap().kind,
            DeviceKind::Mult {
                width: 12,
                width_a: 8,
                width_b: 4,
                signed: true
            }
        );
    }

    #[test]
    fn real_modulus_follows_generation() {
        let build = |generation| {
            let mut design = Design::new("top");
            let (_, er) = real(&mut design, "r");
            let e = Expr::binary(BinaryOp::Mod, er, Expr::real(2.0), 1, ValueDomain::Real, false);
            let config = SynthConfig {
                generation,
                ..SynthConfig::default()
            };
            let out = run_with(&mut design, &e, &config);
            (out.is_some(), design.errors(), count(&design, "modulo"))
        };
        assert_eq!(build(Generation::V2001X), (true, 0, 1));
        assert_eq!(build(Generation::V2001), (false, 1, 0));
        assert_eq!(build(Generation::V1995), (false, 1, 0));
    }

    #[test]
    fn logical_or_takes_every_bit() {
        let mut design = Design::new("top");
        let (a, ea) = logic(&mut design, "a", 3, false);
        let (b, eb) = logic(&mut design, "b", 2, false);
        let e = Expr::binary(BinaryOp::LogicOr, ea, eb, 1, ValueDomain::Logic, false);
        run(&mut design, &e).unwrap();
        let gate = design.devices.values().next().unwrap();
        assert_eq!(
            gate.kind,
            DeviceKind::Logic {
                gate: GateKind::Or,
                width: 1,
                inputs: 5
            }
        );
        assert_eq!(gate.pin(PinName::In(2)), Some(NetRef::Bit { net: a, index: 2 }));
        assert_eq!(gate.pin(PinName::In(3)), Some(NetRef::Bit { net: b, index: 0 }));
    }

    #[test]
    fn logical_and_needs_scalars() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 1, false);
        let (_, eb) = logic(&mut design, "b", 1, false);
        let e = Expr::binary(BinaryOp::LogicAnd, ea, eb, 1, ValueDomain::Logic, false);
        run(&mut design, &e).unwrap();
        assert_eq!(count(&design, "logic"), 1);

        let (_, wide) = logic(&mut design, "w", 4, false);
        let (_, ec) = logic(&mut design, "c", 1, false);
        let e = Expr::binary(BinaryOp::LogicAnd, wide, ec, 1, ValueDomain::Logic, false);
        let config = SynthConfig::default();
        let mut cx = SynthCtx {
            design: &mut design,
            config: &config,
        };
        assert!(synth_expr(&mut cx, &e).is_err());
    }

    #[test]
    fn logical_on_real_is_sorry() {
        let mut design = Design::new("top");
        let (_, er) = real(&mut design, "r");
        let (_, ea) = logic(&mut design, "a", 1, false);
        let e = Expr::binary(BinaryOp::LogicOr, er, ea, 1, ValueDomain::Logic, false);
        assert_eq!(run(&mut design, &e), None);
        assert_eq!(design.sink().diagnostics()[0].code, errors::S303);
    }

    fn shift(op: BinaryOp, lhs: Expr, rhs: Expr, width: u32, signed: bool) -> Expr {
        Expr::binary(op, lhs, rhs, width, ValueDomain::Logic, signed)
    }

    #[test]
    fn constant_left_shift_layout() {
        let mut design = Design::new("top");
        let (a, ea) = logic(&mut design, "a", 8, false);
        let e = shift(BinaryOp::Shl, ea, Expr::constant(LogicVec::from_u64(3, 4), false), 8, false);
        let out = run(&mut design, &e).unwrap();
        let sel = design
            .devices
            .values()
            .find(|d| d.kind.label() == "partselect")
            .unwrap();
        assert_eq!(
            sel.kind,
            DeviceKind::PartSelect {
                width: 5,
                vector_width: 8,
                base: PartBase::Const(0)
            }
        );
        assert_eq!(sel.pin(PinName::Vector), Some(NetRef::Net(a)));
        let part = sel.pin(PinName::Part).unwrap();
        let concat = design
            .devices
            .values()
            .find(|d| d.kind.label() == "concat")
            .unwrap();
        assert_eq!(concat.pin(PinName::Out), Some(NetRef::Net(out)));
        assert_eq!(concat.pin(PinName::In(1)), Some(part));
        let pad = concat.pin(PinName::In(0)).unwrap().net();
        assert_eq!(design.net(pad).width, 3);
    }

    #[test]
    fn wide_constant_amount_uses_low_bits() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 8, false);
        let e = shift(BinaryOp::Shl, ea, Expr::constant(LogicVec::from_u64(1, 72), false), 8, false);
        let out = run(&mut design, &e).unwrap();
        assert_eq!(design.net(out).width, 8);
        let sel = design
            .devices
            .values()
            .find(|d| d.kind.label() == "partselect")
            .unwrap();
        assert_eq!(
            sel.kind,
            DeviceKind::PartSelect {
                width: 7,
                vector_width: 8,
                base: PartBase::Const(0)
            }
        );
        assert_eq!(count(&design, "concat"), 1);
    }

    #[test]
    fn constant_amount_with_high_bit_set() {
        let mut amount = LogicVec::from_u64(1, 72);
        amount.set(70, Logic::One);
        assert_eq!(constant_amount(&amount), Some(u64::MAX));
        assert_eq!(constant_amount(&LogicVec::from_u64(5, 72)), Some(5));
        assert_eq!(constant_amount(&LogicVec::from_u64(u64::MAX, 64)), Some(u64::MAX));
        let unknown = LogicVec::from_binary_str("1x").unwrap();
        assert_eq!(constant_amount(&unknown), None);
    }

    #[test]
    fn constant_right_shift_layout() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 8, false);
        let e = shift(BinaryOp::Shr, ea, Expr::constant(LogicVec::from_u64(2, 4), false), 8, false);
        run(&mut design, &e).unwrap();
        let sel = design
            .devices
            .values()
            .find(|d| d.kind.label() == "partselect")
            .unwrap();
        assert_eq!(
            sel.kind,
            DeviceKind::PartSelect {
                width: 6,
                vector_width: 8,
                base: PartBase::Const(2)
            }
        );
        let concat = design
            .devices
            .values()
            .find(|d| d.kind.label() == "concat")
            .unwrap();
        assert_eq!(concat.pin(PinName::In(0)), sel.pin(PinName::Part));
    }

    #[test]
    fn unsigned_arithmetic_shift_is_logical() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 8, false);
        let e = shift(BinaryOp::AShr, ea, Expr::constant(LogicVec::from_u64(1, 2), false), 8, false);
        run(&mut design, &e).unwrap();
        assert_eq!(count(&design, "shift"), 0);
        assert_eq!(count(&design, "concat"), 1);
    }

    #[test]
    fn signed_arithmetic_shift_uses_shifter() {
        let mut design = Design::new("top");
        let (a, ea) = logic(&mut design, "a", 8, true);
        let e = shift(BinaryOp::AShr, ea, Expr::constant(LogicVec::from_u64(1, 2), false), 8, true);
        run(&mut design, &e).unwrap();
        let shifter = design
            .devices
            .values()
            .find(|d| d.kind.label() == "shift")
            .unwrap();
        assert_eq!(
            shifter.kind,
            DeviceKind::Shift {
                width: 8,
                width_dist: 2,
                right: true,
                signed: true
            }
        );
        assert_eq!(shifter.pin(PinName::Data(0)), Some(NetRef::Net(a)));
    }

    #[test]
    fn variable_shift_amount() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 16, false);
        let (n, en) = logic(&mut design, "n", 4, false);
        let e = shift(BinaryOp::Shl, ea, en, 16, false);
        run(&mut design, &e).unwrap();
        let shifter = design.devices.values().next().unwrap();
        assert_eq!(
            shifter.kind,
            DeviceKind::Shift {
                width: 16,
                width_dist: 4,
                right: false,
                signed: false
            }
        );
        assert_eq!(shifter.pin(PinName::Distance), Some(NetRef::Net(n)));
    }

    #[test]
    fn undefined_amount_uses_shifter() {
        let mut design = Design::new("top");
        let (_, ea) = logic(&mut design, "a", 4, false);
        let amount = Expr::constant(LogicVec::from_binary_str("1x").unwrap(), false);
        let e = shift(BinaryOp::Shr, ea, amount, 4, false);
        run(&mut design, &e).unwrap();
        assert_eq!(count(&design, "shift"), 1);
        assert_eq!(count(&design, "const"), 1);
    }

    #[test]
    fn shifting_real_is_error() {
        let mut design = Design::new("top");
        let (_, er) = real(&mut design, "r");
        let e = Expr::new(
            ExprKind::Binary {
                op: BinaryOp::Shl,
                lhs: Box::new(er),
                rhs: Box::new(Expr::constant(LogicVec::from_u64(1, 2), false)),
            },
            1,
            ValueDomain::Real,
            false,
        );
        assert_eq!(run(&mut design, &e), None);
        assert_eq!(design.sink().diagnostics()[0].code, errors::E306);
        assert!(design.devices.is_empty());
    }
}
