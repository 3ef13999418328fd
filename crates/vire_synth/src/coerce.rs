//! Width and domain coercion helpers.
//!
//! These build the small padding, cropping and constant-driver networks the
//! expression rules share. None of them emit diagnostics: any failure is a
//! broken invariant and comes back as an [`InternalError`].

use vire_common::{InternalError, LogicVec, VireResult};
use vire_ir::{Design, DeviceKind, NetId, PartBase, PinName, ScopeId, ValueDomain};
use vire_source::Span;

/// Widens `net` to `width` bits.
///
/// Nets already at least `width` wide, and real nets, come back unchanged.
/// Signed nets are sign-extended, unsigned nets zero-padded.
pub fn pad_to_width(design: &mut Design, net: NetId, width: u32, span: Span) -> VireResult<NetId> {
    let n = design.net(net);
    if n.domain.is_real() || n.width >= width {
        return Ok(net);
    }
    let signed = n.signed;
    extend(design, net, width, signed, span)
}

/// Narrows `net` to its low `width` bits with a constant part-select.
///
/// Nets at most `width` wide come back unchanged.
pub fn crop_to_width(design: &mut Design, net: NetId, width: u32, span: Span) -> VireResult<NetId> {
    let n = design.net(net);
    if n.width <= width {
        return Ok(net);
    }
    let (scope, vector_width, domain, signed) = (n.scope, n.width, n.domain, n.signed);
    let out = design.add_local_net(scope, width, domain, signed, span)?;
    design.add_device(
        scope,
        DeviceKind::PartSelect {
            width,
            vector_width,
            base: PartBase::Const(0),
        },
        vec![(PinName::Vector, net.into()), (PinName::Part, out.into())],
        span,
    )?;
    Ok(out)
}

/// Widens `net` to exactly `width` bits: a `SignExtend` device when
/// `signed`, otherwise a two-input concat with a zero constant in the upper
/// input. The result carries `signed`.
pub fn extend(
    design: &mut Design,
    net: NetId,
    width: u32,
    signed: bool,
    span: Span,
) -> VireResult<NetId> {
    let n = design.net(net);
    let (scope, input_width, domain) = (n.scope, n.width, n.domain);
    if input_width >= width {
        return Err(InternalError::new(format!(
            "cannot extend {input_width}-bit {net} to {width} bits"
        )));
    }
    let out = design.add_local_net(scope, width, domain, signed, span)?;
    if signed {
        design.add_device(
            scope,
            DeviceKind::SignExtend { width, input_width },
            vec![(PinName::In(0), net.into()), (PinName::Out, out.into())],
            span,
        )?;
    } else {
        let pad = const_net(design, scope, LogicVec::zeros(width - input_width), false, span)?;
        design.add_device(
            scope,
            DeviceKind::Concat { width, inputs: 2 },
            vec![
                (PinName::Out, out.into()),
                (PinName::In(0), net.into()),
                (PinName::In(1), pad.into()),
            ],
            span,
        )?;
    }
    Ok(out)
}

/// Builds a real constant driver in the root scope.
pub fn real_literal(design: &mut Design, value: f64, span: Span) -> VireResult<NetId> {
    let root = design.root_scope();
    let out = design.add_local_net(root, 1, ValueDomain::Real, false, span)?;
    design.add_device(
        root,
        DeviceKind::Literal { value },
        vec![(PinName::Out, out.into())],
        span,
    )?;
    Ok(out)
}

/// Builds a bit-vector constant driver in `scope`.
pub fn const_net(
    design: &mut Design,
    scope: ScopeId,
    value: LogicVec,
    signed: bool,
    span: Span,
) -> VireResult<NetId> {
    let out = design.add_local_net(scope, value.width(), ValueDomain::Logic, signed, span)?;
    design.add_device(
        scope,
        DeviceKind::Const { value },
        vec![(PinName::Out, out.into())],
        span,
    )?;
    Ok(out)
}

/// Pads then crops, so the result is exactly `width` bits (reals excepted).
pub(crate) fn fit_to_width(
    design: &mut Design,
    net: NetId,
    width: u32,
    span: Span,
) -> VireResult<NetId> {
    let padded = pad_to_width(design, net, width, span)?;
    crop_to_width(design, padded, width, span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design_with(width: u32, signed: bool) -> (Design, NetId) {
        let mut design = Design::new("top");
        let root = design.root_scope();
        let net = design
            .add_signal(root, "a", width, ValueDomain::Logic, signed, Span::DUMMY)
            .unwrap();
        (design, net)
    }

    #[test]
    fn pad_is_noop_when_wide_enough() {
        let (mut design, a) = design_with(8, false);
        assert_eq!(pad_to_width(&mut design, a, 8, Span::DUMMY).unwrap(), a);
        assert_eq!(pad_to_width(&mut design, a, 4, Span::DUMMY).unwrap(), a);
        assert!(design.devices.is_empty());
    }

    #[test]
    fn unsigned_pad_concats_zero_above() {
        let (mut design, a) = design_with(4, false);
        let out = pad_to_width(&mut design, a, 8, Span::DUMMY).unwrap();
        assert_eq!(design.net(out).width, 8);
        let concat = design
            .devices
            .values()
            .find(|d| matches!(d.kind, DeviceKind::Concat { .. }))
            .unwrap();
        assert_eq!(concat.pin(PinName::In(0)).map(|r| r.net()), Some(a));
        let pad = concat.pin(PinName::In(1)).unwrap().net();
        assert_eq!(design.net(pad).width, 4);
        assert!(design
            .devices
            .values()
            .any(|d| matches!(&d.kind, DeviceKind::Const { value } if value.is_all_zero())));
    }

    #[test]
    fn signed_pad_sign_extends() {
        let (mut design, a) = design_with(4, true);
        let out = pad_to_width(&mut design, a, 8, Span::DUMMY).unwrap();
        assert_eq!(design.devices.len(), 1);
        assert!(matches!(
            design.devices.values().next().unwrap().kind,
            DeviceKind::SignExtend {
                width: 8,
                input_width: 4
            }
        ));
        assert!(design.net(out).signed);
    }

    #[test]
    fn pad_ignores_real_nets() {
        let mut design = Design::new("top");
        let root = design.root_scope();
        let r = design
            .add_signal(root, "r", 1, ValueDomain::Real, false, Span::DUMMY)
            .unwrap();
        assert_eq!(pad_to_width(&mut design, r, 32, Span::DUMMY).unwrap(), r);
    }

    #[test]
    fn crop_selects_low_bits() {
        let (mut design, a) = design_with(8, false);
        let out = crop_to_width(&mut design, a, 3, Span::DUMMY).unwrap();
        assert_eq!(design.net(out).width, 3);
        let sel = design.devices.values().next().unwrap();
        assert_eq!(
            sel.kind,
            DeviceKind::PartSelect {
                width: 3,
                vector_width: 8,
                base: PartBase::Const(0)
            }
        );
        assert_eq!(crop_to_width(&mut design, a, 8, Span::DUMMY).unwrap(), a);
    }

    #[test]
    fn extend_rejects_shrinking() {
        let (mut design, a) = design_with(8, false);
        assert!(extend(&mut design, a, 8, false, Span::DUMMY).is_err());
    }

    #[test]
    fn real_literal_lives_in_root() {
        let mut design = Design::new("top");
        let out = real_literal(&mut design, 2.5, Span::DUMMY).unwrap();
        let net = design.net(out);
        assert_eq!(net.domain, ValueDomain::Real);
        assert_eq!(net.scope, design.root_scope());
        assert!(matches!(
            design.devices.values().next().unwrap().kind,
            DeviceKind::Literal { value } if value == 2.5
        ));
    }
}
