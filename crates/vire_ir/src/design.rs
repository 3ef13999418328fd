//! The netlist container.
//!
//! A [`Design`] owns every net, device, scope and function signature, plus the
//! interner for their names and the [`DiagnosticSink`] that counts errors.
//! Objects are only ever added. [`Design::add_device`] is the single way to
//! create a device and rejects any connection that breaks the device's pin
//! contract.

use crate::arena::Arena;
use crate::device::{Device, DeviceKind, Pin, PinName};
use crate::func::{FuncDef, FuncPort};
use crate::ids::{DeviceId, FuncId, NetId, ScopeId};
use crate::net::{ArrayWords, Net, NetKind, NetRef, PinRef};
use crate::scope::Scope;
use crate::types::ValueDomain;
use vire_common::{Ident, InternalError, Interner, VireResult};
use vire_diagnostics::{Diagnostic, DiagnosticSink};
use vire_source::Span;

/// A structural netlist under construction.
#[derive(Debug)]
pub struct Design {
    /// All nets.
    pub nets: Arena<NetId, Net>,
    /// All devices.
    pub devices: Arena<DeviceId, Device>,
    /// All scopes.
    pub scopes: Arena<ScopeId, Scope>,
    /// All user function signatures.
    pub funcs: Arena<FuncId, FuncDef>,
    root: ScopeId,
    interner: Interner,
    sink: DiagnosticSink,
}

impl Design {
    /// Creates a design with a single root scope.
    pub fn new(root_name: &str) -> Self {
        let interner = Interner::new();
        let mut scopes = Arena::new();
        let root = scopes.next_id();
        scopes.alloc(Scope::new(root, interner.get_or_intern(root_name), None));
        Self {
            nets: Arena::new(),
            devices: Arena::new(),
            scopes,
            funcs: Arena::new(),
            root,
            interner,
            sink: DiagnosticSink::new(),
        }
    }

    /// The root scope; constants live here.
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    /// Adds a child scope.
    pub fn new_scope(&mut self, name: &str, parent: ScopeId) -> ScopeId {
        let id = self.scopes.next_id();
        let name = self.interner.get_or_intern(name);
        self.scopes.alloc(Scope::new(id, name, Some(parent)))
    }

    /// Interns a name.
    pub fn intern(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    /// Text of an interned name.
    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Looks up a net by hierarchical-free name within `scope`.
    pub fn find_net(&self, scope: ScopeId, name: &str) -> Option<NetId> {
        let ident = self.interner.get(name)?;
        self.nets
            .iter()
            .find(|(_, n)| n.scope == scope && n.name == ident)
            .map(|(id, _)| id)
    }

    /// Net accessor.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id]
    }

    /// Device accessor.
    pub fn device(&self, id: DeviceId) -> &Device {
        &self.devices[id]
    }

    /// Reports a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.sink.emit(diag);
    }

    /// Number of error-class diagnostics reported so far.
    pub fn errors(&self) -> usize {
        self.sink.error_count()
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Declares a source-level net.
    pub fn add_signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        width: u32,
        domain: ValueDomain,
        signed: bool,
        span: Span,
    ) -> VireResult<NetId> {
        let name = self.interner.get_or_intern(name);
        self.alloc_net(scope, name, NetKind::Wire, width, domain, signed, false, span)
    }

    /// Declares a memory of `width`-bit words indexed `first..=last`
    /// (either direction). Returns the memory net; each word gets its own
    /// net named `name[i]`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_array(
        &mut self,
        scope: ScopeId,
        name: &str,
        width: u32,
        signed: bool,
        first: i64,
        last: i64,
        span: Span,
    ) -> VireResult<NetId> {
        let step = if first <= last { 1 } else { -1 };
        let count = first.abs_diff(last) + 1;
        let mut words = Vec::new();
        for a in 0..count {
            let index = first + step * a as i64;
            let word_name = self.interner.get_or_intern(&format!("{name}[{index}]"));
            words.push(self.alloc_net(
                scope,
                word_name,
                NetKind::Wire,
                width,
                ValueDomain::Logic,
                signed,
                false,
                span,
            )?);
        }
        let mem_name = self.interner.get_or_intern(name);
        let mem = self.alloc_net(
            scope,
            mem_name,
            NetKind::Wire,
            width,
            ValueDomain::Logic,
            signed,
            false,
            span,
        )?;
        self.nets[mem].array = Some(ArrayWords { first, last, words });
        Ok(mem)
    }

    /// Registers a function signature; the function is named after `result.name`.
    pub fn add_func(&mut self, scope: ScopeId, result: FuncPort, ports: Vec<FuncPort>) -> FuncId {
        let id = self.funcs.next_id();
        self.funcs.alloc(FuncDef {
            id,
            name: result.name,
            scope,
            result,
            ports,
        })
    }

    /// Creates a compiler-generated net named from the scope's local counter.
    pub fn add_local_net(
        &mut self,
        scope: ScopeId,
        width: u32,
        domain: ValueDomain,
        signed: bool,
        span: Span,
    ) -> VireResult<NetId> {
        let name = self.local_name(scope)?;
        self.alloc_net(scope, name, NetKind::Implicit, width, domain, signed, true, span)
    }

    /// Width seen through a connection: the net width, or 1 for a bit.
    pub fn net_ref_width(&self, net_ref: NetRef) -> VireResult<u32> {
        let net = self
            .nets
            .try_get(net_ref.net())
            .ok_or_else(|| InternalError::new(format!("unknown net {}", net_ref.net())))?;
        match net_ref {
            NetRef::Net(_) => Ok(net.width),
            NetRef::Bit { index, .. } if index < net.width => Ok(1),
            NetRef::Bit { net: id, index } => Err(InternalError::new(format!(
                "bit {index} of {id} is outside its {} bits",
                net.width
            ))),
        }
    }

    /// Creates a device and connects its pins.
    ///
    /// `conns` must list exactly the pins of [`DeviceKind::pins`], in that
    /// order. Fixed-width pins must match their net width, concat inputs must
    /// add up to the output width, logic-only kinds must not touch real nets,
    /// and the kind's domain pins must share one domain.
    pub fn add_device(
        &mut self,
        scope: ScopeId,
        kind: DeviceKind,
        conns: Vec<(PinName, NetRef)>,
        span: Span,
    ) -> VireResult<DeviceId> {
        let expected = kind.pins();
        let names: Vec<PinName> = conns.iter().map(|(p, _)| *p).collect();
        if names != expected {
            return Err(InternalError::new(format!(
                "{} device expects pins {}, got {}",
                kind.label(),
                pin_list(&expected),
                pin_list(&names)
            )));
        }

        let mut input_sum = 0u32;
        for (pin, net_ref) in &conns {
            let width = self.net_ref_width(*net_ref)?;
            if let Some(required) = kind.pin_width(*pin) {
                if width != required {
                    return Err(InternalError::new(format!(
                        "{} pin {pin} is {required} bits but {} is {width} bits",
                        kind.label(),
                        net_ref.net()
                    )));
                }
            }
            if matches!(pin, PinName::In(_)) {
                input_sum += width;
            }
            if kind.is_logic_only() && self.nets[net_ref.net()].domain.is_real() {
                return Err(InternalError::new(format!(
                    "{} pin {pin} connected to real net {}",
                    kind.label(),
                    net_ref.net()
                )));
            }
        }
        if let DeviceKind::Concat { width, .. } = kind {
            if input_sum != width {
                return Err(InternalError::new(format!(
                    "concat inputs add up to {input_sum} bits, output is {width}"
                )));
            }
        }

        let domain_pins = kind.domain_pins();
        let mut domains = conns
            .iter()
            .filter(|(p, _)| domain_pins.contains(p))
            .map(|(p, r)| (*p, self.nets[r.net()].domain));
        if let Some((first_pin, first)) = domains.next() {
            if let Some((pin, other)) = domains.find(|(_, d)| *d != first) {
                return Err(InternalError::new(format!(
                    "{} pins {first_pin} ({first}) and {pin} ({other}) differ in domain",
                    kind.label()
                )));
            }
        }

        let name = self.local_name(scope)?;
        let id = self.devices.next_id();
        let pins = conns
            .into_iter()
            .map(|(pin, net)| Pin {
                name: pin,
                direction: kind.pin_direction(pin),
                net,
            })
            .collect::<Vec<_>>();
        for pin in &pins {
            self.nets[pin.net.net()].endpoints.push(PinRef {
                device: id,
                pin: pin.name,
            });
        }
        Ok(self.devices.alloc(Device {
            id,
            name,
            scope,
            kind,
            pins,
            span,
        }))
    }

    fn local_name(&mut self, scope: ScopeId) -> VireResult<Ident> {
        if self.scopes.try_get(scope).is_none() {
            return Err(InternalError::new(format!("unknown scope {scope}")));
        }
        let symbol = self.scopes[scope].local_symbol();
        Ok(self.interner.get_or_intern(&symbol))
    }

    #[allow(clippy::too_many_arguments)]
    fn alloc_net(
        &mut self,
        scope: ScopeId,
        name: Ident,
        kind: NetKind,
        width: u32,
        domain: ValueDomain,
        signed: bool,
        local: bool,
        span: Span,
    ) -> VireResult<NetId> {
        if domain.is_real() && width != 1 {
            return Err(InternalError::new(format!(
                "real net '{}' declared {width} bits wide",
                self.interner.resolve(name)
            )));
        }
        let id = self.nets.next_id();
        Ok(self.nets.alloc(Net {
            id,
            name,
            scope,
            kind,
            width,
            domain,
            signed,
            local,
            endpoints: Vec::new(),
            array: None,
            span,
        }))
    }
}

fn pin_list(pins: &[PinName]) -> String {
    let names: Vec<String> = pins.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}
