//! Primitive devices and their pin contracts.
//!
//! Every [`DeviceKind`] publishes its pin list, the width each pin must have
//! and the pin directions. [`Design::add_device`](crate::Design::add_device)
//! checks connections against this contract, so code generators can rely on
//! it without re-checking.

use crate::ids::{DeviceId, FuncId, NetId, ScopeId};
use crate::net::NetRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use vire_common::{Ident, LogicVec};
use vire_source::Span;

/// Direction of a pin as seen from the device.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PinDirection {
    /// Read by the device.
    Input,
    /// Driven by the device.
    Output,
}

/// Pin names used across the device catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PinName {
    /// First arithmetic/compare operand.
    DataA,
    /// Second arithmetic/compare operand.
    DataB,
    /// Arithmetic, mux, shift, array-read and function result.
    Result,
    /// Mux select.
    Sel,
    /// Mux data input `n`, or the shifter data input (`Data(0)`).
    Data(u32),
    /// Shift amount.
    Distance,
    /// Array-read address.
    Address,
    /// Dynamic part-select offset.
    Base,
    /// Part-select source.
    Vector,
    /// Part-select output.
    Part,
    /// Gate, concat, sign-extend and reduction input `n`.
    In(u32),
    /// Gate, concat, sign-extend, reduction and constant output.
    Out,
    /// Function argument `n`.
    Arg(u32),
    /// Comparator `A > B`.
    Agb,
    /// Comparator `A >= B`.
    Ageb,
    /// Comparator `A == B`.
    Aeb,
    /// Comparator `A != B`.
    Aneb,
    /// Comparator `A < B`.
    Alb,
    /// Comparator `A <= B`.
    Aleb,
}

impl PinName {
    /// Direction implied by the pin name.
    pub fn direction(self) -> PinDirection {
        match self {
            PinName::Result
            | PinName::Out
            | PinName::Part
            | PinName::Agb
            | PinName::Ageb
            | PinName::Aeb
            | PinName::Aneb
            | PinName::Alb
            | PinName::Aleb => PinDirection::Output,
            _ => PinDirection::Input,
        }
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinName::DataA => f.write_str("DataA"),
            PinName::DataB => f.write_str("DataB"),
            PinName::Result => f.write_str("Result"),
            PinName::Sel => f.write_str("Sel"),
            PinName::Data(n) => write!(f, "Data{n}"),
            PinName::Distance => f.write_str("Distance"),
            PinName::Address => f.write_str("Address"),
            PinName::Base => f.write_str("Base"),
            PinName::Vector => f.write_str("Vector"),
            PinName::Part => f.write_str("Part"),
            PinName::In(n) => write!(f, "I{n}"),
            PinName::Out => f.write_str("O"),
            PinName::Arg(n) => write!(f, "Arg{n}"),
            PinName::Agb => f.write_str("AGB"),
            PinName::Ageb => f.write_str("AGEB"),
            PinName::Aeb => f.write_str("AEB"),
            PinName::Aneb => f.write_str("ANEB"),
            PinName::Alb => f.write_str("ALB"),
            PinName::Aleb => f.write_str("ALEB"),
        }
    }
}

/// Add or subtract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AddSubDir {
    /// `A + B`.
    Add,
    /// `A - B`.
    Sub,
}

/// Bitwise gate function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GateKind {
    /// AND.
    And,
    /// NAND.
    Nand,
    /// OR.
    Or,
    /// NOR.
    Nor,
    /// XOR.
    Xor,
    /// XNOR.
    Xnor,
    /// Inverter, single input.
    Not,
}

/// Which relation a comparator exposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CompareOutput {
    /// `>`.
    Agb,
    /// `>=`.
    Ageb,
    /// `==`.
    Aeb,
    /// `!=`.
    Aneb,
    /// `<`.
    Alb,
    /// `<=`.
    Aleb,
}

impl CompareOutput {
    /// The output pin carrying this relation.
    pub fn pin(self) -> PinName {
        match self {
            CompareOutput::Agb => PinName::Agb,
            CompareOutput::Ageb => PinName::Ageb,
            CompareOutput::Aeb => PinName::Aeb,
            CompareOutput::Aneb => PinName::Aneb,
            CompareOutput::Alb => PinName::Alb,
            CompareOutput::Aleb => PinName::Aleb,
        }
    }
}

/// Reduction function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ReduceKind {
    /// `&x`.
    And,
    /// `|x`.
    Or,
    /// `^x`.
    Xor,
    /// `~&x`.
    Nand,
    /// `~|x`.
    Nor,
    /// `~^x`.
    Xnor,
}

/// Offset of a part-select.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PartBase {
    /// Fixed offset; no `Base` pin.
    Const(u32),
    /// Offset read from the `Base` pin.
    Dynamic {
        /// Width of the `Base` pin.
        base_width: u32,
    },
}

/// The device catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Adder or subtractor; operands and result share `width`.
    AddSub {
        /// Width of all three pins.
        width: u32,
        /// Add or subtract.
        direction: AddSubDir,
    },
    /// Bitwise gate with `inputs` inputs of `width` bits each.
    Logic {
        /// Gate function.
        gate: GateKind,
        /// Width of every pin.
        width: u32,
        /// Number of inputs.
        inputs: u32,
    },
    /// Magnitude comparator with a single selected output.
    Compare {
        /// Operand width.
        width: u32,
        /// Signed comparison.
        signed: bool,
        /// Relation wired out.
        output: CompareOutput,
    },
    /// Multiplier.
    Mult {
        /// Result width.
        width: u32,
        /// `DataA` width.
        width_a: u32,
        /// `DataB` width.
        width_b: u32,
        /// Signed arithmetic.
        signed: bool,
    },
    /// Divider.
    Divide {
        /// Result width.
        width: u32,
        /// `DataA` width.
        width_a: u32,
        /// `DataB` width.
        width_b: u32,
        /// Signed arithmetic.
        signed: bool,
    },
    /// Modulus.
    Modulo {
        /// Result width.
        width: u32,
        /// `DataA` width.
        width_a: u32,
        /// `DataB` width.
        width_b: u32,
        /// Signed arithmetic.
        signed: bool,
    },
    /// Power.
    Pow {
        /// Result width.
        width: u32,
        /// `DataA` width.
        width_a: u32,
        /// `DataB` width.
        width_b: u32,
        /// Signed arithmetic.
        signed: bool,
    },
    /// Variable shifter. Pins `Data(0)`, `Distance`, `Result`.
    Shift {
        /// Data and result width.
        width: u32,
        /// `Distance` width.
        width_dist: u32,
        /// Shift toward the LSB.
        right: bool,
        /// Arithmetic (sign-filling) right shift.
        signed: bool,
    },
    /// `size`-way multiplexer.
    Mux {
        /// Data and result width.
        width: u32,
        /// Number of data inputs.
        size: u32,
        /// Select width.
        sel_width: u32,
    },
    /// Concatenation; `In(0)` lands in the least significant bits.
    Concat {
        /// Output width, equal to the sum of the input widths.
        width: u32,
        /// Number of inputs.
        inputs: u32,
    },
    /// Extracts `width` bits of `Vector` starting at the base offset.
    PartSelect {
        /// `Part` width.
        width: u32,
        /// `Vector` width.
        vector_width: u32,
        /// Constant or dynamic offset.
        base: PartBase,
    },
    /// Sign extension from `input_width` to `width`.
    SignExtend {
        /// Output width.
        width: u32,
        /// Input width.
        input_width: u32,
    },
    /// Reduction to a single bit.
    Reduce {
        /// Reduction function.
        mode: ReduceKind,
        /// Input width.
        input_width: u32,
    },
    /// Reads one word of a memory.
    ArrayRead {
        /// The memory net.
        memory: NetId,
        /// Number of words.
        words: u32,
        /// Word width.
        width: u32,
        /// `Address` width.
        addr_width: u32,
    },
    /// Instance of a user function.
    UserFunc {
        /// Called function.
        func: FuncId,
        /// `Result` width.
        result_width: u32,
        /// Width of each `Arg(n)`.
        arg_widths: Vec<u32>,
    },
    /// Bit-vector constant.
    Const {
        /// Driven value.
        value: LogicVec,
    },
    /// Real constant.
    Literal {
        /// Driven value.
        value: f64,
    },
}

impl DeviceKind {
    /// The ordered pin list every instance must connect.
    pub fn pins(&self) -> Vec<PinName> {
        use PinName::*;
        match self {
            DeviceKind::AddSub { .. }
            | DeviceKind::Mult { .. }
            | DeviceKind::Divide { .. }
            | DeviceKind::Modulo { .. }
            | DeviceKind::Pow { .. } => vec![DataA, DataB, Result],
            DeviceKind::Compare { output, .. } => vec![DataA, DataB, output.pin()],
            DeviceKind::Logic { inputs, .. } | DeviceKind::Concat { inputs, .. } => {
                std::iter::once(Out).chain((0..*inputs).map(In)).collect()
            }
            DeviceKind::Shift { .. } => vec![Data(0), Distance, Result],
            DeviceKind::Mux { size, .. } => std::iter::once(Sel)
                .chain((0..*size).map(Data))
                .chain(std::iter::once(Result))
                .collect(),
            DeviceKind::PartSelect { base, .. } => match base {
                PartBase::Const(_) => vec![Vector, Part],
                PartBase::Dynamic { .. } => vec![Vector, Part, Base],
            },
            DeviceKind::SignExtend { .. } | DeviceKind::Reduce { .. } => vec![In(0), Out],
            DeviceKind::ArrayRead { .. } => vec![Address, Result],
            DeviceKind::UserFunc { arg_widths, .. } => std::iter::once(Result)
                .chain((0..arg_widths.len() as u32).map(Arg))
                .collect(),
            DeviceKind::Const { .. } | DeviceKind::Literal { .. } => vec![Out],
        }
    }

    /// Required width of `pin`, or `None` when the pin is unconstrained
    /// individually (concat inputs) or not part of this kind.
    pub fn pin_width(&self, pin: PinName) -> Option<u32> {
        use PinName::*;
        match (self, pin) {
            (DeviceKind::AddSub { width, .. }, DataA | DataB | Result) => Some(*width),
            (DeviceKind::Logic { width, inputs, .. }, In(n)) if n < *inputs => Some(*width),
            (DeviceKind::Logic { width, .. }, Out) => Some(*width),
            (DeviceKind::Compare { width, .. }, DataA | DataB) => Some(*width),
            (DeviceKind::Compare { output, .. }, p) if p == output.pin() => Some(1),
            (
                DeviceKind::Mult { width, width_a, width_b, .. }
                | DeviceKind::Divide { width, width_a, width_b, .. }
                | DeviceKind::Modulo { width, width_a, width_b, .. }
                | DeviceKind::Pow { width, width_a, width_b, .. },
                p,
            ) => match p {
                DataA => Some(*width_a),
                DataB => Some(*width_b),
                Result => Some(*width),
                _ => None,
            },
            (DeviceKind::Shift { width, .. }, Data(0) | Result) => Some(*width),
            (DeviceKind::Shift { width_dist, .. }, Distance) => Some(*width_dist),
            (DeviceKind::Mux { sel_width, .. }, Sel) => Some(*sel_width),
            (DeviceKind::Mux { width, size, .. }, Data(n)) if n < *size => Some(*width),
            (DeviceKind::Mux { width, .. }, Result) => Some(*width),
            (DeviceKind::Concat { width, .. }, Out) => Some(*width),
            (DeviceKind::PartSelect { width, .. }, Part) => Some(*width),
            (DeviceKind::PartSelect { vector_width, .. }, Vector) => Some(*vector_width),
            (
                DeviceKind::PartSelect {
                    base: PartBase::Dynamic { base_width },
                    ..
                },
                Base,
            ) => Some(*base_width),
            (DeviceKind::SignExtend { input_width, .. }, In(0)) => Some(*input_width),
            (DeviceKind::SignExtend { width, .. }, Out) => Some(*width),
            (DeviceKind::Reduce { input_width, .. }, In(0)) => Some(*input_width),
            (DeviceKind::Reduce { .. }, Out) => Some(1),
            (DeviceKind::ArrayRead { addr_width, .. }, Address) => Some(*addr_width),
            (DeviceKind::ArrayRead { width, .. }, Result) => Some(*width),
            (DeviceKind::UserFunc { result_width, .. }, Result) => Some(*result_width),
            (DeviceKind::UserFunc { arg_widths, .. }, Arg(n)) => arg_widths.get(n as usize).copied(),
            (DeviceKind::Const { value }, Out) => Some(value.width()),
            (DeviceKind::Literal { .. }, Out) => Some(1),
            _ => None,
        }
    }

    /// Direction of `pin` on this kind.
    pub fn pin_direction(&self, pin: PinName) -> PinDirection {
        pin.direction()
    }

    /// Kinds whose every pin carries bit vectors.
    pub fn is_logic_only(&self) -> bool {
        matches!(
            self,
            DeviceKind::Logic { .. }
                | DeviceKind::Reduce { .. }
                | DeviceKind::Shift { .. }
                | DeviceKind::SignExtend { .. }
        )
    }

    /// Pins that must all see the same value domain.
    pub fn domain_pins(&self) -> Vec<PinName> {
        use PinName::*;
        match self {
            DeviceKind::AddSub { .. } => vec![DataA, DataB, Result],
            DeviceKind::Compare { .. }
            | DeviceKind::Mult { .. }
            | DeviceKind::Divide { .. }
            | DeviceKind::Modulo { .. }
            | DeviceKind::Pow { .. } => vec![DataA, DataB],
            DeviceKind::Mux { size, .. } => (0..*size)
                .map(Data)
                .chain(std::iter::once(Result))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Short lowercase name for logs and messages.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceKind::AddSub { .. } => "addsub",
            DeviceKind::Logic { .. } => "logic",
            DeviceKind::Compare { .. } => "compare",
            DeviceKind::Mult { .. } => "mult",
            DeviceKind::Divide { .. } => "divide",
            DeviceKind::Modulo { .. } => "modulo",
            DeviceKind::Pow { .. } => "pow",
            DeviceKind::Shift { .. } => "shift",
            DeviceKind::Mux { .. } => "mux",
            DeviceKind::Concat { .. } => "concat",
            DeviceKind::PartSelect { .. } => "partselect",
            DeviceKind::SignExtend { .. } => "sign-extend",
            DeviceKind::Reduce { .. } => "reduce",
            DeviceKind::ArrayRead { .. } => "array-read",
            DeviceKind::UserFunc { .. } => "ufunc",
            DeviceKind::Const { .. } => "const",
            DeviceKind::Literal { .. } => "literal",
        }
    }
}

/// One connected pin.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Pin {
    /// Pin name.
    pub name: PinName,
    /// Pin direction.
    pub direction: PinDirection,
    /// Connected net or net bit.
    pub net: NetRef,
}

/// A primitive device instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Device {
    /// Own id.
    pub id: DeviceId,
    /// Name, unique within `scope`.
    pub name: Ident,
    /// Owning scope.
    pub scope: ScopeId,
    /// Kind and parameters.
    pub kind: DeviceKind,
    /// Connections, in [`DeviceKind::pins`] order.
    pub pins: Vec<Pin>,
    /// Source location of the expression this device implements.
    pub span: Span,
}

impl Device {
    /// The connection of `name`, if this device has such a pin.
    pub fn pin(&self, name: PinName) -> Option<NetRef> {
        self.pins.iter().find(|p| p.name == name).map(|p| p.net)
    }

    /// Connections of input pins, in pin order.
    pub fn inputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|p| p.direction == PinDirection::Input)
    }

    /// Connections of output pins.
    pub fn outputs(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|p| p.direction == PinDirection::Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mux_pin_order() {
        let kind = DeviceKind::Mux {
            width: 8,
            size: 2,
            sel_width: 1,
        };
        assert_eq!(
            kind.pins(),
            vec![PinName::Sel, PinName::Data(0), PinName::Data(1), PinName::Result]
        );
        assert_eq!(kind.pin_width(PinName::Sel), Some(1));
        assert_eq!(kind.pin_width(PinName::Data(1)), Some(8));
        assert_eq!(kind.pin_width(PinName::Data(2)), None);
    }

    #[test]
    fn compare_exposes_one_output() {
        let kind = DeviceKind::Compare {
            width: 4,
            signed: false,
            output: CompareOutput::Ageb,
        };
        assert_eq!(
            kind.pins(),
            vec![PinName::DataA, PinName::DataB, PinName::Ageb]
        );
        assert_eq!(kind.pin_width(PinName::Ageb), Some(1));
        assert_eq!(kind.pin_width(PinName::Alb), None);
        assert_eq!(kind.pin_direction(PinName::Ageb), PinDirection::Output);
    }

    #[test]
    fn concat_inputs_unconstrained() {
        let kind = DeviceKind::Concat {
            width: 12,
            inputs: 3,
        };
        assert_eq!(kind.pins().len(), 4);
        assert_eq!(kind.pin_width(PinName::Out), Some(12));
        assert_eq!(kind.pin_width(PinName::In(0)), None);
    }

    #[test]
    fn dynamic_part_select_has_base() {
        let fixed = DeviceKind::PartSelect {
            width: 4,
            vector_width: 16,
            base: PartBase::Const(8),
        };
        let dynamic = DeviceKind::PartSelect {
            width: 4,
            vector_width: 16,
            base: PartBase::Dynamic { base_width: 4 },
        };
        assert!(!fixed.pins().contains(&PinName::Base));
        assert_eq!(dynamic.pin_width(PinName::Base), Some(4));
        assert_eq!(dynamic.pin_direction(PinName::Part), PinDirection::Output);
    }

    #[test]
    fn arithmetic_operand_widths_are_independent() {
        let kind = DeviceKind::Mult {
            width: 16,
            width_a: 8,
            width_b: 4,
            signed: true,
        };
        assert_eq!(kind.pin_width(PinName::DataA), Some(8));
        assert_eq!(kind.pin_width(PinName::DataB), Some(4));
        assert_eq!(kind.pin_width(PinName::Result), Some(16));
    }

    #[test]
    fn user_func_pins() {
        let kind = DeviceKind::UserFunc {
            func: FuncId::from_raw(0),
            result_width: 8,
            arg_widths: vec![8, 1],
        };
        assert_eq!(
            kind.pins(),
            vec![PinName::Result, PinName::Arg(0), PinName::Arg(1)]
        );
        assert_eq!(kind.pin_width(PinName::Arg(1)), Some(1));
        assert_eq!(kind.pin_width(PinName::Arg(2)), None);
    }

    #[test]
    fn logic_only_kinds() {
        assert!(DeviceKind::Reduce {
            mode: ReduceKind::Xor,
            input_width: 4
        }
        .is_logic_only());
        assert!(!DeviceKind::Literal { value: 1.5 }.is_logic_only());
    }

    #[test]
    fn pin_display() {
        assert_eq!(PinName::Data(1).to_string(), "Data1");
        assert_eq!(PinName::In(0).to_string(), "I0");
        assert_eq!(PinName::Aneb.to_string(), "ANEB");
    }
}
