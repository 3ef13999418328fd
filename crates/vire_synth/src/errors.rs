//! Diagnostic codes and constructors for structural synthesis.
//!
//! `E301`--`E307` are user errors, `S301`--`S303` mark legal constructs that
//! cannot be built structurally yet, and `I301`--`I304` report inconsistent
//! input that is survivable (the expression fails, synthesis continues).

use vire_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use vire_ir::{BinaryOp, UnaryOp, ValueDomain};
use vire_source::Span;

/// Real operand to a bitwise binary operator.
pub const E301: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 301,
};

/// Case equality or inequality with real operands.
pub const E302: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 302,
};

/// Modulus with real operands under a generation that forbids it.
pub const E303: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 303,
};

/// Ternary clauses of different value domains.
pub const E304: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 304,
};

/// Real operand to bitwise negation or a reduction.
pub const E305: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 305,
};

/// Shift of a real value.
pub const E306: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 306,
};

/// A function-call argument could not be synthesized.
pub const E307: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 307,
};

/// Non-constant bit vector where a real is required.
pub const S301: DiagnosticCode = DiagnosticCode {
    category: Category::Unsupported,
    number: 301,
};

/// System function call in a structural context.
pub const S302: DiagnosticCode = DiagnosticCode {
    category: Category::Unsupported,
    number: 302,
};

/// Logical `&&`/`||` on real values.
pub const S303: DiagnosticCode = DiagnosticCode {
    category: Category::Unsupported,
    number: 303,
};

/// Expression kind with no structural form.
pub const I301: DiagnosticCode = DiagnosticCode {
    category: Category::Internal,
    number: 301,
};

/// Bitwise operands of different widths.
pub const I302: DiagnosticCode = DiagnosticCode {
    category: Category::Internal,
    number: 302,
};

/// Both ternary clauses untyped.
pub const I303: DiagnosticCode = DiagnosticCode {
    category: Category::Internal,
    number: 303,
};

/// Constant part-select base outside the vector.
pub const I304: DiagnosticCode = DiagnosticCode {
    category: Category::Internal,
    number: 304,
};

pub(crate) fn error_real_bitwise(op: BinaryOp, span: Span) -> Diagnostic {
    Diagnostic::error(
        E301,
        format!("bitwise operator `{op}` may not have real operands"),
        span,
    )
}

pub(crate) fn error_case_equality_real(op: BinaryOp, span: Span) -> Diagnostic {
    let what = if op == BinaryOp::CaseNe {
        "case inequality"
    } else {
        "case equality"
    };
    Diagnostic::error(E302, format!("{what} `{op}` may not have real operands"), span)
}

pub(crate) fn error_real_modulus(span: Span) -> Diagnostic {
    Diagnostic::error(E303, "modulus operator may not have real operands", span)
        .with_help("set `synth.generation = \"2001x\"` in vire.toml to allow real modulus")
}

pub(crate) fn error_ternary_domains(
    true_domain: ValueDomain,
    false_domain: ValueDomain,
    span: Span,
    true_span: Span,
    false_span: Span,
) -> Diagnostic {
    Diagnostic::error(
        E304,
        "true and false clauses of ternary expression have different types",
        span,
    )
    .with_label(Label::secondary(
        true_span,
        format!("true clause is {true_domain}"),
    ))
    .with_label(Label::secondary(
        false_span,
        format!("false clause is {false_domain}"),
    ))
}

pub(crate) fn error_real_unary(op: UnaryOp, span: Span) -> Diagnostic {
    let what = if op == UnaryOp::BitNot {
        "bitwise negation"
    } else {
        "reduction operator"
    };
    Diagnostic::error(E305, format!("{what} `{op}` may not have a real operand"), span)
}

pub(crate) fn error_shift_real(op: BinaryOp, span: Span) -> Diagnostic {
    Diagnostic::error(
        E306,
        format!("shift operator `{op}` cannot shift a real value"),
        span,
    )
}

pub(crate) fn error_function_port(index: usize, func: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E307,
        format!("unable to synthesize port {index} of call to `{func}`"),
        span,
    )
}

pub(crate) fn sorry_bit_to_real(span: Span) -> Diagnostic {
    Diagnostic::sorry(S301, "cannot convert bit based value to real", span)
        .with_note("only constant bit vectors are promoted to real")
}

pub(crate) fn sorry_system_function(name: &str, span: Span) -> Diagnostic {
    Diagnostic::sorry(
        S302,
        format!("cannot synthesize system function `{name}` in this context"),
        span,
    )
}

pub(crate) fn sorry_logical_real(op: BinaryOp, span: Span) -> Diagnostic {
    Diagnostic::sorry(
        S303,
        format!("logical operator `{op}` is currently unsupported for real values"),
        span,
    )
}

pub(crate) fn internal_cannot_synthesize(what: &str, span: Span) -> Diagnostic {
    Diagnostic::internal(I301, format!("cannot synthesize expression: {what}"), span)
}

pub(crate) fn internal_bitwise_widths(
    op: BinaryOp,
    (left_width, left_span): (u32, Span),
    (right_width, right_span): (u32, Span),
    span: Span,
) -> Diagnostic {
    Diagnostic::internal(
        I302,
        format!("bitwise `{op}` operand widths do not match: {left_width} != {right_width}"),
        span,
    )
    .with_label(Label::secondary(left_span, format!("width={left_width}")))
    .with_label(Label::secondary(right_span, format!("width={right_width}")))
}

pub(crate) fn internal_ternary_untyped(span: Span) -> Diagnostic {
    Diagnostic::internal(
        I303,
        "true and false clauses of ternary both have no type",
        span,
    )
}

pub(crate) fn internal_part_base(base: i64, width: u32, vector_width: u32, span: Span) -> Diagnostic {
    Diagnostic::internal(
        I304,
        format!("part-select of {width} bits at offset {base} is outside a {vector_width}-bit vector"),
        span,
    )
}
