//! Result and error types for broken compiler invariants.

/// Result of an operation that can only fail through a compiler bug.
///
/// User-facing problems never travel through `Err`: they are reported as
/// diagnostics and the operation still returns `Ok`, typically carrying a
/// failure marker such as `None`.
pub type VireResult<T> = Result<T, InternalError>;

/// A violated internal invariant.
///
/// Raised when the input handed to a pass breaks a guarantee the upstream
/// stages are supposed to provide, for instance an adder result narrower
/// than its operands. Compilation cannot meaningfully continue.
#[derive(Debug, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("adder narrower than operand");
        assert_eq!(
            err.to_string(),
            "internal compiler error: adder narrower than operand"
        );
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> VireResult<u32> {
            Err(InternalError::new("boom"))
        }
        fn outer() -> VireResult<u32> {
            let v = inner()?;
            Ok(v + 1)
        }
        assert_eq!(outer().unwrap_err().message, "boom");
    }

    #[test]
    fn from_string() {
        let err: InternalError = format!("width {} != {}", 3, 4).into();
        assert_eq!(err.message, "width 3 != 4");
    }
}
