//! Literal-to-value conversion seam.
//!
//! The navigation layer does not define literal semantics. A
//! [`LiteralConverter`] is injected into [`NavigableAst`] and called by
//! [`NavigableExpr::as_literal`]. Any `Fn(&Constant) -> Result<Value, _>`
//! closure can serve as a converter.
//!
//! [`NavigableAst`]: crate::navigable::NavigableAst
//! [`NavigableExpr::as_literal`]: crate::navigable::NavigableExpr::as_literal

use crate::ast::Constant;
use crate::error::ConversionError;
use crate::value::Value;

/// Converts a constant literal payload into a runtime value.
///
/// Implementations must be pure: the same constant always yields the same
/// result. They may fail only on payloads that no well-formed tree contains.
pub trait LiteralConverter: Send + Sync {
    fn convert(&self, constant: &Constant) -> Result<Value, ConversionError>;
}

impl<F> LiteralConverter for F
where
    F: Fn(&Constant) -> Result<Value, ConversionError> + Send + Sync,
{
    fn convert(&self, constant: &Constant) -> Result<Value, ConversionError> {
        self(constant)
    }
}

/// Converter used when none is injected. Delegates to [`constant_to_value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl LiteralConverter for DefaultConverter {
    fn convert(&self, constant: &Constant) -> Result<Value, ConversionError> {
        constant_to_value(constant)
    }
}

/// Convert a scalar constant into its runtime value.
///
/// The deprecated duration and timestamp literal forms have no scalar value
/// and are rejected.
pub fn constant_to_value(constant: &Constant) -> Result<Value, ConversionError> {
    match constant {
        Constant::Null => Ok(Value::Null),
        Constant::Bool(b) => Ok(Value::Bool(*b)),
        Constant::Int64(i) => Ok(Value::Int(*i)),
        Constant::Uint64(u) => Ok(Value::Uint(*u)),
        Constant::Double(d) => Ok(Value::Double(*d)),
        Constant::String(s) => Ok(Value::String(s.clone())),
        Constant::Bytes(b) => Ok(Value::Bytes(b.clone())),
        Constant::Duration { .. } | Constant::Timestamp { .. } => {
            Err(ConversionError::UnsupportedConstant {
                kind: constant.kind_name(),
            })
        }
    }
}
