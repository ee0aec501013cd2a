/// Defines the possible data types for Scalar and Matrix elements.
///
/// Elements are stored as `f64` and normalized to their dtype on every
/// write, so the stored value is always representable in the dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
    /// 32-bit integer type.
    I32,
    /// 64-bit integer type.
    I64,
}

impl DType {
    /// Coerces `value` into this dtype.
    ///
    /// Integer dtypes truncate toward zero and saturate at their bounds;
    /// NaN becomes zero.
    pub fn cast(self, value: f64) -> f64 {
        match self {
            DType::F32 => value as f32 as f64,
            DType::F64 => value,
            DType::I32 => value as i32 as f64,
            DType::I64 => value as i64 as f64,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, DType::I32 | DType::I64)
    }
}
