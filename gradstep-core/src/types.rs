/// Defines the possible data types for Tensor elements.
///
/// `F32` is the default used by the plain constructors, `F64` is available
/// when the extra precision matters (gradient checking, long runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    /// 32-bit floating-point type.
    #[default]
    F32,
    /// 64-bit floating-point type.
    F64,
}
