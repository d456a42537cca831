// src/tensor/traits.rs

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::tensor::Tensor;
use crate::types::DType;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: both handles point at the same graph node and data.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    /// Formats the Tensor for debugging: metadata plus the element values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        write!(
            f,
            "Tensor(shape={:?}, dtype={:?}, requires_grad={}, has_grad={}, has_grad_fn={}, data=",
            td.shape,
            td.dtype,
            td.requires_grad,
            td.grad.is_some(),
            td.grad_fn.is_some()
        )?;
        match &td.buffer {
            Buffer::F32(data) => write!(f, "{:?}", data.as_slice())?,
            Buffer::F64(data) => write!(f, "{:?}", data.as_slice())?,
        }
        write!(f, ")")
    }
}

impl Display for Tensor {
    /// PyTorch-style formatting, e.g. `tensor(5., requires_grad=True)` for a 0-d f32
    /// leaf holding an integral value.
    ///
    /// One element style is chosen for the whole tensor and elements are
    /// right-aligned to a common width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        let values = td.buffer.to_f64_vec();
        let style = ElementStyle::for_values(&values);
        let formatted: Vec<String> = values.iter().map(|&v| style.format(v)).collect();
        let width = formatted.iter().map(String::len).max().unwrap_or(0);

        write!(f, "{}", DISPLAY_PREFIX)?;
        write_nested(f, &formatted, &td.shape, width, DISPLAY_PREFIX.len())?;
        if td.dtype == DType::F64 {
            write!(f, ", dtype=torch.float64")?;
        }
        if let Some(op) = &td.grad_fn {
            write!(f, ", grad_fn=<{}>", op.name())?;
        } else if td.requires_grad {
            write!(f, ", requires_grad=True")?;
        }
        write!(f, ")")
    }
}

const DISPLAY_PREFIX: &str = "tensor(";

/// How every element of one tensor is printed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ElementStyle {
    /// All finite values are integral: `5.`
    Integer,
    /// Four decimals: `0.5000`
    Fixed,
    /// Four-decimal mantissa, signed two-digit exponent: `1.5000e-05`
    Scientific,
}

impl ElementStyle {
    /// Scientific notation is used when the nonzero magnitudes span more than three
    /// decades, exceed `1e8`, or (for non-integral values) fall below `1e-4`.
    fn for_values(values: &[f64]) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let integral = finite.clone().all(|v| v.fract() == 0.0);
        let (min, max) = finite
            .filter(|&v| v != 0.0)
            .map(f64::abs)
            .fold((f64::INFINITY, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if max == 0.0 {
            return if integral {
                ElementStyle::Integer
            } else {
                ElementStyle::Fixed
            };
        }
        let wide = max / min > 1000.0 || max > 1e8;
        match (integral, wide) {
            (_, true) => ElementStyle::Scientific,
            (true, false) => ElementStyle::Integer,
            (false, false) if min < 1e-4 => ElementStyle::Scientific,
            (false, false) => ElementStyle::Fixed,
        }
    }

    fn format(self, value: f64) -> String {
        if value.is_nan() {
            return "nan".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        match self {
            ElementStyle::Integer => format!("{:.0}.", value),
            ElementStyle::Fixed => format!("{:.4}", value),
            ElementStyle::Scientific => scientific(value),
        }
    }
}

// `1.5000e-5` -> `1.5000e-05`
fn scientific(value: f64) -> String {
    let formatted = format!("{:.4e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

// Rows of a matrix go on separate lines aligned under the first bracket; each extra
// dimension adds a blank line between blocks.
fn write_nested(
    f: &mut fmt::Formatter<'_>,
    values: &[String],
    shape: &[usize],
    width: usize,
    indent: usize,
) -> fmt::Result {
    let Some((&dim, rest)) = shape.split_first() else {
        let value = values.first().map(String::as_str).unwrap_or_default();
        return write!(f, "{:>width$}", value, width = width);
    };
    let chunk: usize = rest.iter().product();
    let separator = if rest.is_empty() {
        ", ".to_string()
    } else {
        format!(",{}{}", "\n".repeat(rest.len()), " ".repeat(indent + 1))
    };
    write!(f, "[")?;
    for i in 0..dim {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write_nested(f, &values[i * chunk..(i + 1) * chunk], rest, width, indent + 1)?;
    }
    write!(f, "]")
}

impl PartialEq for Tensor {
    /// Two tensors are equal when shape, dtype and every element match.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let self_guard = self.read_data();
        let other_guard = other.read_data();
        if self_guard.shape != other_guard.shape || self_guard.dtype != other_guard.dtype {
            return false;
        }
        match (&self_guard.buffer, &other_guard.buffer) {
            (Buffer::F32(a), Buffer::F32(b)) => a == b,
            (Buffer::F64(a), Buffer::F64(b)) => a == b,
            _ => false,
        }
    }
}
