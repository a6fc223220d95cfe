//! Runtime-tagged element types and their storage.
//!
//! The set of element types is closed. Code that needs the concrete Rust
//! type behind an [`ElementType`] goes through [`with_element_type!`], and
//! code that needs the typed slice behind an [`ElementBuffer`] goes through
//! [`Element::slice`], so each per-type decision lives in exactly one table.

use crate::{try_vec, BridgeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type tag of a planar array or matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    U8,
    S16,
    U16,
    S32,
    F32,
    F64,
    /// Boolean mask, one byte per element.
    B8,
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::U8,
        ElementType::S16,
        ElementType::U16,
        ElementType::S32,
        ElementType::F32,
        ElementType::F64,
        ElementType::B8,
    ];

    #[inline]
    pub fn size_bytes(self) -> usize {
        match self {
            ElementType::U8 | ElementType::B8 => 1,
            ElementType::S16 | ElementType::U16 => 2,
            ElementType::S32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, ElementType::F32 | ElementType::F64)
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::S16 => "s16",
            ElementType::U16 => "u16",
            ElementType::S32 => "s32",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
            ElementType::B8 => "b8",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bind a type alias to the Rust type behind an [`ElementType`] and evaluate
/// `$body` with it.
///
/// ```
/// use layout_bridge_core::{with_element_type, ElementType};
///
/// let dtype = ElementType::S16;
/// let bytes = with_element_type!(dtype, T => std::mem::size_of::<T>());
/// assert_eq!(bytes, 2);
/// ```
#[macro_export]
macro_rules! with_element_type {
    ($dtype:expr, $t:ident => $body:expr) => {
        match $dtype {
            $crate::ElementType::U8 => {
                type $t = u8;
                $body
            }
            $crate::ElementType::S16 => {
                type $t = i16;
                $body
            }
            $crate::ElementType::U16 => {
                type $t = u16;
                $body
            }
            $crate::ElementType::S32 => {
                type $t = i32;
                $body
            }
            $crate::ElementType::F32 => {
                type $t = f32;
                $body
            }
            $crate::ElementType::F64 => {
                type $t = f64;
                $body
            }
            $crate::ElementType::B8 => {
                type $t = bool;
                $body
            }
        }
    };
}

mod private {
    pub trait Sealed {}
}

/// A Rust type that can be stored in an [`ElementBuffer`].
///
/// Values round-trip through `f64` exactly for every implementor, which makes
/// `f64` a lossless pivot for casts.
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static + private::Sealed
{
    const DTYPE: ElementType;

    fn to_f64(self) -> f64;

    /// Numeric cast from `f64`: truncates toward zero and saturates at the
    /// type bounds (NaN maps to zero); booleans are `v != 0`.
    fn from_f64(v: f64) -> Self;

    fn slice(buf: &ElementBuffer) -> Option<&[Self]>;

    fn slice_mut(buf: &mut ElementBuffer) -> Option<&mut [Self]>;

    fn into_buffer(data: Vec<Self>) -> ElementBuffer;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl private::Sealed for $t {}

        impl Element for $t {
            const DTYPE: ElementType = ElementType::$variant;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            fn slice(buf: &ElementBuffer) -> Option<&[Self]> {
                match buf {
                    ElementBuffer::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn slice_mut(buf: &mut ElementBuffer) -> Option<&mut [Self]> {
                match buf {
                    ElementBuffer::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_buffer(data: Vec<Self>) -> ElementBuffer {
                ElementBuffer::$variant(data)
            }
        }
    };
}

impl_element!(u8, U8);
impl_element!(i16, S16);
impl_element!(u16, U16);
impl_element!(i32, S32);
impl_element!(f32, F32);
impl_element!(f64, F64);

impl private::Sealed for bool {}

impl Element for bool {
    const DTYPE: ElementType = ElementType::B8;

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v != 0.0
    }

    fn slice(buf: &ElementBuffer) -> Option<&[Self]> {
        match buf {
            ElementBuffer::B8(v) => Some(v),
            _ => None,
        }
    }

    fn slice_mut(buf: &mut ElementBuffer) -> Option<&mut [Self]> {
        match buf {
            ElementBuffer::B8(v) => Some(v),
            _ => None,
        }
    }

    fn into_buffer(data: Vec<Self>) -> ElementBuffer {
        ElementBuffer::B8(data)
    }
}

/// Flat, typed element storage.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementBuffer {
    U8(Vec<u8>),
    S16(Vec<i16>),
    U16(Vec<u16>),
    S32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    B8(Vec<bool>),
}

impl ElementBuffer {
    /// Zero-initialised buffer of `len` elements.
    pub fn zeros(dtype: ElementType, len: usize) -> Result<Self, BridgeError> {
        with_element_type!(dtype, T => {
            let mut data = try_vec::<T>(len)?;
            data.resize(len, T::default());
            Ok(T::into_buffer(data))
        })
    }

    pub fn dtype(&self) -> ElementType {
        match self {
            ElementBuffer::U8(_) => ElementType::U8,
            ElementBuffer::S16(_) => ElementType::S16,
            ElementBuffer::U16(_) => ElementType::U16,
            ElementBuffer::S32(_) => ElementType::S32,
            ElementBuffer::F32(_) => ElementType::F32,
            ElementBuffer::F64(_) => ElementType::F64,
            ElementBuffer::B8(_) => ElementType::B8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ElementBuffer::U8(v) => v.len(),
            ElementBuffer::S16(v) => v.len(),
            ElementBuffer::U16(v) => v.len(),
            ElementBuffer::S32(v) => v.len(),
            ElementBuffer::F32(v) => v.len(),
            ElementBuffer::F64(v) => v.len(),
            ElementBuffer::B8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_element_type!(self.dtype(), T => {
            T::slice(self).and_then(|s| s.get(index)).map(|v| v.to_f64())
        })
    }

    /// Copy of the elements converted to `T`.
    pub fn to_vec_of<T: Element>(&self) -> Result<Vec<T>, BridgeError> {
        with_element_type!(self.dtype(), S => {
            let src = S::slice(self).unwrap_or(&[]);
            let mut out = try_vec::<T>(src.len())?;
            out.extend(src.iter().map(|&v| T::from_f64(v.to_f64())));
            Ok(out)
        })
    }

    /// Element-wise cast to `dtype`. Casting to the current type copies.
    pub fn cast(&self, dtype: ElementType) -> Result<Self, BridgeError> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        with_element_type!(dtype, T => Ok(T::into_buffer(self.to_vec_of::<T>()?)))
    }
}

impl<T: Element> From<Vec<T>> for ElementBuffer {
    fn from(data: Vec<T>) -> Self {
        T::into_buffer(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dispatch_table_covers_every_type() {
        for dtype in ElementType::ALL {
            let size = with_element_type!(dtype, T => {
                assert_eq!(T::DTYPE, dtype);
                std::mem::size_of::<T>()
            });
            assert_eq!(size, dtype.size_bytes(), "{dtype}");
        }
    }

    #[test]
    fn float_to_integer_cast_truncates_and_saturates() {
        let buf = ElementBuffer::from(vec![-3.7_f32, 0.9, 254.6, 300.0, f32::NAN]);
        let out = buf.cast(ElementType::U8).unwrap();
        assert_eq!(out, ElementBuffer::U8(vec![0, 0, 254, 255, 0]));

        let out = buf.cast(ElementType::S16).unwrap();
        assert_eq!(out, ElementBuffer::S16(vec![-3, 0, 254, 300, 0]));
    }

    #[test]
    fn booleans_cast_as_zero_and_one() {
        let buf = ElementBuffer::from(vec![true, false, true]);
        assert_eq!(
            buf.cast(ElementType::F64).unwrap(),
            ElementBuffer::F64(vec![1.0, 0.0, 1.0])
        );

        let back = ElementBuffer::from(vec![0_i32, -5, 7]).cast(ElementType::B8).unwrap();
        assert_eq!(back, ElementBuffer::B8(vec![false, true, true]));
    }

    #[test]
    fn integer_to_float_cast_is_exact() {
        let buf = ElementBuffer::from(vec![i32::MIN, -1, 0, 16_777_216]);
        let out = buf.cast(ElementType::F64).unwrap();
        let ElementBuffer::F64(values) = out else {
            panic!("expected f64 storage");
        };
        assert_relative_eq!(values[0], i32::MIN as f64);
        assert_relative_eq!(values[3], 16_777_216.0);
    }

    #[test]
    fn zeros_and_accessors() {
        let buf = ElementBuffer::zeros(ElementType::U16, 6).unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.dtype(), ElementType::U16);
        assert_eq!(buf.get_f64(5), Some(0.0));
        assert_eq!(buf.get_f64(6), None);
        assert!(u16::slice(&buf).is_some());
        assert!(u8::slice(&buf).is_none());
    }

    #[test]
    fn element_type_serializes_lowercase() {
        let json = serde_json::to_string(&ElementType::S16).unwrap();
        assert_eq!(json, "\"s16\"");
        let back: ElementType = serde_json::from_str("\"b8\"").unwrap();
        assert_eq!(back, ElementType::B8);
    }
}
