// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Atomic operation datatypes and their sizes.

use thiserror::Error;

/// Operand types for atomic operations, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Datatype {
    Int8 = 0,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    FloatComplex,
    DoubleComplex,
    LongDouble,
    LongDoubleComplex,
}

/// One past the last valid datatype value.
pub const DATATYPE_LAST: u32 = Datatype::LongDoubleComplex as u32 + 1;

/// `long double` on x86-64 SysV: 80-bit extended, padded to 16 bytes.
const LONG_DOUBLE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid datatype {0} (valid range is 0..{})", DATATYPE_LAST)]
pub struct InvalidDatatype(pub u32);

impl Datatype {
    pub const ALL: [Datatype; DATATYPE_LAST as usize] = [
        Datatype::Int8,
        Datatype::Uint8,
        Datatype::Int16,
        Datatype::Uint16,
        Datatype::Int32,
        Datatype::Uint32,
        Datatype::Int64,
        Datatype::Uint64,
        Datatype::Float,
        Datatype::Double,
        Datatype::FloatComplex,
        Datatype::DoubleComplex,
        Datatype::LongDouble,
        Datatype::LongDoubleComplex,
    ];

    /// Size in bytes of one element.
    pub fn size(self) -> usize {
        use std::mem::size_of;
        match self {
            Datatype::Int8 => size_of::<i8>(),
            Datatype::Uint8 => size_of::<u8>(),
            Datatype::Int16 => size_of::<i16>(),
            Datatype::Uint16 => size_of::<u16>(),
            Datatype::Int32 => size_of::<i32>(),
            Datatype::Uint32 => size_of::<u32>(),
            Datatype::Int64 => size_of::<i64>(),
            Datatype::Uint64 => size_of::<u64>(),
            Datatype::Float => size_of::<f32>(),
            Datatype::Double => size_of::<f64>(),
            Datatype::FloatComplex => 2 * size_of::<f32>(),
            Datatype::DoubleComplex => 2 * size_of::<f64>(),
            Datatype::LongDouble => LONG_DOUBLE_SIZE,
            Datatype::LongDoubleComplex => 2 * LONG_DOUBLE_SIZE,
        }
    }
}

impl TryFrom<u32> for Datatype {
    type Error = InvalidDatatype;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Datatype::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidDatatype(value))
    }
}

/// Size of the datatype with raw value `value`, or `None` if out of range.
pub fn datatype_size(value: u32) -> Option<usize> {
    Datatype::try_from(value).ok().map(Datatype::size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sizes() {
        assert_eq!(Datatype::Int8.size(), 1);
        assert_eq!(Datatype::Uint16.size(), 2);
        assert_eq!(Datatype::Int32.size(), 4);
        assert_eq!(Datatype::Uint64.size(), 8);
    }

    #[test]
    fn complex_is_twice_real() {
        assert_eq!(Datatype::FloatComplex.size(), 2 * Datatype::Float.size());
        assert_eq!(Datatype::DoubleComplex.size(), 16);
        assert_eq!(Datatype::LongDoubleComplex.size(), 2 * Datatype::LongDouble.size());
    }

    #[test]
    fn raw_values_follow_declaration_order() {
        for (i, dt) in Datatype::ALL.iter().enumerate() {
            assert_eq!(*dt as u32, i as u32);
            assert_eq!(Datatype::try_from(i as u32).unwrap(), *dt);
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(Datatype::try_from(DATATYPE_LAST), Err(InvalidDatatype(DATATYPE_LAST)));
        assert_eq!(datatype_size(DATATYPE_LAST), None);
        assert_eq!(datatype_size(u32::MAX), None);
        assert_eq!(datatype_size(9), Some(8));
    }
}
