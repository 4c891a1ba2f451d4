//! Utilities for emitting ASCII scalars using an [`AdaptiveWriter`].
use std::io::Write;

use crate::{encoding::Encoder, AdaptiveWriter, Error};

mod sealed {
    pub trait Sealed: itoap::Integer {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for i128 {}
    impl Sealed for u128 {}
    impl Sealed for isize {}
    impl Sealed for usize {}
}

/// Primitive integer types that can be written into an [`AdaptiveWriter`] without allocating.
pub trait Integer: sealed::Sealed {}

impl Integer for i8 {}
impl Integer for u8 {}
impl Integer for i16 {}
impl Integer for u16 {}
impl Integer for i32 {}
impl Integer for u32 {}
impl Integer for i64 {}
impl Integer for u64 {}
impl Integer for i128 {}
impl Integer for u128 {}
impl Integer for isize {}
impl Integer for usize {}

/// Longest decimal representation of any [`Integer`], the one of `i128::MIN`.
const MAX_DIGITS: usize = 40;

/// Write a decimal number using ASCII digits.
///
/// The digits are formatted on the stack and written directly to the destination, after any
/// pending buffered text.
#[inline]
pub fn ascii_digits<W, E, I>(writer: &mut AdaptiveWriter<W, E>, value: I) -> Result<(), Error>
where
    W: Write,
    E: Encoder,
    I: Integer,
{
    debug_assert!(I::MAX_LEN <= MAX_DIGITS);
    let mut digits = [0u8; MAX_DIGITS];
    let len = itoap::write(&mut digits[..], value)?;
    writer.write_direct(&digits[..len])
}
