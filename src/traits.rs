/// A primitive that counts the leading zero bits of a `u64`.
///
/// Zero is defined for every implementation: `count(0) == 64`.
pub trait LeadingZeros {
    fn count(x: u64) -> u32;
}

/// Backed by the compiler intrinsic (lzcnt, bsr or clz depending on target).
pub enum Intrinsic {}

impl LeadingZeros for Intrinsic {
    #[inline]
    fn count(x: u64) -> u32 {
        x.leading_zeros()
    }
}

/// Binary search over bit positions for targets without a fast instruction.
pub enum Portable {}

impl LeadingZeros for Portable {
    #[inline]
    fn count(mut x: u64) -> u32 {
        if x == 0 {
            return 64;
        }
        let mut n = 0;
        if x >> 32 == 0 {
            n += 32;
            x <<= 32;
        }
        if x >> 48 == 0 {
            n += 16;
            x <<= 16;
        }
        if x >> 56 == 0 {
            n += 8;
            x <<= 8;
        }
        if x >> 60 == 0 {
            n += 4;
            x <<= 4;
        }
        if x >> 62 == 0 {
            n += 2;
            x <<= 2;
        }
        if x >> 63 == 0 {
            n += 1;
        }
        n
    }
}

#[cfg(not(feature = "portable-clz"))]
pub(crate) type Clz = Intrinsic;

#[cfg(feature = "portable-clz")]
pub(crate) type Clz = Portable;
