//! Key capability required by the probe hashes.
//!
//! A key is viewed as a finite, ordered slice of integral elements. The
//! hashes only index and sum elements; equality decides probe matches.

/// One integral element of a key.
pub trait Element: Copy {
    fn to_u64(self) -> u64;
}

macro_rules! impl_element_lossless {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

impl_element_lossless!(u8, u16, u32, u64, char);

impl Element for usize {
    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }
}

// Signed elements sign-extend to 64 bits and are read back as unsigned
// (two's complement): `-1i8` becomes `u64::MAX`.
macro_rules! impl_element_signed {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn to_u64(self) -> u64 {
                    i64::from(self) as u64
                }
            }
        )*
    };
}

impl_element_signed!(i8, i16, i32, i64);

impl Element for isize {
    #[inline]
    fn to_u64(self) -> u64 {
        self as i64 as u64
    }
}

/// Keys that can be stored in a `DoubleHashSet`.
///
/// Types related through `Borrow` (e.g. `String` and `str`) must expose
/// the same element sequence, otherwise borrowed lookups probe the wrong
/// chain.
pub trait ProbeKey: Eq {
    type Element: Element;

    fn elements(&self) -> &[Self::Element];
}

impl ProbeKey for str {
    type Element = u8;

    #[inline]
    fn elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl ProbeKey for String {
    type Element = u8;

    #[inline]
    fn elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<E: Element + Eq> ProbeKey for [E] {
    type Element = E;

    #[inline]
    fn elements(&self) -> &[E] {
        self
    }
}

impl<E: Element + Eq> ProbeKey for Vec<E> {
    type Element = E;

    #[inline]
    fn elements(&self) -> &[E] {
        self.as_slice()
    }
}

impl<E: Element + Eq, const N: usize> ProbeKey for [E; N] {
    type Element = E;

    #[inline]
    fn elements(&self) -> &[E] {
        self.as_slice()
    }
}
