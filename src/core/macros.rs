/******************************************\
|==========================================|
|          Macro: impl_enum_index          |
|==========================================|
\******************************************/

/// Index conversions and iteration for a fieldless `#[repr(u8)]` enum with a `NUM` constant.
///
/// - `unsafe fn from_unchecked(u8) -> Self`
/// - `fn try_from_index(usize) -> Option<Self>`
/// - `fn index(&self) -> usize`
/// - `fn iter()`, every variant in discriminant order
#[macro_export]
macro_rules! impl_enum_index {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Converts a raw discriminant to ", stringify!($enum_name))]
            /// ## Safety
            /// `index` must be below `NUM`
            #[inline]
            pub const unsafe fn from_unchecked(index: u8) -> Self {
                debug_assert!(index < Self::NUM as u8, "Index out of bounds");
                unsafe { std::mem::transmute::<u8, Self>(index) }
            }

            #[inline]
            pub const fn try_from_index(index: usize) -> Option<Self> {
                match index < Self::NUM {
                    true => Some(unsafe { Self::from_unchecked(index as u8) }),
                    false => None,
                }
            }

            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }

            #[doc=concat!("Every ", stringify!($enum_name), " in index order")]
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> + Clone {
                (0..Self::NUM as u8).map(|i| unsafe { Self::from_unchecked(i) })
            }
        }
    };
}

/******************************************\
|==========================================|
|          Macro: impl_flag_set            |
|==========================================|
\******************************************/

/// `&`, `|` and `|=` for a `Copy` newtype over an integer bit set
#[macro_export]
macro_rules! impl_flag_set {
    ($struct_name:ident) => {
        impl std::ops::BitAnd for $struct_name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl std::ops::BitOr for $struct_name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $struct_name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}
