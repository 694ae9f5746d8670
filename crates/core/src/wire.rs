//! Stable integer codes for persisted enums.
//!
//! Codes follow declaration order starting at 0 and must never be reordered;
//! append new variants at the end.

/// Implements `code()`, `ALL` and `TryFrom<i32>` for a fieldless enum.
///
/// ```ignore
/// impl_wire_codes!(WarrantyStatus, "WarrantyStatus", {
///     Active => 0,
///     Expired => 1,
/// });
/// ```
#[macro_export]
macro_rules! impl_wire_codes {
    ($t:ident, $name:literal, { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $t {
            /// Every variant, in code order.
            pub const ALL: &'static [$t] = &[$($t::$variant),+];

            /// Persisted integer code.
            pub fn code(self) -> i32 {
                match self {
                    $($t::$variant => $code),+
                }
            }
        }

        impl ::core::convert::TryFrom<i32> for $t {
            type Error = $crate::DomainError;

            fn try_from(code: i32) -> ::core::result::Result<Self, Self::Error> {
                match code {
                    $($code => Ok($t::$variant),)+
                    other => Err($crate::DomainError::validation(format!(
                        "unknown {} code: {}",
                        $name, other
                    ))),
                }
            }
        }
    };
}
