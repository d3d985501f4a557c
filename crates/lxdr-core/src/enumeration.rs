//! # Closed Enumerations
//!
//! An XDR enumeration is a closed table of `(ordinal, name)` pairs declared
//! once per type. The bijection between ordinals and names is fixed by the
//! declaration; lookups outside the table fail with
//! [`XdrError::InvalidEnumValue`]. On the wire an enumeration is its ordinal
//! as a 32-bit big-endian signed integer, and decoding an ordinal outside
//! the table is a hard error.
//!
//! Concrete enumerations are declared with [`xdr_enum!`](crate::xdr_enum),
//! which generates the Rust enum, the [`XdrEnum`] tables, the codec impls,
//! `Display` (the protocol name) and `FromStr` (lookup by name).

use crate::error::XdrError;

/// A closed set of named ordinal values.
pub trait XdrEnum: Copy + Eq + Sized + 'static {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Every member, in ordinal order.
    const ALL: &'static [Self];

    /// The wire ordinal.
    fn ordinal(self) -> i32;

    /// The protocol name (e.g. `ASSET_TYPE_NATIVE`).
    fn name(self) -> &'static str;

    /// Look up a member by ordinal.
    fn of_ordinal(ordinal: i32) -> Result<Self, XdrError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.ordinal() == ordinal)
            .ok_or_else(|| XdrError::InvalidEnumValue {
                type_name: Self::TYPE_NAME,
                value: ordinal.to_string(),
            })
    }

    /// Look up a member by protocol name.
    fn of_name(name: &str) -> Result<Self, XdrError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == name)
            .ok_or_else(|| XdrError::InvalidEnumValue {
                type_name: Self::TYPE_NAME,
                value: name.to_string(),
            })
    }
}

/// Declare a closed XDR enumeration.
///
/// ```
/// lxdr_core::xdr_enum! {
///     /// Which side of a trade.
///     pub enum Side {
///         Buy = 0 => "SIDE_BUY",
///         Sell = 1 => "SIDE_SELL",
///     }
/// }
///
/// use lxdr_core::XdrEnum;
/// assert_eq!(Side::of_ordinal(1).unwrap(), Side::Sell);
/// assert_eq!(Side::Buy.name(), "SIDE_BUY");
/// ```
#[macro_export]
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $ordinal:literal => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::enumeration::XdrEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn ordinal(self) -> i32 {
                match self {
                    $(Self::$variant => $ordinal,)+
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl $crate::codec::XdrEncode for $name {
            fn encode_xdr(
                &self,
                w: &mut $crate::codec::XdrWriter,
            ) -> Result<(), $crate::error::XdrError> {
                w.write_i32($crate::enumeration::XdrEnum::ordinal(*self));
                Ok(())
            }
        }

        impl $crate::codec::XdrDecode for $name {
            fn decode_xdr(
                r: &mut $crate::codec::XdrReader<'_>,
            ) -> Result<Self, $crate::error::XdrError> {
                let ordinal = r.read_i32()?;
                <Self as $crate::enumeration::XdrEnum>::of_ordinal(ordinal)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enumeration::XdrEnum::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::XdrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::enumeration::XdrEnum>::of_name(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{XdrDecode, XdrEncode};

    crate::xdr_enum! {
        /// Test enumeration with a sparse ordinal table.
        enum Colour {
            Red = 0 => "COLOUR_RED",
            Green = 1 => "COLOUR_GREEN",
            Wide = 256 => "COLOUR_WIDE",
        }
    }

    #[test]
    fn ordinal_and_name_lookup() {
        assert_eq!(Colour::of_ordinal(1), Ok(Colour::Green));
        assert_eq!(Colour::of_name("COLOUR_WIDE"), Ok(Colour::Wide));
        assert_eq!(Colour::Wide.ordinal(), 256);
        assert_eq!(Colour::Red.name(), "COLOUR_RED");
        assert_eq!(Colour::Green.to_string(), "COLOUR_GREEN");
        assert_eq!("COLOUR_RED".parse::<Colour>(), Ok(Colour::Red));
    }

    #[test]
    fn unknown_values_rejected() {
        assert_eq!(
            Colour::of_ordinal(2),
            Err(XdrError::InvalidEnumValue {
                type_name: "Colour",
                value: "2".into()
            })
        );
        assert!(Colour::of_name("colour_red").is_err());
    }

    #[test]
    fn ordinal_name_bijection() {
        for v in Colour::ALL {
            assert_eq!(Colour::of_ordinal(v.ordinal()), Ok(*v));
            assert_eq!(Colour::of_name(v.name()), Ok(*v));
        }
    }

    #[test]
    fn wire_form_is_ordinal_word() {
        assert_eq!(Colour::Wide.to_xdr().unwrap(), vec![0, 0, 1, 0]);
        assert_eq!(Colour::from_xdr(&[0, 0, 0, 1]), Ok(Colour::Green));
        assert!(matches!(
            Colour::from_xdr(&[0, 0, 0, 9]),
            Err(XdrError::InvalidEnumValue { .. })
        ));
    }
}
