/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Closed string vocabularies used by the API
//!
//! [`string_enum!`](crate::string_enum) declares an enum whose variants map one-to-one onto
//! fixed wire strings. Every generated enum has an extra `Undefined` variant:
//! decoding never fails (unknown text becomes `Undefined`) and `Undefined`
//! is written back as `"UNK"`.

/// Declares an enum backed by a fixed string vocabulary
///
/// Generates `as_str`, a total `from_str_lossy`, `From<&str>`, `Display`,
/// serde `Serialize`/`Deserialize` and [`FromJson`](crate::model::json::FromJson).
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            /// Value missing or not part of the vocabulary
            #[default]
            Undefined,
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every defined variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation of the value, `"UNK"` when undefined
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::Undefined => "UNK",
                    $($name::$variant => $text,)+
                }
            }

            /// Decodes a wire string; anything outside the vocabulary is `Undefined`
            #[must_use]
            pub fn from_str_lossy(value: &str) -> Self {
                match value {
                    $($text => $name::$variant,)+
                    _ => $name::Undefined,
                }
            }

            /// Whether this is the `Undefined` sentinel
            #[must_use]
            pub fn is_undefined(&self) -> bool {
                matches!(self, $name::Undefined)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from_str_lossy(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_str_lossy(&value))
            }
        }

        impl $crate::model::json::FromJson for $name {
            fn from_json(node: $crate::model::json::JsonField<'_>) -> Self {
                Self::from_str_lossy(&node.string())
            }
        }
    };
}
