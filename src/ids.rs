//! Identifiers
//!
//! Catalog and promotion records are owned by an external store, so their
//! identifiers cross a process boundary as opaque strings rather than
//! in-process keys.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Product identifier. Variants of the same product share it.
    ProductId
}

string_id! {
    /// Product variant identifier.
    VariantId
}

string_id! {
    /// Category identifier.
    CategoryId
}

string_id! {
    /// Stock-keeping unit. Unique per cart line; the allocator matches
    /// working items by this key.
    Sku
}

string_id! {
    /// Promotion identifier.
    PromotionId
}
