//! Newtype IDs for Shopify global IDs.
//!
//! Shopify identifies every object with an opaque global ID string such as
//! `gid://shopify/Cart/c1-abc?key=...`. The `define_gid!` macro creates
//! wrappers so a cart line ID cannot be passed where a variant ID is expected.

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use goldsabertooth_core::define_gid;
/// define_gid!(OrderId);
/// define_gid!(CustomerId);
///
/// let order_id = OrderId::new("gid://shopify/Order/1");
/// let customer_id = CustomerId::new("gid://shopify/Customer/1");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = customer_id;
/// assert_eq!(order_id.as_str(), "gid://shopify/Order/1");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a Shopify global ID.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the ID string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(CartId);
define_gid!(CartLineId);
define_gid!(ProductId);
define_gid!(VariantId);
