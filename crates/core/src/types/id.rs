//! Newtype IDs for type-safe entity references.
//!
//! Every catalog table is keyed by a UUID. Use the `define_id!` macro to
//! create wrappers that prevent accidentally mixing IDs from different
//! entity types (e.g. binding a `ColorId` where a `SizeId` is expected).

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_uuid()`, `parse_str()`
/// - `From<Uuid>` and `Into<Uuid>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use stride_core::define_id;
/// define_id!(WishlistId);
/// define_id!(CouponId);
///
/// let wishlist_id = WishlistId::new(uuid::Uuid::nil());
/// let coupon_id = CouponId::new(uuid::Uuid::nil());
///
/// // These are different types, so this won't compile:
/// // let _: WishlistId = coupon_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }

            /// Parse an ID from its hyphenated (or simple) string form.
            ///
            /// # Errors
            ///
            /// Returns `uuid::Error` if the input is not a valid UUID.
            pub fn parse_str(s: &str) -> ::core::result::Result<Self, ::uuid::Error> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse_str(s)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <::uuid::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <::uuid::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Catalog entities
define_id!(ProductId);
define_id!(VariantId);
define_id!(ImageId);

// Lookup dimensions
define_id!(BrandId);
define_id!(CategoryId);
define_id!(GenderId);
define_id!(ColorId);
define_id!(SizeId);

// Reviews
define_id!(ReviewId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_roundtrip() {
        let raw = "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";
        let id = ProductId::parse_str(raw).unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_parse_str_rejects_garbage() {
        assert!(ProductId::parse_str("not-a-uuid").is_err());
        assert!("".parse::<VariantId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ColorId::new(uuid::Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_ordering_follows_uuid() {
        let low = ProductId::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
        let high = ProductId::parse_str("00000000-0000-0000-0000-000000000002").unwrap();
        assert!(low < high);
    }
}
