//! Domain models for the storefront catalog.
//!
//! These are the shapes handed to route handlers and serialized to JSON.
//! Database row types stay private to the `db` module.

pub mod lookup;
pub mod product;
pub mod review;

pub use lookup::{Brand, Category, Color, FilterOptions, Gender, Size};
pub use product::{
    FullProduct, GalleryVariant, Product, ProductImage, ProductListItem, ProductPage,
    RecommendedProduct, Variant,
};
pub use review::{Review, ReviewSummary};
