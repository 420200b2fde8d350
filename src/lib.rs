//! nls-bundle
//!
//! Loader and fallback resolver for AMD/RequireJS style NLS message bundles:
//! a root dictionary plus partial locale overrides, resolved per key with
//! fallback to root.

pub mod bundle;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod locale;
pub mod syntax;

mod test_utils;

pub use bundle::{
    BundleError,
    BundleSet,
    LocaleEntry,
};
pub use catalog::{
    Catalog,
    LazyCatalog,
};
pub use locale::LocaleTag;
