//! Message bundles: loading, fallback resolution and load-time validation.

mod error;
mod flatten;
mod loader;
mod resolve;
mod types;
mod validate;

pub use error::BundleError;
pub use flatten::flatten_dictionary;
pub use loader::{
    load_bundle_file,
    load_bundle_source,
};
pub use types::{
    Bundle,
    BundleSet,
    LocaleEntry,
};
pub use validate::{
    BundleIssue,
    IssueKind,
};
