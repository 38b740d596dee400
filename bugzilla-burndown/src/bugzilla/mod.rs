//! Bugzilla query layer.
//!
//! Everything that talks to, or links back to, a Bugzilla instance lives
//! here. The rest of the crate only sees [`RawBug`](crate::bugs::RawBug)s
//! through the [`BugSource`] trait.

mod client;
mod error;
mod links;
mod query;

pub use client::{BugSource, BugzillaClient, DEFAULT_BUGZILLA_URL};
pub use error::FetchError;
pub use links::{with_trailing_slash, BugLinks};
pub use query::{BugField, SearchQuery};
