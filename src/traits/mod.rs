//! Trait abstractions at the crate's external seams.
//!
//! The loaders never talk to the network directly; they consume the
//! [`PostSource`] trait, which the production REST adapter and the test
//! mock both implement.

mod post_source;

pub use post_source::PostSource;
