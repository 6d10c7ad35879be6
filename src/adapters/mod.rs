//! Concrete implementations of the crate's trait seams.
//!
//! [`rest`] talks to the real server; [`mock`] is a scripted stand-in for
//! tests.

pub mod mock;
pub mod rest;

pub use mock::MockPostSource;
pub use rest::RestPostSource;
