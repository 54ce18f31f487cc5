//! Shared functionality which is used in unit and integration tests
//!
//! [`builder`] is plain `std` code so `tests/` and `benches/` can include it with `#[path]`.


pub use builder::{ClassSpec, DexBuilder, NO_INDEX};
