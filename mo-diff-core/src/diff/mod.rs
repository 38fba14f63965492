//! Shape-keyed snapshot diffing.
//!
//! Each category of state has one of four shapes, and each shape has its own
//! comparison strategy: a plain scalar (before/after, no judgment), a set of
//! keys (membership delta), a keyed map whose values may change, or a
//! monotonic counter per key (only strict increases are reported).

pub mod engine;
pub mod result;

pub use engine::{counter_delta, map_delta, set_delta};
pub use result::{transition, MapDelta, ScalarChange, SetDelta};
