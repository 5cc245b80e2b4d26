//! Generation model abstraction.
//!
//! `Generator` is the port a sequence-to-sequence model implements;
//! `BoxGenerator` erases the concrete type for runtime selection.

pub mod box_generator;
pub mod generator;
