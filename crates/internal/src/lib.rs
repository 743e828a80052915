//! Internal helpers shared by the gmcrypt crates
//!
//! Nothing in here is part of the public API surface of `gmcrypt`.

#![forbid(unsafe_code)]

pub mod constant_time;
