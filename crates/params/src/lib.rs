//! Constant values for the gmcrypt library
//!
//! Curve domain parameters, encoding sizes and hash sizes shared by every
//! other crate in the workspace. Nothing in here is mutable at runtime.

#![no_std]
#![forbid(unsafe_code)]

pub mod traditional;
pub mod utils;
