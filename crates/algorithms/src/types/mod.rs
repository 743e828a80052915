//! Fixed-size value types shared by the primitives

pub mod digest;

pub use digest::Digest;
