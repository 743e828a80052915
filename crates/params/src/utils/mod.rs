//! Constants shared by the primitive layers

pub mod hash;
