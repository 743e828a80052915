//! Constants for elliptic-curve public-key algorithms

pub mod sm2;
