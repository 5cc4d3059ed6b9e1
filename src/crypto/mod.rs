//! Cryptographic primitives - hashing only; signatures live outside this core

mod hash;

pub use hash::*;
