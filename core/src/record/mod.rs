//! record/mod.rs
//! Hitspool record layout: header types, decode/encode, and the decoded `Hit`.
//!
//! Wire notes:
//! - Fixed-size header (54 bytes) followed by `record_length - 54` trailer bytes.
//! - Big-endian integers throughout.
//! - Flags and the charge stamp are bit-packed in two trailing header words and are
//!   unpacked lazily by `Hit` accessors.

pub mod types;
pub mod encode;
pub mod decode;
pub mod hit;

pub use types::*;
pub use encode::*;
pub use decode::*;
pub use hit::{ChargeStamp, Hit, HitRow};
