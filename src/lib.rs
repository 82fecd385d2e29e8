#![no_std]

#[macro_use]
mod fmt;

#[cfg(feature = "async")]
pub mod asynch;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod common;
pub mod conversions;
pub mod error;
pub mod frame;
pub mod threshold;

mod bits;
mod crc;
