#![doc = include_str!("../README.md")]

pub mod lazy_cache;
pub mod math;
pub mod serialization;

pub use lazy_cache::LazyCache;
