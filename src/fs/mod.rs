//! Filesystem helpers for javelin.

mod atomic;

pub use atomic::atomic_write;
