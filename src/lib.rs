//! Network-interface ioctl request codes, exported as a C-compatible table.
//!
//! Callers that cannot see the `SIOC*` macros of the system headers read the
//! values at run time through [`rust_get_constants`], which returns a static
//! array of `{ name, value }` records terminated by a `{ NULL, 0 }` sentinel.
//! Rust callers can use [`entries`], [`lookup`] and [`require`] instead.

pub mod constants;
pub mod ioc;
mod table;

pub use table::{
    entries, find, len, lookup, require, rust_get_constants, rust_get_constants_len, Constant,
    ConstantEntry, Constants,
};
