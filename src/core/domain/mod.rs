//! Domain types.

pub mod key;

pub use key::{validate_key, KeySource, MasterKey, KEY_HEX_LEN, KEY_LEN};
