/*
    String encodings for keys and addresses.

    Base58Check carries extended keys, WIFs and legacy addresses behind a
    version prefix. Bech32 and Bech32m carry segwit outputs.
*/

pub mod version_prefix;
pub mod base58;
pub mod bech32;

pub use version_prefix::{ToVersionPrefix, VersionPrefix};
