/*
    This module implements hierarchical deterministic wallets
    under the BIP 32 standard.

    Based on chapter 5 of the bitcoin book. (https://github.com/bitcoinbook/bitcoinbook/)
*/

pub mod ckd;
pub mod extended_keys;
pub mod path;
pub mod wallet_type;

pub use ckd::ChildOptions as ChildOptions;
pub use extended_keys::{
    ExtendedKey,
    Xprv,
    Xpub
};
pub use path::Path as Path;
pub use wallet_type::WalletType as WalletType;
