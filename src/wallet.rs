/*
    Wallet level entry points.

    Every call is independent: the mnemonic or extended key is parsed,
    the key at the requested path is derived and the result is encoded.
    Nothing is cached between calls.
*/

use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    address,
    bip39::Mnemonic,
    encoding::ToVersionPrefix,
    error::{Error, Result},
    hdwallet::{
        ExtendedKey,
        Path,
        WalletType,
        Xprv,
        Xpub
    },
    key::{Key, KeyPair},
    script::MultisigPolicy,
    util::Network
};

pub use address::is_valid_address;

/**
    Account, change and index of the key to derive, plus the inputs
    some wallet types need. Defaults to account 0, receive chain, index 0.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationOptions {
    pub account: u32,
    pub change: u32,
    pub index: u32,
    /// BIP-39 passphrase, empty by default.
    /// Pair with `account_xpub_from_mnemonic` to export the matching xpub.
    pub passphrase: String,
    /// Signers of P2WSH addresses
    pub multisig: MultisigPolicy
}

impl DerivationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    pub fn change(mut self, change: u32) -> Self {
        self.change = change;
        self
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = passphrase.to_string();
        self
    }

    pub fn multisig(mut self, multisig: MultisigPolicy) -> Self {
        self.multisig = multisig;
        self
    }
}

/**
    BIP-39 seed of a phrase. Fails if the phrase has a bad word count,
    an unknown word or a bad checksum.
*/
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<Zeroizing<[u8; 64]>> {
    let mnemonic: Mnemonic = mnemonic.parse()?;
    Ok(mnemonic.to_seed(passphrase))
}

fn master_key(mnemonic: &str, passphrase: &str) -> Result<Xprv> {
    let seed = seed_from_mnemonic(mnemonic, passphrase)?;
    Xprv::from_seed(&seed[..])
}

/// Private key at m/purpose'/coin'/account'/change/index
fn derive_address_key(mnemonic: &str, wallet_type: WalletType, network: Network, options: &DerivationOptions) -> Result<Xprv> {
    let path = Path::for_address(wallet_type, network, options.account, options.change, options.index);
    debug!(scheme = %wallet_type, %network, %path, "deriving address key");

    master_key(mnemonic, &options.passphrase)?.derive_from_path(&path)
}

/**
    Serialized account level extended public key of a mnemonic, without a passphrase.

    `network` is 0 for mainnet and 1 for testnet. The version prefix follows the
    wallet type (SLIP-132): xpub/tpub for P2PKH and P2TR, ypub/upub for nested segwit,
    zpub/vpub for P2WPKH and Zpub/Vpub for P2WSH.
*/
pub fn seed_to_master_key_public(mnemonic: &str, network: u32, account: u32, wallet_type: WalletType) -> Result<String> {
    account_xpub_from_mnemonic(mnemonic, wallet_type, network, &DerivationOptions::new().account(account))
}

/**
    Account level extended public key for `options.account`, with `options.passphrase`
    applied to the seed. Addresses below it match `address_from_mnemonic` with the same options.
*/
pub fn account_xpub_from_mnemonic(mnemonic: &str, wallet_type: WalletType, network: u32, options: &DerivationOptions) -> Result<String> {
    let network = Network::try_from(network)?;
    let path = Path::for_account(wallet_type, network, options.account);
    debug!(scheme = %wallet_type, %network, %path, "deriving account xpub");

    let account_key = master_key(mnemonic, &options.passphrase)?.derive_from_path(&path)?;
    Ok(account_key.neuter().serialize(&wallet_type.public_version_prefix(network)))
}

/**
    Address at change/index below an account level extended public key.

    Only non hardened levels are derived. The key's version prefix must belong
    to the requested network. `options.account` and `options.passphrase` are not used.
*/
pub fn address_from_extended_public_key(xpub: &str, wallet_type: WalletType, is_testnet: bool, options: &DerivationOptions) -> Result<String> {
    let network = if is_testnet { Network::Testnet } else { Network::Bitcoin };
    let (account_key, version) = Xpub::decode(xpub)?;
    if !version.matches_network(network) {
        return Err(Error::InvalidExtendedKey("version does not match network"));
    }

    let path = Path::relative(options.change, options.index);
    debug!(scheme = %wallet_type, %network, %path, depth = account_key.depth, "deriving address from xpub");

    account_key
        .derive_from_path(&path)?
        .get_address(wallet_type, network, &options.multisig)
}

/**
    Address of a mnemonic for a wallet type. `network` is 0 for mainnet and 1 for testnet.
*/
pub fn address_from_mnemonic(mnemonic: &str, wallet_type: WalletType, network: u32, options: &DerivationOptions) -> Result<String> {
    let network = Network::try_from(network)?;
    derive_address_key(mnemonic, wallet_type, network, options)?
        .get_address(wallet_type, network, &options.multisig)
}

/**
    Compressed public key, as hex, of the key behind `address_from_mnemonic`.
*/
pub fn public_key_from_mnemonic(mnemonic: &str, wallet_type: WalletType, network: u32, options: &DerivationOptions) -> Result<String> {
    let network = Network::try_from(network)?;
    Ok(derive_address_key(mnemonic, wallet_type, network, options)?.get_pub().hex())
}

/**
    Private key, as hex, of the key behind `address_from_mnemonic`.
*/
pub fn private_key_from_mnemonic(mnemonic: &str, wallet_type: WalletType, network: u32, options: &DerivationOptions) -> Result<Zeroizing<String>> {
    let network = Network::try_from(network)?;
    Ok(Zeroizing::new(derive_address_key(mnemonic, wallet_type, network, options)?.get_prv().hex()))
}

/**
    Compressed public key, as hex, of a WIF private key.
*/
pub fn public_key_from_wif(wif: &str, network: Network) -> Result<String> {
    Ok(KeyPair::from_wif(wif, network)?.public.hex())
}

/**
    Raw private key, as hex, of a WIF private key.
*/
pub fn private_key_from_wif(wif: &str, network: Network) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(KeyPair::from_wif(wif, network)?.private.hex()))
}

/**
    Shortcuts for the two single key segwit wallet conventions.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletProfile {
    /// BIP-84, bc1q addresses
    NativeSegwit,
    /// BIP-49, P2WPKH nested in P2SH
    NestedSegwit
}

impl WalletProfile {
    pub fn wallet_type(&self) -> WalletType {
        match self {
            WalletProfile::NativeSegwit => WalletType::P2WPKH,
            WalletProfile::NestedSegwit => WalletType::P2SH_P2WPKH
        }
    }

    pub fn address(&self, mnemonic: &str, network: u32, options: &DerivationOptions) -> Result<String> {
        address_from_mnemonic(mnemonic, self.wallet_type(), network, options)
    }

    pub fn public_key(&self, mnemonic: &str, network: u32, options: &DerivationOptions) -> Result<String> {
        public_key_from_mnemonic(mnemonic, self.wallet_type(), network, options)
    }

    pub fn private_key(&self, mnemonic: &str, network: u32, options: &DerivationOptions) -> Result<Zeroizing<String>> {
        private_key_from_mnemonic(mnemonic, self.wallet_type(), network, options)
    }

    /// Account level extended public key, zpub/vpub or ypub/upub
    pub fn account_xpub(&self, mnemonic: &str, network: u32, account: u32) -> Result<String> {
        seed_to_master_key_public(mnemonic, network, account, self.wallet_type())
    }
}
