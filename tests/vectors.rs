/*
    Wallet level test vectors.

    Addresses and keys produced by Leather (BIP-84) and Xverse (BIP-49)
    for known phrases, plus cross checks between the entry points.
*/

use btc_deriver::prelude::*;
use btc_deriver::encoding::{base58::Base58, bech32};

const LEATHER: &str = "jazz sibling error milk first mouse acid carpet slice able nothing desert uncover apology warm other speed cart library rhythm scrap crisp twenty magic";
const XVERSE: &str = "asset prefer seat story west regret voyage grain awesome dizzy chaos column";

const XVERSE_ACCOUNT_XPUB: &str = "xpub6DH994sc1N881q3SP3T2NLK5cYEBgF4WRFPzeWjCWFdSF28fqskEPbV727RXrQLpkeYdSDV6Da6C7Cs9httVBqJBogYfRykNNGw1BJPLtNh";
const WIF: &str = "Kx4x3XBJJqidCMnuSn2DHzQEwE7n5v1faUFwJkEGv74oLDWcdwMc";

fn defaults() -> DerivationOptions {
    DerivationOptions::default()
}

#[test]
fn leather_native_segwit_addresses() {
    assert_eq!(
        address_from_mnemonic(LEATHER, WalletType::P2WPKH, 0, &defaults()).unwrap(),
        "bc1q38rfaervg7fahczswwdjyy3guxrsxspmf2e6x2"
    );
    assert_eq!(
        address_from_mnemonic(LEATHER, WalletType::P2WPKH, 1, &defaults()).unwrap(),
        "tb1qk6llyxu7cmzrvnq5wv6ku0ry4mwcujl7eeqtcn"
    );
    assert_eq!(
        WalletProfile::NativeSegwit.address(LEATHER, 1, &defaults()).unwrap(),
        "tb1qk6llyxu7cmzrvnq5wv6ku0ry4mwcujl7eeqtcn"
    );
}

#[test]
fn xverse_nested_segwit_addresses() {
    assert_eq!(
        address_from_mnemonic(XVERSE, WalletType::P2SH_P2WPKH, 0, &defaults()).unwrap(),
        "35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv"
    );
    assert_eq!(
        address_from_mnemonic(XVERSE, WalletType::P2SH_P2WPKH, 1, &defaults()).unwrap(),
        "2N9LD6CTA7zRWwPruDGjxEa6S5PQs8DKJqG"
    );
    assert_eq!(
        WalletProfile::NestedSegwit.address(XVERSE, 0, &defaults()).unwrap(),
        "35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv"
    );
}

#[test]
fn testnet_public_keys() {
    assert_eq!(
        public_key_from_mnemonic(LEATHER, WalletType::P2WPKH, 1, &defaults()).unwrap(),
        "020a90f590e1634aca4fe06a6bb483fbab3339b37141e6b5e81a4037ccb08b921b"
    );
    assert_eq!(
        public_key_from_mnemonic(XVERSE, WalletType::P2SH_P2WPKH, 1, &defaults()).unwrap(),
        "03a244af0496ced3e34adf4abc92639164439c5dd631f3550d039d2a2399548d2d"
    );
}

#[test]
fn private_key_matches_public_key() {
    let private = private_key_from_mnemonic(LEATHER, WalletType::P2WPKH, 1, &defaults()).unwrap();
    let key = PrivKey::from_slice(&hex::decode(private.as_str()).unwrap()).unwrap();
    assert_eq!(
        PubKey::from_priv_key(&key).hex(),
        "020a90f590e1634aca4fe06a6bb483fbab3339b37141e6b5e81a4037ccb08b921b"
    );
}

#[test]
fn address_from_account_xpub() {
    assert_eq!(
        address_from_extended_public_key(XVERSE_ACCOUNT_XPUB, WalletType::P2SH_P2WPKH, false, &defaults()).unwrap(),
        "35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv"
    );

    //The same account exported with its SLIP-132 prefix
    let ypub = seed_to_master_key_public(XVERSE, 0, 0, WalletType::P2SH_P2WPKH).unwrap();
    assert!(ypub.starts_with("ypub"));
    assert_eq!(Xpub::decode(&ypub).unwrap().0, Xpub::decode(XVERSE_ACCOUNT_XPUB).unwrap().0);
}

#[test]
fn xpub_network_is_checked() {
    assert_eq!(
        address_from_extended_public_key(XVERSE_ACCOUNT_XPUB, WalletType::P2SH_P2WPKH, true, &defaults()),
        Err(Error::InvalidExtendedKey("version does not match network"))
    );
}

#[test]
fn wif_keys() {
    assert_eq!(
        public_key_from_wif(WIF, Network::Bitcoin).unwrap(),
        "025774620afbedb32e2fc27d3bd80eda4c1ad864a8713aa7f85e0a3870cfb9f295"
    );
    assert_eq!(
        private_key_from_wif(WIF, Network::Bitcoin).unwrap().as_str(),
        "1954942e409d6dfd62bd21a33c12ac34886b2edfcba6443fca2a2d1264860442"
    );
    assert!(matches!(public_key_from_wif(WIF, Network::Testnet), Err(Error::InvalidWIF(_))));
}

#[test]
fn hash_bytes_round_trip_wallet_addresses() {
    let segwit = bech32::decode("tb1qk6llyxu7cmzrvnq5wv6ku0ry4mwcujl7eeqtcn").unwrap();
    assert_eq!(
        address_from_hash_bytes(HashMode::P2WPKH as u8, &hex::encode(&segwit.program), Network::Testnet).unwrap(),
        "tb1qk6llyxu7cmzrvnq5wv6ku0ry4mwcujl7eeqtcn"
    );
    let mainnet = address_from_hash_bytes(HashMode::P2WPKH as u8, &hex::encode(&segwit.program), Network::Bitcoin).unwrap();
    assert!(mainnet.starts_with("bc1q"));
    assert!(is_valid_address(&mainnet, Network::Bitcoin));

    let legacy = Base58::check_decode("35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv").unwrap();
    assert_eq!(
        address_from_hash_bytes(HashMode::P2SH as u8, &hex::encode(&legacy[1..]), Network::Bitcoin).unwrap(),
        "35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv"
    );
}

#[test]
fn networks_give_different_addresses() {
    for wallet_type in [WalletType::P2PKH, WalletType::P2SH_P2WPKH, WalletType::P2WPKH, WalletType::P2TR] {
        let mainnet = address_from_mnemonic(XVERSE, wallet_type, 0, &defaults()).unwrap();
        let testnet = address_from_mnemonic(XVERSE, wallet_type, 1, &defaults()).unwrap();
        assert_ne!(mainnet, testnet);
        assert!(is_valid_address(&mainnet, Network::Bitcoin));
        assert!(!is_valid_address(&mainnet, Network::Testnet));
        assert!(is_valid_address(&testnet, Network::Testnet));
        assert!(!is_valid_address(&testnet, Network::Bitcoin));
    }
}

#[test]
fn hardened_levels_need_a_private_key() {
    let (account, _) = Xpub::decode(XVERSE_ACCOUNT_XPUB).unwrap();
    assert_eq!(account.get_xchild(ChildOptions::Hardened(0)), Err(Error::HardenedFromPublic));
    assert_eq!(
        account.derive_from_path(&"m/0/0'".parse().unwrap()),
        Err(Error::HardenedFromPublic)
    );
}

#[test]
fn xpub_and_mnemonic_agree_for_every_scheme() {
    let cosigner = PubKey::from_slice(
        &hex::decode("025774620afbedb32e2fc27d3bd80eda4c1ad864a8713aa7f85e0a3870cfb9f295").unwrap()
    ).unwrap();
    let options = DerivationOptions::new()
        .account(1)
        .change(1)
        .index(7)
        .multisig(MultisigPolicy::new(2, vec![cosigner]));

    for network in [0, 1] {
        for wallet_type in [WalletType::P2PKH, WalletType::P2SH_P2WPKH, WalletType::P2WPKH, WalletType::P2WSH, WalletType::P2TR] {
            let xpub = seed_to_master_key_public(LEATHER, network, options.account, wallet_type).unwrap();
            assert_eq!(
                address_from_extended_public_key(&xpub, wallet_type, network == 1, &options).unwrap(),
                address_from_mnemonic(LEATHER, wallet_type, network, &options).unwrap(),
                "{} on network {}", wallet_type, network
            );
        }
    }
}

#[test]
fn validator_rejects_single_character_changes() {
    const BECH32_CHARS: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
    const BASE58_CHARS: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    let cosigner = PubKey::from_slice(
        &hex::decode("025774620afbedb32e2fc27d3bd80eda4c1ad864a8713aa7f85e0a3870cfb9f295").unwrap()
    ).unwrap();
    let options = DerivationOptions::new().multisig(MultisigPolicy::new(2, vec![cosigner]));

    for (tag, network) in [(0, Network::Bitcoin), (1, Network::Testnet)] {
        for wallet_type in [WalletType::P2PKH, WalletType::P2SH_P2WPKH, WalletType::P2WPKH, WalletType::P2WSH, WalletType::P2TR] {
            let address = address_from_mnemonic(XVERSE, wallet_type, tag, &options).unwrap();
            assert!(is_valid_address(&address, network), "{}", address);

            let alphabet = if address.starts_with("bc1") || address.starts_with("tb1") { BECH32_CHARS } else { BASE58_CHARS };
            let chars: Vec<char> = address.chars().collect();

            //Every position of the checksum tail, swapped for the next character of the alphabet
            for position in chars.len() - 6..chars.len() {
                let current = alphabet.find(chars[position]).unwrap();
                let mut mutated = chars.clone();
                mutated[position] = alphabet.chars().nth((current + 1) % alphabet.len()).unwrap();
                let mutated: String = mutated.into_iter().collect();

                assert!(!is_valid_address(&mutated, network), "{} accepted as {}", mutated, wallet_type);
            }
        }
    }
}

#[test]
fn validator_rejects_padding() {
    assert!(!is_valid_address(" 35WkpG6BNSVVb1S6Gf8CPSAhnEU8Fom5Dv\n", Network::Bitcoin));
    assert!(!is_valid_address(" bc1q38rfaervg7fahczswwdjyy3guxrsxspmf2e6x2", Network::Bitcoin));
    assert!(matches!(public_key_from_wif(&format!("  {} ", WIF), Network::Bitcoin), Err(Error::InvalidWIF(_))));
    assert!(matches!(
        address_from_extended_public_key(&format!("{} ", XVERSE_ACCOUNT_XPUB), WalletType::P2SH_P2WPKH, false, &defaults()),
        Err(Error::InvalidExtendedKey(_))
    ));
}
