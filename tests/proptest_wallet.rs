use btc_deriver::prelude::*;
use proptest::prelude::*;

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn wallet_types() -> impl Strategy<Value = WalletType> {
    prop_oneof![
        Just(WalletType::P2PKH),
        Just(WalletType::P2SH_P2WPKH),
        Just(WalletType::P2WPKH),
        Just(WalletType::P2TR)
    ]
}

proptest! {
    //Each case runs PBKDF2 with 2048 rounds
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn derivation_is_deterministic(
        wallet_type in wallet_types(),
        network in 0u32..2,
        change in 0u32..2,
        index in 0u32..(1 << 31)
    ) {
        let options = DerivationOptions::new().change(change).index(index);
        let first = address_from_mnemonic(PHRASE, wallet_type, network, &options).unwrap();
        let second = address_from_mnemonic(PHRASE, wallet_type, network, &options).unwrap();
        prop_assert_eq!(&first, &second);

        let expected = if network == 0 { Network::Bitcoin } else { Network::Testnet };
        prop_assert!(is_valid_address(&first, expected));
    }

    #[test]
    fn xpub_matches_mnemonic(
        wallet_type in wallet_types(),
        network in 0u32..2,
        account in 0u32..4,
        change in 0u32..(1 << 31),
        index in 0u32..(1 << 31)
    ) {
        let options = DerivationOptions::new().account(account).change(change).index(index);
        let xpub = seed_to_master_key_public(PHRASE, network, account, wallet_type).unwrap();

        prop_assert_eq!(
            address_from_extended_public_key(&xpub, wallet_type, network == 1, &options).unwrap(),
            address_from_mnemonic(PHRASE, wallet_type, network, &options).unwrap()
        );
    }
}

proptest! {
    #[test]
    fn wif_round_trip(bytes in prop::array::uniform32(any::<u8>()), compressed in any::<bool>()) {
        //Zero and values above the curve order are not keys
        prop_assume!(PrivKey::from_slice(&bytes).is_ok());
        let key = PrivKey::from_slice(&bytes).unwrap();

        for network in [Network::Bitcoin, Network::Testnet] {
            let pair = KeyPair::from_priv_key(key, compressed, network);
            let decoded = KeyPair::from_wif(&pair.to_wif(), network).unwrap();

            prop_assert_eq!(decoded.compressed, compressed);
            prop_assert_eq!(decoded.private.hex(), key.hex());
            prop_assert_eq!(
                public_key_from_wif(&pair.to_wif(), network).unwrap(),
                PubKey::from_priv_key(&key).hex()
            );
        }
    }
}
