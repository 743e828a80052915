//! Property-based tests for the SM2 engine

use gmcrypt::algorithms::ec::sm2::{self as ec, Point, Scalar};
use gmcrypt::engine;
use gmcrypt_tests::seeded_rng;
use proptest::prelude::*;

fn keys_for(seed: u64) -> engine::KeyPairBytes {
    engine::generate_keypair_with_rng(&mut seeded_rng(seed)).unwrap()
}

fn scalar_from(bytes: [u8; 32]) -> Scalar {
    Scalar::new(bytes).unwrap_or_else(|_| Scalar::deserialize(&[1u8; 32]).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn encrypt_decrypt_roundtrip(
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let keys = keys_for(seed);
        let mut rng = seeded_rng(seed ^ 0xa5a5);
        let c1 = engine::encrypt_with_rng(&data, &keys.public_key, &mut rng).unwrap();
        let c2 = engine::encrypt_with_rng(&data, &keys.public_key, &mut rng).unwrap();

        prop_assert_eq!(c1.len(), 97 + data.len());
        prop_assert_ne!(&c1, &c2);
        prop_assert_eq!(engine::decrypt(&c1, &keys.private_key[..]).unwrap(), data.clone());
        prop_assert_eq!(engine::decrypt(&c2, &keys.private_key[..]).unwrap(), data);
    }

    #[test]
    fn sign_verify_roundtrip(
        seed in any::<u64>(),
        msg in prop::collection::vec(any::<u8>(), 0..128),
        id in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        let keys = keys_for(seed);
        let mut rng = seeded_rng(seed ^ 0x5a5a);
        let sig = engine::sign_with_rng(&msg, &keys.private_key[..], Some(&id[..]), &mut rng).unwrap();
        prop_assert!(engine::verify(&msg, &sig, &keys.public_key, Some(&id[..])));
    }

    #[test]
    fn signature_bit_flip_rejected(
        seed in any::<u64>(),
        msg in prop::collection::vec(any::<u8>(), 1..64),
        bit in 0usize..512,
        msg_bit in any::<prop::sample::Index>()
    ) {
        let keys = keys_for(seed);
        let mut rng = seeded_rng(seed);
        let sig = engine::sign_with_rng(&msg, &keys.private_key[..], None, &mut rng).unwrap();

        let mut bad_sig = sig;
        bad_sig[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!engine::verify(&msg, &bad_sig, &keys.public_key, None));

        let mut bad_msg = msg.clone();
        let i = msg_bit.index(bad_msg.len() * 8);
        bad_msg[i / 8] ^= 1 << (i % 8);
        prop_assert!(!engine::verify(&bad_msg, &sig, &keys.public_key, None));
    }

    #[test]
    fn ciphertext_tamper_detected(
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 1..64),
        pos in any::<prop::sample::Index>(),
        flip in 1u8..=255
    ) {
        let keys = keys_for(seed);
        let mut ct = engine::encrypt_with_rng(&data, &keys.public_key, &mut seeded_rng(seed)).unwrap();
        let i = 65 + pos.index(ct.len() - 65);
        ct[i] ^= flip;
        let err = engine::decrypt(&ct, &keys.private_key[..]).unwrap_err();
        prop_assert!(err.is_integrity_error());
    }

    #[test]
    fn curve_closure(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let p = ec::scalar_mult_base_g(&scalar_from(a));
        let q = ec::scalar_mult_base_g(&scalar_from(b));
        for r in [p.add(&q), p.double()] {
            if !r.is_identity() {
                let bytes = r.serialize_uncompressed();
                prop_assert!(Point::deserialize_uncompressed(&bytes).is_ok());
            }
        }
    }
}
