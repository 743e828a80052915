//! Integration tests for the byte-level SM2 engine

use gmcrypt::engine;
use gmcrypt::prelude::*;
use gmcrypt_tests::{init_tracing, seeded_rng, unhex, vectors};

#[test]
fn test_known_signature_verifies() {
    init_tracing();
    let q = unhex(vectors::PUBLIC_KEY);
    let sig = unhex(vectors::SIGNATURE);
    assert!(engine::verify(b"message digest", &sig, &q, None));
    assert!(engine::verify(
        b"message digest",
        &sig,
        &q,
        Some(&b"1234567812345678"[..])
    ));
    assert!(!engine::verify(b"message digest", &sig, &q, Some(&b""[..])));
}

#[test]
fn test_known_ciphertext_decrypts() {
    init_tracing();
    let d = unhex(vectors::PRIVATE_KEY);
    let ct = unhex(vectors::CIPHERTEXT);
    assert_eq!(engine::decrypt(&ct, &d).unwrap(), b"encryption standard");
}

#[test]
fn test_public_key_derivation_matches_vector() {
    let d = unhex(vectors::PRIVATE_KEY);
    let q = engine::public_key_from_private(&d).unwrap();
    assert_eq!(hex::encode(q), vectors::PUBLIC_KEY);
}

#[test]
fn test_za_matches_vector() {
    let pk = Sm2PublicKey::from_bytes(&unhex(vectors::PUBLIC_KEY)).unwrap();
    let za = Sm2Dsa::compute_za(&pk, b"1234567812345678").unwrap();
    assert_eq!(hex::encode(za), vectors::ZA_DEFAULT_ID);
}

#[test]
fn test_sm3_empty_string() {
    let digest = Sm3::digest(b"").unwrap();
    assert_eq!(
        digest.to_hex(),
        "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b"
    );
    assert_eq!(Sm3::digest(b"abc").unwrap(), Sm3::digest(b"abc").unwrap());
}

#[test]
fn test_kdf_length_contract() {
    let z = [0x5au8; 64];
    for len in [0usize, 1, 32, 33, 100] {
        assert_eq!(gmcrypt::algorithms::sm3_kdf(&z, len).unwrap().len(), len);
    }
}

#[test]
fn test_full_flow() {
    init_tracing();
    let mut rng = seeded_rng(100);
    let keys = engine::generate_keypair_with_rng(&mut rng).unwrap();

    let sig = engine::sign_with_rng(b"pay 10", &keys.private_key[..], Some(&b"alice"[..]), &mut rng)
        .unwrap();
    assert!(engine::verify(b"pay 10", &sig, &keys.public_key, Some(&b"alice"[..])));
    assert!(!engine::verify(b"pay 10", &sig, &keys.public_key, None));

    let ct = engine::encrypt_with_rng(b"pay 10", &keys.public_key, &mut rng).unwrap();
    assert_eq!(engine::decrypt(&ct, &keys.private_key[..]).unwrap(), b"pay 10");
}

#[test]
fn test_empty_message_boundary() {
    let mut rng = seeded_rng(101);
    let keys = engine::generate_keypair_with_rng(&mut rng).unwrap();

    let ct = engine::encrypt_with_rng(b"", &keys.public_key, &mut rng).unwrap();
    assert_eq!(ct.len(), 97);
    assert!(engine::decrypt(&ct, &keys.private_key[..]).unwrap().is_empty());

    let sig = engine::sign_with_rng(b"", &keys.private_key[..], None, &mut rng).unwrap();
    assert!(engine::verify(b"", &sig, &keys.public_key, None));
}

#[test]
fn test_substituted_public_key_rejected() {
    let mut rng = seeded_rng(102);
    let alice = engine::generate_keypair_with_rng(&mut rng).unwrap();
    let mallory = engine::generate_keypair_with_rng(&mut rng).unwrap();
    let sig = engine::sign_with_rng(b"hello", &alice.private_key[..], None, &mut rng).unwrap();
    assert!(!engine::verify(b"hello", &sig, &mallory.public_key, None));
}

#[test]
fn test_out_of_range_signature_rejected() {
    let q = unhex(vectors::PUBLIC_KEY);
    assert!(!engine::verify(b"message digest", &[0u8; 64], &q, None));
    assert!(!engine::verify(b"message digest", &[0xffu8; 64], &q, None));
}

#[test]
fn test_oversized_user_id() {
    let mut rng = seeded_rng(103);
    let keys = engine::generate_keypair_with_rng(&mut rng).unwrap();
    let id = vec![b'a'; 8192];
    assert!(engine::sign_with_rng(b"m", &keys.private_key[..], Some(&id[..]), &mut rng).is_err());
    assert!(!engine::verify(b"m", &[1u8; 64], &keys.public_key, Some(&id[..])));
}

#[test]
fn test_decrypt_error_kinds() {
    let d = unhex(vectors::PRIVATE_KEY);
    let ct = unhex(vectors::CIPHERTEXT);

    let mut bad_marker = ct.clone();
    bad_marker[0] = 0x03;
    assert!(engine::decrypt(&bad_marker, &d).unwrap_err().is_format_error());
    assert!(engine::decrypt(&ct[..96], &d).unwrap_err().is_format_error());

    // every byte of C3 and C2
    for i in 65..ct.len() {
        let mut bad = ct.clone();
        bad[i] ^= 0x80;
        let err = engine::decrypt(&bad, &d).unwrap_err();
        assert!(err.is_integrity_error(), "byte {}", i);
    }
}

#[test]
fn test_error_messages_do_not_leak_keys() {
    let d = unhex(vectors::PRIVATE_KEY);
    let mut ct = unhex(vectors::CIPHERTEXT);
    ct[70] ^= 1;
    let msg = engine::decrypt(&ct, &d).unwrap_err().to_string();
    assert!(!msg.contains(vectors::PRIVATE_KEY));
    assert!(!msg.contains(&vectors::PUBLIC_KEY[2..66]));
}

#[test]
fn test_encrypt_public_key_format_errors() {
    let q = unhex(vectors::PUBLIC_KEY);
    let mut compressed_marker = q.clone();
    compressed_marker[0] = 0x02;

    for pk in [&compressed_marker[..], &q[..64]] {
        let err = engine::encrypt(b"x", pk).unwrap_err();
        assert!(err.is_format_error(), "{:?}", err);
        assert!(!err.is_integrity_error());
    }
}
