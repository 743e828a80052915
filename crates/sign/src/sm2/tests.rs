//! Tests for the SM2 signature scheme

use super::*;
use gmcrypt_api::IdentitySignature;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/* ------------------------------------------------------------------------- */
/*                  Recommended-curve example (d, k, "message digest")       */
/* ------------------------------------------------------------------------- */

const D_HEX: &str = "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8";
const QX_HEX: &str = "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020";
const QY_HEX: &str = "ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13";
const K_HEX: &str = "59276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce6d54b80deac1bc21";
const ZA_HEX: &str = "b2e14c5c79c6df5b85f4fe7ed8db7a262b9da7e07ccb0ea9f4747b8ccda8a4f3";
const E_HEX: &str = "f0b43e94ba45accaace692ed534382eb17e6ab5a19ce7b31f4486fdfc0d28640";
const R_HEX: &str = "f5a03b0648d2c4630eeac513e1bb81a15944da3827d5b74143ac7eaceee720b3";
const S_HEX: &str = "b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa";

fn bytes32(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(hex_str).unwrap());
    out
}

fn example_keys() -> (Sm2PublicKey, Sm2SecretKey) {
    let sk = Sm2SecretKey::from_bytes(&bytes32(D_HEX)).unwrap();
    let mut pk = vec![0x04];
    pk.extend_from_slice(&hex::decode(QX_HEX).unwrap());
    pk.extend_from_slice(&hex::decode(QY_HEX).unwrap());
    (Sm2PublicKey::from_bytes(&pk).unwrap(), sk)
}

fn scalar(hex_str: &str) -> Scalar {
    Scalar::new(bytes32(hex_str)).unwrap()
}

#[test]
fn test_public_key_derivation() {
    let (pk, sk) = example_keys();
    assert_eq!(Sm2Dsa::derive_public_key(&sk).unwrap(), pk);
}

#[test]
fn test_za_known_answer() {
    let (pk, _) = example_keys();
    let za = Sm2Dsa::compute_za(&pk, SM2_DEFAULT_USER_ID).unwrap();
    assert_eq!(hex::encode(za), ZA_HEX);

    // an empty identity is still well defined
    let za_empty = Sm2Dsa::compute_za(&pk, b"").unwrap();
    assert_eq!(
        hex::encode(za_empty),
        "f2a1724ed3d6767e22fcd19bfb33cd8af34f59ad7fdc8747cce6acacd414f1f9"
    );
}

#[test]
fn test_message_digest_known_answer() {
    let (pk, _) = example_keys();
    let e = Sm2Dsa::message_digest(&pk, SM2_DEFAULT_USER_ID, b"message digest").unwrap();
    assert_eq!(hex::encode(e), E_HEX);
}

#[test]
fn test_sign_known_answer() {
    let (pk, sk) = example_keys();
    let e = Sm2Dsa::message_digest(&pk, SM2_DEFAULT_USER_ID, b"message digest").unwrap();
    let sig = sign_digest_with_nonce(&e, &sk, &scalar(K_HEX)).unwrap();

    assert_eq!(hex::encode(sig.r()), R_HEX);
    assert_eq!(hex::encode(sig.s()), S_HEX);
    assert!(Sm2Dsa::verify(b"message digest", &sig, &pk).is_ok());
}

#[test]
fn test_sign_known_answer_other_inputs() {
    let (pk, sk) = example_keys();
    let k = scalar(K_HEX);

    let e = Sm2Dsa::message_digest(&pk, SM2_DEFAULT_USER_ID, b"").unwrap();
    let sig = sign_digest_with_nonce(&e, &sk, &k).unwrap();
    assert_eq!(
        hex::encode(sig.r()),
        "781c66bb8ca7e91725309a4120a8ca8387729020319e4f9c1cdd9a599891a251"
    );
    assert_eq!(
        hex::encode(sig.s()),
        "47372e9863499990ad0e9ecb379bd2098651b11b6963246a35d117246296d9c3"
    );

    let id = b"ALICE123@YAHOO.COM";
    let e = Sm2Dsa::message_digest(&pk, id, b"message digest").unwrap();
    let sig = sign_digest_with_nonce(&e, &sk, &k).unwrap();
    assert_eq!(
        hex::encode(sig.r()),
        "b0e3e7d4ac2178f833ad73fa9d1191e41c76c8bfedb5ad89040ba2e5184bde58"
    );
    assert_eq!(
        hex::encode(sig.s()),
        "cc8d096578f7dd2669ac1ac42f7e722bcfa42b9e0be0b1b5df7ca0b53fdd5750"
    );
    assert!(Sm2Dsa::verify_with_id(b"message digest", id, &sig, &pk).is_ok());
    assert!(Sm2Dsa::verify(b"message digest", &sig, &pk).is_err());
}

#[test]
fn test_verify_published_signature() {
    let (pk, _) = example_keys();
    let sig = Sm2Signature::new(bytes32(R_HEX), bytes32(S_HEX));
    assert!(Sm2Dsa::verify(b"message digest", &sig, &pk).is_ok());
    assert!(Sm2Dsa::verify(b"message digesT", &sig, &pk).is_err());
}

/* ------------------------------------------------------------------------- */
/*                             Nonce rejection                               */
/* ------------------------------------------------------------------------- */

#[test]
fn test_nonce_rejected_when_r_is_zero() {
    let (_, sk) = example_keys();
    let k = scalar(K_HEX);
    let x1 = Scalar::from_field(ec::scalar_mult_base_g(&k).x());

    // e = −x₁ gives r = 0
    let e = x1.negate().serialize();
    assert!(matches!(
        sign_digest_with_nonce(&e, &sk, &k),
        Err(Error::SignatureGeneration { .. })
    ));
}

#[test]
fn test_nonce_rejected_when_r_plus_k_is_n() {
    let (_, sk) = example_keys();
    let k = scalar(K_HEX);
    let x1 = Scalar::from_field(ec::scalar_mult_base_g(&k).x());

    // e = −k − x₁ gives r = n − k
    let e = k.negate().sub_mod_n(&x1).serialize();
    assert!(sign_digest_with_nonce(&e, &sk, &k).is_err());
}

#[test]
fn test_key_n_minus_one_cannot_sign() {
    let sk = Sm2SecretKey::from_bytes(&Scalar::max().serialize()).unwrap();
    let err = Sm2Dsa::sign_with_id(
        b"msg",
        SM2_DEFAULT_USER_ID,
        &sk,
        &mut ChaCha20Rng::seed_from_u64(1),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidKey { .. }));
}

/* ------------------------------------------------------------------------- */
/*                          Sign / verify behaviour                          */
/* ------------------------------------------------------------------------- */

#[test]
fn test_sign_verify_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    let (pk, sk) = Sm2Dsa::keypair(&mut rng).unwrap();

    let long = [0u8; 1000];
    for msg in [&b""[..], &b"a"[..], &b"The quick brown fox"[..], &long[..]] {
        let sig = Sm2Dsa::sign_with_id(msg, SM2_DEFAULT_USER_ID, &sk, &mut rng).unwrap();
        assert!(Sm2Dsa::verify(msg, &sig, &pk).is_ok());
    }

    let sig = Sm2Dsa::sign(b"os rng", &sk).unwrap();
    assert!(Sm2Dsa::verify(b"os rng", &sig, &pk).is_ok());
}

#[test]
fn test_signatures_are_randomized() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let (pk, sk) = Sm2Dsa::keypair(&mut rng).unwrap();
    let a = Sm2Dsa::sign_with_id(b"same", SM2_DEFAULT_USER_ID, &sk, &mut rng).unwrap();
    let b = Sm2Dsa::sign_with_id(b"same", SM2_DEFAULT_USER_ID, &sk, &mut rng).unwrap();
    assert_ne!(a, b);
    assert!(Sm2Dsa::verify(b"same", &a, &pk).is_ok());
    assert!(Sm2Dsa::verify(b"same", &b, &pk).is_ok());
}

#[test]
fn test_verify_rejects_tampering() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let (pk, sk) = Sm2Dsa::keypair(&mut rng).unwrap();
    let (other_pk, _) = Sm2Dsa::keypair(&mut rng).unwrap();
    let msg = b"attack at dawn";
    let sig = Sm2Dsa::sign_with_id(msg, SM2_DEFAULT_USER_ID, &sk, &mut rng).unwrap();

    assert!(Sm2Dsa::verify(b"attack at dusk", &sig, &pk).is_err());
    assert!(Sm2Dsa::verify(msg, &sig, &other_pk).is_err());
    assert!(Sm2Dsa::verify_with_id(msg, b"someone else", &sig, &pk).is_err());

    let raw = sig.to_bytes();
    for i in [0usize, 31, 32, 63] {
        let mut bad = raw;
        bad[i] ^= 0x01;
        let bad = Sm2Signature::from_bytes(&bad).unwrap();
        assert!(Sm2Dsa::verify(msg, &bad, &pk).is_err(), "byte {}", i);
    }
}

#[test]
fn test_verify_rejects_out_of_range_components() {
    let (pk, _) = example_keys();
    let msg = b"message digest";
    let r = bytes32(R_HEX);
    let s = bytes32(S_HEX);
    let n = gmcrypt_params::traditional::sm2::SM2_CURVE.n;

    for sig in [
        Sm2Signature::new([0u8; 32], s),
        Sm2Signature::new(r, [0u8; 32]),
        Sm2Signature::new(n, s),
        Sm2Signature::new(r, n),
        Sm2Signature::new([0xff; 32], s),
    ] {
        let err = Sm2Dsa::verify(msg, &sig, &pk).unwrap_err();
        assert!(matches!(err, ApiError::InvalidSignature { .. }));
    }

    // s = n − r makes t = r + s vanish
    let r_scalar = Scalar::new(r).unwrap();
    let s_complement = r_scalar.negate().serialize();
    let sig = Sm2Signature::new(r, s_complement);
    assert!(Sm2Dsa::verify(msg, &sig, &pk).is_err());
}

#[test]
fn test_user_id_length_limit() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let (pk, sk) = Sm2Dsa::keypair(&mut rng).unwrap();

    let longest = vec![b'x'; SM2_MAX_USER_ID_SIZE];
    let sig = Sm2Dsa::sign_with_id(b"m", &longest, &sk, &mut rng).unwrap();
    assert!(Sm2Dsa::verify_with_id(b"m", &longest, &sig, &pk).is_ok());

    let too_long = vec![b'x'; SM2_MAX_USER_ID_SIZE + 1];
    let err = Sm2Dsa::sign_with_id(b"m", &too_long, &sk, &mut rng).unwrap_err();
    assert!(matches!(err, ApiError::InvalidParameter { .. }));
    assert!(Sm2Dsa::verify_with_id(b"m", &too_long, &sig, &pk).is_err());
}

/* ------------------------------------------------------------------------- */
/*                               Key handling                                */
/* ------------------------------------------------------------------------- */

#[test]
fn test_secret_key_parsing() {
    assert!(matches!(
        Sm2SecretKey::from_bytes(&[1u8; 31]),
        Err(Error::InvalidKeySize { expected: 32, actual: 31 })
    ));
    assert!(Sm2SecretKey::from_bytes(&[0u8; 32]).is_err());
    assert!(Sm2SecretKey::from_bytes(&gmcrypt_params::traditional::sm2::SM2_CURVE.n).is_err());

    let sk = Sm2SecretKey::from_bytes(&bytes32(D_HEX)).unwrap();
    assert_eq!(hex::encode(*sk.to_bytes()), D_HEX);
    assert_eq!(format!("{:?}", sk), "Sm2SecretKey(..)");
}

#[test]
fn test_public_key_parsing() {
    let (pk, _) = example_keys();
    assert_eq!(Sm2PublicKey::from_bytes(pk.as_ref()).unwrap(), pk);

    let mut off_curve = pk.to_bytes();
    off_curve[64] ^= 0x01;
    assert!(matches!(
        Sm2PublicKey::from_bytes(&off_curve),
        Err(Error::InvalidKey(_))
    ));

    let mut bad_prefix = pk.to_bytes();
    bad_prefix[0] = 0x02;
    assert!(Sm2PublicKey::from_bytes(&bad_prefix).is_err());
    assert!(Sm2PublicKey::from_bytes(&[0u8; 65]).is_err());
    assert!(Sm2PublicKey::from_bytes(&pk.to_bytes()[..33]).is_err());
}

#[test]
fn test_keypair_accessors() {
    let kp = Sm2Dsa::keypair(&mut ChaCha20Rng::seed_from_u64(6)).unwrap();
    let pk = Sm2Dsa::public_key(&kp);
    let sk = Sm2Dsa::secret_key(&kp);
    assert_eq!(Sm2Dsa::derive_public_key(&sk).unwrap(), pk);
    assert_eq!(Sm2Dsa::name(), "SM2");
    assert_eq!(Sm2Dsa::DEFAULT_ID, b"1234567812345678");
}

/* ------------------------------------------------------------------------- */
/*                                Encodings                                  */
/* ------------------------------------------------------------------------- */

#[test]
fn test_raw_encoding() {
    let sig = Sm2Signature::new(bytes32(R_HEX), bytes32(S_HEX));
    let raw = sig.to_bytes();
    assert_eq!(&raw[..32], &bytes32(R_HEX));
    assert_eq!(Sm2Signature::from_bytes(&raw).unwrap(), sig);
    assert!(matches!(
        Sm2Signature::from_bytes(&raw[..63]),
        Err(Error::InvalidSignatureSize { expected: 64, actual: 63 })
    ));
}

#[test]
fn test_der_encoding_high_bit() {
    // r starts with 0xf5, s with 0xb1: both need a leading zero
    let sig = Sm2Signature::new(bytes32(R_HEX), bytes32(S_HEX));
    let der = sig.to_der();
    assert_eq!(der.len(), 2 + 2 * (2 + 33));
    assert_eq!(&der[..4], &[0x30, 0x46, 0x02, 0x21]);
    assert_eq!(der[4], 0x00);
    assert_eq!(der[5], 0xf5);
    assert_eq!(Sm2Signature::from_der(&der).unwrap(), sig);
}

#[test]
fn test_der_encoding_short_integers() {
    let mut r = [0u8; 32];
    r[31] = 0x01;
    let mut s = [0u8; 32];
    s[30] = 0x7f;
    s[31] = 0xff;
    let sig = Sm2Signature::new(r, s);
    let der = sig.to_der();
    assert_eq!(der, vec![0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x02, 0x7f, 0xff]);
    assert_eq!(Sm2Signature::from_der(&der).unwrap(), sig);
}

#[test]
fn test_der_rejects_malformed() {
    let der = Sm2Signature::new(bytes32(R_HEX), bytes32(S_HEX)).to_der();

    assert!(Sm2Signature::from_der(&der[..6]).is_err());

    let mut bad_tag = der.clone();
    bad_tag[0] = 0x31;
    assert!(Sm2Signature::from_der(&bad_tag).is_err());

    let mut bad_len = der.clone();
    bad_len[1] += 1;
    assert!(Sm2Signature::from_der(&bad_len).is_err());

    let mut truncated = der.clone();
    truncated.pop();
    assert!(Sm2Signature::from_der(&truncated).is_err());

    // negative INTEGER (no leading zero before a high bit)
    let negative = vec![0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01];
    assert!(matches!(
        Sm2Signature::from_der(&negative),
        Err(Error::Encoding(_))
    ));

    // 33 significant bytes
    let mut too_big = vec![0x30, 0x26, 0x02, 0x21];
    too_big.extend_from_slice(&[0x01; 33]);
    too_big.extend_from_slice(&[0x02, 0x01, 0x01]);
    assert!(Sm2Signature::from_der(&too_big).is_err());
}
