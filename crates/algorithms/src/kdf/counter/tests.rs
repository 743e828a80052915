use super::*;
use crate::hash::HashFunction;

#[test]
fn test_kdf_length_contract() {
    let z = b"shared secret material";
    for len in [0usize, 1, 31, 32, 33, 64, 100, 257] {
        let out = sm3_kdf(z, len).unwrap();
        assert_eq!(out.len(), len);
    }
    assert!(sm3_kdf(z, 0).unwrap().is_empty());
}

#[test]
fn test_kdf_first_block_is_counter_one() {
    let z = b"Z";
    let mut input = z.to_vec();
    input.extend_from_slice(&[0, 0, 0, 1]);
    let expected = Sm3::digest(&input).unwrap();

    let out = sm3_kdf(z, 32).unwrap();
    assert_eq!(&out[..], expected.as_ref());

    // second block uses counter 2
    let mut input2 = z.to_vec();
    input2.extend_from_slice(&[0, 0, 0, 2]);
    let expected2 = Sm3::digest(&input2).unwrap();
    let out = sm3_kdf(z, 40).unwrap();
    assert_eq!(&out[32..], &expected2.as_ref()[..8]);
}

#[test]
fn test_kdf_prefix_consistency() {
    let z = [0x42u8; 64];
    let long = sm3_kdf(&z, 96).unwrap();
    let short = sm3_kdf(&z, 45).unwrap();
    assert_eq!(&long[..45], &short[..]);
}

#[test]
fn test_kdf_depends_on_input() {
    let a = sm3_kdf(b"input-a", 32).unwrap();
    let b = sm3_kdf(b"input-b", 32).unwrap();
    assert_ne!(&a[..], &b[..]);
}

#[test]
fn test_trait_and_builder_match_sm3_kdf() {
    let kdf = Sm3Kdf::new();
    let reference = sm3_kdf(b"ikm", 50).unwrap();
    assert_eq!(&kdf.derive_key(b"ikm", 50).unwrap()[..], &reference[..]);

    let built = kdf
        .builder()
        .with_input(b"ikm")
        .with_output_length(50)
        .derive()
        .unwrap();
    assert_eq!(&built[..], &reference[..]);

    assert!(kdf.builder().with_output_length(8).derive().is_err());
}

#[test]
fn test_kdf_name() {
    assert_eq!(<<Sm3Kdf as KeyDerivationFunction>::Algorithm as KdfAlgorithm>::name(), "KDF-SM3");
}
