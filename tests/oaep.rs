use hex_literal::hex;
use num_bigint::BigUint;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_core::{oaep, Blinding, Error, PublicKeyParts, RsaPrivateKey};
use sha2::{Sha256, Sha512};

fn get_private_key() -> RsaPrivateKey {
    // 2048-bit test key
    RsaPrivateKey::from_primes(
        BigUint::from(65537u64),
        BigUint::parse_bytes(
            b"dde5d0ce372116593c18096171ff69dde775646a85c7c2b453907bb2b05191bb\
              c81d9bc62d7b57dae9854016b67c5da92ab0f7dd08b7c2a1fb143d1ef03b01b0\
              a08b52182b1d1dc749955b744036c9e65a01a5407a885736936f6cb0ace4a667\
              afc2d5219b8119284a1a3cad8969d43550eebf02075af29d7d63dea7cd46d783",
            16,
        )
        .unwrap(),
        BigUint::parse_bytes(
            b"ccd128bcc125e6778f53e1ed581d5023996db298811dbdfce04e143bbd8bf79f\
              ed3098e92c1a1cf0f0a10d1758647643c9da19b91b9994ca8c71f104d411f135\
              082494368ce96e3a7727f23eee5ffe9d283c35a7b487eee6641ae608f2046d5f\
              5ddee9800e4986fe3b37fe9514ad8f5bc63a3a0f274d7b68b90f2a94e0f4c277",
            16,
        )
        .unwrap(),
    )
    .expect("invalid test key")
}

// SHA-256, empty label, seed a0a1..bf, message 202122..37.
const CT_FIXED_SEED: [u8; 256] = hex!(
    "5315a2024e69a9c04c7e1616b8578afd2c68f8d5dd786a92628e7645638794f3"
    "cc9e024e1c89d0b222b5943057bc4c40f9fc9b5ecf51be5dc8f2aca82af6d910"
    "a4a06f04c94cc5e7bb83acad9740281ef8fed9cc6eb421338a9f82fd2cbb2dc5"
    "cd60d885c3b04b05f63a43b17545eef8e4db306a755ac25ad9b95b1ba4c6df8f"
    "6d299d73b8b1e4cd3778b7f151891909e90990cf0472a8a4325580f759f5fbeb"
    "695270f0d29a0a1bbb682ba1e6288c17533cd6bdbaf6b79e18464a4d40db4e40"
    "360625f53c2f9f04890a0c53e2e3c78bef95222cdb1a20309292df32a9c387dd"
    "d2ccc3f0e8592e469826667a6ec88faf43f182cc0ba967955dd5b07281a5e23a"
);

const MSG_FIXED_SEED: [u8; 24] = hex!("202122232425262728292a2b2c2d2e2f3031323334353637");

#[test]
fn test_decrypt_fixed_ciphertext() {
    let priv_key = get_private_key();
    let expected = Some(MSG_FIXED_SEED.to_vec());

    assert_eq!(
        oaep::decrypt_blinded::<Sha256>(&priv_key, Blinding::Off, &CT_FIXED_SEED, None),
        expected
    );
    assert_eq!(
        oaep::decrypt_blinded::<Sha256>(&priv_key, Blinding::Default, &CT_FIXED_SEED, None),
        expected
    );
    let mut rng = ChaCha8Rng::from_seed([1; 32]);
    assert_eq!(
        oaep::decrypt_blinded::<Sha256>(
            &priv_key,
            Blinding::With(&mut rng),
            &CT_FIXED_SEED,
            None
        ),
        expected
    );
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let priv_key = get_private_key();
    let pub_key = priv_key.to_public_key();
    let k = priv_key.size();

    // msgMax for SHA-256 and a 2048-bit key is 256 - 2 * 32 - 2 = 190
    for len in [0usize, 1, 32, 190] {
        let msg = vec![0x36; len];
        let ciphertext = oaep::encrypt::<_, Sha256>(&mut rng, &pub_key, &msg, None).unwrap();
        assert_eq!(ciphertext.len(), k);
        assert_eq!(
            oaep::decrypt::<Sha256>(&priv_key, &ciphertext, None).as_deref(),
            Some(&msg[..])
        );
    }
}

#[test]
fn test_message_limit() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let pub_key = get_private_key().to_public_key();

    assert!(oaep::encrypt::<_, Sha256>(&mut rng, &pub_key, &[0u8; 190], None).is_ok());
    assert_eq!(
        oaep::encrypt::<_, Sha256>(&mut rng, &pub_key, &[0u8; 191], None).err(),
        Some(Error::InvalidMessage)
    );
}

#[test]
fn test_label_mismatch() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let priv_key = get_private_key();
    let pub_key = priv_key.to_public_key();

    let ciphertext =
        oaep::encrypt::<_, Sha256>(&mut rng, &pub_key, b"classified", Some(b"orange")).unwrap();
    assert_eq!(
        oaep::decrypt::<Sha256>(&priv_key, &ciphertext, Some(b"orange")).as_deref(),
        Some(&b"classified"[..])
    );
    assert_eq!(
        oaep::decrypt::<Sha256>(&priv_key, &ciphertext, Some(b"blue")),
        None
    );
    assert_eq!(oaep::decrypt::<Sha256>(&priv_key, &ciphertext, None), None);
}

#[test]
fn test_tampered_ciphertext() {
    let priv_key = get_private_key();

    let mut ct = CT_FIXED_SEED;
    ct[200] ^= 1;
    assert_eq!(oaep::decrypt::<Sha256>(&priv_key, &ct, None), None);
}

#[test]
fn test_decrypt_rejects_wrong_length() {
    let priv_key = get_private_key();

    assert_eq!(
        oaep::decrypt::<Sha256>(&priv_key, &CT_FIXED_SEED[..255], None),
        None
    );

    let mut long = CT_FIXED_SEED.to_vec();
    long.push(0);
    assert_eq!(oaep::decrypt::<Sha256>(&priv_key, &long, None), None);
}

#[test]
fn test_hash_too_wide_for_key() {
    // 1024-bit key; 2 * 64 + 2 exceeds the 128-byte modulus
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let priv_key = RsaPrivateKey::from_primes(
        BigUint::from(65537u64),
        BigUint::parse_bytes(
            b"fb3979bf0ccc328d699292e9769623d6cb19b9ce2df18063ecd002e48090ea7d\
              e0552ef5b6b94da9269aac9bcd394fc00ee61fbda73b7269b11aa2e7bf1beb4b",
            16,
        )
        .unwrap(),
        BigUint::parse_bytes(
            b"e41197607e9b6e556d21d3bddd653474f62086bc18f4c4358a018c4c0816830b\
              4d316aff25c50c95021e2c129d2ea64a44f1be1c5985b8fd6d99579a6350ae63",
            16,
        )
        .unwrap(),
    )
    .expect("invalid test key");
    let pub_key = priv_key.to_public_key();

    assert_eq!(
        oaep::encrypt::<_, Sha512>(&mut rng, &pub_key, b"", None).err(),
        Some(Error::InvalidMessage)
    );
    assert_eq!(oaep::decrypt::<Sha512>(&priv_key, &[0u8; 128], None), None);
}
