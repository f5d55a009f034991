use cipher_engine::alphabet::Alphabet;
use cipher_engine::cipher::{
    CipherContext, CipherKind, ClassicalCipher, Cryptosystem, PermutationCipher,
};
use cipher_engine::config::EngineConfig;
use cipher_engine::errors::CipherError;
use cipher_engine::keys::{
    AffineKey, Key, MultiplicativeKey, PermutationKey, ShiftKey, SubstitutionKey, VigenereKey,
};
use cipher_engine::normalizer::NormalizationPolicy;
use cipher_engine::preset::{ALPHANUMERIC_UPPERCASE, LATIN_UPPERCASE};

use rand::SeedableRng;
use rand::rngs::StdRng;

fn cipher(kind: CipherKind, policy: NormalizationPolicy) -> ClassicalCipher {
    ClassicalCipher::new(kind, CipherContext::symmetric(LATIN_UPPERCASE.clone(), policy))
}

#[test]
fn shift_attack_at_dawn() -> Result<(), CipherError> {
    let shift = cipher(CipherKind::Shift, NormalizationPolicy::default());
    let key = Key::Shift(ShiftKey::new(3, &LATIN_UPPERCASE));

    let ciphertext = shift.encrypt("ATTACK AT DAWN", &key)?;
    assert_eq!(ciphertext, "DWWDFN DW GDZQ");
    assert_eq!(shift.decrypt(&ciphertext, &key)?, "ATTACK AT DAWN");
    Ok(())
}

#[test]
fn every_alphabetic_cipher_round_trips() -> Result<(), CipherError> {
    let policy = NormalizationPolicy::default();
    let cases: Vec<(CipherKind, Key)> = vec![
        (CipherKind::Shift, ShiftKey::new(-29, &LATIN_UPPERCASE).into()),
        (CipherKind::Affine, AffineKey::new(5, 8, &LATIN_UPPERCASE)?.into()),
        (
            CipherKind::Multiplicative,
            MultiplicativeKey::new(11, &LATIN_UPPERCASE)?.into(),
        ),
        (CipherKind::Substitution, SubstitutionKey::generate().into()),
        (CipherKind::Vigenere, VigenereKey::new("LEMON", &LATIN_UPPERCASE)?.into()),
    ];

    let plaintext = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";
    for (kind, key) in cases {
        let system = cipher(kind, policy);
        let ciphertext = system.encrypt(plaintext, &key)?;
        assert_eq!(
            system.decrypt(&ciphertext, &key)?,
            plaintext,
            "{} round trip failed",
            system.name()
        );
    }
    Ok(())
}

#[test]
fn affine_known_answer() -> Result<(), CipherError> {
    let affine = cipher(CipherKind::Affine, NormalizationPolicy::default());
    let key: Key = AffineKey::new(5, 8, &LATIN_UPPERCASE)?.into();

    assert_eq!(affine.encrypt("affine cipher", &key)?, "IHHWVC SWFRCP");
    Ok(())
}

#[test]
fn non_coprime_factors_are_rejected() {
    for factor in [2, 4, 13, 26] {
        assert!(matches!(
            AffineKey::new(factor, 1, &LATIN_UPPERCASE),
            Err(CipherError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            MultiplicativeKey::new(factor, &LATIN_UPPERCASE),
            Err(CipherError::InvalidKeyValue(_))
        ));
    }
}

#[test]
fn permutation_hello() -> Result<(), CipherError> {
    let context = CipherContext::symmetric(LATIN_UPPERCASE.clone(), NormalizationPolicy::default());
    let permutation = PermutationCipher::new(context);
    let key: PermutationKey = "(3, 1, 4, 5, 2)".parse()?;

    let ciphertext = permutation.encrypt_with_rng("HELLO", &key, &mut StdRng::seed_from_u64(7))?;
    assert_eq!(ciphertext, "LHLOE");
    assert_eq!(permutation.decrypt(&ciphertext, &key)?, "HELLO");
    assert_eq!(key.to_string(), "(3, 1, 4, 5, 2)");
    Ok(())
}

#[test]
fn permutation_padding_survives_decryption() -> Result<(), CipherError> {
    let permutation = cipher(CipherKind::Permutation, NormalizationPolicy::default());
    let key = Key::Permutation("(2, 1, 3)".parse()?);

    let ciphertext = permutation.encrypt("ABCD", &key)?;
    assert_eq!(ciphertext.chars().count(), 6);

    let decrypted = permutation.decrypt(&ciphertext, &key)?;
    assert!(decrypted.starts_with("ABCD"));
    assert_eq!(decrypted.chars().count(), 6);

    assert!(matches!(
        permutation.decrypt("ABCD", &key),
        Err(CipherError::InvalidLength {
            length: 4,
            block_size: 3
        })
    ));
    Ok(())
}

#[test]
fn empty_substitution_field_generates_bijection() -> Result<(), CipherError> {
    let (key, generated) = SubstitutionKey::from_fields("", "", &LATIN_UPPERCASE)?;
    assert!(generated);
    assert_eq!(key.plain_string(), LATIN_UPPERCASE.to_string());

    let mapping = Alphabet::new(&key.cipher_string())?;
    assert_eq!(mapping.size(), 26);
    assert!(mapping.symbols().iter().all(|&c| LATIN_UPPERCASE.contains(c)));

    let substitution = cipher(CipherKind::Substitution, NormalizationPolicy::default());
    assert!(matches!(
        substitution.encrypt("ABC", &SubstitutionKey::default().into()),
        Err(CipherError::KeyNotSet(_))
    ));
    Ok(())
}

#[test]
fn policy_from_config_file() -> Result<(), CipherError> {
    let config = EngineConfig::from_json_str(
        r#"{"policy":{"unknown_char_handling":"SKIP","whitespace_handling":"STRIP"}}"#,
    )?;
    let vigenere = ClassicalCipher::new(
        CipherKind::Vigenere,
        CipherContext::symmetric(ALPHANUMERIC_UPPERCASE.clone(), config.policy),
    );
    let key: Key = VigenereKey::new("K3Y", &ALPHANUMERIC_UPPERCASE)?.into();

    let ciphertext = vigenere.encrypt("Room 101, level 4!", &key)?;
    assert!(!ciphertext.contains(' '));
    assert_eq!(vigenere.decrypt(&ciphertext, &key)?, "ROOM101LEVEL4");
    Ok(())
}

#[test]
fn unknown_character_aborts_under_default_policy() {
    let shift = cipher(CipherKind::Shift, NormalizationPolicy::default());
    let key = Key::Shift(ShiftKey::new(1, &LATIN_UPPERCASE));

    assert!(matches!(
        shift.encrypt("HI!", &key),
        Err(CipherError::UnknownCharacter('!'))
    ));
}
