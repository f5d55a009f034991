use cipher_engine::cipher::{CipherContext, CipherKind, ClassicalCipher, Cryptosystem};
use cipher_engine::keys::{Key, PermutationKey, ShiftKey, SubstitutionKey, VigenereKey};
use cipher_engine::normalizer::NormalizationPolicy;
use cipher_engine::preset::LATIN_UPPERCASE;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fake::Fake;
use fake::faker::lorem::en::Words;

fn make_string(len: usize) -> String {
    let mut s = String::with_capacity(len);
    while s.len() < len {
        let words: Vec<String> = Words(10..20).fake();
        if !s.is_empty() {
            s.push(' ');
        }
        s.push_str(&words.join(" "));
        if s.len() > len {
            s.truncate(len);
        }
    }
    s
}

fn ciphers() -> Vec<(ClassicalCipher, Key)> {
    let context =
        CipherContext::symmetric(LATIN_UPPERCASE.clone(), NormalizationPolicy::default());
    let keys: [(CipherKind, Key); 4] = [
        (CipherKind::Shift, ShiftKey::new(3, &LATIN_UPPERCASE).into()),
        (CipherKind::Substitution, SubstitutionKey::generate().into()),
        (
            CipherKind::Permutation,
            "(3, 1, 4, 5, 2)"
                .parse::<PermutationKey>()
                .expect("permutation key")
                .into(),
        ),
        (
            CipherKind::Vigenere,
            VigenereKey::new("LEMON", &LATIN_UPPERCASE)
                .expect("vigenere key")
                .into(),
        ),
    ];

    keys.into_iter()
        .map(|(kind, key)| (ClassicalCipher::new(kind, context.clone()), key))
        .collect()
}

fn bench_sizes(c: &mut Criterion) {
    let sizes: [(usize, &str); 3] = [(1_000, "1k"), (100_000, "100k"), (1_000_000, "1m")];

    for (cipher, key) in ciphers() {
        let mut group = c.benchmark_group(format!("{} Sizes Encrypt/Decrypt", cipher.name()));

        for (len, label) in sizes {
            let data = make_string(len);
            let ciphertext = cipher.encrypt(&data, &key).expect("encrypt");

            group.bench_with_input(BenchmarkId::new("encrypt", label), &data, |b, d| {
                b.iter(|| {
                    let _c = cipher.encrypt(black_box(d), &key).expect("encrypt");
                });
            });

            group.bench_with_input(BenchmarkId::new("decrypt", label), &ciphertext, |b, ctext| {
                b.iter(|| {
                    let _p = cipher.decrypt(black_box(ctext), &key).expect("decrypt");
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_sizes);
criterion_main!(benches);
