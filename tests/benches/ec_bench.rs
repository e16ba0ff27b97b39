use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eidcrypt_algorithms::asn1::Oid;
use eidcrypt_algorithms::ec::{generate_key_pair, multiply_ec_point, sign_raw, verify_signature};
use eidcrypt_algorithms::{cmac, encipher_aes, DigestAlgorithm, SecretKey};
use eidcrypt_hsm::{HsmService, KeySpec};
use eidcrypt_params::traditional::oids;
use eidcrypt_tests::{curve, seeded_rng, software_hsm};

// P-256, brainpoolP320r1, P-384, P-521
const CURVES: [i64; 4] = [12, 14, 15, 18];

fn bench_scalar_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("EC scalar multiplication");
    group.sample_size(20);

    for id in CURVES {
        let params = curve(id);
        let mut rng = seeded_rng(id as u64);
        let (_, private) = generate_key_pair(&params, &mut rng).unwrap();
        let k = private.scalar();

        group.bench_with_input(BenchmarkId::from_parameter(params.field_size_bits()), &k, |b, k| {
            b.iter(|| {
                multiply_ec_point(params.generator(), black_box(k), params.a(), params.prime())
            });
        });
    }

    group.finish();
}

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ECDSA");
    group.sample_size(20);
    let message = b"terminal authentication challenge";

    for id in CURVES {
        let params = curve(id);
        let bits = params.field_size_bits();
        let mut rng = seeded_rng(id as u64);
        let (public, private) = generate_key_pair(&params, &mut rng).unwrap();
        let signature = sign_raw(&private, message, DigestAlgorithm::Sha256, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::new("sign", bits), &private, |b, private| {
            b.iter(|| sign_raw(private, black_box(message), DigestAlgorithm::Sha256, &mut rng));
        });
        group.bench_with_input(BenchmarkId::new("verify", bits), &public, |b, public| {
            b.iter(|| verify_signature(black_box(&signature), message, public, "SHA-256"));
        });
    }

    group.finish();
}

fn bench_hsm_sign(c: &mut Criterion) {
    let hsm = software_hsm();
    hsm.generate_key_pair("EC", &KeySpec::standardized_curve(12).unwrap(), "bench", None, false, 1)
        .unwrap();
    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_256).unwrap();

    c.bench_function("software HSM sign P-256", |b| {
        b.iter(|| hsm.sign("bench", &ta, black_box(b"data")))
    });
}

fn bench_secure_messaging(c: &mut Criterion) {
    let mut group = c.benchmark_group("Secure messaging");
    let key = SecretKey::aes(&[0x2b; 16]);
    let iv = [0u8; 16];

    for size in [16, 256, 1024] {
        let data = vec![0u8; size];

        group.bench_with_input(BenchmarkId::new("AES-CBC", size), &data, |b, data| {
            b.iter(|| encipher_aes("AES/CBC/NoPadding", &key, Some(&iv[..]), black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("AES-CMAC", size), &data, |b, data| {
            b.iter(|| cmac(black_box(data), &key, None));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_multiplication,
    bench_ecdsa,
    bench_hsm_sign,
    bench_secure_messaging
);
criterion_main!(benches);
