//! Property-based tests for the prime-curve arithmetic and ECDSA

use eidcrypt_algorithms::ec::{
    add_ec_points, double_ec_point, generate_key_pair, is_point_on_curve, multiply_ec_point,
    negate_ec_point, sign_raw, verify_signature, EcDomainParameters, EcPoint, EcPublicKey,
};
use eidcrypt_algorithms::DigestAlgorithm;
use eidcrypt_tests::{curve, seeded_rng};
use num_bigint::BigUint;
use proptest::prelude::*;

/// Standardized curve IDs, excluding the slow 512/521-bit curves
fn curve_id() -> impl Strategy<Value = i64> {
    prop_oneof![Just(8i64), Just(9), Just(10), Just(11), Just(12), Just(13), Just(14)]
}

/// Nonzero scalar below 2^128
fn scalar() -> impl Strategy<Value = BigUint> {
    any::<u128>()
        .prop_filter("scalar must be positive", |k| *k != 0)
        .prop_map(BigUint::from)
}

fn times_g(params: &EcDomainParameters, k: &BigUint) -> EcPoint {
    multiply_ec_point(params.generator(), k, params.a(), params.prime()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn multiples_stay_on_curve(id in curve_id(), k in scalar()) {
        let params = curve(id);
        prop_assert!(is_point_on_curve(&times_g(&params, &k), &params));
    }

    #[test]
    fn scalar_multiplication_distributes(id in curve_id(), j in scalar(), k in scalar()) {
        let params = curve(id);
        let (a, p) = (params.a(), params.prime());
        let sum = add_ec_points(&times_g(&params, &j), &times_g(&params, &k), a, p).unwrap();
        prop_assert_eq!(sum, times_g(&params, &(&j + &k)));
    }

    #[test]
    fn addition_commutes(id in curve_id(), j in scalar(), k in scalar()) {
        let params = curve(id);
        let (a, p) = (params.a(), params.prime());
        let (jg, kg) = (times_g(&params, &j), times_g(&params, &k));
        prop_assert_eq!(
            add_ec_points(&jg, &kg, a, p).unwrap(),
            add_ec_points(&kg, &jg, a, p).unwrap()
        );
    }

    #[test]
    fn doubling_matches_self_addition(id in curve_id(), k in scalar()) {
        let params = curve(id);
        let (a, p) = (params.a(), params.prime());
        let point = times_g(&params, &k);
        prop_assert_eq!(
            double_ec_point(&point, a, p).unwrap(),
            add_ec_points(&point, &point, a, p).unwrap()
        );
    }

    #[test]
    fn inverse_sums_to_infinity(id in curve_id(), k in scalar()) {
        let params = curve(id);
        let point = times_g(&params, &k);
        let negated = negate_ec_point(&point, params.prime());
        prop_assert!(is_point_on_curve(&negated, &params));
        let sum = add_ec_points(&point, &negated, params.a(), params.prime()).unwrap();
        prop_assert!(sum.is_infinity());
    }

    #[test]
    fn off_curve_points_rejected(id in curve_id(), k in scalar(), delta in 1u64..1000) {
        let params = curve(id);
        let point = times_g(&params, &k);
        let (x, y) = (point.x().unwrap().clone(), point.y().unwrap().clone());
        let moved = EcPoint::new(x, (y + delta) % params.prime());
        prop_assert!(!is_point_on_curve(&moved, &params));
        prop_assert!(EcPublicKey::new(moved, params.clone()).is_err());
    }

    #[test]
    fn order_annihilates_generator(id in curve_id()) {
        let params = curve(id);
        let n_minus_one = params.order() - 1u8;
        let almost = times_g(&params, &n_minus_one);
        let sum = add_ec_points(&almost, params.generator(), params.a(), params.prime()).unwrap();
        prop_assert!(sum.is_infinity());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn signatures_verify_and_bit_flips_fail(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..128),
        flip in any::<prop::sample::Index>(),
    ) {
        let params = curve(12);
        let mut rng = seeded_rng(seed);
        let (public, private) = generate_key_pair(&params, &mut rng).unwrap();
        let signature = sign_raw(&private, &message, DigestAlgorithm::Sha256, &mut rng).unwrap();

        prop_assert_eq!(signature.len(), 64);
        prop_assert!(verify_signature(&signature, &message, &public, "SHA-256"));

        let mut tampered = signature.clone();
        let bit = flip.index(tampered.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify_signature(&tampered, &message, &public, "SHA-256"));
    }

    #[test]
    fn signature_depends_on_digest(seed in any::<u64>(), message in prop::collection::vec(any::<u8>(), 1..64)) {
        let params = curve(13);
        let mut rng = seeded_rng(seed);
        let (public, private) = generate_key_pair(&params, &mut rng).unwrap();
        let signature = sign_raw(&private, &message, DigestAlgorithm::Sha384, &mut rng).unwrap();

        prop_assert!(verify_signature(&signature, &message, &public, "SHA-384"));
        prop_assert!(!verify_signature(&signature, &message, &public, "SHA-256"));
    }
}
