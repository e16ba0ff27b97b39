//! Elliptic-curve cryptography over arbitrary prime fields
//!
//! eID cards may use any of the standardized TR-03110 curves or fully
//! explicit parameters, so curves are runtime values here rather than
//! types. Arithmetic uses affine coordinates on `num-bigint` integers.

pub mod keys;
pub mod math;
pub mod params;
pub mod point;
pub mod signature;
pub mod util;

// Re-exports
pub use keys::{EcPrivateKey, EcPublicKey};
pub use math::{
    add_ec_points, calc_shared_secret, double_ec_point, generate_key_pair, is_point_on_curve,
    multiply_ec_point, negate_ec_point, shared_secret_bytes, sign_raw, verify_signature,
};
pub use params::EcDomainParameters;
pub use point::{point_from_bytes, EcPoint};
pub use signature::{der_to_raw, raw_to_der, EcdsaSignature};
pub use util::{
    build_parameter_spec, create_key_from_asn1, parameter_spec_from_algorithm_identifier,
    parameter_spec_from_curve_id, parameter_spec_from_cvc, parameter_spec_from_domain_parameters,
    parameter_spec_from_public_key, DomainParameterInfo,
};
