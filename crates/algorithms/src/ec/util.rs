//! Domain-parameter reconstruction from card and certificate structures
//!
//! Cards announce their curves in three shapes: a standardized ID inside
//! an `AlgorithmIdentifier`, explicit X9.62 parameters, or the tagged
//! public-key template of card-verifiable certificates (`7F49`). Every
//! entry point ends in [`build_parameter_spec`].

use eidcrypt_params::traditional::curves::standardized_curve;
use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;

use super::keys::EcPublicKey;
use super::params::EcDomainParameters;
use super::point::point_from_bytes;
use crate::asn1::{tag, AlgorithmIdentifier, Oid, Tlv};
use crate::error::{Error, Result};

/// Validate raw curve values and assemble domain parameters
///
/// `generator` is the uncompressed encoding of G at the width of `prime`.
pub fn build_parameter_spec(
    prime: &BigUint,
    a: &BigUint,
    b: &BigUint,
    generator: &[u8],
    order: &BigUint,
    cofactor: &BigUint,
) -> Result<EcDomainParameters> {
    let field_size = (prime.bits() as usize + 7) / 8;
    let g = point_from_bytes(generator, field_size)?;
    EcDomainParameters::new(
        prime.clone(),
        a.clone(),
        b.clone(),
        g,
        order.clone(),
        cofactor.clone(),
    )
}

/// Parameters of standardized domain parameter `id` (8 to 18)
pub fn parameter_spec_from_curve_id(id: i64) -> Result<EcDomainParameters> {
    let curve = standardized_curve(id).ok_or(Error::UnknownCurveId { id })?;
    debug!(id, curve = curve.name, "standardized domain parameters");
    EcDomainParameters::from_standard_curve(curve)
}

/// A card's `DomainParameterInfo` security info
///
/// `SEQUENCE { protocol OID, domainParameter AlgorithmIdentifier,
/// keyId INTEGER OPTIONAL }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameterInfo {
    protocol: Oid,
    algorithm: AlgorithmIdentifier,
    parameter_id: Option<i64>,
    key_id: Option<i64>,
}

impl DomainParameterInfo {
    /// Assemble from parts; the standardized ID is read from the identifier
    pub fn new(protocol: Oid, algorithm: AlgorithmIdentifier, key_id: Option<i64>) -> Self {
        let parameter_id = algorithm.parameter_id();
        Self {
            protocol,
            algorithm,
            parameter_id,
            key_id,
        }
    }

    /// Parse the DER SecurityInfo
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let seq = Tlv::from_der(der)?;
        seq.expect_tag(tag::SEQUENCE, "DomainParameterInfo")?;
        let children = seq.children()?;
        let (protocol, algorithm, rest) = match children.as_slice() {
            [protocol, algorithm, rest @ ..] => (protocol, algorithm, rest),
            _ => {
                return Err(Error::encoding(
                    "DomainParameterInfo",
                    "expected protocol and domain parameters",
                ))
            }
        };
        let key_id = match rest.first() {
            Some(id) => Some(id.as_small_integer()?),
            None => None,
        };
        Ok(Self::new(
            protocol.as_oid()?,
            AlgorithmIdentifier::from_tlv(algorithm)?,
            key_id,
        ))
    }

    /// Protocol OID, e.g. `id-CA-ECDH`
    pub fn protocol(&self) -> &Oid {
        &self.protocol
    }

    /// The domain parameter identifier
    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    /// Standardized domain parameter ID, if the identifier carries one
    pub fn parameter_id(&self) -> Option<i64> {
        self.parameter_id
    }

    /// Key reference of the chip
    pub fn key_id(&self) -> Option<i64> {
        self.key_id
    }
}

/// Parameters announced by a `DomainParameterInfo`
pub fn parameter_spec_from_domain_parameters(
    info: &DomainParameterInfo,
) -> Result<EcDomainParameters> {
    let algorithm = info.algorithm();
    if algorithm.algorithm().is(oids::STANDARDIZED_DOMAIN_PARAMETERS) {
        let id = match algorithm.parameters() {
            Some(p) if p.tag() == tag::INTEGER => p.as_saturating_integer()?,
            _ => {
                return Err(Error::MissingDomainParameters {
                    context: "standardized domain parameter ID",
                })
            }
        };
        return parameter_spec_from_curve_id(id);
    }
    parameter_spec_from_algorithm_identifier(algorithm)
}

/// Explicit parameters of an `ecPublicKey` algorithm identifier
pub fn parameter_spec_from_algorithm_identifier(
    algorithm: &AlgorithmIdentifier,
) -> Result<EcDomainParameters> {
    if !algorithm.algorithm().is(oids::EC_PUBLIC_KEY) {
        return Err(Error::param(
            "algorithm identifier",
            "does not contain explicit EC domain parameters",
        ));
    }
    match algorithm.parameters() {
        Some(params) => parameters_from_explicit_asn1(params),
        None => Err(Error::MissingDomainParameters {
            context: "algorithm identifier",
        }),
    }
}

/// Decode X9.62 `ECParameters`
///
/// A named-curve OID or NULL in place of the SEQUENCE means the caller has
/// to obtain the parameters elsewhere.
pub fn parameters_from_explicit_asn1(params: &Tlv) -> Result<EcDomainParameters> {
    if params.tag() == tag::OBJECT_IDENTIFIER || params.tag() == tag::NULL {
        return Err(Error::MissingDomainParameters {
            context: "ECParameters",
        });
    }
    params.expect_tag(tag::SEQUENCE, "ECParameters")?;
    let children = params.children()?;
    let (field_id, curve, base, order, rest) = match children.as_slice() {
        [_version, field_id, curve, base, order, rest @ ..] => {
            (field_id, curve, base, order, rest)
        }
        _ => return Err(Error::encoding("ECParameters", "too few elements")),
    };

    let field = field_id.children()?;
    let (field_type, prime) = match field.as_slice() {
        [field_type, prime, ..] => (field_type.as_oid()?, prime.as_integer()?),
        _ => return Err(Error::encoding("FieldID", "expected type and prime")),
    };
    if !field_type.is(oids::PRIME_FIELD) {
        return Err(Error::param(
            "field type",
            format!("only prime fields supported, found {}", field_type),
        ));
    }

    let coefficients = curve.children()?;
    let (a, b) = match coefficients.as_slice() {
        [a, b, ..] => (
            a.expect_tag(tag::OCTET_STRING, "curve")?.as_unsigned(),
            b.expect_tag(tag::OCTET_STRING, "curve")?.as_unsigned(),
        ),
        _ => return Err(Error::encoding("Curve", "expected coefficients a and b")),
    };

    let generator = base.expect_tag(tag::OCTET_STRING, "ECParameters")?.value();
    let order = order.as_integer()?;
    let cofactor = match rest.first() {
        Some(h) => h.as_integer()?,
        None => BigUint::one(),
    };
    build_parameter_spec(&prime, &a, &b, generator, &order, &cofactor)
}

/// Locate the `7F49` public key template in a CVC, its body or the template itself
fn public_key_template(tlv: &Tlv) -> Result<Tlv> {
    match tlv.tag() {
        tag::PUBLIC_KEY => Ok(tlv.clone()),
        tag::CERTIFICATE_BODY => tlv.require_child(tag::PUBLIC_KEY, "certificate body"),
        tag::CV_CERTIFICATE => tlv
            .require_child(tag::CERTIFICATE_BODY, "card-verifiable certificate")?
            .require_child(tag::PUBLIC_KEY, "certificate body"),
        other => Err(Error::encoding(
            "card-verifiable certificate",
            format!("unexpected tag {:X}", other),
        )),
    }
}

/// Domain parameters of a tagged TR-03110 public key template
fn parameters_from_template(
    template: &Tlv,
    context: &'static str,
) -> Result<EcDomainParameters> {
    let prime = template.find_child(tag::PK_PRIME)?;
    let a = template.find_child(tag::PK_COEFFICIENT_A)?;
    let (prime, a) = match (prime, a) {
        (Some(prime), Some(a)) => (prime, a),
        _ => return Err(Error::MissingDomainParameters { context }),
    };
    let b = template.require_child(tag::PK_COEFFICIENT_B, context)?;
    let g = template.require_child(tag::PK_GENERATOR, context)?;
    let n = template.require_child(tag::PK_ORDER, context)?;
    let h = match template.find_child(tag::PK_COFACTOR)? {
        Some(h) => h.as_unsigned(),
        None => BigUint::one(),
    };
    build_parameter_spec(
        &prime.as_unsigned(),
        &a.as_unsigned(),
        &b.as_unsigned(),
        g.value(),
        &n.as_unsigned(),
        &h,
    )
}

/// Domain parameters carried by a card-verifiable certificate
///
/// Accepts the whole certificate (`7F21`), its body (`7F4E`) or the
/// public key template (`7F49`). Only CVCA certificates carry parameters.
pub fn parameter_spec_from_cvc(cvc: &Tlv) -> Result<EcDomainParameters> {
    let template = public_key_template(cvc)?;
    parameters_from_template(&template, "CVC public key")
}

/// Domain parameters carried by a DER TR-03110 public key (`7F49`)
pub fn parameter_spec_from_public_key(der: &[u8]) -> Result<EcDomainParameters> {
    let key = Tlv::from_der(der)?;
    key.expect_tag(tag::PUBLIC_KEY, "EC public key")?;
    parameters_from_template(&key, "EC public key")
}

/// Public key from a TR-03110 public key template
///
/// Parameters come from the key itself when present, otherwise from
/// `fallback`, e.g. those of the issuing CVCA.
pub fn create_key_from_asn1(
    key: &Tlv,
    fallback: Option<&EcDomainParameters>,
) -> Result<EcPublicKey> {
    key.expect_tag(tag::PUBLIC_KEY, "EC public key")?;
    let params = match parameters_from_template(key, "EC public key") {
        Ok(params) => params,
        Err(Error::MissingDomainParameters { context }) => match fallback {
            Some(params) => {
                debug!("public key without domain parameters, using fallback");
                params.clone()
            }
            None => return Err(Error::MissingDomainParameters { context }),
        },
        Err(e) => return Err(e),
    };
    let point_bytes = key.require_child(tag::PK_PUBLIC_POINT, "EC public key")?;
    let point = point_from_bytes(point_bytes.value(), params.field_size_bytes())?;
    EcPublicKey::new(point, params)
}

/// TR-03110 public key template `7F49` for `key`
///
/// With `include_parameters` the template carries the full domain
/// parameters as a CVCA certificate does; otherwise only the point.
pub fn encode_public_key_template(
    key: &EcPublicKey,
    algorithm: &Oid,
    include_parameters: bool,
) -> Result<Tlv> {
    let params = key.params();
    let fs = params.field_size_bytes();
    let mut children = vec![Tlv::oid(algorithm)];
    if include_parameters {
        children.push(Tlv::new(tag::PK_PRIME, params.prime().to_bytes_be()));
        children.push(Tlv::new(
            tag::PK_COEFFICIENT_A,
            super::point::to_fixed_length(params.a(), fs),
        ));
        children.push(Tlv::new(
            tag::PK_COEFFICIENT_B,
            super::point::to_fixed_length(params.b(), fs),
        ));
        children.push(Tlv::new(
            tag::PK_GENERATOR,
            params.generator().to_uncompressed(fs)?,
        ));
        children.push(Tlv::new(tag::PK_ORDER, params.order().to_bytes_be()));
    }
    children.push(Tlv::new(tag::PK_PUBLIC_POINT, key.to_uncompressed()?));
    if include_parameters {
        children.push(Tlv::new(tag::PK_COFACTOR, params.cofactor().to_bytes_be()));
    }
    Ok(Tlv::constructed(tag::PUBLIC_KEY, &children))
}
