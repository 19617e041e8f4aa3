//! Pure ECDSA signature check over a raw request body.

use base64::{prelude::BASE64_STANDARD, Engine as _};
use p256::ecdsa::{signature::Verifier, Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;

use crate::error::{require_non_empty, VerifyError};

/// Checks `signature` (base64-encoded DER) against `public_key_pem` over the
/// SHA-256 digest of the exact bytes of `raw_body`.
///
/// The body must be the bytes as received on the wire: re-parsing and
/// re-serializing it before this call breaks verification.
///
/// Returns `Ok(false)` for a malformed key, malformed signature encoding, or
/// a cryptographically invalid signature; errors only when an argument is
/// empty. No I/O, no side effects.
pub fn verify_signature(
    raw_body: &str,
    signature: &str,
    public_key_pem: &str,
) -> Result<bool, VerifyError> {
    require_non_empty(raw_body, "payload")?;
    require_non_empty(signature, "signature")?;
    require_non_empty(public_key_pem, "key")?;

    let Ok(key) = VerifyingKey::from_public_key_pem(public_key_pem) else {
        return Ok(false);
    };
    let Ok(der) = BASE64_STANDARD.decode(signature) else {
        return Ok(false);
    };
    let Ok(signature) = Signature::from_der(&der) else {
        return Ok(false);
    };

    Ok(key.verify(raw_body.as_bytes(), &signature).is_ok())
}
