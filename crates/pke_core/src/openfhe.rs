//! OpenFHE PKE API vocabulary.
//!
//! The emitted C++ talks to OpenFHE exclusively through a handful of type aliases (declared by the module prelude)
//! and `CryptoContext` member functions. Keeping the spellings here means the emitter never hard-codes an API name
//! inline, and the reserved-identifier table can be derived from the same source.
//!
//! ## Examples
//! ```rust
//! use pke_core::openfhe::{self, method};
//!
//! assert_eq!(method::EVAL_ADD, "EvalAdd");
//! assert!(openfhe::is_api_identifier("CryptoContextT"));
//! ```

/// Alias for a (read-only) ciphertext handle.
pub const CIPHERTEXT_T: &str = "CiphertextT";
/// Alias for the crypto context handle.
pub const CRYPTO_CONTEXT_T: &str = "CryptoContextT";
/// Alias for a public key handle.
pub const PUBLIC_KEY_T: &str = "PublicKeyT";
/// Alias for a private key handle.
pub const PRIVATE_KEY_T: &str = "PrivateKeyT";
/// Alias for an evaluation key handle.
pub const EVAL_KEY_T: &str = "EvalKeyT";
/// Alias for the scheme parameter bundle.
pub const CC_PARAMS_T: &str = "CCParamsT";

/// Features enabled on every freshly generated crypto context, in emission order.
pub const CONTEXT_FEATURES: &[&str] = &["PKE", "KEYSWITCH", "LEVELEDSHE"];

/// Free function constructing a crypto context from a parameter bundle.
pub const GEN_CRYPTO_CONTEXT: &str = "GenCryptoContext";

/// `CryptoContext` member functions and parameter setters used by the emitter.
pub mod method {
    pub const EVAL_ADD: &str = "EvalAdd";
    pub const EVAL_SUB: &str = "EvalSub";
    pub const EVAL_MULT: &str = "EvalMult";
    pub const EVAL_MULT_NO_RELIN: &str = "EvalMultNoRelin";
    pub const EVAL_NEGATE: &str = "EvalNegate";
    pub const EVAL_SQUARE: &str = "EvalSquare";
    pub const RELINEARIZE: &str = "Relinearize";
    pub const MOD_REDUCE: &str = "ModReduce";
    pub const LEVEL_REDUCE: &str = "LevelReduce";
    pub const KEY_SWITCH: &str = "KeySwitch";
    pub const ENCRYPT: &str = "Encrypt";
    pub const DECRYPT: &str = "Decrypt";
    pub const EVAL_ROTATE: &str = "EvalRotate";
    pub const EVAL_AUTOMORPHISM: &str = "EvalAutomorphism";
    pub const EVAL_MULT_KEY_GEN: &str = "EvalMultKeyGen";
    pub const EVAL_ROTATE_KEY_GEN: &str = "EvalRotateKeyGen";
    pub const MAKE_PACKED_PLAINTEXT: &str = "MakePackedPlaintext";
    pub const MAKE_CKKS_PACKED_PLAINTEXT: &str = "MakeCKKSPackedPlaintext";
    pub const ENABLE: &str = "Enable";
    pub const SET_LENGTH: &str = "SetLength";
    pub const SET_MULTIPLICATIVE_DEPTH: &str = "SetMultiplicativeDepth";
    pub const SET_PLAINTEXT_MODULUS: &str = "SetPlaintextModulus";
}

/// Identifiers the prelude or the OpenFHE headers bring into scope at file level.
///
/// Emitted local names must not shadow any of these.
pub const API_IDENTIFIERS: &[&str] = &[
    "lbcrypto",
    "std",
    "DCRTPoly",
    "Plaintext",
    "CCParams",
    "CryptoContext",
    "ConstCiphertext",
    "Ciphertext",
    "EvalKey",
    "PublicKey",
    "PrivateKey",
    "CryptoContextBGVRNS",
    "CryptoContextCKKSRNS",
    GEN_CRYPTO_CONTEXT,
    CIPHERTEXT_T,
    CRYPTO_CONTEXT_T,
    PUBLIC_KEY_T,
    PRIVATE_KEY_T,
    EVAL_KEY_T,
    CC_PARAMS_T,
    "PlaintextT",
    "CKKSPlaintextT",
    "PKE",
    "KEYSWITCH",
    "LEVELEDSHE",
];

/// Check whether `name` is brought into scope by the prelude or the OpenFHE headers.
pub fn is_api_identifier(name: &str) -> bool {
    API_IDENTIFIERS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_aliases_are_api_identifiers() {
        for alias in [CIPHERTEXT_T, CRYPTO_CONTEXT_T, PUBLIC_KEY_T, PRIVATE_KEY_T, EVAL_KEY_T, CC_PARAMS_T] {
            assert!(is_api_identifier(alias), "{alias} should be reserved");
        }
    }

    #[test]
    fn test_context_features_are_api_identifiers() {
        for feature in CONTEXT_FEATURES {
            assert!(is_api_identifier(feature));
        }
    }

    #[test]
    fn test_ordinary_names_are_not_api_identifiers() {
        assert!(!is_api_identifier("v0"));
        assert!(!is_api_identifier("ciphertext"));
    }
}
