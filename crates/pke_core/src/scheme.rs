//! FHE scheme vocabulary.
//!
//! A [`Scheme`] is chosen once per translation and consulted for every decision that differs between the
//! integer-packed and the approximate (real-number) scheme families: the prelude text, the plaintext handle spelling,
//! the parameter template, the packed-value accessor, and which encode operations are legal.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; both canonical spellings and aliases are accepted.
//!
//! ## Examples
//! ```rust
//! use pke_core::scheme::{self, Scheme};
//!
//! assert_eq!(scheme::from_str("ckks"), Some(Scheme::Ckks));
//! assert!(Scheme::Ckks.is_approximate());
//! assert_eq!(Scheme::Bgv.plaintext_type(), "PlaintextT");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::openfhe;

/// Stable identifier for every supported scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Integer-packed arithmetic (BGV, RNS variant).
    #[default]
    Bgv,
    /// Approximate real-number arithmetic (CKKS, RNS variant).
    Ckks,
}

/// Metadata for a scheme.
#[derive(Debug, Clone, Copy)]
pub struct SchemeInfo {
    pub id: Scheme,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    /// Whether the scheme encodes real numbers approximately.
    pub is_approximate: bool,
    /// Template argument of `CCParams<...>`.
    pub params_template: &'static str,
    /// Alias the prelude declares for plaintext handles.
    pub plaintext_type: &'static str,
    /// Plaintext member returning the decoded slot values.
    pub packed_value_accessor: &'static str,
}

/// Registry of all schemes.
pub const SCHEMES: &[SchemeInfo] = &[
    SchemeInfo {
        id: Scheme::Bgv,
        canonical: "bgv",
        aliases: &["bgvrns", "BGV"],
        description: "Integer-packed leveled scheme (BGV, RNS variant).",
        is_approximate: false,
        params_template: "CryptoContextBGVRNS",
        plaintext_type: "PlaintextT",
        packed_value_accessor: "GetPackedValue",
    },
    SchemeInfo {
        id: Scheme::Ckks,
        canonical: "ckks",
        aliases: &["ckksrns", "CKKS"],
        description: "Approximate real-number scheme (CKKS, RNS variant).",
        is_approximate: true,
        params_template: "CryptoContextCKKSRNS",
        plaintext_type: "CKKSPlaintextT",
        packed_value_accessor: "GetRealPackedValue",
    },
];

/// Resolve a scheme from its canonical spelling or an alias.
pub fn from_str(name: &str) -> Option<Scheme> {
    SCHEMES
        .iter()
        .find(|info| info.canonical == name || info.aliases.contains(&name))
        .map(|info| info.id)
}

/// Return the metadata for `id`.
pub fn info_for(id: Scheme) -> &'static SchemeInfo {
    match id {
        Scheme::Bgv => &SCHEMES[0],
        Scheme::Ckks => &SCHEMES[1],
    }
}

impl Scheme {
    /// Canonical spelling (`"bgv"`, `"ckks"`).
    pub fn as_str(self) -> &'static str {
        info_for(self).canonical
    }

    pub fn is_approximate(self) -> bool {
        info_for(self).is_approximate
    }

    /// Spelling of the plaintext handle type.
    pub fn plaintext_type(self) -> &'static str {
        info_for(self).plaintext_type
    }

    pub fn params_template(self) -> &'static str {
        info_for(self).params_template
    }

    pub fn packed_value_accessor(self) -> &'static str {
        info_for(self).packed_value_accessor
    }

    /// Handle aliases declared by the prelude, as `(alias, target)` pairs in declaration order.
    pub fn handle_aliases(self) -> Vec<(&'static str, String)> {
        vec![
            (openfhe::CIPHERTEXT_T, "ConstCiphertext<DCRTPoly>".to_string()),
            (openfhe::CC_PARAMS_T, format!("CCParams<{}>", self.params_template())),
            (openfhe::CRYPTO_CONTEXT_T, "CryptoContext<DCRTPoly>".to_string()),
            (openfhe::EVAL_KEY_T, "EvalKey<DCRTPoly>".to_string()),
            (self.plaintext_type(), "Plaintext".to_string()),
            (openfhe::PRIVATE_KEY_T, "PrivateKey<DCRTPoly>".to_string()),
            (openfhe::PUBLIC_KEY_T, "PublicKey<DCRTPoly>".to_string()),
        ]
    }

    /// Render the module prelude: the OpenFHE include, the namespace import, and the handle aliases.
    ///
    /// ## Parameters
    /// - `include`: header path placed inside `#include "..."`.
    pub fn prelude(self, include: &str) -> String {
        let mut out = format!("#include \"{include}\"  // from @openfhe\n\nusing namespace lbcrypto;\n");
        for (alias, target) in self.handle_aliases() {
            out.push_str(&format!("using {alias} = {target};\n"));
        }
        out
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a scheme spelling is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScheme(pub String);

impl fmt::Display for UnknownScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<_> = SCHEMES.iter().map(|s| s.canonical).collect();
        write!(f, "unknown scheme `{}` (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownScheme {}

impl FromStr for Scheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s).ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_for_matches_registry_order() {
        for info in SCHEMES {
            assert_eq!(info_for(info.id).canonical, info.canonical);
        }
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(from_str("bgvrns"), Some(Scheme::Bgv));
        assert_eq!(from_str("CKKS"), Some(Scheme::Ckks));
        assert_eq!(from_str("tfhe"), None);
    }

    #[test]
    fn test_parse_error_lists_known_schemes() {
        let err = "bfv".parse::<Scheme>().unwrap_err();
        assert_eq!(err.to_string(), "unknown scheme `bfv` (expected one of: bgv, ckks)");
    }

    #[test]
    fn test_prelude_bgv() {
        let prelude = Scheme::Bgv.prelude("openfhe/pke/openfhe.h");
        assert!(prelude.starts_with("#include \"openfhe/pke/openfhe.h\""));
        assert!(prelude.contains("using CCParamsT = CCParams<CryptoContextBGVRNS>;\n"));
        assert!(prelude.contains("using PlaintextT = Plaintext;\n"));
        assert!(!prelude.contains("CKKS"));
    }

    #[test]
    fn test_prelude_ckks() {
        let prelude = Scheme::Ckks.prelude("openfhe.h");
        assert!(prelude.contains("using CCParamsT = CCParams<CryptoContextCKKSRNS>;\n"));
        assert!(prelude.contains("using CKKSPlaintextT = Plaintext;\n"));
    }

    #[test]
    fn test_default_is_bgv() {
        assert_eq!(Scheme::default(), Scheme::Bgv);
        assert!(!Scheme::Bgv.is_approximate());
    }
}
