use std::collections::{HashMap, HashSet};

use pke_core::cpp_keywords;
use pke_core::openfhe;
use pke_core::scheme::{self, Scheme};

#[test]
fn scheme_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, Scheme> = HashMap::new();

    for info in scheme::SCHEMES {
        assert_eq!(
            scheme::from_str(info.canonical),
            Some(info.id),
            "scheme canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(info.id.as_str(), info.canonical, "scheme as_str mismatch for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate scheme spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
        for &alias in info.aliases {
            assert_eq!(scheme::from_str(alias), Some(info.id), "scheme alias not resolvable: {}", alias);
            if let Some(prev) = seen.insert(alias, info.id) {
                panic!("duplicate scheme alias {:?}: {:?} and {:?}", alias, prev, info.id);
            }
        }
    }
}

#[test]
fn scheme_plaintext_spellings_are_distinct_and_reserved() {
    let spellings: HashSet<_> = scheme::SCHEMES.iter().map(|s| s.plaintext_type).collect();
    assert_eq!(spellings.len(), scheme::SCHEMES.len());
    for spelling in spellings {
        assert!(cpp_keywords::is_reserved(spelling), "{spelling} must not be bindable");
    }
}

#[test]
fn prelude_aliases_are_reserved_for_every_scheme() {
    for info in scheme::SCHEMES {
        for (alias, _) in info.id.handle_aliases() {
            assert!(openfhe::is_api_identifier(alias), "{alias} missing from API_IDENTIFIERS");
        }
    }
}

#[test]
fn vocabulary_tables_have_no_duplicates() {
    let keywords: HashSet<_> = cpp_keywords::CPP_KEYWORDS.iter().collect();
    assert_eq!(keywords.len(), cpp_keywords::CPP_KEYWORDS.len(), "duplicate C++ keyword");

    let api: HashSet<_> = openfhe::API_IDENTIFIERS.iter().collect();
    assert_eq!(api.len(), openfhe::API_IDENTIFIERS.len(), "duplicate API identifier");
}
