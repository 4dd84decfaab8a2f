//! Verify the URL resolver against JSON test vectors stored in `test-vectors/`.

use httpy::resolve;

#[test]
fn resolve_test_vectors() {
    let raw = include_str!("../../test-vectors/resolve.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let base = case["base"].as_str().unwrap();
        let target = case["target"].as_str().unwrap();
        let expected = case["expected"].as_str().unwrap();

        assert_eq!(resolve(base, target), expected, "{name}");
    }
}

#[test]
fn slash_variants_join_to_the_same_url() {
    let bases = ["http://h/api", "http://h/api/"];
    let targets = ["v1/values", "/v1/values"];

    for base in bases {
        for target in targets {
            let joined = resolve(base, target);
            assert_eq!(joined, "http://h/api/v1/values", "{base} + {target}");
            assert_eq!(joined.matches('/').count(), 5, "{joined}");
        }
    }
}

#[test]
fn absolute_targets_are_untouched_by_any_base() {
    for base in ["", "http://h", "http://h/api/", "relative/"] {
        assert_eq!(resolve(base, "https://other/x"), "https://other/x", "{base}");
    }
}
