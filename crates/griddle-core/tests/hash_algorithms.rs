use griddle_core::hash::{AlgorithmSpec, Hasher, SUPPORTED_ALGORITHMS};

#[test]
fn digest_is_deterministic() {
    let hasher = Hasher::new().iterations(8);
    let first = hasher.hash("test string", "", "");
    let second = hasher.hash("test string", "", "");
    assert_eq!(first, second);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn salt_and_pepper_change_the_digest() {
    let hasher = Hasher::new().iterations(8);
    let plain = hasher.hash("test string", "", "");
    let salted = hasher.hash("test string", "salt", "");
    let peppered = hasher.hash("test string", "salt", "pepper");

    assert_ne!(plain, salted);
    assert_ne!(salted, peppered);
}

#[test]
fn every_supported_name_resolves() {
    for name in SUPPORTED_ALGORITHMS {
        let hasher =
            Hasher::with_algorithms(vec![AlgorithmSpec::name(*name)]).unwrap();
        assert_eq!(hasher.algorithm_labels(), vec![*name]);
    }
}

#[test]
fn unknown_name_is_rejected_with_the_algorithm() {
    let err = Hasher::with_algorithms(vec![
        AlgorithmSpec::name("sha256"),
        AlgorithmSpec::name("md6"),
    ])
    .unwrap_err();

    assert!(err.is_invalid_algorithm());
    let message = err.to_string();
    assert!(message.contains("md6"));
    assert!(message.contains("sha256") || message.contains("supported"));
}

#[test]
fn custom_callable_participates_in_the_chain() {
    let hasher = Hasher::with_algorithms(vec![
        AlgorithmSpec::custom("reverse", |bytes| {
            bytes.iter().rev().copied().collect()
        }),
        AlgorithmSpec::name("sha256"),
    ])
    .unwrap()
    .iterations(2);

    let digest = hasher.hash("value", "salt", "pepper");
    // sha256 runs last: 32 bytes, hex encoded
    assert_eq!(digest.len(), 64);
}

#[test]
fn custom_callable_with_empty_digest_fails_validation() {
    let err = Hasher::with_algorithms(vec![AlgorithmSpec::custom("void", |_| Vec::new())])
        .unwrap_err();

    assert!(err.is_invalid_algorithm());
    assert!(err.to_string().contains("void"));
}

#[test]
fn empty_algorithm_list_is_rejected() {
    let err = Hasher::with_algorithms(Vec::new()).unwrap_err();
    assert!(err.is_invalid_algorithm());
}
