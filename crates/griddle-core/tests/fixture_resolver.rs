use griddle_core::fixture::{creation_order, FixtureSet, TableFixture};
use pretty_assertions::assert_eq;

fn set(entries: &[(&str, &[&str])]) -> FixtureSet {
    let mut fixtures = FixtureSet::new();
    for (table, depends) in entries {
        let mut fixture = TableFixture::default();
        fixture.depends.extend(depends.iter().map(|d| d.to_string()));
        fixtures.add_table(*table, fixture);
    }
    fixtures
}

fn position(order: &[String], table: &str) -> usize {
    order.iter().position(|name| name == table).unwrap()
}

#[test]
fn dependencies_precede_dependents() {
    let fixtures = set(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]);
    let order = creation_order(&fixtures).unwrap();

    assert!(position(&order, "a") < position(&order, "b"));
    assert!(position(&order, "b") < position(&order, "c"));
}

#[test]
fn order_is_deterministic_for_a_fixed_input() {
    let entries: &[(&str, &[&str])] = &[
        ("d", &[]),
        ("a", &["d"]),
        ("c", &["d"]),
        ("b", &["d"]),
    ];
    let first = creation_order(&set(entries)).unwrap();
    let second = creation_order(&set(entries)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dependency_only_names_become_unconstrained_nodes() {
    let fixtures = set(&[("b", &["a"])]);
    let order = creation_order(&fixtures).unwrap();

    assert!(order.contains(&"a".to_string()));
    assert!(position(&order, "a") < position(&order, "b"));
}

#[test]
fn cycle_reports_the_explicit_path() {
    let fixtures = set(&[("a", &["b"]), ("b", &["a"])]);
    let err = creation_order(&fixtures).unwrap_err();

    assert!(err.is_dependency_cycle());
    let path = err.dependency_cycle_path().unwrap();
    assert!(path.contains(&"a".to_string()));
    assert!(path.contains(&"b".to_string()));
    // chain closes on the table it started from
    assert_eq!(path.first(), path.last());
    assert!(err.to_string().contains("<->"));
}

#[test]
fn self_dependency_is_a_cycle() {
    let fixtures = set(&[("a", &["a"])]);
    let err = creation_order(&fixtures).unwrap_err();

    let path = err.dependency_cycle_path().unwrap();
    assert_eq!(path, &["a".to_string(), "a".to_string()][..]);
}

#[test]
fn cycle_behind_a_valid_prefix_is_still_found() {
    let fixtures = set(&[("a", &[]), ("b", &["a", "c"]), ("c", &["b"])]);
    let err = creation_order(&fixtures).unwrap_err();

    let path = err.dependency_cycle_path().unwrap();
    assert!(path.contains(&"b".to_string()));
    assert!(path.contains(&"c".to_string()));
    assert!(!path.contains(&"a".to_string()));
}
