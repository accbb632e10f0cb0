use griddle_core::config::{Settings, SettingValue};
use griddle_core::hash::Hasher;

#[test]
fn keys_are_case_insensitive() {
    let mut settings = Settings::new();
    settings.set("SmTh", 123i64);

    assert!(matches!(
        settings.get("SMTH").unwrap(),
        SettingValue::I64(123)
    ));
    assert!(matches!(
        settings.get("smth").unwrap(),
        SettingValue::I64(123)
    ));
    assert!(settings.contains("Smth"));
    assert!(!settings.contains("other_smth"));
}

#[test]
fn unknown_read_is_a_descriptive_error() {
    let settings = Settings::new();
    let err = settings.get("other_smth").unwrap_err();

    assert!(err.is_no_setting());
    assert_eq!(
        err.to_string(),
        "setting `other_smth` is not available in the project settings"
    );
}

#[test]
fn typed_reads_check_the_stored_shape() {
    let mut settings = Settings::new();
    settings.set("database_dialect", "sqlite");
    settings.set("retries", 3i64);

    assert_eq!(settings.str("database_dialect").unwrap(), "sqlite");
    assert!(settings.str("retries").unwrap_err().is_configuration());
}

#[test]
fn hasher_entry_point_round_trips() {
    let mut settings = Settings::new();
    settings.set("password_hasher", Hasher::new().iterations(4));

    let hasher = settings.hasher("password_hasher").unwrap();
    assert!(!hasher.hash("x", "", "").is_empty());
    assert!(settings.hasher("missing").unwrap_err().is_no_setting());
}

#[test]
fn environment_overlay_strips_the_prefix() {
    std::env::set_var("GRIDDLE_TEST_DIALECT", "sqlite");

    let mut settings = Settings::new();
    settings.load_env("GRIDDLE_");

    assert_eq!(settings.str("test_dialect").unwrap(), "sqlite");
    std::env::remove_var("GRIDDLE_TEST_DIALECT");
}
