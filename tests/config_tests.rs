use std::env;
use std::io::Write;

use pretty_assertions::assert_eq;
use serial_test::serial;
use shiftlinkr_admin::Config;

const KEYS: [&str; 6] = [
    "API_BASE_URL",
    "API_TOKEN",
    "REQUEST_TIMEOUT_SECS",
    "HISTORY_POLL_INTERVAL_SECS",
    "NOTIFICATIONS_PER_PAGE",
    "ENVIRONMENT",
];

/// Runs `f` with every config variable cleared, then puts the originals back
fn with_clean_env(f: impl FnOnce()) {
    let original_values: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }

    f();

    unsafe {
        for (key, value) in original_values {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    with_clean_env(|| {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.history_poll_interval_secs, 30);
        assert_eq!(config.notifications_per_page, 20);
        assert!(config.is_development());
        assert!(!config.is_production());
    });
}

#[test]
#[serial]
fn test_config_custom_values() {
    with_clean_env(|| {
        unsafe {
            env::set_var("API_BASE_URL", "https://api.shiftlinkr.test/");
            env::set_var("API_TOKEN", "abc123");
            env::set_var("REQUEST_TIMEOUT_SECS", "5");
            env::set_var("HISTORY_POLL_INTERVAL_SECS", "10");
            env::set_var("NOTIFICATIONS_PER_PAGE", "50");
            env::set_var("ENVIRONMENT", "production");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.api_token.as_deref(), Some("abc123"));
        assert_eq!(config.request_timeout().as_secs(), 5);
        assert_eq!(config.history_poll_interval().as_secs(), 10);
        assert_eq!(config.notifications_per_page, 50);
        assert!(config.is_production());
        assert_eq!(
            config.api_url("/admin/teams"),
            "https://api.shiftlinkr.test/api/v1/admin/teams"
        );
    });
}

#[test]
#[serial]
fn test_config_invalid_numbers_fall_back() {
    with_clean_env(|| {
        unsafe {
            env::set_var("REQUEST_TIMEOUT_SECS", "soon");
            env::set_var("NOTIFICATIONS_PER_PAGE", "-1");
            env::set_var("API_TOKEN", "   ");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.notifications_per_page, 20);
        assert_eq!(config.api_token, None);
    });
}

#[test]
#[serial]
fn test_config_from_env_file() {
    with_clean_env(|| {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "API_BASE_URL=http://10.0.0.5:9000").unwrap();
        writeln!(file, "HISTORY_POLL_INTERVAL_SECS=15").unwrap();

        let config = Config::from_env_file(file.path()).unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.history_poll_interval_secs, 15);
        assert_eq!(config.request_timeout_secs, 30);
    });
}

#[test]
#[serial]
fn test_config_missing_env_file_is_an_error() {
    with_clean_env(|| {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_env_file(dir.path().join("missing.env")).is_err());
    });
}
