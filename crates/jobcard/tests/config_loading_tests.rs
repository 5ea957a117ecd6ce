//! Configuration loading from files and the process environment.
//!
//! Tests that touch environment variables run serially.

use std::io::Write;

use secrecy::ExposeSecret;
use serial_test::serial;
use tempfile::NamedTempFile;

use jobcard::config::{load_config, load_config_from_str, Endpoint, CONFIG_ENV_VAR};
use jobcard::ConfigError;

const ENDPOINT_VARS: [&str; 7] = [
    "JOBCARD_FLOW_LOOKUP_MACHINE_URL",
    "JOBCARD_FLOW_CREATE_MACHINE_URL",
    "JOBCARD_FLOW_CREATE_CONTACT_URL",
    "JOBCARD_FLOW_CREATE_JOB_URL",
    "JOBCARD_FLOW_UPDATE_JOB_URL",
    "JOBCARD_JOBS_API_URL",
    "JOBCARD_HTTP_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ENDPOINT_VARS {
        std::env::remove_var(var);
    }
    std::env::remove_var(CONFIG_ENV_VAR);
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Represents a single config parsing test case.
struct ConfigTestCase {
    name: &'static str,
    config_json: &'static str,
    should_succeed: bool,
    expected_error: Option<&'static str>,
}

const CONFIG_TESTS: &[ConfigTestCase] = &[
    ConfigTestCase {
        name: "empty_object",
        config_json: "{}",
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "all_endpoints",
        config_json: r#"{
            "endpoints": {
                "lookup_machine_url": "https://flows.example.com/lookup?sig=1",
                "create_machine_url": "https://flows.example.com/machine?sig=2",
                "create_contact_url": "https://flows.example.com/contact?sig=3",
                "create_job_url": "https://flows.example.com/job?sig=4",
                "update_job_url": "https://flows.example.com/update?sig=5",
                "jobs_list_url": "http://localhost:7071/api/jobs"
            },
            "http": { "connect_timeout_secs": 3, "request_timeout_secs": 20 }
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "relative_url",
        config_json: r#"{ "endpoints": { "update_job_url": "/api/update" } }"#,
        should_succeed: false,
        expected_error: Some("must start with http:// or https://"),
    },
    ConfigTestCase {
        name: "zero_request_timeout",
        config_json: r#"{ "http": { "request_timeout_secs": 0 } }"#,
        should_succeed: false,
        expected_error: Some("greater than zero"),
    },
    ConfigTestCase {
        name: "wrong_type",
        config_json: r#"{ "http": { "request_timeout_secs": "ten" } }"#,
        should_succeed: false,
        expected_error: Some("Failed to parse config JSON"),
    },
];

#[test]
fn test_config_parsing_table() {
    for case in CONFIG_TESTS {
        let result = load_config_from_str(case.config_json);
        match (case.should_succeed, result) {
            (true, Ok(_)) => {}
            (true, Err(e)) => panic!("{}: expected success, got {}", case.name, e),
            (false, Ok(_)) => panic!("{}: expected failure", case.name),
            (false, Err(e)) => {
                if let Some(expected) = case.expected_error {
                    assert!(
                        e.to_string().contains(expected),
                        "{}: error '{}' does not contain '{}'",
                        case.name,
                        e,
                        expected
                    );
                }
            }
        }
    }
}

#[test]
#[serial]
fn test_file_then_environment_precedence() {
    clear_env();
    let file = config_file(
        r#"{
            "endpoints": {
                "create_job_url": "https://file.example.com/job",
                "jobs_list_url": "https://file.example.com/jobs"
            }
        }"#,
    );
    std::env::set_var("JOBCARD_FLOW_CREATE_JOB_URL", "https://env.example.com/job");
    std::env::set_var("JOBCARD_JOBS_API_URL", "");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(
        config.endpoints.get(Endpoint::CreateJob).unwrap().expose_secret(),
        "https://env.example.com/job"
    );
    assert_eq!(
        config.endpoints.get(Endpoint::JobsList).unwrap().expose_secret(),
        "https://file.example.com/jobs"
    );
    assert!(!config.endpoints.is_configured(Endpoint::LookupMachine));
    clear_env();
}

#[test]
#[serial]
fn test_config_path_from_environment() {
    clear_env();
    let file = config_file(r#"{ "http": { "connect_timeout_secs": 4 } }"#);
    std::env::set_var(CONFIG_ENV_VAR, file.path());

    let config = load_config(None).unwrap();

    assert_eq!(config.http.connect_timeout_secs, 4);
    assert_eq!(config.http.request_timeout_secs, 30);
    clear_env();
}

#[test]
#[serial]
fn test_missing_explicit_file_fails() {
    clear_env();
    std::env::set_var(CONFIG_ENV_VAR, "/definitely/not/here/config.json");

    let result = load_config(None);

    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_url_fails_validation() {
    clear_env();
    let file = config_file("{}");
    std::env::set_var("JOBCARD_FLOW_LOOKUP_MACHINE_URL", "flows.example.com/lookup?sig=secret");

    let err = load_config(Some(file.path())).unwrap_err();

    assert!(matches!(err, ConfigError::Validation { .. }));
    assert!(!err.to_string().contains("secret"));
    clear_env();
}

#[test]
#[serial]
fn test_timeout_from_environment() {
    clear_env();
    let file = config_file("{}");
    std::env::set_var("JOBCARD_HTTP_TIMEOUT_SECS", "12");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.http.connect_timeout_secs, 12);
    assert_eq!(config.http.request_timeout_secs, 12);
    clear_env();
}
