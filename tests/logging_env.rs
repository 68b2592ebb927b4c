use std::{fs, thread::sleep, time::Duration};

use oracle_counter::logging::{self, DEBUG_ENV, LOG_FILE_ENV};
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn init_from_env_honours_debug_and_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("counter.log");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    std::env::remove_var("RUST_LOG");
    std::env::set_var(DEBUG_ENV, "1");
    std::env::set_var(LOG_FILE_ENV, &path);
    logging::init_from_env();
    std::env::remove_var(DEBUG_ENV);
    std::env::remove_var(LOG_FILE_ENV);

    tracing::debug!("debug from env");
    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file from {LOG_FILE_ENV} was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("debug from env"), "debug level not enabled: {contents:?}");
}
