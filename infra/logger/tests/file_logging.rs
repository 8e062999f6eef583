use chamber_logger::{LevelFilter, LogFormat, Logger};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn extra_json_lines_land_in_the_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("chamber-file")
        .console(false)
        .format(LogFormat::ExtraJson)
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .init()?;

    tracing::info!(target: "chamber", site_id = 2, "Reversed url");
    tracing::info!(target: "chamber", "Plain line");
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("INFO chamber: Reversed url --- {\"site_id\":2}"), "{contents}");
    assert!(contents.contains("INFO chamber: Plain line\n"), "{contents}");
    Ok(())
}
