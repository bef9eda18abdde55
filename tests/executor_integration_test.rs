//! Integration tests for discovery plus sequential execution
//!
//! These run the whole pipeline against an in-memory server double.

mod common;

use common::{write_script, FakeServer};
use sqlrunner::core::discovery::discover_scripts;
use sqlrunner::core::executor::SequentialExecutor;
use sqlrunner::core::progress::{progress_channel, ProgressEvent};
use sqlrunner::core::report::{RunOutcome, LOG_SEPARATOR};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_scripts_run_in_name_order_across_folders() {
    let dir = TempDir::new().unwrap();
    write_script(dir.path(), "zeta/001_schema.sql", "CREATE TABLE a (id int);");
    write_script(dir.path(), "alpha/003_views.sql", "CREATE VIEW v AS SELECT 1;");
    write_script(dir.path(), "002_seed.SQL", "INSERT INTO a VALUES (1);");
    write_script(dir.path(), "notes.txt", "not a script");

    let scripts = discover_scripts(dir.path()).unwrap();
    let server = Arc::new(FakeServer::default());
    let report = SequentialExecutor::new(server.clone())
        .run_scripts(scripts)
        .await;

    assert!(report.is_successful());
    assert_eq!(report.status_line(), "Completed Successfully");
    assert_eq!(
        server.executed(),
        vec![
            "CREATE TABLE a (id int);",
            "INSERT INTO a VALUES (1);",
            "CREATE VIEW v AS SELECT 1;",
        ]
    );
}

#[tokio::test]
async fn test_invalid_sql_is_logged_and_run_continues() {
    let dir = TempDir::new().unwrap();
    write_script(dir.path(), "001.sql", "SELECT 1;");
    let bad = write_script(dir.path(), "002.sql", "SELEC 1;");
    write_script(dir.path(), "003.sql", "SELECT 3;");

    let scripts = discover_scripts(dir.path()).unwrap();
    let server = Arc::new(FakeServer::default());
    let report = SequentialExecutor::new(server.clone())
        .run_scripts(scripts)
        .await;

    assert_eq!(server.executed().len(), 3);
    assert_eq!(report.error_count, 1);
    assert_eq!(report.outcome(), RunOutcome::CompletedWithErrors(1));
    assert_eq!(report.status_line(), "1 Errors");

    let expected = format!(
        "Error in file: {}\nERROR: syntax error at or near \"SELEC\"\n{}\n",
        bad.display(),
        LOG_SEPARATOR
    );
    assert_eq!(report.error_log_text(), expected);
    assert!(report
        .message_log_text()
        .contains("ERROR 42601: syntax error at or near \"SELEC\""));
}

#[tokio::test]
async fn test_error_marked_notice_counts_as_error() {
    let dir = TempDir::new().unwrap();
    write_script(dir.path(), "001.sql", "DO $$ BEGIN RAISE NOTICE 'hi'; END $$;");
    write_script(
        dir.path(),
        "002.sql",
        "DO $$ BEGIN RAISE WARNING 'ERROR in nested call'; END $$;",
    );

    let scripts = discover_scripts(dir.path()).unwrap();
    let report = SequentialExecutor::new(Arc::new(FakeServer::default()))
        .run_scripts(scripts)
        .await;

    assert_eq!(report.error_count, 1);
    assert_eq!(report.error_log.len(), 1);
    assert_eq!(report.message_log.len(), 2);
    assert!(report.message_log[0].text.starts_with("NOTICE 00000"));
    assert!(report.error_log[0].message.starts_with("WARNING 01000"));
}

#[tokio::test]
async fn test_missing_file_halts_remaining_queue() {
    let dir = TempDir::new().unwrap();
    write_script(dir.path(), "001.sql", "SELECT 1;");
    let doomed = write_script(dir.path(), "002.sql", "SELECT 2;");
    write_script(dir.path(), "003.sql", "SELECT 3;");

    let scripts = discover_scripts(dir.path()).unwrap();
    fs::remove_file(&doomed).unwrap();

    let server = Arc::new(FakeServer::default());
    let report = SequentialExecutor::new(server.clone())
        .run_scripts(scripts)
        .await;

    assert_eq!(server.executed(), vec!["SELECT 1;"]);
    assert_eq!(report.processed, 1);
    assert_eq!(
        report.outcome(),
        RunOutcome::Aborted {
            missing: doomed.clone()
        }
    );
    assert_eq!(
        report.status_line(),
        format!("File does not exist: {}", doomed.display())
    );
}

#[tokio::test]
async fn test_progress_after_each_file() {
    let dir = TempDir::new().unwrap();
    for name in ["001.sql", "002.sql", "003.sql", "004.sql", "005.sql", "006.sql"] {
        write_script(dir.path(), name, "SELECT 1;");
    }
    let paths = discover_scripts(dir.path())
        .unwrap()
        .into_iter()
        .map(|s| s.into_path())
        .collect();

    let (tx, mut rx) = progress_channel();
    let worker = SequentialExecutor::new(Arc::new(FakeServer::default()))
        .with_progress(tx)
        .spawn(paths);

    let mut percents = Vec::new();
    while let Some(event) = rx.recv().await {
        if let ProgressEvent::ScriptCompleted { percent, .. } = event {
            percents.push(percent);
        }
    }
    let report = worker.await.unwrap();

    assert_eq!(percents, vec![16.67, 33.33, 50.0, 66.67, 83.33, 100.0]);
    assert_eq!(report.processed, 6);
}

#[tokio::test]
async fn test_export_logs_after_run() {
    let dir = TempDir::new().unwrap();
    let scripts_dir = dir.path().join("scripts");
    write_script(&scripts_dir, "001.sql", "DO $$ BEGIN RAISE NOTICE 'hi'; END $$;");
    write_script(&scripts_dir, "002.sql", "SELEC broken;");

    let scripts = discover_scripts(&scripts_dir).unwrap();
    let report = SequentialExecutor::new(Arc::new(FakeServer::default()))
        .run_scripts(scripts)
        .await;

    let message_log = dir.path().join("messages.txt");
    let error_log = dir.path().join("errors.txt");
    report.export_message_log(&message_log).unwrap();
    report.export_error_log(&error_log).unwrap();

    let messages = fs::read_to_string(&message_log).unwrap();
    let errors = fs::read_to_string(&error_log).unwrap();
    assert!(messages.contains("NOTICE 00000: hello from script"));
    assert!(messages.contains("Error in file:"));
    assert!(!messages.ends_with(&format!("{LOG_SEPARATOR}\n")));
    assert_eq!(messages.matches(LOG_SEPARATOR).count(), 1);
    assert!(!errors.contains("NOTICE"));
    assert_eq!(errors.matches(LOG_SEPARATOR).count(), 1);
}
