// Kept in its own test binary: it changes the process working directory.

#[cfg(target_os = "linux")]
#[test]
fn test_unresolvable_display_root_is_io_error() {
    use promptcat::errors::PromptError;
    use promptcat::reporting::SilentReporter;
    use promptcat::Aggregator;
    use std::path::Path;
    use std::{env, fs};
    use tempfile::tempdir;

    let scan = tempdir().unwrap();
    fs::write(scan.path().join("main.ts"), "x").unwrap();

    let gone = tempdir().unwrap();
    let gone_path = gone.path().to_path_buf();
    env::set_current_dir(&gone_path).unwrap();
    fs::remove_dir(&gone_path).unwrap();

    let result =
        Aggregator::default().aggregate(scan.path(), Path::new("project"), &mut SilentReporter);

    match result {
        Err(PromptError::IoError(_)) => {}
        other => panic!("Expected IoError, got {:?}", other),
    }
}
