use std::{
    error::Error,
    io,
    path::Path,
    process::{Command, Output},
    str,
};

const ETA_PATH: &str = "./target/debug/eta";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_source(src_path: &Path) -> Result<Output, io::Error> {
    Command::new(ETA_PATH).arg(src_path).output()
}

/// Runs `eta` against a source file and asserts its stdout/stderr match
/// `expected`, plus that the process exited successfully.
pub fn check_run(src_path: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_source(src_path)?;
    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "eta exited with status {:?}",
        output.status.code()
    );
    Ok(())
}

/// Runs `eta` against a source file expected to fail (parse or evaluation
/// error) and asserts the process exits with a nonzero status.
pub fn check_failing(src_path: &Path) -> Result<(), Box<dyn Error>> {
    let output = run_source(src_path)?;
    assert!(
        !output.status.success(),
        "eta should have exited with a nonzero status for {}",
        src_path.display()
    );
    Ok(())
}

/// Like [`check_failing`], but also asserts the diagnostic printed to
/// stderr contains `needle` (e.g. a specific error message).
pub fn check_failing_with_message(src_path: &Path, needle: &str) -> Result<(), Box<dyn Error>> {
    let output = run_source(src_path)?;
    assert!(
        !output.status.success(),
        "eta should have exited with a nonzero status for {}",
        src_path.display()
    );
    let stderr = str::from_utf8(&output.stderr)?;
    assert!(
        stderr.contains(needle),
        "expected stderr to contain {needle:?}, got {stderr:?}"
    );
    Ok(())
}
