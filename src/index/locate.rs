use std::process::Command;

use super::PathIndex;

/// Query passed to `locate`; matches both `bin/python` and `bin/python3`.
const LOCATE_QUERY: &str = "bin/python";

/// Candidates from the system `locate` database.
pub struct LocateIndex {
    program: String,
}

impl LocateIndex {
    pub fn new() -> Self {
        Self::with_program("locate")
    }

    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }
}

impl Default for LocateIndex {
    fn default() -> Self {
        LocateIndex::new()
    }
}

impl PathIndex for LocateIndex {
    fn candidates(&self) -> Vec<String> {
        let output = match Command::new(&self.program).arg(LOCATE_QUERY).output() {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(program = %self.program, error = %err, "path index lookup failed");
                return Vec::new();
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if lookup_failed(output.status.success(), &stderr) {
            tracing::warn!(
                program = %self.program,
                status = %output.status,
                stderr = %stderr.trim(),
                "path index lookup exited with failure"
            );
        } else if !output.status.success() {
            tracing::debug!(program = %self.program, status = %output.status, "no index matches");
        }

        parse_locate_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &'static str {
        "locate"
    }
}

/// `locate` exits 1 with nothing on stderr when the query has no matches.
fn lookup_failed(success: bool, stderr: &str) -> bool {
    !success && !stderr.trim().is_empty()
}

fn parse_locate_output(stdout: &str) -> Vec<String> {
    stdout.lines().filter(|line| !line.is_empty()).map(str::to_string).collect()
}
