use std::path::Path;
use std::process::Command;

use crate::error::AppError;

/// Run `<path> -V` and return the version line, trimmed.
///
/// Python 3 prints its version on stdout and Python 2 on stderr, so stdout
/// is preferred and stderr used when stdout is empty. Startup warnings on
/// stderr never shadow a version on stdout. A non-zero exit is not an error;
/// whatever was printed is returned. There is no timeout.
pub fn get_python_version(path: &Path) -> Result<String, AppError> {
    let output = Command::new(path)
        .arg("-V")
        .output()
        .map_err(|source| AppError::Probe { path: path.to_path_buf(), source })?;

    if !output.status.success() {
        tracing::warn!(path = %path.display(), status = %output.status, "version probe failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };

    Ok(text.trim().to_string())
}
