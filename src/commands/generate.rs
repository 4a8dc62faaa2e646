use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::classify::{FunctionNames, make_version_strings};
use crate::config::Settings;
use crate::emit::Dialect;
use crate::error::AppError;
use crate::index;
use crate::model::{Installation, Report};
use crate::probe::get_python_version;
use crate::scanner::{ExclusionSet, Scanner};
use crate::utils::display_path;

/// Detect installations, then either list them or write the switcher scripts.
///
/// Any probe or file error aborts the run; output files may be left
/// partially written.
pub fn execute_generate(settings: &Settings) -> Result<Report, AppError> {
    let exclusions = ExclusionSet::new(&settings.excluded_patterns)?;
    tracing::debug!(patterns = exclusions.len(), "compiled exclusion patterns");
    let quiet = settings.dry_run && settings.json;

    if !quiet {
        println!(
            "--- Searching all installed pythons, except those that match the following patterns: {:?}",
            settings.excluded_patterns
        );
    }

    let scanner = Scanner::new(index::from_source(&settings.index), exclusions);
    let paths = scanner.detect_all_python_installs();

    if !quiet {
        println!("--- Found {} results.", paths.len());
    }

    let mut installations =
        paths.into_iter().map(probe_installation).collect::<Result<Vec<_>, AppError>>()?;
    claim_function_names(&mut installations);

    if settings.dry_run {
        print_dry_run(&installations, settings.json)?;
        return Ok(Report { installations, written: Vec::new() });
    }

    let written = write_switchers(settings, &installations)?;
    Ok(Report { installations, written })
}

fn probe_installation(path: PathBuf) -> Result<Installation, AppError> {
    let raw_version = get_python_version(&path)?;
    let (vendor, naming) = make_version_strings(&path, &raw_version);
    tracing::debug!(path = %path.display(), %vendor, version = %naming.full, "classified");
    Ok(Installation { path, raw_version, vendor, naming })
}

/// Make every token unique so the listing and the scripts agree on names.
fn claim_function_names(installations: &mut [Installation]) {
    let mut names = FunctionNames::new();
    for install in installations {
        install.naming.token = names.claim(&install.naming.token);
    }
}

fn print_dry_run(installations: &[Installation], json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(installations)?);
        return Ok(());
    }

    for install in installations {
        println!("--- {:<50} (path: {})", install.naming.full, install.path.display());
    }
    Ok(())
}

fn write_switchers(
    settings: &Settings,
    installations: &[Installation],
) -> Result<Vec<PathBuf>, AppError> {
    let paths: Vec<PathBuf> =
        Dialect::ALL.iter().map(|dialect| settings.output_path(dialect.extension())).collect();
    let listed: Vec<String> = paths.iter().map(|path| display_path(path)).collect();
    println!("--- Saving selectors to {}", listed.join(", "));

    let mut outputs = Vec::with_capacity(paths.len());
    for (dialect, path) in Dialect::ALL.iter().zip(&paths) {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(dialect.preamble().as_bytes())?;
        tracing::debug!(%dialect, path = %path.display(), "opened output file");
        outputs.push((*dialect, writer));
    }

    for install in installations {
        let function_name = install.naming.function_name();
        println!(
            "--- Adding shell function to switch to {:<50} shell function: {:<50} (path: {})",
            install.naming.full,
            format!("{function_name}()"),
            install.path.display()
        );

        for (dialect, writer) in &mut outputs {
            writer.write_all(dialect.render(install, &function_name).as_bytes())?;
        }
    }

    for (_, writer) in &mut outputs {
        writer.flush()?;
    }

    println!(
        "--- Selectors saved. Don't forget to source the adequate generated file from your .bashrc, .zshrc or config.fish file"
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexSource;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn fake_python(path: &Path, version: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("#!/bin/sh\necho '{version}' >&2\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn settings(root: &Path, dry_run: bool) -> Settings {
        Settings {
            excluded_patterns: vec![".*virtualenv.*".to_string()],
            outfile_basename: root.join("out/.python_switchers"),
            dry_run,
            json: false,
            index: IndexSource::Walk(vec![root.join("pythons")]),
        }
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        fake_python(&temp.path().join("pythons/a/bin/python"), "Python 2.7.18");
        fs::create_dir_all(temp.path().join("out")).unwrap();

        let report = execute_generate(&settings(temp.path(), true)).unwrap();

        assert_eq!(report.installations.len(), 1);
        assert!(report.written.is_empty());
        assert_eq!(fs::read_dir(temp.path().join("out")).unwrap().count(), 0);
    }

    #[test]
    fn write_mode_emits_one_function_per_installation() {
        let temp = tempfile::tempdir().unwrap();
        fake_python(
            &temp.path().join("pythons/a/bin/python"),
            "Python 2.7.5 :: Anaconda 1.6.1 (x86_64)",
        );
        fake_python(&temp.path().join("pythons/b/bin/python3"), "Python 3.11.4");
        fake_python(&temp.path().join("pythons/.virtualenvs/c/bin/python"), "Python 3.9.0");
        fs::create_dir_all(temp.path().join("out")).unwrap();

        let report = execute_generate(&settings(temp.path(), false)).unwrap();

        assert_eq!(report.installations.len(), 2);
        assert_eq!(report.written.len(), 2);

        let shell = fs::read_to_string(temp.path().join("out/.python_switchers.sh")).unwrap();
        let fish = fs::read_to_string(temp.path().join("out/.python_switchers.fish")).unwrap();

        assert!(shell.starts_with("export PRISTINE_INIT_PATH=$PATH\n"));
        assert!(fish.starts_with("set -gx PRISTINE_INIT_PATH $PATH\n"));
        assert_eq!(shell.matches("()\n{").count(), 2);
        assert_eq!(fish.matches("function select_").count(), 2);
        assert!(shell.contains("select_anaconda_161_x86_64()"));
        assert!(fish.contains("function select_python_3114"));
        assert!(!shell.contains("3.9.0"));
    }

    #[test]
    fn colliding_tokens_are_renamed() {
        let temp = tempfile::tempdir().unwrap();
        fake_python(&temp.path().join("pythons/a/bin/python"), "Python 3.11.4");
        fake_python(&temp.path().join("pythons/b/bin/python"), "Python 3.11.4");
        fs::create_dir_all(temp.path().join("out")).unwrap();

        execute_generate(&settings(temp.path(), false)).unwrap();

        let shell = fs::read_to_string(temp.path().join("out/.python_switchers.sh")).unwrap();
        assert!(shell.contains("select_python_3114()"));
        assert!(shell.contains("select_python_3114_2()"));
    }

    #[test]
    fn dry_run_reports_renamed_tokens() {
        let temp = tempfile::tempdir().unwrap();
        fake_python(&temp.path().join("pythons/a/bin/python"), "Python 3.11.4");
        fake_python(&temp.path().join("pythons/b/bin/python"), "Python 3.11.4");

        let report = execute_generate(&settings(temp.path(), true)).unwrap();

        let tokens: Vec<&str> =
            report.installations.iter().map(|install| install.naming.token.as_str()).collect();
        assert_eq!(tokens, vec!["python_3114", "python_3114_2"]);
        assert!(report.written.is_empty());
    }

    #[test]
    fn invalid_pattern_aborts() {
        let temp = tempfile::tempdir().unwrap();
        let mut settings = settings(temp.path(), true);
        settings.excluded_patterns.push("[".to_string());

        assert!(matches!(execute_generate(&settings), Err(AppError::Pattern(_))));
    }
}
