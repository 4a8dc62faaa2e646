mod common;

use assert_fs::prelude::*;
use common::{fake_python, isolated};
use predicates::prelude::*;

#[test]
fn config_file_adds_exclusions_and_basename() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("home").create_dir_all().unwrap();
    fake_python(&temp, "pythons/keep/bin/python", "Python 3.12.1");
    fake_python(&temp, "pythons/legacy/bin/python", "Python 2.7.18");

    let out = temp.child("generated/switch");
    temp.child("generated").create_dir_all().unwrap();
    temp.child("config/python-switchers/config.toml")
        .write_str(&format!(
            "exclude = [\".*/legacy/.*\"]\noutfile_basename = \"{}\"\n",
            out.path().display()
        ))
        .unwrap();

    isolated(&temp)
        .arg("--search-root")
        .arg(temp.child("pythons").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Found 1 results."));

    temp.child("generated/switch.sh").assert(predicate::str::contains("select_python_3121()"));
    temp.child("generated/switch.fish").assert(predicate::path::exists());
}

#[test]
fn no_default_excludes_keeps_virtualenvs() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("home").create_dir_all().unwrap();
    fake_python(&temp, "pythons/.virtualenvs/env/bin/python", "Python 3.9.0");

    isolated(&temp)
        .arg("-d")
        .arg("--no-default-excludes")
        .arg("--search-root")
        .arg(temp.child("pythons").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Found 1 results."));
}

#[test]
fn malformed_config_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("home").create_dir_all().unwrap();
    temp.child("config/python-switchers/config.toml").write_str("exclude = [").unwrap();

    isolated(&temp)
        .arg("-d")
        .arg("--search-root")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
}
