use std::fs;
use std::os::unix::fs::PermissionsExt;

use assert_cmd::Command;
use assert_fs::prelude::*;

pub fn command() -> Command {
    Command::cargo_bin("python-switchers").expect("binary exists")
}

/// Create an executable script at `relative` that prints `version` on stderr
/// when run with `-V`.
pub fn fake_python(root: &assert_fs::TempDir, relative: &str, version: &str) {
    let child = root.child(relative);
    child.write_str(&format!("#!/bin/sh\necho '{version}' >&2\n")).unwrap();
    fs::set_permissions(child.path(), fs::Permissions::from_mode(0o755)).unwrap();
}

/// Command with `HOME` and `XDG_CONFIG_HOME` isolated under `temp`.
pub fn isolated(temp: &assert_fs::TempDir) -> Command {
    let mut cmd = command();
    cmd.env("HOME", temp.child("home").path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .env_remove("RUST_LOG");
    cmd
}
