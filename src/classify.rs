//! Turns a raw `python -V` string and an install path into display names
//! and a shell function identifier.
//!
//! Both steps are driven by ordered rule tables; the first matching rule
//! wins. Supporting a new distribution means adding a row.

use std::collections::HashSet;
use std::path::Path;

use crate::model::{Naming, Vendor};

/// Framework root of python.org installers on macOS.
pub const MACPYTHON_ROOT: &str = "/Library/Frameworks/Python.framework";
/// Framework root of the interpreter shipped with macOS.
pub const SYSTEM_ROOT: &str = "/System/Library/Frameworks/Python.framework";
/// Prefix of distribution-managed interpreters on other Unix systems.
pub const SYSTEM_PREFIX: &str = "/usr";

/// Characters dropped when deriving a shell identifier.
const FORBIDDEN_CHARS: &[char] = &[':', '.', '(', ')', '[', ']', '{', '}'];
/// Characters replaced by `_` when deriving a shell identifier.
const SEPARATOR_CHARS: &[char] = &[' ', '-'];

struct VendorRule {
    vendor: Vendor,
    matches: fn(&str) -> bool,
    qualify: fn(&str) -> String,
}

const VENDOR_RULES: &[VendorRule] = &[
    VendorRule {
        vendor: Vendor::MacPython,
        matches: is_macpython_path,
        qualify: macpython_version,
    },
    VendorRule { vendor: Vendor::System, matches: is_system_path, qualify: system_version },
];

fn is_macpython_path(path: &str) -> bool {
    path.starts_with(MACPYTHON_ROOT)
}

fn is_system_path(path: &str) -> bool {
    path.starts_with(SYSTEM_ROOT) || path.starts_with(SYSTEM_PREFIX)
}

fn macpython_version(version: &str) -> String {
    format!("{version} -- MacPython")
}

fn system_version(version: &str) -> String {
    format!("System {version}")
}

struct ShortRule {
    marker: &'static str,
    extract: fn(&str) -> Option<String>,
}

const SHORT_RULES: &[ShortRule] = &[
    ShortRule { marker: "-- EPD", extract: epd_short },
    ShortRule { marker: "Anaconda", extract: anaconda_short },
    ShortRule { marker: "MacPython", extract: macpython_short },
];

// "Python 2.7.2 -- EPD 7.2-2 (64-bit)"
fn epd_short(version: &str) -> Option<String> {
    version.split("--").nth(1).map(|s| s.trim().to_string())
}

// "Python 2.7.5 :: Anaconda 1.6.1 (x86_64)"
fn anaconda_short(version: &str) -> Option<String> {
    version.split("::").nth(1).map(|s| s.trim().to_string())
}

// "Python 2.7.1 -- MacPython"
fn macpython_short(version: &str) -> Option<String> {
    let head = version.split("--").next()?;
    let number = head.split("Python").nth(1)?;
    Some(format!("MacPython {}", number.trim()))
}

/// Derive the vendor and vendor-qualified version string from the install path.
pub fn qualify_version(path: &str, raw_version: &str) -> (Vendor, String) {
    VENDOR_RULES
        .iter()
        .find(|rule| (rule.matches)(path))
        .map(|rule| (rule.vendor, (rule.qualify)(raw_version)))
        .unwrap_or_else(|| (Vendor::Other, raw_version.to_string()))
}

/// Transform a string into something usable as a shell function name.
///
/// Lowercases, removes `: . ( ) [ ] { }`, and turns spaces and hyphens into
/// underscores. Leading digits are left alone.
pub fn make_bash_func_string(s: &str) -> String {
    s.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if SEPARATOR_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Return the short display string and its shell identifier.
pub fn make_short_strings(version: &str) -> (String, String) {
    let short = SHORT_RULES
        .iter()
        .filter(|rule| version.contains(rule.marker))
        .find_map(|rule| (rule.extract)(version))
        .unwrap_or_else(|| version.to_string());
    let token = make_bash_func_string(&short);
    (short, token)
}

pub fn make_version_strings(path: &Path, raw_version: &str) -> (Vendor, Naming) {
    let (vendor, full) = qualify_version(&path.to_string_lossy(), raw_version);
    let (short, token) = make_short_strings(&full);
    (vendor, Naming { full, short, token })
}

/// Hands out unique function tokens for one generated file.
///
/// The first installation keeps its token; later ones with the same token
/// get `_2`, `_3`, and so on.
#[derive(Debug, Default)]
pub struct FunctionNames {
    used: HashSet<String>,
}

impl FunctionNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, token: &str) -> String {
        if self.used.insert(token.to_string()) {
            return token.to_string();
        }

        let mut suffix = 2usize;
        loop {
            let candidate = format!("{token}_{suffix}");
            if self.used.insert(candidate.clone()) {
                tracing::warn!(token, renamed = %candidate, "duplicate switch function name");
                return candidate;
            }
            suffix += 1;
        }
    }
}
