//! Renders switch functions for POSIX shells and fish.
//!
//! Display strings are interpolated as-is. A version string containing
//! quotes, `$` or backticks produces a broken or unsafe script.

use std::fmt;

use crate::model::Installation;

/// Variable holding `PATH` as it was when the generated file was sourced.
pub const PRISTINE_PATH_VAR: &str = "PRISTINE_INIT_PATH";
/// Variable set to the short version string for use in prompts.
pub const PROMPT_VAR: &str = "PROMPT_PYTHON_VERSION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// bash, zsh and other POSIX-style shells.
    Posix,
    Fish,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Posix, Dialect::Fish];

    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Posix => ".sh",
            Dialect::Fish => ".fish",
        }
    }

    /// First line of a generated file; captures the current `PATH`.
    pub fn preamble(&self) -> String {
        match self {
            Dialect::Posix => format!("export {PRISTINE_PATH_VAR}=$PATH\n"),
            Dialect::Fish => format!("set -gx {PRISTINE_PATH_VAR} $PATH\n"),
        }
    }

    /// Render the switch function for one installation.
    ///
    /// `function_name` is passed separately so callers can rename on collision.
    pub fn render(&self, install: &Installation, function_name: &str) -> String {
        let dir = install.bin_dir().display();
        let full = &install.naming.full;
        let short = &install.naming.short;
        match self {
            Dialect::Posix => format!(
                "{function_name}()\n\
                 {{\n    \
                 echo \"Setting environment for {full}\"\n    \
                 export PATH=\"{dir}:${{{PRISTINE_PATH_VAR}}}\"\n    \
                 export {PROMPT_VAR}=\"{short}\"\n\
                 }}\n\n"
            ),
            Dialect::Fish => format!(
                "function {function_name}\n    \
                 echo \"Setting environment for {full}\"\n    \
                 set -gx PATH {dir} ${PRISTINE_PATH_VAR}\n    \
                 set -gx {PROMPT_VAR} \"{short}\"\n\
                 end\n\n"
            ),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Posix => write!(f, "sh"),
            Dialect::Fish => write!(f, "fish"),
        }
    }
}
