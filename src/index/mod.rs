pub mod locate;
pub mod walk;

pub use locate::LocateIndex;
pub use walk::WalkIndex;

use crate::config::IndexSource;

/// Source of candidate interpreter paths.
pub trait PathIndex {
    /// Every candidate path, in index order. Duplicates are kept.
    fn candidates(&self) -> Vec<String>;

    /// Short label for log and console output.
    fn name(&self) -> &'static str;
}

pub fn from_source(source: &IndexSource) -> Box<dyn PathIndex> {
    match source {
        IndexSource::Locate => Box::new(LocateIndex::new()),
        IndexSource::Walk(roots) => Box::new(WalkIndex::new(roots.clone())),
    }
}
