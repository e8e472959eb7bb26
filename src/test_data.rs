#![cfg(feature = "__test_data")]

use std::path::PathBuf;

use super::Segmenter;

#[test]
fn test_data() {
    crate::test_cases::run(&segmenter(crate_data_dir()));
}

/// Load the reference tables with the prefix length they were tuned for
pub fn segmenter(dir: PathBuf) -> Segmenter {
    Segmenter::from_dir(2, &dir).unwrap_or_else(|e| panic!("failed to load {:?}: {}", dir, e))
}

pub fn crate_data_dir() -> PathBuf {
    PathBuf::from(format!("{}/data", env!("CARGO_MANIFEST_DIR")))
}
