//! TOML scenario files and input validation.
//!
//! A scenario bundles one simulation input so runs can be kept under
//! version control and replayed exactly:
//!
//! ```toml
//! [scenario]
//! name = "belady-classic"
//! description = "Silberschatz reference string, three frames"
//! reference_string = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2]
//! frames = 3
//! policy = "fifo"
//! speed = 7
//! ```

use pagesim_core::{Page, SimError, MAX_FRAMES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level TOML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub scenario: Scenario,
}

/// One saved simulation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub reference_string: Vec<Page>,
    pub frames: usize,
    pub policy: String,
    /// Initial playback speed (1-10), optional.
    pub speed: Option<u8>,
}

/// Load and validate a scenario file.
pub fn load_scenario(path: &Path) -> Result<Scenario, SimError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SimError::ScenarioError(format!("{}: {e}", path.display())))?;
    let file: ScenarioFile = toml::from_str(&raw)
        .map_err(|e| SimError::ScenarioError(format!("{}: {e}", path.display())))?;
    validate_input(&file.scenario.reference_string, file.scenario.frames)?;
    Ok(file.scenario)
}

/// Reject malformed input before the engine ever sees it.
pub fn validate_input(pages: &[Page], frames: usize) -> Result<(), SimError> {
    if pages.is_empty() {
        return Err(SimError::EmptyReferenceString);
    }
    if !(1..=MAX_FRAMES).contains(&frames) {
        return Err(SimError::InvalidFrameCount(frames));
    }
    Ok(())
}

/// Parse a comma- or whitespace-separated reference string.
pub fn parse_pages(raw: &str) -> Result<Vec<Page>, SimError> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Page>()
                .map_err(|_| SimError::ScenarioError(format!("invalid page id '{token}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_comma_and_space_separated_pages() {
        assert_eq!(parse_pages("7,0, 1 2").unwrap(), vec![7, 0, 1, 2]);
        assert_eq!(parse_pages("  3  ").unwrap(), vec![3]);
    }

    #[test]
    fn rejects_non_numeric_pages() {
        assert!(matches!(
            parse_pages("1,x,3"),
            Err(SimError::ScenarioError(_))
        ));
    }

    #[test]
    fn validates_bounds() {
        assert_eq!(
            validate_input(&[], 3),
            Err(SimError::EmptyReferenceString)
        );
        assert_eq!(
            validate_input(&[1], 0),
            Err(SimError::InvalidFrameCount(0))
        );
        assert_eq!(
            validate_input(&[1], 11),
            Err(SimError::InvalidFrameCount(11))
        );
        assert_eq!(validate_input(&[1], 10), Ok(()));
    }

    #[test]
    fn loads_a_valid_scenario_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[scenario]
name = "demo"
reference_string = [1, 2, 3, 4, 1, 2, 5]
frames = 4
policy = "lru"
"#
        )
        .unwrap();
        let scenario = load_scenario(file.path()).unwrap();
        assert_eq!(scenario.name, "demo");
        assert_eq!(scenario.reference_string.len(), 7);
        assert_eq!(scenario.speed, None);
    }

    #[test]
    fn rejects_scenario_with_bad_frame_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[scenario]
name = "broken"
reference_string = [1]
frames = 0
policy = "fifo"
"#
        )
        .unwrap();
        assert_eq!(
            load_scenario(file.path()),
            Err(SimError::InvalidFrameCount(0))
        );
    }
}
