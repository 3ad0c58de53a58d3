//! Expected-results file naming and discovery.

use crate::errors::SpecError;
use std::fs;
use std::path::{Path, PathBuf};

const PREFIX: &str = "parses-";
const SUFFIX: &str = ".txt";

/// An expected-results file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedResultsFile {
    pub path: PathBuf,
    /// Path relative to the directory that was searched.
    pub relative: String,
    pub lang: String,
    pub desc: Option<String>,
}

/// `parses-{desc-}{lang}.txt`
pub fn expected_results_name(lang: &str, desc: Option<&str>) -> String {
    match desc {
        Some(desc) if !desc.is_empty() => format!("{}{}-{}{}", PREFIX, desc, lang, SUFFIX),
        _ => format!("{}{}{}", PREFIX, lang, SUFFIX),
    }
}

pub fn expected_results_path(srcdir: &Path, lang: &str, desc: Option<&str>) -> PathBuf {
    srcdir.join(expected_results_name(lang, desc))
}

/// Split a file name into `(lang, desc)`. The language is the last
/// `-`-separated component.
pub fn parse_expected_results_name(name: &str) -> Option<(String, Option<String>)> {
    let stem = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    match stem.rsplit_once('-') {
        Some((desc, lang)) if !desc.is_empty() && !lang.is_empty() => {
            Some((lang.to_string(), Some(desc.to_string())))
        }
        Some(_) => None,
        None if !stem.is_empty() => Some((stem.to_string(), None)),
        None => None,
    }
}

/// Find all expected-results files under `dir`, sorted by relative path.
pub fn discover_expected_results(dir: &Path) -> Result<Vec<ExpectedResultsFile>, SpecError> {
    let mut files = Vec::new();
    discover_recursive(dir, dir, &mut files)?;
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

fn discover_recursive(
    base: &Path,
    dir: &Path,
    files: &mut Vec<ExpectedResultsFile>,
) -> Result<(), SpecError> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    })? {
        let entry = entry.map_err(|e| SpecError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            discover_recursive(base, &path, files)?;
            continue;
        }
        let parsed = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_expected_results_name);
        if let Some((lang, desc)) = parsed {
            let relative = path.strip_prefix(base).unwrap_or(&path).display().to_string();
            files.push(ExpectedResultsFile {
                path,
                relative,
                lang,
                desc,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_names() {
        assert_eq!(expected_results_name("en", None), "parses-en.txt");
        assert_eq!(expected_results_name("en", Some("")), "parses-en.txt");
        assert_eq!(
            expected_results_name("en", Some("pos-spell")),
            "parses-pos-spell-en.txt"
        );
        assert_eq!(
            expected_results_path(Path::new("tests"), "ru", None),
            PathBuf::from("tests/parses-ru.txt")
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_expected_results_name("parses-en.txt"),
            Some(("en".to_string(), None))
        );
        assert_eq!(
            parse_expected_results_name("parses-pos-spell-en.txt"),
            Some(("en".to_string(), Some("pos-spell".to_string())))
        );
        assert_eq!(parse_expected_results_name("parses-.txt"), None);
        assert_eq!(parse_expected_results_name("parses--en.txt"), None);
        assert_eq!(parse_expected_results_name("parses-en.ron"), None);
        assert_eq!(parse_expected_results_name("linkages.ron"), None);
    }

    #[test]
    fn test_discover_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let files = discover_expected_results(&dir).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(names, vec!["parses-en.txt", "parses-pos-spell-en.txt"]);
        assert_eq!(files[1].desc.as_deref(), Some("pos-spell"));
    }

    #[test]
    fn test_discover_nested() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("lt")).unwrap();
        fs::write(dir.path().join("lt").join("parses-lt.txt"), "").unwrap();
        fs::write(dir.path().join("parses-en.txt"), "").unwrap();
        fs::write(dir.path().join("README"), "").unwrap();

        let files = discover_expected_results(dir.path()).unwrap();
        let langs: Vec<_> = files.iter().map(|f| f.lang.as_str()).collect();
        assert_eq!(langs, vec!["lt", "en"]);
        assert!(files[0].relative.ends_with("parses-lt.txt"));
    }

    #[test]
    fn test_discover_missing_dir() {
        let files = discover_expected_results(Path::new("/nonexistent/dir")).unwrap();
        assert!(files.is_empty());
    }
}
