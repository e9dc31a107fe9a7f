/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use lectern::file_utils::FileManager;
use std::path::Path;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "lesson.md", "content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path inserts the suffix before the extension
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/chapter1.md");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "clean", "md");

    assert_eq!(output_path, Path::new("/tmp/output/chapter1.clean.md"));
}

/// Test that find_files walks subdirectories and filters by extension
#[test]
fn test_find_files_withMixedExtensions_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("chapter2");
    FileManager::ensure_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "b.md", "b")?;
    common::create_test_file(temp_dir.path(), "a.MD", "a")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "skip")?;
    common::create_test_file(&nested, "c.md", "c")?;

    let files = FileManager::find_files(temp_dir.path(), ".md")?;
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names.len(), 3);
    assert!(names.contains(&"a.MD".to_string()));
    assert!(names.contains(&"b.md".to_string()));
    assert!(names.contains(&"c.md".to_string()));

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("lesson.clean.md");

    FileManager::write_to_file(&target, "# Title")?;

    assert_eq!(FileManager::read_to_string(&target)?, "# Title");
    Ok(())
}

/// Test that reading a missing file names it in the error
#[test]
fn test_read_to_string_withMissingFile_shouldNamePath() {
    let error = FileManager::read_to_string("definitely_missing_lesson.md").unwrap_err();
    assert!(error.to_string().contains("definitely_missing_lesson.md"));
}
