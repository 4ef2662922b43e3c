use super::*;
use crate::formula::shift as shift_formula;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// =========================================================================
// shift Tests
// =========================================================================

#[test]
fn test_shift_lines_single_offset() {
    assert_eq!(shift_lines("=B5+B6", Some(2), None), vec!["=D5+D6"]);
}

#[test]
fn test_shift_lines_defaults_to_next_year() {
    assert_eq!(shift_lines("=SUM(B3:B6)", None, None), vec!["=SUM(C3:C6)"]);
}

#[test]
fn test_shift_lines_expand_years() {
    let lines = shift_lines("='Assumptions_Macro'!C2", None, Some(3));
    assert_eq!(
        lines,
        vec![
            "0\t='Assumptions_Macro'!C2",
            "1\t='Assumptions_Macro'!D2",
            "2\t='Assumptions_Macro'!E2",
        ]
    );
}

#[test]
fn test_shift_lines_matches_library_shift() {
    let formula = "=-B3*'Assumptions_UK_Reg'!C4";
    assert_eq!(shift_lines(formula, Some(4), None), vec![shift_formula(formula, 4)]);
}

// =========================================================================
// Config resolution Tests
// =========================================================================

#[test]
fn test_resolve_config_overrides() {
    let options = GenerateOptions {
        input_dir: Some(PathBuf::from("inputs")),
        output: Some(PathBuf::from("out.xlsx")),
        ..Default::default()
    };
    let config = resolve_config(&options).unwrap();
    assert_eq!(config.input_dir, PathBuf::from("inputs"));
    assert_eq!(config.output, PathBuf::from("out.xlsx"));
}

#[test]
fn test_resolve_config_flags_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.yaml");
    fs::write(&path, "input_dir: from_file\noutput: file.xlsx\n").unwrap();

    let options = GenerateOptions {
        config: Some(path),
        output: Some(PathBuf::from("flag.xlsx")),
        ..Default::default()
    };
    let config = resolve_config(&options).unwrap();
    assert_eq!(config.input_dir, PathBuf::from("from_file"));
    assert_eq!(config.output, PathBuf::from("flag.xlsx"));
}

#[test]
fn test_resolve_config_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.yaml");
    fs::write(&path, "years:\n  forecast_years: 0\n").unwrap();

    let options = GenerateOptions {
        config: Some(path),
        ..Default::default()
    };
    assert!(matches!(resolve_config(&options), Err(ModelError::Config(_))));
}

// =========================================================================
// generate / init Tests
// =========================================================================

#[test]
fn test_generate_strict_fails_on_missing_inputs() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("model.xlsx");
    let options = GenerateOptions {
        input_dir: Some(dir.path().to_path_buf()),
        output: Some(output.clone()),
        strict: true,
        ..Default::default()
    };

    let result = generate(options);
    assert!(matches!(result, Err(ModelError::Strict(8))));
    // the workbook is still written before strict mode fails
    assert!(output.exists());
}

#[test]
fn test_generate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let options = GenerateOptions {
        input_dir: Some(dir.path().to_path_buf()),
        output: Some(dir.path().join("model.xlsx")),
        ..Default::default()
    };
    let report = generate(options).unwrap();
    assert_eq!(report.warnings.len(), 8);
}

#[test]
fn test_write_default_config_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gridmodel.yaml");

    write_default_config(&path, false).unwrap();
    let written = ModelConfig::from_file(&path).unwrap();
    assert_eq!(written, ModelConfig::default());

    assert!(write_default_config(&path, false).is_err());
    assert!(write_default_config(&path, true).is_ok());
}
