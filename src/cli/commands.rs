use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use crate::excel::{ExcelExporter, WorkbookInspector};
use crate::formula::FormulaTemplater;
use crate::model::ModelBuilder;
use crate::types::GenerationReport;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the generate command, after argument parsing
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub verbose: bool,
}

/// Load the config file (if any) and apply command-line overrides
pub fn resolve_config(options: &GenerateOptions) -> ModelResult<ModelConfig> {
    let mut config = match &options.config {
        Some(path) => ModelConfig::from_file(path)?,
        None => ModelConfig::default(),
    };
    if let Some(dir) = &options.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(output) = &options.output {
        config.output = output.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Execute the generate command
pub fn generate(options: GenerateOptions) -> ModelResult<GenerationReport> {
    let config = resolve_config(&options)?;
    let output = config.output.clone();

    println!("{}", "📊 gridmodel - Generating workbook".bold().green());
    println!("   Inputs: {}", config.input_dir.display());
    println!("   Output: {}\n", output.display());

    let builder = ModelBuilder::new(config);
    let (plan, report) = builder.build()?;

    if options.verbose {
        for sheet in &plan.sheets {
            println!(
                "   {} {} ({} cells, {} formulas)",
                "•".cyan(),
                sheet.name.bright_blue(),
                sheet.cells.len(),
                sheet.formula_count()
            );
        }
        println!();
    }

    ExcelExporter::new(builder.theme().clone()).export(&plan, &output)?;

    if !report.is_clean() {
        println!("{}", format!("⚠️  {} warning(s):", report.warnings.len()).yellow().bold());
        for w in &report.warnings {
            println!("   {} {}", w.sheet.bright_yellow(), w.message);
        }
        println!();
    }

    println!("{}", "✅ Workbook written".bold().green());
    println!("   {} sheets → {}\n", plan.sheets.len(), output.display());

    if options.strict && !report.is_clean() {
        return Err(ModelError::Strict(report.warnings.len()));
    }
    Ok(report)
}

/// Shift a formula by one offset, or list it for offsets `0..years`
pub fn shift_lines(formula: &str, offset: Option<u32>, years: Option<u32>) -> Vec<String> {
    let templater = FormulaTemplater::default();
    match years {
        Some(n) => templater
            .expand(formula, n)
            .into_iter()
            .enumerate()
            .map(|(i, f)| format!("{}\t{}", i, f))
            .collect(),
        None => vec![templater.shift(formula, offset.unwrap_or(1))],
    }
}

/// Execute the shift command
pub fn shift(formula: String, offset: Option<u32>, years: Option<u32>) -> ModelResult<()> {
    for line in shift_lines(&formula, offset, years) {
        println!("{}", line);
    }
    Ok(())
}

/// Execute the inspect command
pub fn inspect(file: PathBuf, sheet: Option<String>, json: bool) -> ModelResult<()> {
    let mut inspector = WorkbookInspector::open(&file)?;

    match sheet {
        Some(name) => {
            if !inspector.sheet_names().contains(&name) {
                return Err(ModelError::Inspect(format!(
                    "Sheet '{}' not found in {}",
                    name,
                    file.display()
                )));
            }
            let formulas = inspector.formulas(&name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&formulas)?);
                return Ok(());
            }
            println!("{}", format!("🔍 {} ({} formulas)", name, formulas.len()).bold().green());
            for cell in formulas {
                println!("   {:<6} {}", cell.address.cyan(), cell.formula);
            }
        }
        None => {
            let summary = inspector.summary()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("{}", format!("🔍 {}", file.display()).bold().green());
            for s in summary {
                println!(
                    "   {:<28} {:>4} rows {:>3} cols {:>5} formulas",
                    s.name.bright_blue(),
                    s.rows,
                    s.cols,
                    s.formula_cells
                );
            }
        }
    }
    println!();
    Ok(())
}

/// Execute the init command: write the default config as YAML
pub fn init(path: PathBuf, force: bool) -> ModelResult<()> {
    write_default_config(&path, force)?;
    println!("{}", "✅ Config written".bold().green());
    println!("   {}\n", path.display());
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> ModelResult<()> {
    if path.exists() && !force {
        return Err(ModelError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    fs::write(path, ModelConfig::default().to_yaml()?)?;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
