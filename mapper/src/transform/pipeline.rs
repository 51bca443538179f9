//! End-to-end mapping run: load, join, write.
//!
//! # Example
//!
//! ```rust,no_run
//! use species_pinyin::{run, MappingConfig};
//!
//! let report = run(&MappingConfig::default())?;
//! println!("{} records", report.records);
//! # Ok::<(), species_pinyin::PipelineError>(())
//! ```

use std::collections::BTreeMap;

use super::joiner::{build, JoinResult, RunReport, SkippedRow};
use crate::config::MappingConfig;
use crate::emit::write_mapping;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning, log_warning_indent};
use crate::parser::{load_taxonomy, load_translations, SourceFormat};
use crate::phonetic::{HanyuPinyin, Romanizer};

/// Run the whole job with Hanyu Pinyin.
pub fn run(config: &MappingConfig) -> PipelineResult<RunReport> {
    run_with(config, &HanyuPinyin)
}

/// Run the whole job with a custom romanizer.
///
/// Each stage finishes before the next begins; nothing is written unless
/// both inputs load.
pub fn run_with(config: &MappingConfig, romanizer: &dyn Romanizer) -> PipelineResult<RunReport> {
    // Step 1: translations
    log_info(format!("📖 Reading translations: {}", config.translations.display()));
    let translations = load_translations(&config.translations)?;
    log_success(format!("{} translation entries", translations.len()));

    // Step 2: taxonomy
    log_info(format!("📖 Reading taxonomy: {}", config.taxonomy.display()));
    let taxonomy = load_taxonomy(&config.taxonomy, &config.columns, config.sheet.as_deref())?;
    match &taxonomy.format {
        SourceFormat::Workbook { sheet } => log_success(format!("Worksheet: {}", sheet)),
        SourceFormat::Delimited { encoding, delimiter } => {
            log_success(format!("Detected encoding: {}", encoding));
            log_success(format!("Detected separator: '{}'", format_delimiter(*delimiter)));
        }
    }
    log_success(format!(
        "Read {} rows ({} columns)",
        taxonomy.rows.len(),
        taxonomy.headers.len()
    ));

    // Step 3: join
    log_info("⚙️  Joining taxonomy with translations...");
    let result = build(&taxonomy.rows, &translations, romanizer);
    print_join_result(&result);

    // Step 4: write
    log_info(format!("💾 Writing {}", config.output.display()));
    write_mapping(&result.mapping, &config.output, config.indent)?;
    log_success(result.report.summary());

    Ok(result.report)
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

/// Print join result details
fn print_join_result(result: &JoinResult) {
    let report = &result.report;
    log_success(format!("{} records", report.records));
    log_info_indent(format!("{} with pinyin", report.translated), 1);
    log_info_indent(format!("{} without translation", report.untranslated), 1);

    if report.overwritten > 0 {
        log_warning(format!(
            "{} duplicate names (later rows replaced earlier ones)",
            report.overwritten
        ));
    }

    if !report.skipped.is_empty() {
        log_warning(format!("{} rows skipped", report.skipped.len()));
        for (reason, lines) in group_skipped(&report.skipped) {
            let sample: Vec<String> = lines.iter().take(5).map(|l| l.to_string()).collect();
            let more = if lines.len() > 5 {
                format!("... +{}", lines.len() - 5)
            } else {
                String::new()
            };
            log_warning_indent(format!("• {} (lines: {}{})", reason, sample.join(", "), more), 1);
        }
    }
}

/// Group skipped rows by reason, keeping line order within a group.
fn group_skipped(skipped: &[SkippedRow]) -> BTreeMap<&'static str, Vec<usize>> {
    let mut reasons: BTreeMap<&'static str, Vec<usize>> = BTreeMap::new();
    for skip in skipped {
        reasons.entry(skip.reason.describe()).or_default().push(skip.line);
    }
    reasons
}
