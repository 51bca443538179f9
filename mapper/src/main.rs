//! Species Pinyin CLI - build the pinyin lookup table for species names
//!
//! # Main Command
//!
//! ```bash
//! species-pinyin                         # birdMap.json + eBird_taxonomy_v2025.xlsx -> pinyin_mapping.json
//! species-pinyin build -x taxonomy.csv   # same, with overrides
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! species-pinyin pinyin "Emu(鸸鹋)"       # Romanize one name
//! species-pinyin parse taxonomy.xlsx     # Print validated taxonomy rows as JSON
//! species-pinyin check pinyin_mapping.json
//! ```

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use species_pinyin::logs::log_error;
use species_pinyin::{
    extract_localized_name, load_taxonomy, read_mapping, run, to_phonetic, ColumnNames,
    EmitError, HanyuPinyin, MappingConfig, PipelineError, SourceFormat,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "species-pinyin")]
#[command(about = "Build a pinyin lookup table for species names", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Join taxonomy and translations, write the mapping (default)
    Build(BuildArgs),

    /// Romanize a localized name or an "English(Localized)" string
    Pinyin {
        /// Text to romanize
        text: String,
    },

    /// Parse a taxonomy file and print its valid rows as JSON
    Parse {
        /// Taxonomy workbook or CSV
        input: PathBuf,

        /// Worksheet name (first sheet if not specified)
        #[arg(long)]
        sheet: Option<String>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Read back a written mapping and report its size
    Check {
        /// Mapping JSON file
        mapping: PathBuf,
    },
}

#[derive(Args, Clone, Default)]
struct ColumnArgs {
    /// Header of the English common name column
    #[arg(long)]
    common_column: Option<String>,

    /// Header of the scientific name column
    #[arg(long)]
    scientific_column: Option<String>,

    /// Header of the species code column
    #[arg(long)]
    code_column: Option<String>,
}

impl ColumnArgs {
    fn apply(self, columns: &mut ColumnNames) {
        if let Some(v) = self.common_column {
            columns.common_name = v;
        }
        if let Some(v) = self.scientific_column {
            columns.scientific_name = v;
        }
        if let Some(v) = self.code_column {
            columns.species_code = v;
        }
    }
}

#[derive(Args, Clone, Default)]
struct BuildArgs {
    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Translation table (JSON object: name -> "Name(Localized)")
    #[arg(short, long)]
    translations: Option<PathBuf>,

    /// Taxonomy workbook or CSV
    #[arg(short = 'x', long)]
    taxonomy: Option<PathBuf>,

    /// Output mapping file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worksheet name (first sheet if not specified)
    #[arg(long)]
    sheet: Option<String>,

    #[command(flatten)]
    columns: ColumnArgs,

    /// Spaces per indentation level in the output
    #[arg(long)]
    indent: Option<usize>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl BuildArgs {
    fn into_config(self) -> Result<MappingConfig, PipelineError> {
        let mut config = match &self.config {
            Some(path) => MappingConfig::from_file(path)?,
            None => MappingConfig::default(),
        };

        if let Some(v) = self.translations {
            config.translations = v;
        }
        if let Some(v) = self.taxonomy {
            config.taxonomy = v;
        }
        if let Some(v) = self.output {
            config.output = v;
        }
        if self.sheet.is_some() {
            config.sheet = self.sheet;
        }
        if let Some(v) = self.indent {
            config.indent = v;
        }
        self.columns.apply(&mut config.columns);

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Build(cli.build)) {
        Commands::Build(args) => cmd_build(args),
        Commands::Pinyin { text } => cmd_pinyin(&text),
        Commands::Parse { input, sheet, columns } => cmd_parse(&input, sheet.as_deref(), columns),
        Commands::Check { mapping } => cmd_check(&mapping),
    };

    if let Err(e) = result {
        log_error(format!("Error [{}]: {}", e.kind(), e));
        std::process::exit(e.exit_code());
    }
}

fn cmd_build(args: BuildArgs) -> Result<(), PipelineError> {
    species_pinyin::logs::LOGGER.set_quiet(args.quiet);
    let config = args.into_config()?;

    run(&config)?;

    println!("Done, written to {}", config.output.display());
    Ok(())
}

fn cmd_pinyin(text: &str) -> Result<(), PipelineError> {
    // Accept either a bare localized name or a composite string.
    let extracted = extract_localized_name(Some(text));
    let localized = if extracted.is_empty() { text } else { extracted.as_str() };
    let phonetic = to_phonetic(&HanyuPinyin, localized);

    let out = json!({
        "localized": localized,
        "pinyin": phonetic.full,
        "initials": phonetic.initials,
    });
    println!("{}", serde_json::to_string_pretty(&out).map_err(EmitError::from)?);
    Ok(())
}

fn cmd_parse(input: &Path, sheet: Option<&str>, columns: ColumnArgs) -> Result<(), PipelineError> {
    eprintln!("📄 Parsing taxonomy: {}", input.display());

    let mut names = ColumnNames::default();
    columns.apply(&mut names);
    let table = load_taxonomy(input, &names, sheet)?;

    match &table.format {
        SourceFormat::Workbook { sheet } => eprintln!("   Worksheet: {}", sheet),
        SourceFormat::Delimited { encoding, delimiter } => {
            eprintln!("   Encoding: {}", encoding);
            eprintln!("   Delimiter: '{}'", delimiter.escape_default());
        }
    }
    eprintln!("   Columns: {}", table.headers.join(", "));

    let (valid, skipped): (Vec<_>, Vec<_>) = table
        .rows
        .iter()
        .map(|row| row.validate())
        .partition(Result::is_ok);
    let valid: Vec<_> = valid.into_iter().filter_map(Result::ok).collect();

    eprintln!("✅ {} valid rows, {} skipped", valid.len(), skipped.len());
    println!("{}", serde_json::to_string_pretty(&valid).map_err(EmitError::from)?);
    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), PipelineError> {
    let mapping = read_mapping(path)?;
    let with_pinyin = mapping.iter().filter(|(_, r)| !r.pinyin.is_empty()).count();

    println!(
        "{}: {} records, {} with pinyin",
        path.display(),
        mapping.len(),
        with_pinyin
    );
    Ok(())
}
