use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use vtdump_core::config::parse_pointer_threshold;
use vtdump_core::prelude::*;
use vtdump_utils::{LogFormat, LogLevel, info, init_logging_with_level, logging};

/// Dump C++ virtual tables of an ELF executable or object file with every slot resolved.
#[derive(Parser, Debug)]
#[command(name = "vtdump")]
#[command(version)]
#[command(
    about = "Dump C++ virtual tables of an ELF executable or object file with every slot resolved",
    long_about = None
)]
struct Cli
{
    /// ELF executable, shared object or relocatable object (.o)
    file: PathBuf,

    /// Only report vtables of these classes (demangled names, e.g. `ns::Shape`)
    classes: Vec<String>,

    /// readelf executable used to list ELF metadata
    #[arg(long, env = "VTDUMP_READELF", default_value = "readelf")]
    readelf: PathBuf,

    /// How slot values are resolved: auto, object or linked
    #[arg(long, value_parser = parse_mode, default_value = "auto")]
    mode: ArtifactMode,

    /// Literal values at or above this are printed in hex (hex or decimal)
    #[arg(long, value_parser = parse_threshold, default_value = "0x400000")]
    pointer_threshold: u64,

    /// Print demangled names in the target column
    #[arg(long, default_value_t = false)]
    demangle_targets: bool,

    /// Log level (`RUST_LOG` overrides it)
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,

    /// Log output format (defaults to `VTDUMP_LOG_FORMAT`, then pretty)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn parse_mode(text: &str) -> std::result::Result<ArtifactMode, String>
{
    text.parse().map_err(|e: ExtractError| e.to_string())
}

fn parse_threshold(text: &str) -> std::result::Result<u64, String>
{
    parse_pointer_threshold(text).map_err(|e| e.to_string())
}

impl Cli
{
    fn config(&self) -> ExtractorConfig
    {
        ExtractorConfig {
            readelf: self.readelf.clone(),
            mode: self.mode,
            pointer_threshold: self.pointer_threshold,
            classes: self.classes.clone(),
            demangle_targets: self.demangle_targets,
        }
    }
}

fn main()
{
    let cli = Cli::parse();

    let format = cli.log_format.or_else(logging::format_from_env).unwrap_or_default();
    let guard = match init_logging_with_level(cli.log_level, format) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };
    if let Some(path) = guard.log_file() {
        info!("Writing logs to {}", path.display());
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()>
{
    let config = cli.config();
    info!("Extracting vtables from {}", cli.file.display());

    let inspector = create_inspector(&config.readelf);
    let demangler = ItaniumDemangler::new();
    let extractor = VTableExtractor::load(&cli.file, config, inspector.as_ref(), &demangler)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    extractor.write_report(&mut out)?;
    out.flush()?;
    Ok(())
}
