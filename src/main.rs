//! CLI утилита генерации BOM-фикстур

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::path::PathBuf;

use bom_fixtures::cli_common::{self, CommonArgs};
use bom_fixtures::core::read_utf8_file;
use bom_fixtures::{verify_fixtures, FailurePolicy, FixtureGenerator, GeneratorConfig};

#[derive(ClapParser, Debug)]
#[command(
    name = "bom-fixtures",
    version,
    about = "Generates BOM-prefixed UTF-8/16/32 fixtures from a UTF-8 text file",
    long_about = "Reads a UTF-8 source (text_UTF-8.txt by default) and writes text_<ENC>-BOM.txt \
                  for UTF-8, UTF-16BE, UTF-16LE, UTF-32BE and UTF-32LE"
)]
struct Args {
    /// UTF-8 source file
    source: Option<PathBuf>,

    /// Directory for the fixtures (defaults to the source's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep writing the remaining fixtures after a failure
    #[arg(long)]
    keep_going: bool,

    /// Re-read every fixture and check it against the source
    #[arg(long)]
    verify: bool,

    /// TOML config file; command line arguments override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[clap(flatten)]
    common: CommonArgs,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if self.keep_going {
            config.failure_policy = FailurePolicy::Continue;
        }
        if self.verify {
            config.verify = true;
        }
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        cli_common::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    cli_common::init_logging(args.common.log_level())?;

    let config = args.generator_config()?;
    let text = read_utf8_file(&config.source)?;
    let generator = FixtureGenerator::new(config);
    let report = generator.write_all(&text)?;

    if generator.config().verify {
        let verified = verify_fixtures(&generator.config().resolved_output_dir(), &text)?;
        tracing::info!("Verified {} fixtures", verified.fixtures.len());
    }

    if args.common.should_print() {
        for fixture in &report.fixtures {
            cli_common::print_info(&format!(
                "{} ({})",
                fixture.path.display(),
                cli_common::format_file_size(fixture.bytes_written as u64)
            ));
        }
        cli_common::print_success(&format!(
            "Generated {} fixtures from {}",
            report.fixtures.len(),
            report.source.display()
        ));
    }

    Ok(())
}
