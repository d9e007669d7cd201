//! OS4 display images CLI
//!
//! Usage:
//!   os4-display-images [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>       Run configuration (TOML)
//!   -o, --output-dir <DIR>    Directory for the .svg/.pdf files
//!   -s, --stylesheet <FILE>   LCD palette file (TOML)
//!       --converter <PROGRAM> Converter program (default: inkscape)
//!       --dpi <DPI>           Converter resolution (default: 96)
//!       --abort-on-failure    Stop at the first failed conversion
//!       --svg-only            Write .svg files, skip conversion
//!   -l, --list                List catalogue entries
//!   -p, --print <ID>          Print one entry's SVG to stdout
//!   -v, --verbose             Debug logging
//!   -h, --help                Print help

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use os4_display_images::{
    generate, render_catalogue, BatchGenerator, CatalogueEntry, DisplayRenderer, FailurePolicy,
    GeneratorConfig, LcdStyle, RunError,
};

#[derive(Parser)]
#[command(name = "os4-display-images")]
#[command(about = "Render OS4 documentation LCD mockups to SVG and PDF")]
struct Cli {
    /// Run configuration (TOML); the built-in OS4 catalogue is used without it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the .svg/.pdf files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// LCD palette file (TOML); replaces the config's [style] table
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Converter program
    #[arg(long)]
    converter: Option<String>,

    /// Resolution passed to the converter
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,

    /// Stop at the first failed conversion instead of warning
    #[arg(long)]
    abort_on_failure: bool,

    /// Only write the .svg files
    #[arg(long)]
    svg_only: bool,

    /// List catalogue entries and exit
    #[arg(short, long)]
    list: bool,

    /// Print the SVG for one catalogue entry to stdout
    #[arg(short, long, value_name = "ID")]
    print: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    if let Some(path) = &cli.stylesheet {
        match LcdStyle::from_file(path) {
            Ok(style) => config.style = style,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(program) = cli.converter {
        config.converter.program = program;
    }
    if let Some(dpi) = cli.dpi {
        config.converter.dpi = dpi;
    }
    if cli.abort_on_failure {
        config.converter.on_failure = FailurePolicy::Abort;
    }

    if cli.list {
        for entry in &config.entries {
            println!("{}\t{}", entry.identifier, entry.tokens);
        }
        return;
    }

    if let Some(id) = &cli.print {
        print_entry(&config, id);
        return;
    }

    let color = io::stderr().is_terminal();

    if cli.svg_only {
        let specs = match render_catalogue(&config) {
            Ok(specs) => specs,
            Err(e) => {
                eprintln!("{}", e.format(color));
                std::process::exit(1);
            }
        };
        let generator = BatchGenerator::new(&config.output_dir, config.converter.build());
        if let Err(e) = generator.write_sources_only(&specs) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    match generate(&config, config.converter.build()) {
        Ok(report) => {
            let failed = report.failed().count();
            if failed > 0 {
                eprintln!(
                    "{} of {} conversions failed",
                    failed,
                    report.entries.len()
                );
                std::process::exit(2);
            }
        }
        Err(RunError::Catalogue(e)) => {
            eprintln!("{}", e.format(color));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_entry(config: &GeneratorConfig, id: &str) {
    let Some(entry) = config.entries.iter().find(|e| e.identifier == id) else {
        eprintln!("Error: no catalogue entry '{}'", id);
        std::process::exit(1);
    };
    let CatalogueEntry { identifier, tokens } = entry;

    match config.renderer().render(tokens, &config.annunciators) {
        Ok(svg) => println!("{}", svg),
        Err(e) => {
            eprintln!("{}", e.format_with_color(tokens, identifier, io::stderr().is_terminal()));
            std::process::exit(1);
        }
    }
}
