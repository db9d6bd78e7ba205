//! ticketpdf CLI - flight e-ticket export tool

mod host;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use host::CliHost;
use ticketpdf::{
    extract_view_lines, load_view, placement_for, ExportConfig, ExportOutcome, Exporter,
    RasterStrategy, TextStrategy, Ticket,
};

#[derive(Parser)]
#[command(name = "ticketpdf")]
#[command(version)]
#[command(about = "Export flight e-tickets to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a ticket view to PDF
    Export {
        /// Ticket view JSON
        #[arg(value_name = "VIEW")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// PNG screenshot of the view, used by the raster strategy
        #[arg(short, long, value_name = "PNG")]
        snapshot: Option<PathBuf>,

        /// Export configuration JSON
        #[arg(short, long, value_name = "FILE", env = "TICKETPDF_CONFIG")]
        config: Option<PathBuf>,

        /// Strategies to try
        #[arg(long, value_enum, default_value = "auto")]
        strategy: StrategyChoice,

        /// Skip the settle delay before capture
        #[arg(long)]
        no_delay: bool,
    },

    /// Build a ticket view from a booking record
    Sample {
        /// Booking record JSON
        #[arg(value_name = "TICKET")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the lines the text fallback would write
    Lines {
        /// Ticket view JSON
        #[arg(value_name = "VIEW")]
        input: PathBuf,

        /// Export configuration JSON
        #[arg(short, long, value_name = "FILE", env = "TICKETPDF_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show where a captured view would be placed on the page
    Placement {
        /// View width in CSS pixels
        #[arg(long)]
        width: u32,

        /// View height in CSS pixels
        #[arg(long)]
        height: u32,

        /// Export configuration JSON
        #[arg(short, long, value_name = "FILE", env = "TICKETPDF_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyChoice {
    /// Raster capture, then text fallback
    Auto,
    /// Raster capture only
    Raster,
    /// Text extraction only
    Text,
}

impl StrategyChoice {
    fn exporter(self) -> Exporter {
        let mut exporter = Exporter::new();
        if matches!(self, StrategyChoice::Auto | StrategyChoice::Raster) {
            exporter.register(Arc::new(RasterStrategy::new()));
        }
        if matches!(self, StrategyChoice::Auto | StrategyChoice::Text) {
            exporter.register(Arc::new(TextStrategy::new()));
        }
        exporter
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            snapshot,
            config,
            strategy,
            no_delay,
        } => cmd_export(
            &input,
            &output,
            snapshot.as_deref(),
            config.as_deref(),
            strategy,
            no_delay,
        ),
        Commands::Sample { input, output } => cmd_sample(&input, output.as_deref()),
        Commands::Lines { input, config } => cmd_lines(&input, config.as_deref()),
        Commands::Placement {
            width,
            height,
            config,
        } => cmd_placement(width, height, config.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> ticketpdf::Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::from_json_file(path),
        None => Ok(ExportConfig::default()),
    }
}

fn cmd_export(
    input: &Path,
    output: &Path,
    snapshot: Option<&Path>,
    config: Option<&Path>,
    strategy: StrategyChoice,
    no_delay: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    if no_delay {
        config.settle_delay_ms = 0;
    }
    let view = load_view(input, snapshot)?;

    let host = CliHost::new(output);
    let exporter = strategy.exporter().with_config(config);

    match exporter.export(Some(&view), &host) {
        ExportOutcome::Downloaded {
            strategy,
            page_count,
            byte_len,
            ..
        } => {
            println!(
                "{} {} page(s), {} bytes ({} strategy)",
                "Done!".green().bold(),
                page_count,
                byte_len,
                strategy
            );
            Ok(())
        }
        ExportOutcome::Alerted { causes, .. } => {
            for cause in &causes {
                eprintln!("  {} {}", "-".dimmed(), cause);
            }
            Err("export failed".into())
        }
        ExportOutcome::Busy => Err("export already in progress".into()),
    }
}

fn cmd_sample(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let ticket = Ticket::from_json(&data)?;
    let json = ticket.to_view().to_json()?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_lines(input: &Path, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let view = load_view(input, None::<&Path>)?;

    for line in extract_view_lines(&view, &config) {
        println!("{}", line);
    }

    Ok(())
}

fn cmd_placement(
    width: u32,
    height: u32,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let placement = placement_for(width, height, &config)?;

    println!("{}", "Placement (mm)".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {} x {}",
        "Page".bold(),
        config.format.width_mm,
        config.format.height_mm
    );
    println!("{}: {:.3}", "Scale".bold(), placement.scale);
    println!("{}: {:.3}, {:.3}", "Origin".bold(), placement.x, placement.y);
    println!(
        "{}: {:.3} x {:.3}",
        "Size".bold(),
        placement.width,
        placement.height
    );
    println!();
    println!("{}", serde_json::to_string_pretty(&placement)?);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ticketpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Flight e-ticket export tool");
    println!();
    println!("License: MIT");
}
