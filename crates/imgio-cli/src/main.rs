use clap::{Parser, Subcommand};
use imgio_cli::commands::{cmd_convert, cmd_formats, cmd_info, cmd_overlay};
use imgio_cli::{open_dispatcher, parse_layout, parse_region};
use imgio_core::{Layout, Region};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgio")]
#[command(version, about = "Read, convert and overlay intensity images", long_about = None)]
struct Cli {
    /// Config file (overrides IMGIO_CONFIG and the default search path)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show info-level log messages (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show format and dimensions of image files
    Info {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert an image to another format (chosen by the output name)
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Only convert this region (x,y,width,height)
        #[arg(long, value_name = "X,Y,W,H", value_parser = parse_region)]
        region: Option<Region>,

        /// Store samples as-is instead of stretching them onto 0-255
        #[arg(long)]
        no_scale: bool,

        /// Buffer layout used for the round trip: "right" or "left"
        #[arg(long, value_name = "LAYOUT", default_value = "right", value_parser = parse_layout)]
        layout: Layout,
    },

    /// Write a red/green overlay of two equally sized images as TIFF
    Overlay {
        /// Image shown in red
        #[arg(value_name = "BOTTOM")]
        bottom: PathBuf,

        /// Image shown in green
        #[arg(value_name = "TOP")]
        top: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// List known formats and whether this build supports them
    Formats,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let io = open_dispatcher(cli.config.as_deref());

    let result = match cli.command {
        Commands::Info { files, json } => cmd_info(&io, &files, json),
        Commands::Convert {
            input,
            output,
            region,
            no_scale,
            layout,
        } => cmd_convert(&io, &input, &output, region, !no_scale, layout),
        Commands::Overlay {
            bottom,
            top,
            output,
        } => cmd_overlay(&io, &bottom, &top, &output),
        Commands::Formats => cmd_formats(&io),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
