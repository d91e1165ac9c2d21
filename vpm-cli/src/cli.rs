use clap::Parser;

/// Install or remove video players using the system package manager
#[derive(Parser, Debug)]
#[command(name = "vpm")]
#[command(author = "HAMNA TEC")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Universal video player manager for Linux systems", long_about = None)]
pub struct Args {
    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

/// Parses command-line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
