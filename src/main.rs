use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use grid_snake::game::GridConfig;
use grid_snake::logging::init_file_logging;
use grid_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Steer a snake around a grid until it leaves the board")]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value = "400")]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "400")]
    canvas_height: u32,

    /// Cell width in pixels
    #[arg(long, default_value = "40")]
    cell_width: u32,

    /// Cell height in pixels
    #[arg(long, default_value = "40")]
    cell_height: u32,

    /// Padding inside each cell when drawing the snake
    #[arg(long, default_value = "3")]
    cell_inset: u32,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = GridConfig::new(
        cli.canvas_width,
        cli.canvas_height,
        cli.cell_width,
        cli.cell_height,
    )
    .with_inset(cli.cell_inset);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
