//! Command-line front-end: argument parsing and the generation pipeline

use crate::algorithm::solver::Solver;
use crate::analysis::patterns::PatternConfig;
use crate::io::configuration::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
};
use crate::io::error::Result;
use crate::io::image::{load_raster, save_raster};
use crate::io::progress::SolveProgress;
use crate::raster::Raster;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generation method selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Overlapping-tile Wave Function Collapse
    Overlapping,
}

/// Command-line arguments for the Wave Function Collapse image generator
///
/// Output height owns the `-h` short flag, so help is available as `--help`
/// only.
#[derive(Parser)]
#[command(name = "wfc")]
#[command(
    author,
    version,
    about = "Wave Function Collapse image generator",
    disable_help_flag = true
)]
pub struct Cli {
    /// Generation method
    #[arg(short = 'm', long, value_enum, default_value_t = Method::Overlapping)]
    pub method: Method,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'h', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Tile width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: usize,

    /// Tile height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: usize,

    /// Wrap input image on right and bottom
    #[arg(
        short = 'e',
        long = "expand-image",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub expand_image: u8,

    /// Add horizontal flips of all tiles
    #[arg(
        short = 'x',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub xflip: u8,

    /// Add vertical flips of all tiles
    #[arg(
        short = 'y',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub yflip: u8,

    /// Add n*90deg rotations of all tiles
    #[arg(
        short = 'r',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub rotate: u8,

    /// Random seed; taken from the wall clock when omitted
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Suppress the summary and progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help, value_parser = clap::value_parser!(bool))]
    pub help: Option<bool>,

    /// Input image to cut into tiles
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image path; the extension selects the format
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl Cli {
    /// Pattern extraction switches derived from the flags
    pub const fn pattern_config(&self) -> PatternConfig {
        PatternConfig {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            expand_input: self.expand_image != 0,
            xflip_tiles: self.xflip != 0,
            yflip_tiles: self.yflip != 0,
            rotate_tiles: self.rotate != 0,
        }
    }
}

/// Drives one generation: load, solve, report, save
pub struct GenerationTask {
    cli: Cli,
}

impl GenerationTask {
    /// Create a task from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the full pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be loaded, the parameters are
    /// rejected, the solve ends in contradiction, or the output cannot be
    /// written
    pub fn process(&self) -> Result<()> {
        let input = load_raster(&self.cli.input)?;
        let mut solver = Solver::overlapping(
            self.cli.width,
            self.cli.height,
            &input,
            &self.cli.pattern_config(),
        )?;
        if let Some(seed) = self.cli.seed {
            solver.init_with_seed(seed);
        }

        if !self.cli.quiet {
            self.print_summary(&input, &solver);
        }

        let progress = (!self.cli.quiet).then(|| SolveProgress::new(solver.cell_cnt()));
        let outcome = Self::drive(&mut solver, progress.as_ref());
        if let Some(ref bar) = progress {
            bar.finish();
        }
        outcome?;

        save_raster(&solver.output_raster(), &self.cli.output)
    }

    fn drive(solver: &mut Solver, progress: Option<&SolveProgress>) -> Result<()> {
        while solver.step()? {
            if let Some(bar) = progress {
                bar.update(solver.collapsed_cell_cnt());
            }
        }
        Ok(())
    }

    // Allow print for the run summary the tool shows by default
    #[allow(clippy::print_stdout)]
    fn print_summary(&self, input: &Raster, solver: &Solver) {
        println!();
        println!("method:               overlapping");
        println!("seed:                 {}", solver.seed());
        println!();
        println!("input image:          {}", self.cli.input.display());
        println!("input size:           {}x{}", input.width(), input.height());
        println!("input components:     {}", input.component_cnt());
        println!(
            "tile size:            {}x{}",
            self.cli.tile_width, self.cli.tile_height
        );
        println!("expand input:         {}", self.cli.expand_image);
        println!("xflip tiles:          {}", self.cli.xflip);
        println!("yflip tiles:          {}", self.cli.yflip);
        println!("rotate tiles:         {}", self.cli.rotate);
        println!("pattern count:        {}", solver.pattern_cnt());
        println!();
        println!("output image:         {}", self.cli.output.display());
        println!(
            "output size:          {}x{}",
            self.cli.width, self.cli.height
        );
        println!("cell count:           {}", solver.cell_cnt());
        println!();
    }
}
