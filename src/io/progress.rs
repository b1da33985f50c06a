//! Collapse-boundary progress display for the command-line tool

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar tracking collapsed cells during one solve
pub struct SolveProgress {
    bar: ProgressBar,
}

impl SolveProgress {
    /// Create a bar sized to the output cell count
    pub fn new(cell_cnt: usize) -> Self {
        let bar = ProgressBar::new(cell_cnt as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("cells collapsed: {pos}/{len} [{bar:40.cyan/blue}] {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        Self { bar }
    }

    /// Report the number of collapsed cells
    pub fn update(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Clear the bar once the solve is over
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
