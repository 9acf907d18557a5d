//! Neon Tetris headless runner (default binary).
//!
//! Plays one seeded session with a scripted bot and prints a summary.
//! Payment and log settings come from `NEON_TETRIS_*` environment variables.

use anyhow::Result;

use neon_tetris::adapter::AdapterConfig;
use neon_tetris::demo::{parse_demo_args, run_demo, USAGE};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_demo_args(&args)?;
    if config.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let adapter = AdapterConfig::from_env();
    let summary = run_demo(&config, &adapter)?;
    println!("{}", summary);
    Ok(())
}
