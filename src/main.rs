use clap::Parser;

use stabsel::args::Args;
use stabsel::runner::Runner;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut runner = Runner::new(args)?;
    runner.start()
}
