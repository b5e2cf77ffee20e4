use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[clap(
    author,
    version,
    about,
    long_about = None,
    name = "stabsel",
)]
pub struct Args {
    /// Path to settings (yaml file). Command line values take precedence.
    #[clap(long)]
    pub settings: Option<String>,

    /// Output directory.
    #[clap(long, short, default_value = "./")]
    pub outdir: String,

    /// Run identifier used to namespace output files. Defaults to the seed.
    #[clap(long, short)]
    pub name: Option<String>,

    /// Seed for the random number generator. Drawn at random if omitted.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Selection strength multiplier of the fitness density term.
    #[clap(long)]
    pub factor: Option<f64>,

    /// Constant baseline added to every fitness weight under selection.
    #[clap(long)]
    pub baseline: Option<f64>,

    /// Length of the genomic element in base pairs.
    #[clap(long)]
    pub genome_size: Option<usize>,

    /// Mean of the effect size distribution.
    #[clap(long)]
    pub effect_mean: Option<f64>,

    /// Shape of the gamma effect size distribution.
    #[clap(long)]
    pub effect_shape: Option<f64>,

    /// Fraction of new mutations that affect the trait.
    #[clap(long)]
    pub causal_fraction: Option<f64>,

    /// Number of diploid individuals.
    #[clap(long)]
    pub population_size: Option<usize>,

    /// Tick at which selection sets in.
    #[clap(long)]
    pub burn_in: Option<usize>,

    /// Total number of ticks to simulate.
    #[clap(long, short)]
    pub generations: Option<usize>,

    /// Per base mutation rate.
    #[clap(long)]
    pub mutation_rate: Option<f64>,

    /// Per base recombination rate.
    #[clap(long)]
    pub recombination_rate: Option<f64>,

    /// Path to log file.
    #[clap(long, default_value = "stabsel.log")]
    pub log_file: String,

    /// Verbosity of the log (repeat for more).
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[clap(long)]
    pub disable_progress_bar: bool,
}
