use anyhow::Result;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::fs;
use std::path::Path;

use crate::args::Args;
use crate::config::{OutputPlan, Settings};
use crate::readwrite::{
    CatalogEntry, EntryWriter, PresenceEntry, SummaryEntry, catalog_entries, presence_entries,
};
use crate::simulation::Simulation;
use crate::stats::PopulationFrequencies;

pub struct Runner {
    args: Args,
    name: String,
    plan: OutputPlan,
    simulation: Simulation,
    summary_writer: EntryWriter<SummaryEntry>,
    catalog_writer: EntryWriter<CatalogEntry>,
    presence_writer: EntryWriter<PresenceEntry>,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);
        let settings = Self::load_settings(args.settings.as_deref())?;
        Self::with_settings(args, settings)
    }

    /// Set up a run from already loaded settings. Command line values take precedence.
    pub fn with_settings(args: Args, mut settings: Settings) -> Result<Runner> {
        settings.parameters.apply_args(&args);

        let seed = match settings.parameters.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::rng().random();
                log::info!("No seed given, drew seed {seed}");
                settings.parameters.seed = Some(seed);
                seed
            }
        };
        // invalid parameters are rejected before any output exists
        let simulation = Simulation::from_seed(settings.parameters.clone(), seed)?;

        let name = args.name.clone().unwrap_or_else(|| seed.to_string());
        let plan = settings
            .schedule
            .resolve(settings.parameters.burn_in, settings.parameters.generations)?;
        log::debug!("Resolved output plan: {plan:?}");

        fs::create_dir_all(&args.outdir)?;
        let settings_path = Path::new(&args.outdir).join(format!("{name}_settings.yaml"));
        settings.write_to_file(&settings_path.to_string_lossy())?;
        log::info!("Running `{name}` with settings\n{settings}");

        let summary_writer = EntryWriter::new(&args.outdir, &name)?;
        let catalog_writer = EntryWriter::new(&args.outdir, &name)?;
        let presence_writer = EntryWriter::new(&args.outdir, &name)?;

        Ok(Self {
            args,
            name,
            plan,
            simulation,
            summary_writer,
            catalog_writer,
            presence_writer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn start(&mut self) -> Result<()> {
        self.run()?;
        self.finish();
        Ok(())
    }

    fn finish(&self) {
        let optimum = self.simulation.optimum();
        log::info!(
            "Finished `{}` at tick {} with {} mutations (optimum: {:?}).",
            self.name,
            self.simulation.tick(),
            self.simulation.registry().len(),
            optimum
        );
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        // setup logger
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Load settings from file, or use the defaults when no file is given.
    fn load_settings(path: Option<&str>) -> Result<Settings> {
        let settings = match path {
            Some(path) => {
                let settings = Settings::read_from_file(path)?;
                log::info!("Loaded settings from {path}");
                settings
            }
            None => Settings::default(),
        };
        Ok(settings)
    }

    fn run(&mut self) -> Result<()> {
        let generations = self.simulation.parameters().generations;
        let bar = match self.args.disable_progress_bar {
            true => None,
            false => {
                let bar = ProgressBar::new(generations as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}",
                        )?
                        .progress_chars("=> "),
                );
                Some(bar)
            }
        };

        while !self.simulation.is_finished() {
            let phase = self.simulation.next_generation()?;
            let tick = self.simulation.tick();

            if self.plan.logging.should_log(tick) {
                let summary = self.simulation.summary();
                log::info!(
                    "tick={tick} phase={phase} segregating={} mean={} sd={}",
                    summary.segregating,
                    summary.phenotype_mean,
                    summary.phenotype_sd
                );
                if let Some(bar) = bar.as_ref() {
                    bar.set_message(format!(
                        "{phase}, {} segregating",
                        summary.segregating
                    ));
                }
                self.summary_writer
                    .append([SummaryEntry::new(tick, summary)])?;
            }

            if self.plan.is_snapshot(tick) {
                self.write_snapshot(tick)?;
            }

            if let Some(bar) = bar.as_ref() {
                bar.set_position(tick as u64);
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation.");
        Ok(())
    }

    fn write_snapshot(&self, tick: usize) -> Result<()> {
        log::info!("Writing snapshot at tick {tick}...");
        let population = self.simulation.population();
        let prevalence = population.prevalence();

        self.catalog_writer.append(catalog_entries(
            tick,
            self.simulation.registry(),
            &prevalence,
            self.plan.catalog,
        ))?;
        self.presence_writer
            .append(presence_entries(tick, population, &prevalence))?;
        Ok(())
    }
}
