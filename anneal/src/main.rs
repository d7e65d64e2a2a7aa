//! CLI driver for the simulated-annealing MDL grammar search.
//!
//! Grounded on `original_source/source/main.py`'s simulation-loading flow:
//! pick a named simulation's feature table, constraint set, corpus and
//! config, build a `Hypothesis` from them, and run `SimulatedAnnealing`
//! against its `target_energy`. Here the three simulations the original
//! shipped under `simulations/` (`abnese`, `dag_zook`, `vowel_harmony`) are
//! embedded resources selectable by name instead of a hardcoded import, and
//! every resource can be overridden from the command line with an external
//! file (spec §6's JSON/CSV/printed-form external interfaces).
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use phomdl::{Annealer, Config, Corpus, FeatureTable, Grammar, Hypothesis, Notifier};
use phomdl::constraint_set::ConstraintSet;
use phomdl::lexicon::Lexicon;

mod notifier;
mod preset;

use notifier::SlackWebhookNotifier;
use preset::Preset;

#[derive(Parser, Debug)]
#[clap(name = "anneal", about = "Simulated-annealing MDL phonological grammar search")]
struct Args {
    /// Which built-in simulation to run: "abnese", "dag-zook" or "vowel-harmony".
    #[clap(short = 'p', long, default_value = "abnese")]
    preset: String,

    /// An external feature-table file (JSON or CSV), overriding the preset's.
    #[clap(long)]
    feature_table: Option<PathBuf>,

    /// An external constraint-set file (JSON list or printed `Name[...] >> ...` form).
    #[clap(long)]
    constraint_set: Option<PathBuf>,

    /// An external configuration file (JSON, UPPERCASE keys).
    #[clap(long)]
    config: Option<PathBuf>,

    /// An external corpus file (JSON array of surface forms).
    #[clap(long)]
    corpus: Option<PathBuf>,

    /// Overrides the preset's target energy.
    #[clap(long)]
    target_energy: Option<f64>,

    /// Posts periodic progress reports to this Slack incoming-webhook URL.
    #[clap(long)]
    webhook_url: Option<String>,

    /// Run number. Its presence, independent of its value, forces a random
    /// (rather than fixed) seed, matching the original's `sys.argv[1]`
    /// convention.
    simulation_number: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let preset = Preset::named(&args.preset)?;

    let table = match &args.feature_table {
        Some(path) => FeatureTable::load(path)?,
        None => FeatureTable::from_json(preset.feature_table_json)?,
    };
    let constraint_set = match &args.constraint_set {
        Some(path) => ConstraintSet::load(path)?,
        None => ConstraintSet::parse(preset.constraint_set_printed)?,
    };
    let config = match &args.config {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::from_json(preset.config_json)?,
    };
    let seed_words: Vec<String> = match &args.corpus {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => serde_json::from_str(preset.corpus_json)?,
    };
    let target_energy = args.target_energy.unwrap_or(preset.target_energy);

    let corpus = Corpus::new(&seed_words, &config);
    let max_word_length_in_data = corpus.words().iter().map(|w| w.chars().count()).max().unwrap_or(0);
    let lexicon = Lexicon::from_alphabet(&table, max_word_length_in_data);
    let grammar = Grammar::new(constraint_set, lexicon);
    let hypothesis = Hypothesis::new(grammar, corpus.words().to_vec());

    info!("preset '{}', {} words ({} after duplication)", preset.name, seed_words.len(), corpus.len());

    let mut annealer = Annealer::new(hypothesis, target_energy, &table, &config)?;

    // The original re-seeded its global RNG with a hardcoded `3`
    // irrespective of RANDOM_SEED/SEED (see `phomdl::annealer`'s doc
    // comment); this corrects that: a simulation number on the command
    // line, or RANDOM_SEED in the config, draws a seed from OS entropy,
    // otherwise SEED is used verbatim for a reproducible run.
    let mut rng = if config.random_seed || args.simulation_number.is_some() {
        StdRng::from_entropy()
    } else {
        StdRng::seed_from_u64(config.seed)
    };

    let notifier: Box<dyn Notifier> = match &args.webhook_url {
        Some(url) => Box::new(SlackWebhookNotifier::new(url.clone())),
        None => Box::new(phomdl::annealer::NoopNotifier),
    };

    annealer.run(&mut rng, notifier.as_ref())?;

    println!("{}", annealer.current_energy());
    Ok(())
}
