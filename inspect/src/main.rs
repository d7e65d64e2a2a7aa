//! Dumps a Graphviz `.dot` file for one constraint's candidate transducer,
//! a whole ranked constraint set's product transducer, a lexicon's HMM, or
//! the HMM's derived parsing automaton.
//!
//! Grounded on `original_source/source/debug_tools.py::write_to_dot`, which
//! picked whichever of a FAdo object's `dotFormat`/`draw`/
//! `dot_representation` methods was available and wrote it to
//! `logging/dot_files/`; here each typed object exposes its own `to_dot`
//! (spec §9 REDESIGN FLAGS: no FAdo dependency survives) and this binary
//! just picks which one to call.
use std::path::PathBuf;

use clap::{ArgEnum, Parser};

use phomdl::constraint::Constraint;
use phomdl::constraint_set::ConstraintSet;
use phomdl::hmm::Hmm;
use phomdl::word::Word;
use phomdl::FeatureTable;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// One constraint's per-word candidate transducer.
    Constraint,
    /// A whole ranked constraint set's per-word product transducer.
    ConstraintSet,
    /// A lexicon HMM's own state graph.
    Hmm,
    /// The HMM's derived character-level parsing automaton.
    Nfa,
}

#[derive(Parser, Debug)]
#[clap(name = "inspect", about = "Dumps Graphviz .dot files for phomdl automata")]
struct Args {
    /// Which kind of automaton to dump.
    #[clap(arg_enum, short = 'm', long)]
    mode: Mode,

    /// The feature table (JSON or CSV). Required for `constraint` and
    /// `constraint-set`.
    #[clap(long)]
    feature_table: Option<PathBuf>,

    /// A single constraint's printed `Name[args]` form, for `--mode constraint`.
    #[clap(long)]
    constraint: Option<String>,

    /// A constraint set file (JSON list or printed `Name[...] >> ...` form),
    /// for `--mode constraint-set`.
    #[clap(long)]
    constraint_set: Option<PathBuf>,

    /// The underlying word to generate candidates for, for `constraint`/`constraint-set`.
    #[clap(long)]
    word: Option<String>,

    /// Allows substitution candidates alongside insertion/deletion (spec
    /// §9 Open Question 1).
    #[clap(long)]
    allow_candidates_with_changed_segments: bool,

    /// A comma-separated vocabulary, for `--mode hmm`/`--mode nfa`.
    #[clap(long)]
    words: Option<String>,

    /// Where to write the `.dot` file; prints to stdout if omitted.
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let dot = match args.mode {
        Mode::Constraint => {
            let table = load_table(&args)?;
            let constraint = Constraint::parse(
                args.constraint.as_deref().ok_or("`--constraint` is required for --mode constraint")?,
            )?;
            let word = Word::new(args.word.as_deref().ok_or("`--word` is required for --mode constraint")?);
            constraint
                .build_transducer(&word.segments(), &table, args.allow_candidates_with_changed_segments)?
                .to_dot()
        }
        Mode::ConstraintSet => {
            let table = load_table(&args)?;
            let path = args
                .constraint_set
                .as_ref()
                .ok_or("`--constraint-set` is required for --mode constraint-set")?;
            let set = ConstraintSet::load(path)?;
            let word = Word::new(
                args.word.as_deref().ok_or("`--word` is required for --mode constraint-set")?,
            );
            let segments = word.segments();
            let mut transducers = Vec::with_capacity(set.len());
            for constraint in set.constraints() {
                transducers.push(constraint.build_transducer(
                    &segments,
                    &table,
                    args.allow_candidates_with_changed_segments,
                )?);
            }
            let refs: Vec<&phomdl::transducer::Transducer> = transducers.iter().collect();
            phomdl::transducer::Transducer::intersect(&refs)?.to_dot()
        }
        Mode::Hmm => hmm_from_words(&args)?.to_dot(),
        Mode::Nfa => hmm_from_words(&args)?.to_nfa().to_dot(),
    };

    match args.out {
        Some(path) => std::fs::write(path, dot)?,
        None => println!("{dot}"),
    }
    Ok(())
}

fn load_table(args: &Args) -> Result<FeatureTable, Box<dyn std::error::Error>> {
    let path = args.feature_table.as_ref().ok_or("`--feature-table` is required for this mode")?;
    Ok(FeatureTable::load(path)?)
}

fn hmm_from_words(args: &Args) -> Result<Hmm, Box<dyn std::error::Error>> {
    let words: Vec<String> = args
        .words
        .as_deref()
        .ok_or("`--words` is required for --mode hmm/nfa")?
        .split(',')
        .map(str::to_string)
        .collect();
    Ok(Hmm::from_word_list(&words))
}
