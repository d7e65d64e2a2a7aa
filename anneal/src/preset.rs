//! The three simulations the original shipped as separate Python modules
//! under `simulations/` (`abnese.py`, `dag_zook.py`, `vowel_harmony.py`),
//! embedded here as named resource bundles instead of files selected by a
//! hardcoded import.
pub struct Preset {
    pub name: &'static str,
    pub feature_table_json: &'static str,
    pub constraint_set_printed: &'static str,
    pub config_json: &'static str,
    pub corpus_json: &'static str,
    pub target_energy: f64,
}

const ABNESE: Preset = Preset {
    name: "abnese",
    feature_table_json: include_str!("../presets/abnese_feature_table.json"),
    constraint_set_printed: include_str!("../presets/abnese_constraint_set.json"),
    config_json: include_str!("../presets/abnese_config.json"),
    corpus_json: include_str!("../presets/abnese_corpus.json"),
    target_energy: 3_316.0,
};

const DAG_ZOOK: Preset = Preset {
    name: "dag-zook",
    feature_table_json: include_str!("../presets/plural_english_feature_table.json"),
    constraint_set_printed: include_str!("../presets/dag_zook_devoicing_permutations_constraint_set.json"),
    config_json: include_str!("../presets/dag_zook_config.json"),
    corpus_json: include_str!("../presets/dag_zook_corpus.json"),
    target_energy: 4_832.0,
};

const VOWEL_HARMONY: Preset = Preset {
    name: "vowel-harmony",
    feature_table_json: include_str!("../presets/vowel_harmony_simple_feature_table.json"),
    constraint_set_printed: include_str!("../presets/vowel_harmony_permuted_constraint_set.json"),
    config_json: include_str!("../presets/vowel_harmony_config.json"),
    corpus_json: include_str!("../presets/vowel_harmony_corpus.json"),
    target_energy: 3_460.0,
};

impl Preset {
    /// Looks up a built-in simulation by name, accepting either hyphens or
    /// underscores.
    pub fn named(name: &str) -> Result<Preset, String> {
        match name.replace('_', "-").as_str() {
            "abnese" => Ok(ABNESE),
            "dag-zook" => Ok(DAG_ZOOK),
            "vowel-harmony" => Ok(VOWEL_HARMONY),
            other => Err(format!(
                "unknown preset '{other}', expected one of \"abnese\", \"dag-zook\", \"vowel-harmony\""
            )),
        }
    }
}
