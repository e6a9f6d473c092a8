use crate::error::EnactiveError;
use crate::interaction::{primitive_label, Valence};
use crate::mood::MoodThreshold;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub engine: EngineSection,
    /// The complete universe of primitive interactions.
    pub primitives: Vec<PrimitiveSpec>,
    pub run: RunConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            engine: EngineSection::default(),
            primitives: PrimitiveSpec::default_table(),
            run: RunConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AgentConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    /// A file that exists but cannot be used also falls back, with a warning.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(
                        "Ignoring invalid config file {} ({:#}), using defaults",
                        path.display(),
                        e
                    );
                } else {
                    tracing::info!("Config file {} not found, using defaults", path.display());
                }
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ENACTIVE_MODE") {
            match v.parse() {
                Ok(mode) => self.engine.mode = mode,
                Err(e) => tracing::warn!("Ignoring ENACTIVE_MODE: {}", e),
            }
        }
        if let Ok(v) = std::env::var("ENACTIVE_SEED") {
            if let Ok(n) = v.parse() {
                self.engine.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("ENACTIVE_STEPS") {
            if let Ok(n) = v.parse() {
                self.run.steps = n;
            }
        }
        if let Ok(v) = std::env::var("ENACTIVE_WORLD") {
            self.run.world = v;
        }
    }
}

// ============================================================================
// Engine variants
// ============================================================================

/// How many past enactments activate composites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ContextDepth {
    /// Only the last enacted interaction.
    One,
    /// The last enacted interaction and the pair linking t-2 to t-1.
    #[default]
    Two,
}

impl TryFrom<u8> for ContextDepth {
    type Error = EnactiveError;

    fn try_from(depth: u8) -> std::result::Result<Self, Self::Error> {
        match depth {
            1 => Ok(ContextDepth::One),
            2 => Ok(ContextDepth::Two),
            other => Err(EnactiveError::InvalidContextDepth(other)),
        }
    }
}

impl From<ContextDepth> for u8 {
    fn from(depth: ContextDepth) -> Self {
        match depth {
            ContextDepth::One => 1,
            ContextDepth::Two => 2,
        }
    }
}

/// What anticipations propose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposal {
    /// Interactions directly: primitives by default, any post part when activated.
    Interaction,
    /// Experiments: primitive experiments by default, abstract ones when a
    /// composite post part is activated.
    #[default]
    Experiment,
}

/// Ordering used to pick the winning anticipation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKey {
    /// Accumulated proclivity.
    #[default]
    Proclivity,
    /// Valence of the interaction the candidate would enact.
    Valence,
}

/// What to do when the winning candidate has a negative valence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePolicy {
    /// Enact it anyway and let learning absorb the consequence.
    #[default]
    Accept,
    /// Swap it for a random primitive of a different experiment.
    Avoid,
}

/// Whether mood feeds back into selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodStrategy {
    #[default]
    Passive,
    /// After a SAD step, prefer a candidate using a different experiment than
    /// the last enacted primitive.
    SwitchWhenSad,
}

/// Concrete engine parameters. Variants differ only along these axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub context_depth: ContextDepth,
    pub proposal: Proposal,
    pub selection_key: SelectionKey,
    pub mood_threshold: MoodThreshold,
    pub negative_policy: NegativePolicy,
    pub mood_strategy: MoodStrategy,
    /// Fold recorded alternatives into proclivity.
    pub use_alternatives: bool,
    /// Seed for the tie-break shuffle. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::recursive()
    }
}

impl EngineConfig {
    /// Depth-1 sequence learner choosing by valence and avoiding negative
    /// proposals. Mood is HAPPY only for strictly positive valence.
    pub fn simple() -> Self {
        Self {
            context_depth: ContextDepth::One,
            proposal: Proposal::Interaction,
            selection_key: SelectionKey::Valence,
            mood_threshold: MoodThreshold::Positive,
            negative_policy: NegativePolicy::Avoid,
            mood_strategy: MoodStrategy::Passive,
            use_alternatives: false,
            seed: None,
        }
    }

    /// Depth-2 learner choosing primitive or abstract experiments by proclivity.
    pub fn recursive() -> Self {
        Self {
            context_depth: ContextDepth::Two,
            proposal: Proposal::Experiment,
            selection_key: SelectionKey::Proclivity,
            mood_threshold: MoodThreshold::NonNegative,
            negative_policy: NegativePolicy::Accept,
            mood_strategy: MoodStrategy::Passive,
            use_alternatives: false,
            seed: None,
        }
    }

    /// Depth-2 learner proposing interactions directly, with failed
    /// intentions biased by the interactions enacted instead.
    pub fn constructive() -> Self {
        Self {
            context_depth: ContextDepth::Two,
            proposal: Proposal::Interaction,
            selection_key: SelectionKey::Proclivity,
            mood_threshold: MoodThreshold::NonNegative,
            negative_policy: NegativePolicy::Accept,
            mood_strategy: MoodStrategy::Passive,
            use_alternatives: true,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Named engine preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Simple,
    #[default]
    Recursive,
    Constructive,
}

impl Mode {
    pub fn preset(self) -> EngineConfig {
        match self {
            Mode::Simple => EngineConfig::simple(),
            Mode::Recursive => EngineConfig::recursive(),
            Mode::Constructive => EngineConfig::constructive(),
        }
    }
}

impl FromStr for Mode {
    type Err = EnactiveError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Mode::Simple),
            "recursive" => Ok(Mode::Recursive),
            "constructive" => Ok(Mode::Constructive),
            other => Err(EnactiveError::UnknownMode(other.to_string())),
        }
    }
}

/// `[engine]` section: a preset plus optional per-axis overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub mode: Mode,
    pub context_depth: Option<ContextDepth>,
    pub proposal: Option<Proposal>,
    pub selection_key: Option<SelectionKey>,
    pub mood_threshold: Option<MoodThreshold>,
    pub negative_policy: Option<NegativePolicy>,
    pub mood_strategy: Option<MoodStrategy>,
    pub use_alternatives: Option<bool>,
    pub seed: Option<u64>,
}

impl EngineSection {
    pub fn resolve(&self) -> EngineConfig {
        let mut cfg = self.mode.preset();
        if let Some(v) = self.context_depth {
            cfg.context_depth = v;
        }
        if let Some(v) = self.proposal {
            cfg.proposal = v;
        }
        if let Some(v) = self.selection_key {
            cfg.selection_key = v;
        }
        if let Some(v) = self.mood_threshold {
            cfg.mood_threshold = v;
        }
        if let Some(v) = self.negative_policy {
            cfg.negative_policy = v;
        }
        if let Some(v) = self.mood_strategy {
            cfg.mood_strategy = v;
        }
        if let Some(v) = self.use_alternatives {
            cfg.use_alternatives = v;
        }
        cfg.seed = self.seed;
        cfg
    }
}

// ============================================================================
// Primitive table
// ============================================================================

/// One row of the initialization table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveSpec {
    pub meaning: String,
    pub experiment: String,
    pub result: String,
    pub valence: Valence,
}

impl PrimitiveSpec {
    pub fn new(meaning: &str, experiment: &str, result: &str, valence: Valence) -> Self {
        Self {
            meaning: meaning.to_string(),
            experiment: experiment.to_string(),
            result: result.to_string(),
            valence,
        }
    }

    pub fn label(&self) -> String {
        primitive_label(&self.experiment, &self.result)
    }

    /// Two experiments, two results; `r2` is pleasant, `r1` is not.
    pub fn default_table() -> Vec<Self> {
        vec![
            Self::new("a", "e1", "r1", -1),
            Self::new("b", "e1", "r2", 1),
            Self::new("c", "e2", "r1", -1),
            Self::new("d", "e2", "r2", 1),
        ]
    }

    /// The small embodied world: moving, bumping, turning and touching.
    pub fn embodied_table() -> Vec<Self> {
        vec![
            Self::new("move forward", "e1", "r1", 5),
            Self::new("bump", "e1", "r2", -10),
            Self::new("turn left", "e2", "r3", -1),
            Self::new("turn right", "e3", "r4", -1),
            Self::new("touch empty", "e4", "r5", -1),
            Self::new("touch wall", "e4", "r6", -2),
        ]
    }

    /// Reject tables that are empty or define the same interaction twice.
    pub fn validate_table(table: &[Self]) -> std::result::Result<(), EnactiveError> {
        if table.is_empty() {
            return Err(EnactiveError::EmptyPrimitiveTable);
        }
        let mut seen: HashMap<String, &str> = HashMap::new();
        for spec in table {
            let label = spec.label();
            if let Some(first) = seen.get(&label) {
                return Err(EnactiveError::DuplicatePrimitive {
                    label,
                    first: first.to_string(),
                    second: spec.meaning.clone(),
                });
            }
            seen.insert(label, &spec.meaning);
        }
        Ok(())
    }
}

// ============================================================================
// Run loop
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of steps to run. 0 runs until interrupted.
    pub steps: u64,
    /// Pause between steps in milliseconds.
    pub interval_ms: u64,
    /// Name of the stand-in world to run against.
    pub world: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            interval_ms: 0,
            world: "repetition".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.engine.mode, Mode::Recursive);
        assert_eq!(cfg.primitives.len(), 4);
        assert_eq!(cfg.run.steps, 50);
        assert_eq!(cfg.engine.resolve(), EngineConfig::recursive());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[engine]
mode = "simple"
"#;
        let cfg: AgentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.engine.mode, Mode::Simple);
        // Defaults for unspecified fields
        assert_eq!(cfg.primitives, PrimitiveSpec::default_table());
        assert_eq!(cfg.run.world, "repetition");
        let engine = cfg.engine.resolve();
        assert_eq!(engine.context_depth, ContextDepth::One);
        assert_eq!(engine.mood_threshold, MoodThreshold::Positive);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[engine]
mode = "constructive"
context_depth = 1
selection_key = "valence"
mood_threshold = "positive"
negative_policy = "avoid"
mood_strategy = "switch_when_sad"
use_alternatives = false
seed = 42

[[primitives]]
meaning = "move forward"
experiment = "e1"
result = "r1"
valence = 5

[[primitives]]
meaning = "bump"
experiment = "e1"
result = "r2"
valence = -10

[run]
steps = 200
interval_ms = 100
world = "homeostatic"
"#;
        let cfg: AgentConfig = toml::from_str(toml_str).unwrap();
        let engine = cfg.engine.resolve();
        assert_eq!(engine.context_depth, ContextDepth::One);
        assert_eq!(engine.proposal, Proposal::Interaction);
        assert_eq!(engine.selection_key, SelectionKey::Valence);
        assert_eq!(engine.mood_threshold, MoodThreshold::Positive);
        assert_eq!(engine.negative_policy, NegativePolicy::Avoid);
        assert_eq!(engine.mood_strategy, MoodStrategy::SwitchWhenSad);
        assert!(!engine.use_alternatives);
        assert_eq!(engine.seed, Some(42));
        assert_eq!(cfg.primitives.len(), 2);
        assert_eq!(cfg.primitives[1].label(), "e1r2");
        assert_eq!(cfg.run.steps, 200);
        assert_eq!(cfg.run.interval_ms, 100);
        assert_eq!(cfg.run.world, "homeostatic");
    }

    #[test]
    fn test_invalid_context_depth_rejected() {
        let toml_str = r#"
[engine]
context_depth = 3
"#;
        assert!(toml::from_str::<AgentConfig>(toml_str).is_err());
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("enactive_bad_config_{}.toml", std::process::id()));
        std::fs::write(&path, "[engine]\ncontext_depth = 3\n").unwrap();

        let err = AgentConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse"));
        let cfg = AgentConfig::load_or_default(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(cfg.primitives, PrimitiveSpec::default_table());
        assert_eq!(cfg.run.interval_ms, 0);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Constructive".parse::<Mode>(), Ok(Mode::Constructive));
        assert_eq!(
            "deep".parse::<Mode>(),
            Err(EnactiveError::UnknownMode("deep".to_string()))
        );
    }

    #[test]
    fn test_presets_differ_on_documented_axes() {
        let simple = EngineConfig::simple();
        let recursive = EngineConfig::recursive();
        let constructive = EngineConfig::constructive();
        assert_eq!(simple.mood_threshold, MoodThreshold::Positive);
        assert_eq!(recursive.mood_threshold, MoodThreshold::NonNegative);
        assert_eq!(simple.selection_key, SelectionKey::Valence);
        assert_eq!(recursive.selection_key, SelectionKey::Proclivity);
        assert_eq!(recursive.proposal, Proposal::Experiment);
        assert_eq!(constructive.proposal, Proposal::Interaction);
        assert!(constructive.use_alternatives);
        assert_eq!(EngineConfig::simple().with_seed(3).seed, Some(3));
    }

    #[test]
    fn test_validate_table() {
        assert_eq!(
            PrimitiveSpec::validate_table(&[]),
            Err(EnactiveError::EmptyPrimitiveTable)
        );
        assert!(PrimitiveSpec::validate_table(&PrimitiveSpec::default_table()).is_ok());
        assert!(PrimitiveSpec::validate_table(&PrimitiveSpec::embodied_table()).is_ok());

        let dup = vec![
            PrimitiveSpec::new("a", "e1", "r1", -1),
            PrimitiveSpec::new("b", "e1", "r1", 1),
        ];
        match PrimitiveSpec::validate_table(&dup) {
            Err(EnactiveError::DuplicatePrimitive { label, first, second }) => {
                assert_eq!(label, "e1r1");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("Expected DuplicatePrimitive, got {:?}", other),
        }
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("ENACTIVE_MODE", "simple");
        std::env::set_var("ENACTIVE_STEPS", "7");

        let mut cfg = AgentConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.engine.mode, Mode::Simple);
        assert_eq!(cfg.run.steps, 7);

        // Clean up env vars before testing defaults
        std::env::remove_var("ENACTIVE_MODE");
        std::env::remove_var("ENACTIVE_STEPS");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = AgentConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.engine.mode, Mode::Recursive);
        assert_eq!(cfg.run.steps, 50);
    }
}
