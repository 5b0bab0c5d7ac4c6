//! Pipeline stages and the set of enabled optional stages

use serde::Serialize;
use std::collections::HashSet;

/// One step of the podcast pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Script,
    Title,
    Poster,
    Narration,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [Stage::Script, Stage::Title, Stage::Poster, Stage::Narration];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Script => "script",
            Stage::Title => "title",
            Stage::Poster => "poster",
            Stage::Narration => "narration",
        }
    }

    /// Optional stages only run when enabled by configuration
    pub fn is_optional(&self) -> bool {
        matches!(self, Stage::Poster | Stage::Narration)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "script" => Ok(Stage::Script),
            "title" => Ok(Stage::Title),
            "poster" => Ok(Stage::Poster),
            "narration" => Ok(Stage::Narration),
            other => Err(format!("Unknown pipeline stage: {}", other)),
        }
    }
}

/// Optional stages switched on for every run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSet {
    optional: HashSet<Stage>,
}

impl StageSet {
    /// Only the mandatory stages
    pub fn mandatory_only() -> Self {
        Self::default()
    }

    /// Every stage, optional ones included
    pub fn all() -> Self {
        Self {
            optional: Stage::ORDER
                .into_iter()
                .filter(Stage::is_optional)
                .collect(),
        }
    }

    pub fn with(mut self, stage: Stage) -> Self {
        if stage.is_optional() {
            self.optional.insert(stage);
        }
        self
    }

    /// Parse configured names; mandatory stage names are accepted and ignored
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        names.iter().try_fold(Self::default(), |set, name| {
            let stage: Stage = name.as_ref().parse()?;
            Ok(set.with(stage))
        })
    }

    /// Mandatory stages are always enabled
    pub fn is_enabled(&self, stage: Stage) -> bool {
        !stage.is_optional() || self.optional.contains(&stage)
    }

    /// Enabled stages in execution order
    pub fn enabled(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|s| self.is_enabled(*s))
            .collect()
    }
}
