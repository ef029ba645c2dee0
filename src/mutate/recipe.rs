//! Custom recipes - an ordered chain of single-output transforms

use super::catalog;
use crate::error::Result;
use crate::types::RecipeMode;

/// One step of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeStep {
    Reverse,
    Upper,
    Lower,
    SwapCase,
    Capitalize,
    Double,
    Leet,
    Strip,
    /// Unrecognized step name, passes the candidate through
    Unknown(String),
}

/// Accepted spellings for each step, matched after trimming and lowercasing
const STEP_ALIASES: &[(&[&str], RecipeStep)] = &[
    (&["-r", "--reverse", "reverse"], RecipeStep::Reverse),
    (&["-u", "--upper", "--uppercase", "upper", "uppercase"], RecipeStep::Upper),
    (&["-l", "--lower", "--lowercase", "lower", "lowercase"], RecipeStep::Lower),
    (&["-s", "--swap", "--swapcase", "swap", "swapcase"], RecipeStep::SwapCase),
    (&["-c", "--capital", "--capitalize", "capital", "capitalize"], RecipeStep::Capitalize),
    (&["-d", "--double", "double"], RecipeStep::Double),
    (&["-t", "--leet", "leet"], RecipeStep::Leet),
    (&["strip"], RecipeStep::Strip),
];

fn strip_whitespace(word: &str) -> String {
    word.split_whitespace().collect()
}

impl RecipeStep {
    /// Resolve a step name
    pub fn parse(name: &str) -> Self {
        let key = name.trim().to_lowercase();
        STEP_ALIASES
            .iter()
            .find(|(aliases, _)| aliases.contains(&key.as_str()))
            .map(|(_, step)| step.clone())
            .unwrap_or(RecipeStep::Unknown(key))
    }

    /// The pure transform this step applies, `None` for unknown steps
    pub fn transform(&self) -> Option<fn(&str) -> String> {
        match self {
            RecipeStep::Reverse => Some(catalog::reverse),
            RecipeStep::Upper => Some(catalog::upper),
            RecipeStep::Lower => Some(catalog::lower),
            RecipeStep::SwapCase => Some(catalog::swap_case),
            RecipeStep::Capitalize => Some(catalog::capitalize),
            RecipeStep::Double => Some(catalog::double),
            RecipeStep::Leet => Some(catalog::leet_all),
            RecipeStep::Strip => Some(strip_whitespace),
            RecipeStep::Unknown(_) => None,
        }
    }

    pub fn apply(&self, word: &str) -> String {
        match self.transform() {
            Some(transform) => transform(word),
            None => word.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RecipeStep::Unknown(_))
    }
}

/// An ordered list of steps; each original word yields exactly one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    steps: Vec<RecipeStep>,
}

impl Recipe {
    /// Build a recipe from step names
    pub fn parse<S: AsRef<str>>(names: &[S], mode: RecipeMode) -> Result<Self> {
        let steps: Vec<RecipeStep> = names
            .iter()
            .map(|name| RecipeStep::parse(name.as_ref()))
            .collect();

        for step in steps.iter().filter(|step| step.is_unknown()) {
            if let RecipeStep::Unknown(name) = step {
                match mode {
                    RecipeMode::Strict => {
                        return Err(crate::config_error!("Unknown recipe step '{}'", name));
                    }
                    RecipeMode::Permissive => {
                        tracing::warn!(step = %name, "Unknown recipe step, passing candidates through");
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    /// Split a comma-separated recipe string
    pub fn parse_list(list: &str, mode: RecipeMode) -> Result<Self> {
        let names: Vec<&str> = list.split(',').filter(|s| !s.trim().is_empty()).collect();
        Self::parse(&names, mode)
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order
    pub fn apply(&self, word: &str) -> String {
        self.steps
            .iter()
            .fold(word.to_string(), |current, step| step.apply(&current))
    }
}
