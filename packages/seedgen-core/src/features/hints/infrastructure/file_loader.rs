//! Hint file loading (YAML or JSON)
//!
//! ```yaml
//! EfiPxeBcUdpRead:
//!   - { variable: This, kind: NonNull }
//!   - { variable: OpFlags, kind: BitmaskSet, operand: 0x01 }
//! Ip4PreProcessPacket:
//!   - { variable: HeaderLength, kind: le, operand: "60" }
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML.
//! Operands may be integers or C literal strings (`"0x01"`).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::features::extraction::infrastructure::parse_literal;
use crate::features::hints::domain::HintRegistry;
use crate::features::predicate::{Origin, Predicate, PredicateKind};

#[derive(Debug, Error)]
pub enum HintError {
    #[error("failed to read hint file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON hint file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML hint file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("hint for {function}: '{variable}' {kind} needs an operand")]
    MissingOperand {
        function: String,
        variable: String,
        kind: PredicateKind,
    },

    #[error("hint for {function}: bad operand '{literal}'")]
    BadOperand { function: String, literal: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOperand {
    Int(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHint {
    variable: String,
    kind: PredicateKind,
    #[serde(default)]
    operand: Option<RawOperand>,
}

type RawHintFile = BTreeMap<String, Vec<RawHint>>;

fn build_registry(raw: RawHintFile) -> Result<HintRegistry, HintError> {
    let mut registry = HintRegistry::new();

    for (function, hints) in raw {
        let mut predicates = Vec::with_capacity(hints.len());
        for hint in hints {
            let operand = match hint.operand {
                None => None,
                Some(RawOperand::Int(v)) => Some(v),
                Some(RawOperand::Text(text)) => Some(parse_literal(text.trim()).ok_or_else(|| {
                    HintError::BadOperand {
                        function: function.clone(),
                        literal: text.clone(),
                    }
                })?),
            };
            if hint.kind.requires_operand() && operand.is_none() {
                return Err(HintError::MissingOperand {
                    function,
                    variable: hint.variable,
                    kind: hint.kind,
                });
            }
            let operand = if hint.kind.requires_operand() { operand } else { None };
            predicates.push(Predicate::new(
                hint.variable,
                hint.kind,
                operand,
                Origin::hint(function.clone()),
            ));
        }
        registry.register(function, predicates);
    }

    Ok(registry)
}

pub fn parse_hints_yaml(text: &str) -> Result<HintRegistry, HintError> {
    build_registry(serde_yaml::from_str(text)?)
}

pub fn parse_hints_json(text: &str) -> Result<HintRegistry, HintError> {
    build_registry(serde_json::from_str(text)?)
}

impl HintRegistry {
    /// Load a hint file and merge it in; file entries win
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, HintError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HintError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let loaded = if is_json {
            parse_hints_json(&text)?
        } else {
            parse_hints_yaml(&text)?
        };

        let count = loaded.len();
        debug!(path = %path.display(), functions = count, "Hint file loaded");
        self.extend(loaded);
        Ok(count)
    }
}
