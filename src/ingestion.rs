//! JSON ingestion of Kripke structures (`SPEC_FULL.md` §4.7/§6.5) and of formula list files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::IngestError;
use crate::formula::Ap;
use crate::kripke::{Kripke, State};

/// The on-disk JSON shape for a Kripke structure. Integer keys are encoded as JSON strings (a
/// `serde_json` map requirement); a missing `R` or `L` entry for a state denotes an empty
/// successor list or label set respectively. There is no explicit state count in the envelope —
/// it is derived as one more than the largest index mentioned anywhere in `s0`, `r`, or `l`.
#[derive(Debug, Deserialize)]
struct KripkeEnvelope {
    #[serde(rename = "S0")]
    s0: Vec<State>,
    #[serde(rename = "R", default)]
    r: HashMap<String, Vec<State>>,
    #[serde(rename = "L", default)]
    l: HashMap<String, Vec<String>>,
}

/// Load a Kripke structure from a JSON file at `path`.
pub fn load_kripke(path: impl AsRef<Path>) -> Result<Kripke, IngestError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_kripke_json(&text)
}

/// Parse a Kripke structure from an in-memory JSON string.
pub fn parse_kripke_json(text: &str) -> Result<Kripke, IngestError> {
    let envelope: KripkeEnvelope = serde_json::from_str(text)?;
    build_kripke(envelope)
}

fn build_kripke(envelope: KripkeEnvelope) -> Result<Kripke, IngestError> {
    let mut max_state = 0usize;
    for &s in &envelope.s0 {
        max_state = max_state.max(s);
    }
    for (key, succs) in &envelope.r {
        max_state = max_state.max(parse_state_key(key)?);
        for &t in succs {
            max_state = max_state.max(t);
        }
    }
    for key in envelope.l.keys() {
        max_state = max_state.max(parse_state_key(key)?);
    }

    let n = max_state + 1;
    let mut successors = vec![Vec::new(); n];
    for (key, succs) in envelope.r {
        let s = parse_state_key(&key)?;
        successors[s] = succs;
    }

    let mut labels: HashMap<State, HashSet<Ap>> = HashMap::new();
    for (key, aps) in envelope.l {
        let s = parse_state_key(&key)?;
        labels.insert(s, aps.into_iter().map(Ap::new).collect());
    }

    Ok(Kripke::new(envelope.s0, successors, labels)?)
}

/// A Kripke JSON envelope's `R`/`L` keys are encoded as JSON strings; this parses one back to a
/// state index, surfacing a malformed key as an [IngestError] rather than silently defaulting it
/// to state 0, since JSON ingestion is the one recoverable-error checkpoint for malformed input.
fn parse_state_key(key: &str) -> Result<State, IngestError> {
    key.parse()
        .map_err(|_| IngestError::InvalidStateKey(key.to_string()))
}

/// Load one CTL formula per line from `path`. Blank lines and `#`-prefixed comment lines are
/// ignored, mirroring the formula-list loading convention the CLI front end uses.
pub fn load_formulae(path: impl AsRef<Path>) -> Result<Vec<String>, IngestError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
