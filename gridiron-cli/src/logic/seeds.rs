use anyhow::{Result, bail};
use gridiron_game::{decode_share_code, share_code_for_seed};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_SEED: u64 = 1337;

/// Seed metadata used for drives and simulation sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            code: share_code_for_seed(seed),
        }
    }

    #[must_use]
    pub fn from_share_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }

    /// Share code when one exists, the raw seed otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| self.seed.to_string())
    }
}

/// Parse one seed token: a literal integer or a `GR-` share code.
pub fn parse_seed(token: &str) -> Result<SeedInfo> {
    let token = token.trim();
    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }
    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }
    if let Some(seed) = decode_share_code(token) {
        return Ok(SeedInfo::from_share_code(seed, token.to_uppercase()));
    }
    bail!("Unrecognized seed token: {token}");
}

/// Resolve a list of CLI seed arguments into canonical seed metadata.
///
/// Duplicates collapse onto the first occurrence; an empty list falls back
/// to [`DEFAULT_SEED`].
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut deduped: Vec<SeedInfo> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let info = parse_seed(token)?;
        if let Some(existing) = index.get(&info.seed) {
            if let Some(entry) = deduped.get_mut(*existing)
                && entry.code.is_none()
                && info.code.is_some()
            {
                *entry = info;
            }
        } else {
            index.insert(info.seed, deduped.len());
            deduped.push(info);
        }
    }

    if deduped.is_empty() {
        deduped.push(SeedInfo::from_numeric(DEFAULT_SEED));
    }

    Ok(deduped)
}
