//! Replay codes for seeded drives.
//!
//! A code reads `GR-<WORD><NN>`, e.g. `GR-BLITZ07`. The word picks one of 64
//! football terms and `NN` is a two-digit suffix, giving 6400 codes. Each code
//! names exactly one seed: the code index tagged into the top bits, so a seed
//! typed as a plain integer only has a code when it lies in that tagged range.

const CODE_PREFIX: &str = "GR";
const SUFFIXES: u64 = 100;
const CODE_SPACE: u64 = WORD_LIST.len() as u64 * SUFFIXES;
/// "GRID" in the high 32 bits.
const CODE_TAG: u64 = 0x4752_4944_0000_0000;

pub const WORD_LIST: [&str; 64] = [
    "BLITZ", "ENDZONE", "HUDDLE", "SNAP", "PUNT", "SACK", "FUMBLE", "SPIRAL", "GRIDIRON", "PYLON",
    "SLANT", "SWEEP", "DRAW", "SCREEN", "OPTION", "DIVE", "TOSS", "COUNTER", "BOOTLEG", "CURL",
    "POST", "FADE", "FLAT", "WHEEL", "SEAM", "HITCH", "OUT", "CORNER", "ROUTE", "AUDIBLE",
    "SHOTGUN", "PISTOL", "WILDCAT", "HASH", "CHAINS", "DOWNS", "GOAL", "FIELD", "TURF", "HELMET",
    "CLEATS", "WHISTLE", "FLAG", "TACKLE", "GUARD", "CENTER", "TIGHTEND", "WIDEOUT", "RUSHER",
    "LINEMAN", "SAFETY", "NICKEL", "DIME", "ZONE", "MAN", "PRESS", "STUNT", "SPIKE", "KNEEL",
    "ONSIDE", "REDZONE", "TWOMIN", "OVERTIME", "TROPHY",
];

const fn seed_for_index(index: u64) -> u64 {
    CODE_TAG | index
}

/// `index` must be below [`CODE_SPACE`].
fn code_for_index(index: u64) -> String {
    let word = WORD_LIST[(index / SUFFIXES) as usize % WORD_LIST.len()];
    format!("{CODE_PREFIX}-{word}{:02}", index % SUFFIXES)
}

/// Resolve a share code back into the seed it names.
///
/// Matching ignores case and surrounding whitespace.
#[must_use]
pub fn decode_share_code(code: &str) -> Option<u64> {
    let (prefix, rest) = code.trim().split_once('-')?;
    if !prefix.eq_ignore_ascii_case(CODE_PREFIX) {
        return None;
    }
    let split = rest.len().checked_sub(2)?;
    let (word, suffix) = (rest.get(..split)?, rest.get(split..)?);
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let nn: u64 = suffix.parse().ok()?;
    let word_index = WORD_LIST
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(word))?;
    Some(seed_for_index(word_index as u64 * SUFFIXES + nn))
}

/// Share code for `seed`, when the seed was produced from one.
#[must_use]
pub fn share_code_for_seed(seed: u64) -> Option<String> {
    let index = seed ^ CODE_TAG;
    (index < CODE_SPACE).then(|| code_for_index(index))
}

/// Pick a share code uniformly from `entropy`.
#[must_use]
pub fn share_code_from_entropy(entropy: u64) -> String {
    code_for_index(entropy % CODE_SPACE)
}
