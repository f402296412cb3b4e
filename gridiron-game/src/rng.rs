//! Random sources for the drive engine.
//!
//! Every random decision goes through [`Dice`], so tests can substitute a
//! scripted source and sessions can be replayed from a single user seed.

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;

use crate::seed::share_code_for_seed;

/// Uniform random draws consumed by the catalog and yardage mechanics.
pub trait Dice {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..=high`.
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// Share code that replays this source, if it has one.
    fn share_code(&self) -> Option<String> {
        None
    }
}

impl<R: RngCore> Dice for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}

/// RNG wrapper that counts how many draws were taken from the stream.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Deterministic pair of RNG streams derived from one user-visible seed.
///
/// Play offers and yardage resolution draw from separate streams so the
/// yardage sequence of a seed does not depend on how offers were consumed.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    offers: CountingRng<SmallRng>,
    yardage: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            offers: CountingRng::new(derive_stream_seed(seed, b"offers")),
            yardage: CountingRng::new(derive_stream_seed(seed, b"yardage")),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws taken from the offer stream so far.
    #[must_use]
    pub const fn offer_draws(&self) -> u64 {
        self.offers.draws()
    }

    /// Draws taken from the yardage stream so far.
    #[must_use]
    pub const fn yardage_draws(&self) -> u64 {
        self.yardage.draws()
    }
}

impl Dice for RngBundle {
    fn pick(&mut self, len: usize) -> usize {
        self.offers.gen_range(0..len)
    }

    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.yardage.gen_range(low..=high)
    }

    fn share_code(&self) -> Option<String> {
        share_code_for_seed(self.seed)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
