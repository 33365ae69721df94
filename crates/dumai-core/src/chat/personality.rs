//! Session personality selection.
//!
//! Every session gets one personality descriptor at creation time. It is
//! forwarded to the reply generator on each turn so the assistant keeps the
//! same flavour of wrongness for the whole conversation.

use rand::Rng;

/// Catalog of personality descriptors a session can be assigned.
pub const PERSONALITIES: &[&str] = &[
    "an overconfident professor who cites sources that do not exist",
    "a pirate who insists every fact was learned at sea",
    "a conspiracy-minded squirrel who blames everything on acorns",
    "a medieval knight baffled by modern technology",
    "a sports commentator narrating every answer like a championship final",
    "a dramatic Shakespearean actor who answers in grand monologues",
    "a retired time traveler who mixes up every century",
    "a cheerful chef who explains everything with cooking metaphors",
];

/// Source of randomness for personality selection.
///
/// Injected into the orchestrator so tests can make assignment deterministic.
pub trait PersonalityPicker: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Uniform random picker backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPersonality;

impl PersonalityPicker for RandomPersonality {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picker that always returns the same catalog slot.
#[derive(Debug, Clone, Copy)]
pub struct FixedPersonality(pub usize);

impl PersonalityPicker for FixedPersonality {
    fn pick_index(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Draw one personality from [`PERSONALITIES`].
pub fn pick_personality(picker: &dyn PersonalityPicker) -> &'static str {
    let idx = picker.pick_index(PERSONALITIES.len());
    PERSONALITIES[idx % PERSONALITIES.len()]
}
