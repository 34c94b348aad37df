//! Automatic player that answers from a built-in dictionary

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shared::chains_onto;
use std::collections::HashSet;

/// Default dictionary. Every lowercase letter starts at least one word, so
/// the bot can always answer a word ending in a lowercase letter.
pub const WORDS: &[&str] = &[
    "apple", "anchor", "arrow", "banana", "basket", "breeze", "candle", "castle", "cedar",
    "dragon", "dune", "delta", "eagle", "ember", "echo", "falcon", "forest", "fern", "garden",
    "glacier", "grape", "harbor", "hollow", "honey", "island", "ivory", "iron", "jungle",
    "jasper", "jewel", "kettle", "kernel", "kite", "lantern", "lemon", "lotus", "meadow",
    "marble", "mango", "nectar", "needle", "north", "orchid", "otter", "onion", "pebble",
    "pepper", "planet", "quartz", "quill", "quiet", "river", "raven", "rocket", "saddle",
    "salmon", "spruce", "tiger", "tarp", "thistle", "umbrella", "unicorn", "urchin", "valley",
    "velvet", "violet", "willow", "walnut", "wagon", "xenon", "xylophone", "yarrow", "yellow",
    "yeti", "zephyr", "zebra", "zenith",
];

pub struct WordBot {
    rng: StdRng,
    dictionary: Vec<String>,
    tried: HashSet<String>,
}

impl WordBot {
    /// Creates a bot over [`WORDS`]; a seed makes its choices repeatable
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_dictionary(WORDS.iter().map(|w| w.to_string()).collect(), seed)
    }

    pub fn with_dictionary(dictionary: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            dictionary,
            tried: HashSet::new(),
        }
    }

    /// Forgets the words tried during the previous turn
    pub fn start_turn(&mut self) {
        self.tried.clear();
    }

    /// Picks an untried word that chains onto `current`
    pub fn pick(&mut self, current: &str) -> Option<String> {
        let candidates: Vec<&String> = self
            .dictionary
            .iter()
            .filter(|word| chains_onto(current, word) && !self.tried.contains(*word))
            .collect();

        let choice = candidates.choose(&mut self.rng).map(|word| (*word).clone())?;
        self.tried.insert(choice.clone());
        Some(choice)
    }
}
