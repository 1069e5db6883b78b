//! Generation data: national dex ranges and fixed starter lineups.

use crate::core::constants::GENERATION_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A game generation, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub(crate) u8);

/// A fixed starter choice for a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starter {
    pub name: &'static str,
    pub species_id: u32,
}

const fn starter(name: &'static str, species_id: u32) -> Starter {
    Starter { name, species_id }
}

const STARTERS: [&[Starter]; 8] = [
    &[
        starter("Bulbasaur", 1),
        starter("Charmander", 4),
        starter("Squirtle", 7),
        starter("Pikachu", 25),
    ],
    &[
        starter("Chikorita", 152),
        starter("Cyndaquil", 155),
        starter("Totodile", 158),
    ],
    &[
        starter("Treecko", 252),
        starter("Torchic", 255),
        starter("Mudkip", 258),
    ],
    &[
        starter("Turtwig", 387),
        starter("Chimchar", 390),
        starter("Piplup", 393),
    ],
    &[
        starter("Snivy", 495),
        starter("Tepig", 498),
        starter("Oshawott", 501),
    ],
    &[
        starter("Chespin", 650),
        starter("Fennekin", 653),
        starter("Froakie", 656),
    ],
    &[
        starter("Rowlet", 722),
        starter("Litten", 725),
        starter("Popplio", 728),
    ],
    &[
        starter("Grookey", 810),
        starter("Scorbunny", 813),
        starter("Sobble", 816),
    ],
];

/// National dex ranges per generation (inclusive).
const SPECIES_RANGES: [(u32, u32); 8] = [
    (1, 151),
    (152, 251),
    (252, 386),
    (387, 493),
    (494, 649),
    (650, 721),
    (722, 809),
    (810, 905),
];

impl Generation {
    pub const FIRST: Generation = Generation(1);

    pub fn new(number: u8) -> Option<Self> {
        (1..=GENERATION_COUNT).contains(&number).then_some(Self(number))
    }

    /// Like [`Generation::new`] but unknown numbers fall back to generation 1.
    pub fn or_first(number: u8) -> Self {
        Self::new(number).unwrap_or(Self::FIRST)
    }

    pub fn all() -> impl Iterator<Item = Generation> {
        (1..=GENERATION_COUNT).map(Generation)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        (self.0.clamp(1, GENERATION_COUNT) - 1) as usize
    }

    pub fn species_range(self) -> RangeInclusive<u32> {
        let (min, max) = SPECIES_RANGES[self.index()];
        min..=max
    }

    pub fn starters(self) -> &'static [Starter] {
        STARTERS[self.index()]
    }

    /// Which generation introduced a species, if it is in the supported dex.
    pub fn of_species(species_id: u32) -> Option<Self> {
        Self::all().find(|g| g.species_range().contains(&species_id))
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
