//! Evolution data and the evolution step run after each gym win.

use super::provider::{CreatureProvider, ProviderError};
use super::types::Creature;
use rand::seq::SliceRandom;
use rand::Rng;

/// Registered successors for a species. Branching lines list every branch.
pub fn successors(species_id: u32) -> &'static [u32] {
    match species_id {
        // Generation 1
        1 => &[2],
        2 => &[3],
        4 => &[5],
        5 => &[6],
        7 => &[8],
        8 => &[9],
        10 => &[11],
        11 => &[12],
        13 => &[14],
        14 => &[15],
        16 => &[17],
        17 => &[18],
        19 => &[20],
        21 => &[22],
        23 => &[24],
        25 => &[26],
        27 => &[28],
        29 => &[30],
        30 => &[31],
        32 => &[33],
        33 => &[34],
        35 => &[36],
        37 => &[38],
        39 => &[40],
        41 => &[42],
        42 => &[169],
        43 => &[44],
        44 => &[45, 182],
        46 => &[47],
        48 => &[49],
        50 => &[51],
        52 => &[53],
        54 => &[55],
        56 => &[57],
        58 => &[59],
        60 => &[61],
        61 => &[62, 186],
        63 => &[64],
        64 => &[65],
        66 => &[67],
        67 => &[68],
        69 => &[70],
        70 => &[71],
        72 => &[73],
        74 => &[75],
        75 => &[76],
        77 => &[78],
        79 => &[80, 199],
        81 => &[82],
        82 => &[462],
        84 => &[85],
        86 => &[87],
        88 => &[89],
        90 => &[91],
        92 => &[93],
        93 => &[94],
        95 => &[208],
        96 => &[97],
        98 => &[99],
        100 => &[101],
        102 => &[103],
        104 => &[105],
        108 => &[463],
        109 => &[110],
        111 => &[112],
        112 => &[464],
        113 => &[242],
        114 => &[465],
        116 => &[117],
        117 => &[230],
        118 => &[119],
        120 => &[121],
        123 => &[212],
        125 => &[466],
        126 => &[467],
        129 => &[130],
        133 => &[134, 135, 136, 196, 197, 470, 471, 700],
        137 => &[233],
        138 => &[139],
        140 => &[141],
        147 => &[148],
        148 => &[149],
        // Generation 2
        152 => &[153],
        153 => &[154],
        155 => &[156],
        156 => &[157],
        158 => &[159],
        159 => &[160],
        172 => &[25],
        173 => &[35],
        174 => &[39],
        175 => &[176],
        176 => &[468],
        233 => &[474],
        236 => &[106, 107, 237],
        // Generation 3
        252 => &[253],
        253 => &[254],
        255 => &[256],
        256 => &[257],
        258 => &[259],
        259 => &[260],
        280 => &[281],
        281 => &[282, 475],
        // Generation 4
        387 => &[388],
        388 => &[389],
        390 => &[391],
        391 => &[392],
        393 => &[394],
        394 => &[395],
        440 => &[113],
        // Generation 5
        495 => &[496],
        496 => &[497],
        498 => &[499],
        499 => &[500],
        501 => &[502],
        502 => &[503],
        // Generation 6
        650 => &[651],
        651 => &[652],
        653 => &[654],
        654 => &[655],
        656 => &[657],
        657 => &[658],
        // Generation 7
        722 => &[723],
        723 => &[724],
        725 => &[726],
        726 => &[727],
        728 => &[729],
        729 => &[730],
        // Generation 8
        810 => &[811],
        811 => &[812],
        813 => &[814],
        814 => &[815],
        816 => &[817],
        817 => &[818],
        _ => &[],
    }
}

/// What happened when the team was given a chance to evolve.
#[derive(Debug, Clone, PartialEq)]
pub enum EvolutionOutcome {
    /// `team[index]` was replaced by `new`.
    Evolved {
        index: usize,
        old: Creature,
        new: Creature,
    },
    /// A member was picked but the successor could not be fetched.
    /// The team is untouched.
    Failed {
        index: usize,
        old: Creature,
        error: ProviderError,
    },
    /// Nobody on the team has a registered successor.
    NoneEligible,
}

/// Pick one eligible team member at random and evolve it in place.
///
/// The member is chosen uniformly among those with at least one successor,
/// then the successor is chosen uniformly among its branches. The evolved
/// creature keeps the shiny flag of the original.
pub fn resolve_evolution<P, R>(team: &mut [Creature], provider: &P, rng: &mut R) -> EvolutionOutcome
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    let eligible: Vec<(usize, Vec<u32>)> = team
        .iter()
        .enumerate()
        .map(|(index, mon)| (index, provider.possible_successors(mon.species_id)))
        .filter(|(_, next)| !next.is_empty())
        .collect();

    let Some((index, next)) = eligible.choose(rng) else {
        return EvolutionOutcome::NoneEligible;
    };
    let index = *index;
    let old = team[index].clone();
    let Some(&successor) = next.choose(rng) else {
        return EvolutionOutcome::NoneEligible;
    };

    match provider.fetch_by_id(successor, old.shiny) {
        Ok(new) => {
            tracing::debug!(from = old.species_id, to = new.species_id, index, "evolution");
            team[index] = new.clone();
            EvolutionOutcome::Evolved { index, old, new }
        }
        Err(error) => {
            tracing::warn!(species = successor, %error, "evolution lookup failed");
            EvolutionOutcome::Failed { index, old, error }
        }
    }
}
