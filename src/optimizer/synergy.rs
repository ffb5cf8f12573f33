//! Crew synergy: officers sharing a group boost the crew's combined effect score.

use std::collections::BTreeMap;

use crate::data::roster::RosterOfficer;

pub const SYNERGY_PAIR_MULTIPLIER: f64 = 1.10;
pub const SYNERGY_TRIO_MULTIPLIER: f64 = 1.25;

/// Size of the largest subset of `officers` sharing a non-null synergy id.
pub fn largest_synergy_group(officers: &[&RosterOfficer]) -> usize {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for group in officers.iter().filter_map(|officer| officer.synergy_id.as_deref()) {
        *counts.entry(group).or_default() += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

pub fn multiplier_for_group_size(size: usize) -> f64 {
    match size {
        0 | 1 => 1.0,
        2 => SYNERGY_PAIR_MULTIPLIER,
        _ => SYNERGY_TRIO_MULTIPLIER,
    }
}

pub fn synergy_multiplier(officers: &[&RosterOfficer]) -> f64 {
    multiplier_for_group_size(largest_synergy_group(officers))
}
