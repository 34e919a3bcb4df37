//! Weighted, quota-constrained role draft.
//!
//! Every tag in the config is one slot to fill. A slot's pool is every role
//! in the table that fills its tag. Slots are resolved smallest pool first
//! so the tags most likely to fail get the widest choice; slots whose pool
//! is already empty go last. Before each pick, roles that reached their
//! `max` are dropped from every remaining pool and the slots are re-sorted.
//!
//! A slot with nothing left gets [`FALLBACK_ROLE`] and is recorded as
//! failed. With `settings.strictDraft` the draft raises instead.

use std::str::FromStr;

use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{EngineError, GameConfig, GameRng, Result};
use crate::roles::{RoleKind, FALLBACK_ROLE};

/// One filled slot.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftPick {
    pub tag: String,
    pub role: RoleKind,
    /// The slot had no candidate left and got the fallback role.
    pub fallback: bool,
}

/// Result of a draft: one pick per tag, in tag order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub picks: Vec<DraftPick>,
    /// Tags that fell back, in the order they were resolved.
    pub failed: Vec<String>,
}

impl Draft {
    /// The drafted roles, in tag order.
    #[must_use]
    pub fn roles(&self) -> Vec<RoleKind> {
        self.picks.iter().map(|pick| pick.role).collect()
    }

    /// How many slots got `role` from the weighted pick, fallbacks excluded.
    #[must_use]
    pub fn count(&self, role: RoleKind) -> usize {
        self.picks
            .iter()
            .filter(|pick| pick.role == role && !pick.fallback)
            .count()
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    role: RoleKind,
    weight: f64,
}

#[derive(Debug)]
struct Slot {
    index: usize,
    tag: String,
    pool: Vec<Candidate>,
}

fn sort_slots(slots: &mut [Slot]) {
    slots.sort_by_key(|slot| (slot.pool.is_empty(), slot.pool.len()));
}

/// Draft one role per tag of `config`.
pub fn draft_roles(config: &GameConfig, rng: &mut GameRng) -> Result<Draft> {
    info!("--- Generating roles ---");
    info!("Tags: {:?}", config.tags);

    let mut table = Vec::with_capacity(config.roles.len());
    for (name, entry) in &config.roles {
        let role = RoleKind::from_str(name).map_err(|_| EngineError::UnknownRole(name.clone()))?;
        table.push((role, entry));
    }

    let mut slots: Vec<Slot> = config
        .tags
        .iter()
        .enumerate()
        .map(|(index, tag)| Slot {
            index,
            tag: tag.clone(),
            pool: table
                .iter()
                .filter(|(role, _)| role.fills(tag))
                .map(|(role, entry)| Candidate {
                    role: *role,
                    weight: entry.weight,
                })
                .collect(),
        })
        .collect();

    let mut counts: FxHashMap<RoleKind, u32> = FxHashMap::default();
    let mut blacklist: FxHashSet<RoleKind> = FxHashSet::default();
    let mut picks: Vec<(usize, DraftPick)> = Vec::with_capacity(slots.len());
    let mut failed = Vec::new();

    sort_slots(&mut slots);
    while !slots.is_empty() {
        for (role, entry) in &table {
            let count = counts.get(role).copied().unwrap_or(0);
            if count >= entry.max && blacklist.insert(*role) {
                info!("- Max reached for '{role}' -> adding to blacklist");
                for slot in &mut slots {
                    slot.pool.retain(|candidate| candidate.role != *role);
                }
            }
        }
        sort_slots(&mut slots);

        let slot = slots.remove(0);
        let pick = match choose(&slot.pool, rng) {
            Some(role) => {
                info!("Picking {}: {}", slot.tag, role);
                *counts.entry(role).or_insert(0) += 1;
                DraftPick {
                    tag: slot.tag,
                    role,
                    fallback: false,
                }
            }
            None => {
                warn!("Picking {}: {} <--- FAILED!!!", slot.tag, FALLBACK_ROLE);
                failed.push(slot.tag.clone());
                DraftPick {
                    tag: slot.tag,
                    role: FALLBACK_ROLE,
                    fallback: true,
                }
            }
        };
        picks.push((slot.index, pick));
    }

    if !failed.is_empty() {
        warn!("Number of failures: {}", failed.len());
        if config.settings.strict_draft {
            return Err(EngineError::DraftExhausted { tags: failed });
        }
    }

    picks.sort_by_key(|(index, _)| *index);
    let draft = Draft {
        picks: picks.into_iter().map(|(_, pick)| pick).collect(),
        failed,
    };
    info!("Roles: {:?}", draft.roles());
    Ok(draft)
}

/// Weighted pick from a pool; a pool of all-zero weights is picked uniformly.
fn choose(pool: &[Candidate], rng: &mut GameRng) -> Option<RoleKind> {
    if pool.is_empty() {
        return None;
    }
    let weights: Vec<f64> = pool.iter().map(|candidate| candidate.weight).collect();
    let index = rng
        .choose_weighted(&weights)
        .unwrap_or_else(|| rng.gen_range_usize(0..pool.len()));
    Some(pool[index].role)
}
