//! Overlap resolution.
//!
//! Some primitives (MCL among them) can place an entity in more than one
//! group. Before recursing, every such entity is kept only in the smallest of
//! the groups that claimed it, judged by the groups' sizes *before* any
//! removal. Ties go to the earliest group.
//!
//! The number and order of groups is preserved; a group emptied by the
//! resolution stays in place as an empty group and the caller decides what to
//! do with it.

use std::collections::HashMap;
use std::hash::Hash;

/// An entity that was claimed by several groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap<T> {
    /// The contested entity.
    pub entity: T,
    /// Indices of every group that claimed it, ascending.
    pub homes: Vec<usize>,
    /// Index of the group that kept it.
    pub winner: usize,
}

/// Deduplicated groups plus a record of what was moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<T> {
    /// One entry per input group, same order. May contain empty groups.
    pub clusters: Vec<Vec<T>>,
    /// One entry per contested entity, in first-seen order.
    pub overlaps: Vec<Overlap<T>>,
}

/// Keep each entity only in the smallest group that claimed it.
///
/// Members keep their relative order within the winning group. Repeats of an
/// entity inside a single group collapse to its first occurrence.
pub fn resolve_memberships<T: Clone + Eq + Hash>(clusters: &[Vec<T>]) -> Resolution<T> {
    let mut homes: HashMap<&T, Vec<usize>> = HashMap::new();
    let mut first_seen: Vec<&T> = Vec::new();
    for (id, cluster) in clusters.iter().enumerate() {
        for member in cluster {
            let entry = homes.entry(member).or_default();
            if entry.is_empty() {
                first_seen.push(member);
            }
            if entry.last() != Some(&id) {
                entry.push(id);
            }
        }
    }

    // Winner by original size, then by id.
    let mut winners: HashMap<&T, usize> = HashMap::with_capacity(homes.len());
    let mut overlaps = Vec::new();
    for member in first_seen {
        let ids = &homes[member];
        let winner = ids
            .iter()
            .copied()
            .min_by_key(|&id| (clusters[id].len(), id))
            .unwrap_or(ids[0]);
        winners.insert(member, winner);
        if ids.len() > 1 {
            overlaps.push(Overlap {
                entity: member.clone(),
                homes: ids.clone(),
                winner,
            });
        }
    }

    let resolved = clusters
        .iter()
        .enumerate()
        .map(|(id, cluster)| {
            let mut placed: Vec<&T> = Vec::with_capacity(cluster.len());
            let mut out = Vec::with_capacity(cluster.len());
            for member in cluster {
                if winners.get(member) == Some(&id) && !placed.contains(&member) {
                    placed.push(member);
                    out.push(member.clone());
                }
            }
            out
        })
        .collect();

    Resolution {
        clusters: resolved,
        overlaps,
    }
}
