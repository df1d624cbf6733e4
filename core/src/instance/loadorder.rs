//! Conflict-driven mod ordering

use hashbrown::HashMap;

use super::Mod;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Order `mods` so that every mod comes after the mods it overwrites.
///
/// The sort is stable: mods without constraints between them keep their
/// relative order. Conflicts naming mods that are not in `mods` are ignored,
/// and cycles are broken at the first back edge met.
pub(super) fn sort_by_conflicts(mods: &[Mod]) -> Vec<&Mod> {
    let index: HashMap<String, usize> = mods
        .iter()
        .enumerate()
        .map(|(i, m)| (m.name.to_lowercase(), i))
        .collect();

    // overwritten[i]: mods whose files mod i overwrites
    let mut overwritten: Vec<Vec<usize>> = vec![Vec::new(); mods.len()];
    for (i, m) in mods.iter().enumerate() {
        for name in &m.mod_conflicts {
            match index.get(&name.to_lowercase()) {
                Some(&winner) if winner != i => overwritten[winner].push(i),
                Some(_) => {}
                None => tracing::debug!("Ignoring conflict of '{}' with missing mod '{}'", m.name, name),
            }
        }
    }
    for targets in &mut overwritten {
        targets.sort_unstable();
        targets.dedup();
    }

    let mut marks = vec![Mark::Unvisited; mods.len()];
    let mut order = Vec::with_capacity(mods.len());
    for i in 0..mods.len() {
        visit(i, &overwritten, &mut marks, &mut order);
    }

    order.into_iter().map(|i| &mods[i]).collect()
}

fn visit(i: usize, overwritten: &[Vec<usize>], marks: &mut [Mark], order: &mut Vec<usize>) {
    match marks[i] {
        Mark::Done => return,
        Mark::Visiting => {
            tracing::warn!("Conflict cycle detected in load order");
            return;
        }
        Mark::Unvisited => {}
    }

    marks[i] = Mark::Visiting;
    for &before in &overwritten[i] {
        visit(before, overwritten, marks, order);
    }
    marks[i] = Mark::Done;
    order.push(i);
}
