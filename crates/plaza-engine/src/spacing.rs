//! One-shot even spacing of a route's agents along the loop's arc length.
//!
//! Newly spawned agents all sit at waypoint 0; left that way they would
//! trip over each other's avoidance radii on the very first tick.  This
//! pass spreads them out so the loop starts in a steady circulation.

use plaza_agent::AgentStore;
use plaza_route::Route;

/// Initialization progress of one route-group.
///
/// The only persistent state outside agent records.  A route moves to
/// `Initialized` exactly once — after a pass that actually found agents —
/// and never back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SpacingState {
    /// Spacing has not run (or found no agents yet); eligible to run.
    #[default]
    Uninitialized,
    /// Spacing is done; the pass never runs again for this route.
    Initialized,
}

/// Evenly distribute `members` (agent indices on `route`) along the loop.
///
/// Agents flagged `hand_placed` keep their authored seats; the remaining
/// agents are assigned target arc-lengths `k * L / N` (`N` = their count,
/// `k` in spawn order) and receive the `(current_waypoint, distance_along)`
/// decomposition of their target.
///
/// Returns `true` when the route should be marked [`SpacingState::Initialized`]
/// — i.e. at least one agent exists.  An empty `members` slice is a no-op
/// and leaves the route eligible to be spaced on a later tick.
pub fn space_evenly(store: &mut AgentStore, route: &Route, members: &[u32]) -> bool {
    if members.is_empty() {
        return false;
    }

    let slots: Vec<u32> = members
        .iter()
        .copied()
        .filter(|&i| !store.hand_placed[i as usize])
        .collect();
    if slots.is_empty() {
        // Every agent was hand-placed; nothing to redistribute.
        return true;
    }

    let spacing = route.total_length() / slots.len() as f32;
    for (k, &i) in slots.iter().enumerate() {
        let (waypoint, offset) = route.locate(k as f32 * spacing);
        store.current_waypoint[i as usize] = waypoint;
        store.distance_along[i as usize] = offset;
    }
    true
}
