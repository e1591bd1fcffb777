//! Agent bookkeeping and route re-synchronisation.

use corridor_defence_core::{AgentId, PixelPosition};

/// Moving entity advancing along the current route.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Agent {
    /// Identifier allocated by the world for the agent.
    pub(crate) id: AgentId,
    /// Current pixel position reported at spawn time.
    pub(crate) position: PixelPosition,
    /// Index into the current route the agent advances from.
    pub(crate) path_index: usize,
}

/// Roster of live agents with monotonic identifier allocation.
#[derive(Clone, Debug, Default)]
pub(crate) struct AgentRoster {
    agents: Vec<Agent>,
    next_id: u32,
}

impl AgentRoster {
    /// Adds an agent at the provided position, starting at route index zero.
    pub(crate) fn spawn(&mut self, position: PixelPosition) -> AgentId {
        let id = AgentId::new(self.next_id);
        self.next_id += 1;
        self.agents.push(Agent {
            id,
            position,
            path_index: 0,
        });
        id
    }

    /// Removes an agent from the roster.
    pub(crate) fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        let index = self.agents.iter().position(|agent| agent.id == id)?;
        Some(self.agents.remove(index))
    }

    /// Iterates live agents in spawn order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Reports whether any agent is currently alive.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Drops every agent and resets the identifier counter.
    pub(crate) fn clear(&mut self) {
        self.agents.clear();
        self.next_id = 0;
    }

    /// Re-synchronises every agent to the replacement route.
    ///
    /// Each agent is assigned the index of the node nearest to its current
    /// pixel position, clamped to `[0, len - 2]` so the agent always has a
    /// next node to advance toward. Ties keep the earliest index. Routes
    /// shorter than two nodes leave indices untouched.
    ///
    /// Returns the `(agent, path_index)` assignments in spawn order.
    pub(crate) fn retarget(&mut self, nodes: &[PixelPosition]) -> Vec<(AgentId, usize)> {
        if nodes.len() < 2 {
            return Vec::new();
        }

        let last_segment_start = nodes.len() - 2;
        let mut assignments = Vec::with_capacity(self.agents.len());
        for agent in &mut self.agents {
            let mut best_index = 0;
            let mut best_distance = f32::INFINITY;
            for (index, node) in nodes.iter().enumerate() {
                let distance = agent.position.distance_squared(*node);
                if distance < best_distance {
                    best_distance = distance;
                    best_index = index;
                }
            }
            agent.path_index = best_index.min(last_segment_start);
            assignments.push((agent.id, agent.path_index));
        }
        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_nodes(count: usize) -> Vec<PixelPosition> {
        (0..count)
            .map(|index| PixelPosition::new(index as f32 * 10.0, 0.0))
            .collect()
    }

    #[test]
    fn retarget_selects_the_nearest_node() {
        let mut roster = AgentRoster::default();
        let agent = roster.spawn(PixelPosition::new(31.0, 0.0));

        let assignments = roster.retarget(&straight_nodes(6));

        assert_eq!(assignments, vec![(agent, 3)]);
    }

    #[test]
    fn retarget_clamps_to_the_last_segment_start() {
        let mut roster = AgentRoster::default();
        let agent = roster.spawn(PixelPosition::new(500.0, 0.0));

        let assignments = roster.retarget(&straight_nodes(4));

        assert_eq!(assignments, vec![(agent, 2)]);
    }

    #[test]
    fn retarget_ignores_degenerate_routes() {
        let mut roster = AgentRoster::default();
        let _ = roster.spawn(PixelPosition::new(5.0, 5.0));

        assert!(roster.retarget(&straight_nodes(1)).is_empty());
        assert!(roster.retarget(&[]).is_empty());
    }

    #[test]
    fn equidistant_nodes_keep_the_earliest_index() {
        let mut roster = AgentRoster::default();
        let agent = roster.spawn(PixelPosition::new(15.0, 0.0));

        let assignments = roster.retarget(&straight_nodes(4));

        assert_eq!(assignments, vec![(agent, 1)], "ties resolve to the lower index");
    }

    #[test]
    fn despawn_removes_only_the_requested_agent() {
        let mut roster = AgentRoster::default();
        let first = roster.spawn(PixelPosition::new(0.0, 0.0));
        let second = roster.spawn(PixelPosition::new(1.0, 0.0));

        assert!(roster.despawn(first).is_some());
        assert!(roster.despawn(first).is_none());
        let remaining: Vec<_> = roster.iter().map(|agent| agent.id).collect();
        assert_eq!(remaining, vec![second]);
    }
}
