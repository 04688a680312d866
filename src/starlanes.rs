//! Starlane network: adjacency, bounded graph search and lane feasibility.
//!
//! `systems_within_jumps` is the one graph search shared by every predicate
//! that asks about hop counts. It is a multi-source breadth-first search, so a
//! predicate can seed it once with every system of interest instead of running
//! one search per candidate.

use std::collections::{BTreeMap, HashMap, VecDeque};

use petgraph::algo::has_path_connecting;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{EdgeFiltered, EdgeRef};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;

/// New lanes must leave every existing lane at an endpoint by at least this angle.
pub const MIN_LANE_ANGLE_DEGREES: f64 = 15.0;

/// New lanes must not pass closer than this to a third system.
pub const MIN_LANE_SYSTEM_CLEARANCE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SystemNode {
    id: ObjectId,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(from = "StarlaneData", into = "StarlaneData")
)]
pub struct Starlanes {
    graph: UnGraph<SystemNode, ()>,
    nodes: HashMap<ObjectId, NodeIndex>,
}

/// Flat form of the network used for snapshots.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StarlaneData {
    pub systems: Vec<(ObjectId, f64, f64)>,
    pub lanes: Vec<(ObjectId, ObjectId)>,
}

impl From<StarlaneData> for Starlanes {
    fn from(data: StarlaneData) -> Self {
        let mut lanes = Starlanes::default();
        for (id, x, y) in data.systems {
            lanes.add_system(id, x, y);
        }
        for (a, b) in data.lanes {
            lanes.add_lane(a, b);
        }
        lanes
    }
}

impl From<Starlanes> for StarlaneData {
    fn from(lanes: Starlanes) -> Self {
        let mut systems: Vec<_> = lanes
            .graph
            .node_weights()
            .map(|node| (node.id, node.x, node.y))
            .collect();
        systems.sort_by_key(|(id, _, _)| *id);
        let mut pairs: Vec<_> = lanes
            .graph
            .edge_references()
            .map(|edge| {
                let a = lanes.graph[edge.source()].id;
                let b = lanes.graph[edge.target()].id;
                if a <= b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort();
        StarlaneData {
            systems,
            lanes: pairs,
        }
    }
}

impl PartialEq for Starlanes {
    fn eq(&self, other: &Self) -> bool {
        StarlaneData::from(self.clone()) == StarlaneData::from(other.clone())
    }
}

impl PartialEq for StarlaneData {
    fn eq(&self, other: &Self) -> bool {
        self.lanes == other.lanes
            && self.systems.len() == other.systems.len()
            && self
                .systems
                .iter()
                .zip(&other.systems)
                .all(|(a, b)| a.0 == b.0 && a.1 == b.1 && a.2 == b.2)
    }
}

impl Starlanes {
    /// Register a system. Re-adding an id updates its position.
    pub fn add_system(&mut self, id: ObjectId, x: f64, y: f64) {
        if let Some(&index) = self.nodes.get(&id) {
            self.graph[index] = SystemNode { id, x, y };
            return;
        }
        let index = self.graph.add_node(SystemNode { id, x, y });
        self.nodes.insert(id, index);
    }

    /// Connect two registered systems. Returns false if either is unknown,
    /// they are the same system, or the lane already exists.
    pub fn add_lane(&mut self, a: ObjectId, b: ObjectId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.nodes.get(&a), self.nodes.get(&b)) else {
            return false;
        };
        if ia == ib || self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, ());
        true
    }

    pub fn contains_system(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn has_lane(&self, a: ObjectId, b: ObjectId) -> bool {
        match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Systems one jump from `system`, in ascending id order.
    pub fn neighbors(&self, system: ObjectId) -> Vec<ObjectId> {
        let Some(&index) = self.nodes.get(&system) else {
            return Vec::new();
        };
        let mut out: Vec<_> = self
            .graph
            .neighbors(index)
            .map(|n| self.graph[n].id)
            .collect();
        out.sort();
        out
    }

    pub fn lane_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every system within `max_jumps` of any start system, with its hop count
    /// to the nearest start. Unknown start systems are ignored.
    pub fn systems_within_jumps(
        &self,
        starts: impl IntoIterator<Item = ObjectId>,
        max_jumps: u32,
    ) -> BTreeMap<ObjectId, u32> {
        let mut reached: BTreeMap<ObjectId, u32> = BTreeMap::new();
        let mut queue = VecDeque::new();
        for start in starts {
            if let Some(&index) = self.nodes.get(&start)
                && !reached.contains_key(&start)
            {
                reached.insert(start, 0);
                queue.push_back((index, 0u32));
            }
        }

        while let Some((index, depth)) = queue.pop_front() {
            if depth >= max_jumps {
                continue;
            }
            for next in self.graph.neighbors(index) {
                let id = self.graph[next].id;
                if reached.contains_key(&id) {
                    continue;
                }
                reached.insert(id, depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
        reached
    }

    /// Returns true if a lane between `a` and `b` would be geometrically
    /// acceptable: the lane is new, crosses no existing lane, passes no third
    /// system closer than `MIN_LANE_SYSTEM_CLEARANCE`, and leaves every lane
    /// already at either endpoint by at least `MIN_LANE_ANGLE_DEGREES`.
    pub fn can_add_lane(&self, a: ObjectId, b: ObjectId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.nodes.get(&a), self.nodes.get(&b)) else {
            return false;
        };
        if ia == ib || self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        let pa = self.graph[ia];
        let pb = self.graph[ib];

        for edge in self.graph.edge_references() {
            let (ic, id) = (edge.source(), edge.target());
            if ic == ia || ic == ib || id == ia || id == ib {
                continue;
            }
            if segments_cross(pa, pb, self.graph[ic], self.graph[id]) {
                return false;
            }
        }

        for index in self.graph.node_indices() {
            if index == ia || index == ib {
                continue;
            }
            if distance_to_segment(self.graph[index], pa, pb) < MIN_LANE_SYSTEM_CLEARANCE {
                return false;
            }
        }

        let min_angle = MIN_LANE_ANGLE_DEGREES.to_radians();
        let clears_existing = |from: NodeIndex, toward: SystemNode| {
            let origin = self.graph[from];
            self.graph
                .neighbors(from)
                .all(|n| angle_between(origin, toward, self.graph[n]) >= min_angle)
        };
        clears_existing(ia, pb) && clears_existing(ib, pa)
    }

    /// Returns true if a lane joins `a` and `b` and they remain connected
    /// through the rest of the network once it is gone.
    pub fn can_remove_lane(&self, a: ObjectId, b: ObjectId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.nodes.get(&a), self.nodes.get(&b)) else {
            return false;
        };
        let Some(lane) = self.graph.find_edge(ia, ib) else {
            return false;
        };
        let without_lane = EdgeFiltered::from_fn(&self.graph, |edge| edge.id() != lane);
        has_path_connecting(&without_lane, ia, ib, None)
    }
}

fn cross(o: SystemNode, a: SystemNode, b: SystemNode) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Proper intersection of segments p1p2 and p3p4. Touching at an endpoint or
/// overlapping collinearly does not count as crossing.
fn segments_cross(p1: SystemNode, p2: SystemNode, p3: SystemNode, p4: SystemNode) -> bool {
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn distance_to_segment(p: SystemNode, a: SystemNode, b: SystemNode) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    (p.x - (a.x + t * dx)).hypot(p.y - (a.y + t * dy))
}

/// Angle at `origin` between the rays toward `a` and toward `b`, in radians.
fn angle_between(origin: SystemNode, a: SystemNode, b: SystemNode) -> f64 {
    let (ax, ay) = (a.x - origin.x, a.y - origin.y);
    let (bx, by) = (b.x - origin.x, b.y - origin.y);
    let norms = ax.hypot(ay) * bx.hypot(by);
    if norms == 0.0 {
        return 0.0;
    }
    ((ax * bx + ay * by) / norms).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A(0,0) - B(100,0) - C(200,0) - D(300,0)
    fn line() -> Starlanes {
        let mut lanes = Starlanes::default();
        for (id, x) in [(1, 0.0), (2, 100.0), (3, 200.0), (4, 300.0)] {
            lanes.add_system(ObjectId(id), x, 0.0);
        }
        lanes.add_lane(ObjectId(1), ObjectId(2));
        lanes.add_lane(ObjectId(2), ObjectId(3));
        lanes.add_lane(ObjectId(3), ObjectId(4));
        lanes
    }

    #[test]
    fn test_bfs_is_bounded() {
        let lanes = line();
        let within = lanes.systems_within_jumps([ObjectId(2)], 1);
        let ids: Vec<_> = within.keys().copied().collect();
        assert_eq!(ids, vec![ObjectId(1), ObjectId(2), ObjectId(3)]);
        assert_eq!(within[&ObjectId(2)], 0);
        assert_eq!(within[&ObjectId(3)], 1);
    }

    #[test]
    fn test_bfs_multi_source_takes_nearest() {
        let lanes = line();
        let within = lanes.systems_within_jumps([ObjectId(1), ObjectId(4)], 1);
        assert_eq!(within.len(), 4);
        assert_eq!(within[&ObjectId(3)], 1);
    }

    #[test]
    fn test_bfs_zero_jumps_is_start_only() {
        let lanes = line();
        let within = lanes.systems_within_jumps([ObjectId(3), ObjectId(99)], 0);
        assert_eq!(within.keys().copied().collect::<Vec<_>>(), vec![ObjectId(3)]);
    }

    #[test]
    fn test_duplicate_lane_rejected() {
        let mut lanes = line();
        assert!(!lanes.add_lane(ObjectId(2), ObjectId(1)));
        assert!(!lanes.add_lane(ObjectId(2), ObjectId(2)));
        assert_eq!(lanes.lane_count(), 3);
    }

    #[test]
    fn test_cannot_remove_bridge_lane() {
        let lanes = line();
        assert!(!lanes.can_remove_lane(ObjectId(2), ObjectId(3)));
        assert!(!lanes.can_remove_lane(ObjectId(1), ObjectId(3)));
    }

    #[test]
    fn test_can_remove_lane_in_cycle() {
        let mut lanes = Starlanes::default();
        lanes.add_system(ObjectId(1), 0.0, 0.0);
        lanes.add_system(ObjectId(2), 100.0, 0.0);
        lanes.add_system(ObjectId(3), 50.0, 80.0);
        lanes.add_lane(ObjectId(1), ObjectId(2));
        lanes.add_lane(ObjectId(2), ObjectId(3));
        lanes.add_lane(ObjectId(3), ObjectId(1));
        assert!(lanes.can_remove_lane(ObjectId(1), ObjectId(2)));
    }

    #[test]
    fn test_new_lane_may_not_pass_through_system() {
        let lanes = line();
        // A-C would run straight through B.
        assert!(!lanes.can_add_lane(ObjectId(1), ObjectId(3)));
    }

    #[test]
    fn test_new_lane_may_not_cross_existing_lane() {
        let mut lanes = Starlanes::default();
        lanes.add_system(ObjectId(1), 0.0, 0.0);
        lanes.add_system(ObjectId(2), 100.0, 100.0);
        lanes.add_system(ObjectId(3), 0.0, 100.0);
        lanes.add_system(ObjectId(4), 100.0, 0.0);
        lanes.add_lane(ObjectId(1), ObjectId(2));
        assert!(!lanes.can_add_lane(ObjectId(3), ObjectId(4)));
        assert!(lanes.can_add_lane(ObjectId(1), ObjectId(3)));
    }

    #[test]
    fn test_new_lane_needs_angular_separation() {
        let mut lanes = Starlanes::default();
        lanes.add_system(ObjectId(1), 0.0, 0.0);
        lanes.add_system(ObjectId(2), 100.0, 0.0);
        lanes.add_system(ObjectId(3), 100.0, 10.0);
        lanes.add_lane(ObjectId(1), ObjectId(2));
        // Roughly 5.7 degrees away from the 1-2 lane at system 1.
        assert!(!lanes.can_add_lane(ObjectId(1), ObjectId(3)));
    }

    #[test]
    fn test_unknown_systems_are_never_feasible() {
        let lanes = line();
        assert!(!lanes.can_add_lane(ObjectId(1), ObjectId(42)));
        assert!(!lanes.can_remove_lane(ObjectId(42), ObjectId(1)));
        assert!(lanes.neighbors(ObjectId(42)).is_empty());
    }

    #[test]
    fn test_flat_form_round_trip_preserves_lanes() {
        let lanes = line();
        let data = StarlaneData::from(lanes.clone());
        assert_eq!(data.lanes.len(), 3);
        let rebuilt = Starlanes::from(data);
        assert_eq!(rebuilt, lanes);
    }
}
