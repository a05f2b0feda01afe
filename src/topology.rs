//! Bridge topology: joints, members and their cross-sections.

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use crate::catalog::CrossSection;
use crate::errors::TopologyError;
use crate::geometry::{GridPoint, Joint, MemberGeometry};
use crate::scenario::ScenarioDescriptor;

/// A member connecting two joints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Member {
    /// One-based member number.
    pub number: usize,
    /// One-based start joint number.
    pub start: usize,
    /// One-based end joint number.
    pub end: usize,
    /// Material, family and size.
    pub cross_section: CrossSection,
    /// Length and direction, computed when the member was added.
    pub geometry: MemberGeometry,
}

/// The joints and members of one bridge design.
///
/// Joints and members are numbered from 1 in insertion order and are never
/// removed, so numbers stay valid for the life of the topology.
#[derive(Clone, Debug)]
pub struct Topology {
    /// Joints are nodes, members are edges directed from start to end.
    graph: Graph<Joint, Member>,
    /// Length of one grid step in metres.
    grid_size: f64,
}

impl Topology {
    /// Create an empty topology on a grid of `grid_size` metres.
    ///
    /// # Examples
    /// ```
    /// use bridgex::Topology;
    ///
    /// let topology = Topology::new(0.25);
    /// assert_eq!(topology.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new(grid_size: f64) -> Self {
        Self {
            graph: Graph::new(),
            grid_size,
        }
    }

    /// Create a topology holding the joints a scenario prescribes.
    #[must_use]
    pub fn from_scenario(descriptor: &ScenarioDescriptor) -> Self {
        let scenario = descriptor.load_scenario();
        let mut topology = Self::new(scenario.grid_size);
        for joint in descriptor.prescribed_joints() {
            topology.add_joint(joint.position.x, joint.position.y);
        }
        topology
    }

    /// Length of one grid step in metres.
    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Return the number of joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a joint at grid position `(x, y)` and return its number.
    ///
    /// # Examples
    /// ```
    /// use bridgex::Topology;
    ///
    /// let mut topology = Topology::new(0.25);
    /// assert_eq!(topology.add_joint(0, 0), 1);
    /// assert_eq!(topology.add_joint(16, 0), 2);
    /// ```
    pub fn add_joint(&mut self, x: i32, y: i32) -> usize {
        let number = self.joint_count() + 1;
        self.graph.add_node(Joint::new(number, x, y));
        number
    }

    /// Connect joints `start` and `end` with a new member and return its number.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownJoint`] when either joint is missing and
    /// [`TopologyError::CoincidentJoints`] when both sit on the same grid point.
    pub fn add_member(
        &mut self,
        start: usize,
        end: usize,
        cross_section: CrossSection,
    ) -> Result<usize, TopologyError> {
        let start_node = self.node(start)?;
        let end_node = self.node(end)?;
        let geometry = MemberGeometry::between(
            self.graph[start_node].position,
            self.graph[end_node].position,
            self.grid_size,
        )
        .ok_or(TopologyError::CoincidentJoints { start, end })?;
        let number = self.member_count() + 1;
        self.graph.add_edge(
            start_node,
            end_node,
            Member {
                number,
                start,
                end,
                cross_section,
                geometry,
            },
        );
        Ok(number)
    }

    /// Replace the cross-section of a member.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownMember`] when `member` does not exist.
    pub fn set_member_cross_section(
        &mut self,
        member: usize,
        cross_section: CrossSection,
    ) -> Result<(), TopologyError> {
        let edge = self.edge(member)?;
        self.graph[edge].cross_section = cross_section;
        Ok(())
    }

    /// Retrieve a joint by number.
    #[must_use]
    pub fn joint(&self, number: usize) -> Option<&Joint> {
        self.node(number).ok().map(|node| &self.graph[node])
    }

    /// Retrieve a member by number.
    #[must_use]
    pub fn member(&self, number: usize) -> Option<&Member> {
        self.edge(number).ok().map(|edge| &self.graph[edge])
    }

    /// Find the joint at a grid position.
    #[must_use]
    pub fn joint_at(&self, position: GridPoint) -> Option<&Joint> {
        self.joints().find(|joint| joint.position == position)
    }

    /// Iterate over joints in number order.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> {
        self.graph.node_weights()
    }

    /// Iterate over members in number order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.graph.edge_weights()
    }

    /// Numbers of joints that no member touches.
    #[must_use]
    pub fn unconnected_joints(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .filter(|&node| {
                self.graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .chain(self.graph.neighbors_directed(node, Direction::Incoming))
                    .next()
                    .is_none()
            })
            .map(|node| self.graph[node].number)
            .collect()
    }

    /// Graph index of a joint number.
    fn node(&self, number: usize) -> Result<NodeIndex, TopologyError> {
        if number == 0 || number > self.joint_count() {
            return Err(TopologyError::UnknownJoint(number));
        }
        Ok(NodeIndex::new(number - 1))
    }

    /// Graph index of a member number.
    fn edge(&self, number: usize) -> Result<EdgeIndex, TopologyError> {
        if number == 0 || number > self.member_count() {
            return Err(TopologyError::UnknownMember(number));
        }
        Ok(EdgeIndex::new(number - 1))
    }
}
