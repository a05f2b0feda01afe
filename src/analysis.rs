//! The full load test of one bridge design.
//!
//! A run derives restraints from the support type, assembles and restrains
//! the stiffness matrix and load vectors, inverts the matrix, recovers
//! displacements and member forces for every load instance, then rates every
//! member against its worst-case forces. Cost is computed independently and
//! is reported even when the structure cannot be analysed.

use log::{debug, info, warn};
use nalgebra::DMatrix;
use serde::Serialize;

use crate::catalog::Params;
use crate::cost::CostBreakdown;
use crate::errors::AnalysisError;
use crate::geometry::Displacement;
use crate::loads::assemble_loads;
use crate::recovery::{joint_displacement, joint_displacements, member_forces};
use crate::restraints::Restraints;
use crate::scenario::LoadScenario;
use crate::solver::invert_in_place;
use crate::stiffness::{apply_restraints, assemble_stiffness};
use crate::strength::{MaxForces, MemberCheck, MemberStrength};
use crate::topology::Topology;

/// Everything a load test produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Whether the bridge was analysed and every member holds.
    pub valid: bool,
    /// Total cost in whole dollars; zero for a bridge without members.
    pub cost: i64,
    /// Parts of the cost, absent for a bridge without members.
    pub cost_breakdown: Option<CostBreakdown>,
    /// Why the bridge could not be analysed, if it could not.
    pub error: Option<AnalysisError>,
    /// Per-member ratings in member order; empty when analysis failed.
    pub members: Vec<MemberCheck>,
    /// Joint displacements in metres, one column per load instance.
    pub displacements: Option<DMatrix<f64>>,
    /// Member forces in kN, one row per member and one column per load
    /// instance.
    pub member_forces: Option<DMatrix<f64>>,
}

impl AnalysisReport {
    /// Report for a run that never reached the solver or failed in it.
    fn unanalysed(error: AnalysisError, cost_breakdown: Option<CostBreakdown>) -> Self {
        Self {
            valid: false,
            cost: cost_breakdown.map_or(0, |breakdown| breakdown.total()),
            cost_breakdown,
            error: Some(error),
            members: Vec::new(),
            displacements: None,
            member_forces: None,
        }
    }

    /// Members that fail in compression or tension.
    pub fn failing_members(&self) -> impl Iterator<Item = &MemberCheck> {
        self.members.iter().filter(|check| check.fails())
    }

    /// Displacement of a joint under a one-based load instance.
    #[must_use]
    pub fn joint_displacement(&self, joint: usize, instance: usize) -> Option<Displacement> {
        let displacements = self.displacements.as_ref()?;
        if joint == 0 || 2 * joint > displacements.nrows() {
            return None;
        }
        let column = instance.checked_sub(1).filter(|&c| c < displacements.ncols())?;
        Some(joint_displacement(displacements, joint, column))
    }

    /// Axial force in a member under a one-based load instance; tension is
    /// positive.
    #[must_use]
    pub fn member_force(&self, member: usize, instance: usize) -> Option<f64> {
        let forces = self.member_forces.as_ref()?;
        let row = member.checked_sub(1)?;
        let column = instance.checked_sub(1)?;
        forces.get((row, column)).copied()
    }
}

/// One load test of a topology under a scenario.
///
/// The analysis borrows its inputs and owns every working matrix for the
/// length of [`Analysis::run`], so independent analyses never share state.
#[derive(Clone, Copy, Debug)]
pub struct Analysis<'a> {
    /// Design under test.
    topology: &'a Topology,
    /// Site and loading.
    scenario: &'a LoadScenario,
    /// Catalog and code factors.
    params: &'a Params,
}

impl<'a> Analysis<'a> {
    /// Prepare an analysis.
    #[must_use]
    pub fn new(topology: &'a Topology, scenario: &'a LoadScenario, params: &'a Params) -> Self {
        Self {
            topology,
            scenario,
            params,
        }
    }

    /// Run the load test.
    #[must_use]
    pub fn run(&self) -> AnalysisReport {
        let topology = self.topology;
        if topology.member_count() == 0 {
            debug!("bridge has no members; skipping analysis");
            return AnalysisReport::unanalysed(AnalysisError::NoMembers, None);
        }

        if (topology.grid_size() - self.scenario.grid_size).abs() > f64::EPSILON {
            warn!(
                "topology grid {} m differs from scenario grid {} m; using the topology's",
                topology.grid_size(),
                self.scenario.grid_size
            );
        }

        let cost_breakdown = CostBreakdown::of(topology, self.scenario, self.params);

        let restraints = Restraints::derive(
            self.scenario.support,
            self.scenario.n_loaded_joints,
            topology.joint_count(),
        );
        let mut stiffness = assemble_stiffness(topology, self.params);
        let mut loads = assemble_loads(topology, self.scenario, self.params);
        apply_restraints(&mut stiffness, &mut loads, &restraints);

        if let Err(error) = invert_in_place(&mut stiffness) {
            let unconnected = topology.unconnected_joints();
            if !unconnected.is_empty() {
                warn!("joints {unconnected:?} are not connected to any member");
            }
            info!("bridge cannot be analysed: {error}");
            return AnalysisReport::unanalysed(error, Some(cost_breakdown));
        }

        let displacements = joint_displacements(&stiffness, &loads);
        let forces = member_forces(topology, self.params, &displacements);

        let cable_supported = self.scenario.support.has_cable();
        let members: Vec<MemberCheck> = topology
            .members()
            .map(|member| {
                MemberCheck::new(
                    member.number,
                    MemberStrength::rate(member, self.params, cable_supported),
                    MaxForces::of_row(&forces, member.number - 1),
                )
            })
            .collect();

        let failures = members.iter().filter(|check| check.fails()).count();
        let valid = failures == 0;
        info!(
            "load test {}: {failures} of {} members fail, cost ${}",
            if valid { "passed" } else { "failed" },
            members.len(),
            cost_breakdown.total()
        );

        AnalysisReport {
            valid,
            cost: cost_breakdown.total(),
            cost_breakdown: Some(cost_breakdown),
            error: None,
            members,
            displacements: Some(displacements),
            member_forces: Some(forces),
        }
    }
}

/// Load test a design and price it.
///
/// # Examples
/// ```
/// use bridgex::{analyze, AnalysisError, LoadCaseId, LoadScenario, Params, SupportType, Topology};
///
/// let scenario = LoadScenario {
///     n_loaded_joints: 3,
///     support: SupportType::Simple,
///     grid_size: 0.25,
///     load_case: LoadCaseId::A,
///     site_cost: 0.0,
/// };
/// let topology = Topology::new(0.25);
/// let report = analyze(&topology, &scenario, &Params::default());
/// assert!(!report.valid);
/// assert_eq!(report.cost, 0);
/// assert_eq!(report.error, Some(AnalysisError::NoMembers));
/// ```
#[must_use]
pub fn analyze(topology: &Topology, scenario: &LoadScenario, params: &Params) -> AnalysisReport {
    Analysis::new(topology, scenario, params).run()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{CrossSection, LoadCaseId, Section};
    use crate::scenario::SupportType;
    use crate::strength::FailMode;

    /// Two deck panels under load case B.
    fn scenario() -> LoadScenario {
        LoadScenario {
            n_loaded_joints: 3,
            support: SupportType::Simple,
            grid_size: 0.25,
            load_case: LoadCaseId::B,
            site_cost: 8_000.0,
        }
    }

    /// A king-post truss over two panels: deck joints 1-3 and an apex at 4.
    fn king_post(section: CrossSection) -> Topology {
        let mut topology = Topology::new(0.25);
        for (x, y) in [(0, 0), (16, 0), (32, 0), (16, 16)] {
            topology.add_joint(x, y);
        }
        for (start, end) in [(1, 2), (2, 3), (1, 4), (4, 3), (2, 4)] {
            topology
                .add_member(start, end, section)
                .expect("member added");
        }
        topology
    }

    #[test]
    fn stable_truss_is_analysed() {
        let section = CrossSection::new(2, Section::Hollow, 24).expect("catalog entry");
        let topology = king_post(section);
        let report = analyze(&topology, &scenario(), &Params::default());

        assert_eq!(report.error, None);
        assert_eq!(report.members.len(), 5);
        let forces = report.member_forces.as_ref().expect("forces available");
        assert_eq!(forces.shape(), (5, 4));

        // Deck chords hang in tension, the rafters push in compression.
        assert!(report.member_force(1, 1).expect("force") > 0.0);
        assert!(report.member_force(3, 1).expect("force") < 0.0);

        // The pinned end does not move.
        let pinned = report.joint_displacement(1, 1).expect("displacement");
        assert_eq!(pinned, Displacement::new(0.0, 0.0));
        let apex = report.joint_displacement(4, 1).expect("displacement");
        assert!(apex.y < 0.0);
        assert!(report.joint_displacement(5, 1).is_none());
        assert!(report.joint_displacement(0, 1).is_none());
        assert!(report.joint_displacement(1, 0).is_none());
        assert!(report.member_force(1, 5).is_none());
    }

    #[test]
    fn geometry_comes_from_the_topology_grid() {
        let section = CrossSection::new(2, Section::Hollow, 24).expect("catalog entry");
        let topology = king_post(section);
        let params = Params::default();
        let matching = analyze(&topology, &scenario(), &params);
        let coarse = LoadScenario {
            grid_size: 0.5,
            ..scenario()
        };
        assert_eq!(analyze(&topology, &coarse, &params), matching);
    }

    #[test]
    fn thin_members_fail() {
        let section = CrossSection::new(0, Section::Solid, 0).expect("catalog entry");
        let report = analyze(&king_post(section), &scenario(), &Params::default());
        assert_eq!(report.error, None);
        assert!(!report.valid);
        assert!(report.failing_members().count() > 0);
        // A 30 mm bar over 4 m is well past the slenderness limit.
        assert!(report
            .members
            .iter()
            .all(|check| check.compressive_failure == FailMode::Slenderness));
    }

    #[test]
    fn mechanism_reports_bad_pivot_and_still_costs() {
        let section = CrossSection::new(0, Section::Hollow, 20).expect("catalog entry");
        let mut topology = Topology::new(0.25);
        for (x, y) in [(0, 0), (16, 0), (32, 0)] {
            topology.add_joint(x, y);
        }
        topology.add_member(1, 2, section).expect("member added");
        topology.add_member(2, 3, section).expect("member added");

        let report = analyze(&topology, &scenario(), &Params::default());
        assert!(!report.valid);
        assert!(matches!(report.error, Some(AnalysisError::BadPivot { .. })));
        assert!(report.members.is_empty());
        let breakdown = report.cost_breakdown.expect("cost computed");
        assert_eq!(report.cost, breakdown.total());
        assert_relative_eq!(breakdown.site, 8_000.0);
    }
}
