//! Fabrication cost of a bridge design.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{CrossSection, Params};
use crate::scenario::LoadScenario;
use crate::topology::Topology;

/// Cost of a design split into its parts, in dollars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Material for one truss.
    pub material: f64,
    /// Joint connections for one truss.
    pub connection: f64,
    /// Ordering fees, one per distinct cross-section.
    pub product: f64,
    /// Site preparation.
    pub site: f64,
}

impl CostBreakdown {
    /// Price a design.
    ///
    /// Material and connections are paid twice because the deck hangs
    /// between two identical trusses; ordering fees and the site are paid
    /// once.
    #[must_use]
    pub fn of(topology: &Topology, scenario: &LoadScenario, params: &Params) -> Self {
        let mut used: HashSet<CrossSection> = HashSet::new();
        let mut material = 0.0;
        for member in topology.members() {
            let cross_section = &member.cross_section;
            let grade = params.material(cross_section);
            material += grade.unit_cost(cross_section.section())
                * params.shape(cross_section).area
                * member.geometry.length
                * grade.density;
            used.insert(*cross_section);
        }
        Self {
            material,
            connection: topology.joint_count() as f64 * params.connection_cost,
            product: used.len() as f64 * params.ordering_fee,
            site: scenario.site_cost,
        }
    }

    /// Total cost before rounding.
    #[must_use]
    pub fn exact_total(&self) -> f64 {
        2.0 * (self.material + self.connection) + self.product + self.site
    }

    /// Total cost rounded to whole dollars, halves away from zero.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.exact_total().round() as i64
    }
}

/// Total cost of a design in whole dollars.
///
/// # Examples
/// ```
/// use bridgex::{cost, CrossSection, LoadCaseId, LoadScenario, Params, Section, SupportType, Topology};
///
/// let scenario = LoadScenario {
///     n_loaded_joints: 2,
///     support: SupportType::Simple,
///     grid_size: 0.25,
///     load_case: LoadCaseId::A,
///     site_cost: 5_000.0,
/// };
/// let mut topology = Topology::new(0.25);
/// let a = topology.add_joint(0, 0);
/// let b = topology.add_joint(16, 0);
/// topology.add_member(a, b, CrossSection::new(0, Section::Solid, 0).unwrap()).unwrap();
///
/// assert_eq!(cost(&topology, &scenario, &Params::default()), 7_843);
/// ```
#[must_use]
pub fn cost(topology: &Topology, scenario: &LoadScenario, params: &Params) -> i64 {
    CostBreakdown::of(topology, scenario, params).total()
}
