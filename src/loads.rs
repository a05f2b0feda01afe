//! Nodal load vectors for every load instance.
//!
//! Column `k` of the load matrix is load instance `k + 1`. Instance 1 holds
//! the dead loads only; instance `k` for `k >= 2` adds the design truck with
//! its rear axle on deck joint `k - 1` and its front axle on deck joint `k`,
//! up to instance `n_loaded_joints`. The last instance, `n_loaded_joints + 1`,
//! carries the dead loads only.

use log::debug;
use nalgebra::DMatrix;

use crate::catalog::Params;
use crate::scenario::LoadScenario;
use crate::topology::Topology;

/// Standard gravity in m/s².
const GRAVITY: f64 = 9.8066;

/// Zero-based equation number of the vertical DOF of a one-based joint.
const fn y_equation(joint: usize) -> usize {
    2 * joint - 1
}

/// Build the `2·n_joints × n_load_instances` load matrix in kN.
#[must_use]
pub fn assemble_loads(topology: &Topology, scenario: &LoadScenario, params: &Params) -> DMatrix<f64> {
    let n_equations = 2 * topology.joint_count();
    let n_instances = scenario.n_load_instances();
    let mut loads = DMatrix::zeros(n_equations, n_instances);
    apply_self_weight(&mut loads, topology, params);
    apply_dead_load(&mut loads, topology, scenario, params);
    apply_live_load(&mut loads, topology, scenario, params);
    debug!("assembled {n_instances} load instances over {n_equations} equations");
    loads
}

/// Subtract `load` from the vertical DOF of `joint` in every instance.
fn push_down_everywhere(loads: &mut DMatrix<f64>, joint: usize, load: f64) {
    for value in loads.row_mut(y_equation(joint)).iter_mut() {
        *value -= load;
    }
}

/// Half of every member's factored weight acts at each of its ends.
fn apply_self_weight(loads: &mut DMatrix<f64>, topology: &Topology, params: &Params) {
    for member in topology.members() {
        let cross_section = &member.cross_section;
        let weight = params.dead_load_factor
            * params.shape(cross_section).area
            * member.geometry.length
            * params.material(cross_section).density
            * GRAVITY
            / 2.0
            / 1000.0;
        push_down_everywhere(loads, member.start, weight);
        push_down_everywhere(loads, member.end, weight);
    }
}

/// The roadway weighs on every deck joint; the two end joints carry half.
fn apply_dead_load(
    loads: &mut DMatrix<f64>,
    topology: &Topology,
    scenario: &LoadScenario,
    params: &Params,
) {
    let point_dead_load = params.load_case(scenario.load_case).point_dead_load;
    let last = scenario.n_loaded_joints.min(topology.joint_count());
    for joint in 1..=last {
        let load = if joint == 1 || joint == scenario.n_loaded_joints {
            point_dead_load / 2.0
        } else {
            point_dead_load
        };
        push_down_everywhere(loads, joint, load);
    }
}

/// Step the two-axle truck across the deck, one instance per position.
///
/// The truck stops with its front axle on the last deck joint; the final
/// instance stays unloaded by traffic.
fn apply_live_load(
    loads: &mut DMatrix<f64>,
    topology: &Topology,
    scenario: &LoadScenario,
    params: &Params,
) {
    let load_case = params.load_case(scenario.load_case);
    let front = params.live_load_factor * load_case.front_axle_load;
    let rear = params.live_load_factor * load_case.rear_axle_load;
    let deck_joints = scenario.n_loaded_joints.min(topology.joint_count());
    for instance in 2..=scenario.n_loaded_joints {
        let column = instance - 1;
        let front_joint = instance;
        let rear_joint = instance - 1;
        if front_joint <= deck_joints {
            loads[(y_equation(front_joint), column)] -= front;
        }
        if rear_joint <= deck_joints {
            loads[(y_equation(rear_joint), column)] -= rear;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{CrossSection, LoadCaseId, Section};
    use crate::scenario::SupportType;

    /// Three deck joints under load case A.
    fn scenario() -> LoadScenario {
        LoadScenario {
            n_loaded_joints: 3,
            support: SupportType::Simple,
            grid_size: 0.25,
            load_case: LoadCaseId::A,
            site_cost: 0.0,
        }
    }

    /// Deck joints 1-3 and one joint above the middle.
    fn deck() -> Topology {
        let mut topology = Topology::new(0.25);
        topology.add_joint(0, 0);
        topology.add_joint(16, 0);
        topology.add_joint(32, 0);
        topology.add_joint(16, 16);
        topology
    }

    #[test]
    fn matrix_has_one_column_per_instance() {
        let loads = assemble_loads(&deck(), &scenario(), &Params::default());
        assert_eq!(loads.shape(), (8, 4));
        assert!(loads.row(0).iter().all(|&load| load == 0.0));
    }

    #[test]
    fn dead_load_is_halved_at_deck_ends() {
        let params = Params::default();
        let loads = assemble_loads(&deck(), &scenario(), &params);
        let dead = params.load_case(LoadCaseId::A).point_dead_load;
        assert_relative_eq!(loads[(1, 0)], -dead / 2.0);
        assert_relative_eq!(loads[(3, 0)], -dead);
        assert_relative_eq!(loads[(5, 0)], -dead / 2.0);
        assert_eq!(loads[(7, 0)], 0.0);
    }

    #[test]
    fn truck_steps_across_the_deck() {
        let params = Params::default();
        let loads = assemble_loads(&deck(), &scenario(), &params);
        let case = params.load_case(LoadCaseId::A);
        let front = params.live_load_factor * case.front_axle_load;
        let rear = params.live_load_factor * case.rear_axle_load;

        let live = |equation: usize, column: usize| loads[(equation, column)] - loads[(equation, 0)];
        // Instance 2: rear on joint 1, front on joint 2.
        assert_relative_eq!(live(1, 1), -rear, epsilon = 1.0e-9);
        assert_relative_eq!(live(3, 1), -front, epsilon = 1.0e-9);
        assert_relative_eq!(live(5, 1), 0.0, epsilon = 1.0e-9);
        // Instance 3: rear on joint 2, front on joint 3.
        assert_relative_eq!(live(3, 2), -rear, epsilon = 1.0e-9);
        assert_relative_eq!(live(5, 2), -front, epsilon = 1.0e-9);
        // Instance 4 carries no traffic.
        assert_relative_eq!(live(3, 3), 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(live(5, 3), 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn last_instance_is_dead_load_only() {
        let params = Params::default();
        let mut topology = deck();
        let section = CrossSection::new(1, Section::Hollow, 12).expect("catalog entry");
        topology.add_member(1, 2, section).expect("member added");
        topology.add_member(2, 3, section).expect("member added");
        let loads = assemble_loads(&topology, &scenario(), &params);
        let last = scenario().n_load_instances() - 1;
        assert_eq!(loads.column(last), loads.column(0));
        assert_ne!(loads.column(last - 1), loads.column(0));
    }

    #[test]
    fn member_weight_splits_between_its_ends() {
        let params = Params::default();
        let mut topology = deck();
        let section = CrossSection::new(0, Section::Solid, 10).expect("catalog entry");
        topology.add_member(2, 4, section).expect("member added");

        let bare = assemble_loads(&deck(), &scenario(), &params);
        let loaded = assemble_loads(&topology, &scenario(), &params);
        let expected = 1.35 * 80.0e-6 * 80.0 * 4.0 * 7850.0 * GRAVITY / 2.0 / 1000.0;
        for column in 0..4 {
            assert_relative_eq!(loaded[(3, column)] - bare[(3, column)], -expected, epsilon = 1.0e-12);
            assert_relative_eq!(loaded[(7, column)] - bare[(7, column)], -expected, epsilon = 1.0e-12);
            assert_eq!(loaded[(6, column)], 0.0);
        }
    }
}
