//! Joint displacements and member forces from the inverted stiffness matrix.

use nalgebra::DMatrix;

use crate::catalog::Params;
use crate::geometry::Displacement;
use crate::stiffness::axial_stiffness;
use crate::topology::Topology;

/// Joint displacements for every load instance, one column per instance.
///
/// `inverse` must already hold the inverted restrained stiffness matrix and
/// `loads` the restrained load vectors.
#[must_use]
pub fn joint_displacements(inverse: &DMatrix<f64>, loads: &DMatrix<f64>) -> DMatrix<f64> {
    inverse * loads
}

/// Displacement of a one-based joint in one column of the displacement matrix.
///
/// Callers check that `joint` is at least 1 and within the matrix.
#[must_use]
pub(crate) fn joint_displacement(displacements: &DMatrix<f64>, joint: usize, column: usize) -> Displacement {
    let x = 2 * (joint - 1);
    Displacement::new(displacements[(x, column)], displacements[(x + 1, column)])
}

/// Axial force in every member for every load instance, one row per member.
///
/// Tension is positive and compression negative.
#[must_use]
pub fn member_forces(topology: &Topology, params: &Params, displacements: &DMatrix<f64>) -> DMatrix<f64> {
    let n_instances = displacements.ncols();
    let mut forces = DMatrix::zeros(topology.member_count(), n_instances);
    for member in topology.members() {
        let k = axial_stiffness(member, params);
        let row = member.number - 1;
        for column in 0..n_instances {
            let start = joint_displacement(displacements, member.start, column);
            let end = joint_displacement(displacements, member.end, column);
            forces[(row, column)] = k
                * (member.geometry.cos_x * (end.x - start.x)
                    + member.geometry.cos_y * (end.y - start.y));
        }
    }
    forces
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{CrossSection, Section};

    #[test]
    fn stretching_a_member_produces_tension() {
        let mut topology = Topology::new(0.25);
        let a = topology.add_joint(0, 0);
        let b = topology.add_joint(12, 16);
        let section = CrossSection::new(0, Section::Solid, 8).expect("catalog entry");
        topology.add_member(a, b, section).expect("member added");
        let params = Params::default();
        let k = axial_stiffness(topology.member(1).expect("member exists"), &params);

        // Column 0 moves joint b along the member axis, column 1 across it.
        let displacements = DMatrix::from_row_slice(
            4,
            2,
            &[
                0.0, 0.0, //
                0.0, 0.0, //
                0.6e-3, -0.8e-3, //
                0.8e-3, 0.6e-3,
            ],
        );
        let forces = member_forces(&topology, &params, &displacements);
        assert_eq!(forces.shape(), (1, 2));
        assert_relative_eq!(forces[(0, 0)], k * 1.0e-3, max_relative = 1.0e-12);
        assert_relative_eq!(forces[(0, 1)], 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn displacements_are_inverse_times_loads() {
        let inverse = DMatrix::from_row_slice(2, 2, &[0.5, 0.0, 0.0, 0.25]);
        let loads = DMatrix::from_row_slice(2, 2, &[2.0, -4.0, 8.0, 0.0]);
        let displacements = joint_displacements(&inverse, &loads);
        assert_eq!(displacements, DMatrix::from_row_slice(2, 2, &[1.0, -2.0, 2.0, 0.0]));
        assert_eq!(
            joint_displacement(&displacements, 1, 1),
            Displacement::new(-2.0, 0.0)
        );
    }
}
