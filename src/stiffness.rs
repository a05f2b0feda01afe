//! Global stiffness matrix assembly for planar pin-jointed trusses.

use log::debug;
use nalgebra::{DMatrix, Matrix2};

use crate::catalog::Params;
use crate::restraints::Restraints;
use crate::topology::{Member, Topology};

/// Axial stiffness AE/L of a member in kN/m.
#[must_use]
pub fn axial_stiffness(member: &Member, params: &Params) -> f64 {
    params.axial_rigidity(&member.cross_section) / member.geometry.length
}

/// The 2×2 block a member contributes to each pair of its end joints, in
/// global coordinates.
fn member_block(member: &Member, params: &Params) -> Matrix2<f64> {
    let k = axial_stiffness(member, params);
    let cx = member.geometry.cos_x;
    let cy = member.geometry.cos_y;
    let xy = k * cx * cy;
    Matrix2::new(k * cx * cx, xy, xy, k * cy * cy)
}

/// Assemble the `2·n_joints` square stiffness matrix by superposing every
/// member's contribution.
///
/// Each member adds its block to the (start, start) and (end, end) joint
/// blocks and subtracts it from (start, end) and (end, start).
#[must_use]
pub fn assemble_stiffness(topology: &Topology, params: &Params) -> DMatrix<f64> {
    let n_equations = 2 * topology.joint_count();
    let mut stiffness = DMatrix::zeros(n_equations, n_equations);
    for member in topology.members() {
        let block = member_block(member, params);
        let start = 2 * (member.start - 1);
        let end = 2 * (member.end - 1);
        for (row, col, sign) in [
            (start, start, 1.0),
            (start, end, -1.0),
            (end, start, -1.0),
            (end, end, 1.0),
        ] {
            let mut target = stiffness.fixed_view_mut::<2, 2>(row, col);
            target += block * sign;
        }
    }
    debug!(
        "assembled {n_equations}x{n_equations} stiffness matrix from {} members",
        topology.member_count()
    );
    stiffness
}

/// Decouple every restrained degree of freedom from the system.
///
/// The equation's row and column are zeroed with a unit diagonal, and the
/// matching entry of every load instance is zeroed, so the matrix stays
/// square and the restrained displacement solves to zero.
pub fn apply_restraints(
    stiffness: &mut DMatrix<f64>,
    loads: &mut DMatrix<f64>,
    restraints: &Restraints,
) {
    for equation in restraints.fixed_equations() {
        if equation >= stiffness.nrows() {
            continue;
        }
        stiffness.row_mut(equation).fill(0.0);
        stiffness.column_mut(equation).fill(0.0);
        stiffness[(equation, equation)] = 1.0;
        loads.row_mut(equation).fill(0.0);
    }
}
