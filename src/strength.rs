//! Member capacities and failure checks.
//!
//! Compressive capacity follows the column formula of the steel design code:
//! with λ = L²·Fy·A / (π²·E·I), short columns (λ ≤ 2.25) reach
//! φc·0.66^λ·Fy·A and long columns buckle at φc·0.88·Fy·A/λ. Tensile capacity
//! is φt·Fy·A. A member too slender to rate has no capacity at all.

use nalgebra::DMatrix;
use serde::Serialize;

use crate::catalog::Params;
use crate::topology::Member;

/// π² as used by the design code.
const PI_SQUARED: f64 = 9.869_604_4;

/// λ above which a column buckles rather than yields.
const INELASTIC_LIMIT: f64 = 2.25;

/// How a member fails, or `None` when it does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FailMode {
    /// The member carries its load.
    None,
    /// Elastic buckling governs.
    Buckles,
    /// Yielding governs.
    Yields,
    /// The member exceeds the slenderness limit and cannot be rated.
    Slenderness,
}

/// Capacities of one member and the mode that governs each.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberStrength {
    /// Compressive capacity in kN; zero when the mode is `Slenderness`.
    pub compressive: f64,
    /// Tensile capacity in kN; zero when the mode is `Slenderness`.
    pub tensile: f64,
    /// Governing compressive mode.
    pub compressive_fail_mode: FailMode,
    /// Governing tensile mode.
    pub tensile_fail_mode: FailMode,
}

impl MemberStrength {
    /// Rate a member.
    ///
    /// Cable-supported bridges skip the slenderness limit.
    ///
    /// # Examples
    /// ```
    /// use bridgex::{CrossSection, FailMode, MemberStrength, Params, Section, Topology};
    ///
    /// let mut topology = Topology::new(0.25);
    /// let a = topology.add_joint(0, 0);
    /// let b = topology.add_joint(16, 0);
    /// let tube = CrossSection::new(0, Section::Hollow, 20).unwrap();
    /// topology.add_member(a, b, tube).unwrap();
    ///
    /// let strength = MemberStrength::rate(topology.member(1).unwrap(), &Params::default(), false);
    /// assert_eq!(strength.compressive_fail_mode, FailMode::Yields);
    /// assert!(strength.tensile > strength.compressive);
    /// ```
    #[must_use]
    pub fn rate(member: &Member, params: &Params, cable_supported: bool) -> Self {
        let shape = params.shape(&member.cross_section);
        let material = params.material(&member.cross_section);
        let length = member.geometry.length;
        let area = shape.area;
        let fy = material.yield_strength;

        let radius_of_gyration = shape.radius_of_gyration();
        let slenderness = if radius_of_gyration > 0.0 {
            length / radius_of_gyration
        } else {
            0.0
        };

        if !cable_supported && slenderness >= params.slenderness_limit {
            return Self {
                compressive: 0.0,
                tensile: 0.0,
                compressive_fail_mode: FailMode::Slenderness,
                tensile_fail_mode: FailMode::Slenderness,
            };
        }

        let lambda =
            length * length * fy * area / (PI_SQUARED * material.elastic_modulus * shape.moment);
        let (compressive, compressive_fail_mode) = if lambda <= INELASTIC_LIMIT {
            (
                params.compression_resistance_factor * 0.66_f64.powf(lambda) * fy * area,
                FailMode::Yields,
            )
        } else {
            (
                params.compression_resistance_factor * 0.88 * fy * area / lambda,
                FailMode::Buckles,
            )
        };

        Self {
            compressive,
            tensile: params.tension_resistance_factor * fy * area,
            compressive_fail_mode,
            tensile_fail_mode: FailMode::Yields,
        }
    }
}

/// Largest forces a member sees across all load instances, both as positive
/// magnitudes in kN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MaxForces {
    /// Largest compression.
    pub compression: f64,
    /// Largest tension.
    pub tension: f64,
}

impl MaxForces {
    /// Fold one member's row of the force matrix.
    #[must_use]
    pub fn of_row(forces: &DMatrix<f64>, row: usize) -> Self {
        forces.row(row).iter().fold(Self::default(), |max, &force| {
            if force < 0.0 {
                Self {
                    compression: max.compression.max(-force),
                    ..max
                }
            } else {
                Self {
                    tension: max.tension.max(force),
                    ..max
                }
            }
        })
    }
}

/// Outcome of checking one member against its worst-case forces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberCheck {
    /// One-based member number.
    pub member: usize,
    /// Capacities.
    pub strength: MemberStrength,
    /// Worst-case demand.
    pub max_forces: MaxForces,
    /// Mode of compressive failure, `FailMode::None` when the member holds.
    pub compressive_failure: FailMode,
    /// Mode of tensile failure, `FailMode::None` when the member holds.
    pub tensile_failure: FailMode,
}

impl MemberCheck {
    /// Compare demand with capacity.
    ///
    /// A slenderness-limited member fails whatever its forces; otherwise a
    /// member fails when its demand reaches its capacity.
    #[must_use]
    pub fn new(member: usize, strength: MemberStrength, max_forces: MaxForces) -> Self {
        let failure = |mode: FailMode, demand: f64, capacity: f64| {
            if mode == FailMode::Slenderness || demand >= capacity {
                mode
            } else {
                FailMode::None
            }
        };
        Self {
            member,
            strength,
            max_forces,
            compressive_failure: failure(
                strength.compressive_fail_mode,
                max_forces.compression,
                strength.compressive,
            ),
            tensile_failure: failure(
                strength.tensile_fail_mode,
                max_forces.tension,
                strength.tensile,
            ),
        }
    }

    /// Whether the member fails in either direction.
    #[must_use]
    pub fn fails(&self) -> bool {
        self.compressive_failure != FailMode::None || self.tensile_failure != FailMode::None
    }
}
