//! Joint restraints derived from the support configuration.

use log::warn;
use serde::Serialize;

use crate::scenario::SupportType;

/// Fixed degrees of freedom, indexed by one-based joint number.
///
/// Entry 0 exists only so joint numbers can be used directly and is never
/// restrained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Restraints {
    /// Whether horizontal displacement is fixed, per joint.
    x: Vec<bool>,
    /// Whether vertical displacement is fixed, per joint.
    y: Vec<bool>,
}

impl Restraints {
    /// A restraint set for `n_joints` joints with every joint free.
    #[must_use]
    pub fn free(n_joints: usize) -> Self {
        Self {
            x: vec![false; n_joints + 1],
            y: vec![false; n_joints + 1],
        }
    }

    /// Derive the restraints for a support configuration.
    ///
    /// Rules apply in a fixed order because later ones undo earlier ones:
    /// simple support first, then the pier, arch and cable adjustments.
    /// Support joints beyond the deck are numbered after the deck joints.
    ///
    /// # Examples
    /// ```
    /// use bridgex::{Restraints, SupportType};
    ///
    /// let restraints = Restraints::derive(SupportType::Simple, 5, 8);
    /// assert!(restraints.is_x_fixed(1) && restraints.is_y_fixed(1));
    /// assert!(!restraints.is_x_fixed(5) && restraints.is_y_fixed(5));
    /// ```
    #[must_use]
    pub fn derive(support: SupportType, n_loaded_joints: usize, n_joints: usize) -> Self {
        let mut restraints = Self::free(n_joints);

        // Simple support: pin on the left, roller on the right.
        restraints.fix(1, true, true);
        restraints.fix(n_loaded_joints, false, true);

        let mut next_joint = n_loaded_joints + 1;

        if let SupportType::Pier { joint, high } = support {
            if high {
                restraints.fix(joint, true, true);
            } else {
                restraints.fix(next_joint, true, true);
                restraints.release(1, true, false);
                next_joint += 1;
            }
        }

        if support == SupportType::Arch {
            for _ in 0..2 {
                restraints.fix(next_joint, true, true);
                next_joint += 1;
            }
            restraints.release(1, true, true);
            restraints.release(n_loaded_joints, false, true);
        }

        if support.has_cable() {
            restraints.fix(next_joint, true, true);
            next_joint += 1;
        }
        if support == SupportType::CableBoth {
            restraints.fix(next_joint, true, true);
        }

        restraints
    }

    /// Fix the selected directions at `joint`.
    ///
    /// Joints the bridge does not have are skipped with a warning.
    pub fn fix(&mut self, joint: usize, x: bool, y: bool) {
        if joint == 0 || joint >= self.x.len() {
            warn!(
                "support at joint {joint} ignored; bridge has {} joints",
                self.joint_count()
            );
            return;
        }
        self.x[joint] |= x;
        self.y[joint] |= y;
    }

    /// Free the selected directions at `joint`.
    fn release(&mut self, joint: usize, x: bool, y: bool) {
        if joint == 0 || joint >= self.x.len() {
            return;
        }
        if x {
            self.x[joint] = false;
        }
        if y {
            self.y[joint] = false;
        }
    }

    /// Number of joints covered.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.x.len() - 1
    }

    /// Whether horizontal displacement of `joint` is fixed.
    #[must_use]
    pub fn is_x_fixed(&self, joint: usize) -> bool {
        self.x.get(joint).copied().unwrap_or(false)
    }

    /// Whether vertical displacement of `joint` is fixed.
    #[must_use]
    pub fn is_y_fixed(&self, joint: usize) -> bool {
        self.y.get(joint).copied().unwrap_or(false)
    }

    /// Zero-based equation numbers of every fixed degree of freedom, in
    /// ascending order.
    #[must_use]
    pub fn fixed_equations(&self) -> Vec<usize> {
        let mut equations = Vec::new();
        for joint in 1..=self.joint_count() {
            if self.x[joint] {
                equations.push(2 * (joint - 1));
            }
            if self.y[joint] {
                equations.push(2 * (joint - 1) + 1);
            }
        }
        equations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect `(joint, x, y)` for every restrained joint.
    fn fixed(restraints: &Restraints) -> Vec<(usize, bool, bool)> {
        (1..=restraints.joint_count())
            .filter(|&joint| restraints.is_x_fixed(joint) || restraints.is_y_fixed(joint))
            .map(|joint| (joint, restraints.is_x_fixed(joint), restraints.is_y_fixed(joint)))
            .collect()
    }

    #[test]
    fn simple_support_pins_left_and_rolls_right() {
        let restraints = Restraints::derive(SupportType::Simple, 6, 10);
        assert_eq!(fixed(&restraints), vec![(1, true, true), (6, false, true)]);
        assert_eq!(restraints.fixed_equations(), vec![0, 1, 11]);
    }

    #[test]
    fn high_pier_pins_deck_joint() {
        let support = SupportType::Pier {
            joint: 3,
            high: true,
        };
        let restraints = Restraints::derive(support, 5, 9);
        assert_eq!(
            fixed(&restraints),
            vec![(1, true, true), (3, true, true), (5, false, true)]
        );
    }

    #[test]
    fn low_pier_takes_horizontal_restraint_from_left_end() {
        let support = SupportType::Pier {
            joint: 3,
            high: false,
        };
        let restraints = Restraints::derive(support, 5, 9);
        assert_eq!(
            fixed(&restraints),
            vec![(1, false, true), (5, false, true), (6, true, true)]
        );
    }

    #[test]
    fn arch_replaces_deck_supports() {
        let restraints = Restraints::derive(SupportType::Arch, 5, 9);
        assert_eq!(fixed(&restraints), vec![(6, true, true), (7, true, true)]);
    }

    #[test]
    fn cables_add_anchorages_to_simple_support() {
        let left = Restraints::derive(SupportType::CableLeft, 5, 9);
        assert_eq!(
            fixed(&left),
            vec![(1, true, true), (5, false, true), (6, true, true)]
        );

        let both = Restraints::derive(SupportType::CableBoth, 5, 9);
        assert_eq!(
            fixed(&both),
            vec![
                (1, true, true),
                (5, false, true),
                (6, true, true),
                (7, true, true)
            ]
        );
    }

    #[test]
    fn missing_support_joints_are_skipped() {
        let restraints = Restraints::derive(SupportType::CableBoth, 3, 4);
        assert_eq!(
            fixed(&restraints),
            vec![(1, true, true), (3, false, true), (4, true, true)]
        );
    }
}
