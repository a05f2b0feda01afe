//! Error types produced while building bridges or analysing them.

use serde::Serialize;
use thiserror::Error;

/// Outcome of an analysis run that could not rate the bridge.
///
/// These never escape [`analyze`](crate::analyze) as an `Err`. They are stored
/// in the [`AnalysisReport`](crate::AnalysisReport) so a design loop can treat
/// them as "this topology cannot be evaluated, try another".
#[derive(Clone, Copy, Debug, Error, PartialEq, Serialize)]
pub enum AnalysisError {
    /// Returned when Gauss-Jordan elimination meets a pivot smaller than the
    /// tolerance, which means the restrained structure is unstable or has a
    /// joint no member reaches.
    #[error("bad pivot {pivot:e} at equation {equation}; check supports and connectivity")]
    BadPivot {
        /// One-based equation number where elimination stopped.
        equation: usize,
        /// Diagonal value found at that equation.
        pivot: f64,
    },
    /// Returned when the bridge has no members at all.
    #[error("bridge has no members")]
    NoMembers,
}

/// Error returned when a cross-section names an entry outside the catalog.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CrossSectionError {
    /// The material index is not one of the catalog materials.
    #[error("material index {0} is outside the catalog")]
    UnknownMaterial(usize),
    /// The size index is not one of the catalog sizes.
    #[error("size index {0} is outside the catalog")]
    UnknownSize(usize),
}

/// Error returned when editing a [`Topology`](crate::Topology) with invalid input.
///
/// # Examples
///
/// ```
/// use bridgex::{CrossSection, Section, Topology, TopologyError};
///
/// let mut topology = Topology::new(0.25);
/// let a = topology.add_joint(0, 0);
/// let section = CrossSection::new(0, Section::Hollow, 10).expect("catalog entry");
/// let error = topology
///     .add_member(a, 42, section)
///     .expect_err("unknown joint is rejected");
/// assert_eq!(error, TopologyError::UnknownJoint(42));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// Returned when a joint number does not exist in the topology.
    #[error("joint {0} does not exist in this bridge")]
    UnknownJoint(usize),
    /// Returned when a member number does not exist in the topology.
    #[error("member {0} does not exist in this bridge")]
    UnknownMember(usize),
    /// Returned when both ends of a member sit on the same grid point.
    #[error("joints {start} and {end} coincide; members must have non-zero length")]
    CoincidentJoints {
        /// Start joint number.
        start: usize,
        /// End joint number.
        end: usize,
    },
    /// Returned when the supplied cross-section is not in the catalog.
    #[error("{0}")]
    InvalidCrossSection(#[from] CrossSectionError),
}

/// Error returned when a scenario code cannot be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// Scenario codes are exactly ten digits.
    #[error("scenario code {0:?} must be ten digits long")]
    BadLength(String),
    /// A character of the code is not an ASCII digit.
    #[error("scenario code {code:?} has a non-digit at position {position}")]
    NotADigit {
        /// The rejected code.
        code: String,
        /// One-based position of the offending character.
        position: usize,
    },
    /// The load case digit does not select one of the four load cases.
    #[error("load case {0} is not between 1 and 4")]
    UnknownLoadCase(u32),
    /// The support digit does not select a known support type.
    #[error("support digit {0} is not between 0 and 3")]
    UnknownSupport(u32),
    /// A bridge needs at least one panel.
    #[error("scenario has no deck panels")]
    NoPanels,
    /// An intermediate pier must stand under a deck joint.
    #[error("pier joint {pier} is not one of the {n_loaded_joints} deck joints")]
    PierOffDeck {
        /// Requested pier joint.
        pier: usize,
        /// Number of deck joints in the scenario.
        n_loaded_joints: usize,
    },
}

/// Error returned when a parameter catalog cannot be loaded.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The JSON document could not be parsed into a catalog.
    #[error("invalid parameter catalog: {0}")]
    Json(#[from] serde_json::Error),
    /// A section family does not list exactly the expected number of sizes.
    #[error("section family {family} lists {found} sizes, expected {expected}")]
    SizeCount {
        /// Index of the offending family.
        family: usize,
        /// Number of shapes found.
        found: usize,
        /// Number of shapes required.
        expected: usize,
    },
    /// A material or shape property that must be positive is not.
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}
