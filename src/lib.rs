#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod catalog;
pub mod cost;
pub mod errors;
pub mod geometry;
pub mod loads;
pub mod recovery;
pub mod restraints;
pub mod scenario;
pub mod solver;
pub mod stiffness;
pub mod strength;
pub mod topology;

pub use analysis::{analyze, Analysis, AnalysisReport};
pub use catalog::{CrossSection, LoadCase, LoadCaseId, Material, Params, Section, Shape};
pub use cost::{cost, CostBreakdown};
pub use errors::{AnalysisError, CrossSectionError, ParamsError, ScenarioError, TopologyError};
pub use geometry::{Displacement, GridPoint, Joint, MemberGeometry};
pub use restraints::Restraints;
pub use scenario::{LoadScenario, ScenarioDescriptor, SupportType};
pub use strength::{FailMode, MaxForces, MemberCheck, MemberStrength};
pub use topology::{Member, Topology};
