//! Load scenarios: support configuration, deck layout and the selected load case.

use serde::{Deserialize, Serialize};

use crate::catalog::LoadCaseId;
use crate::errors::ScenarioError;
use crate::geometry::Joint;

/// Support flag: the bridge springs from two arch bases.
pub const ARCH_SUPPORT: u8 = 1;
/// Support flag: a cable anchorage left of the deck.
pub const CABLE_SUPPORT_LEFT: u8 = 2;
/// Support flag: cable anchorages on both sides of the deck.
pub const CABLE_SUPPORT_BOTH: u8 = 4;
/// Support flag: an intermediate pier under one deck joint.
pub const INTERMEDIATE_SUPPORT: u8 = 8;
/// Support flag: the intermediate pier reaches the deck.
pub const HI_NOT_LO: u8 = 16;

/// Grid spacing in metres used by every scenario.
pub const GRID_SIZE: f64 = 0.25;

/// Grid columns per deck panel.
pub const PANEL_SIZE: i32 = 16;

/// Horizontal distance in grids from a deck end to its cable anchorage.
pub const CABLE_ANCHORAGE_X_OFFSET: i32 = 32;

/// Grid rows per metre.
const GRIDS_PER_METRE: i32 = 4;

/// How the bridge is held up.
///
/// Every variant keeps the simple-support restraints at the deck ends
/// unless noted otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportType {
    /// Pinned at the left deck end, roller at the right deck end.
    Simple,
    /// An intermediate pier under deck joint `joint`.
    ///
    /// A high pier is pinned to that deck joint. A low pier stands on its own
    /// prescribed base joint below the deck and takes over the horizontal
    /// restraint of the left deck end.
    Pier {
        /// One-based deck joint above the pier.
        joint: usize,
        /// Whether the pier reaches the deck.
        high: bool,
    },
    /// Two pinned arch bases replace the deck-end supports.
    Arch,
    /// One pinned cable anchorage left of the deck.
    CableLeft,
    /// Pinned cable anchorages on both sides of the deck.
    CableBoth,
}

impl SupportType {
    /// Resolve a set of support flags into one support type.
    ///
    /// Flags are applied in the order pier, arch, cable left, cable both;
    /// when several are set the later one wins. `pier_joint` is only read
    /// when [`INTERMEDIATE_SUPPORT`] is set, and a pier without a joint
    /// number is ignored.
    ///
    /// # Examples
    /// ```
    /// use bridgex::scenario::{SupportType, HI_NOT_LO, INTERMEDIATE_SUPPORT};
    ///
    /// let support = SupportType::from_flags(INTERMEDIATE_SUPPORT | HI_NOT_LO, Some(3));
    /// assert_eq!(support, SupportType::Pier { joint: 3, high: true });
    /// ```
    #[must_use]
    pub fn from_flags(flags: u8, pier_joint: Option<usize>) -> Self {
        let mut support = SupportType::Simple;
        if flags & INTERMEDIATE_SUPPORT != 0 {
            if let Some(joint) = pier_joint {
                support = SupportType::Pier {
                    joint,
                    high: flags & HI_NOT_LO != 0,
                };
            }
        }
        if flags & ARCH_SUPPORT != 0 {
            support = SupportType::Arch;
        }
        if flags & CABLE_SUPPORT_LEFT != 0 {
            support = SupportType::CableLeft;
        }
        if flags & CABLE_SUPPORT_BOTH != 0 {
            support = SupportType::CableBoth;
        }
        support
    }

    /// Flag bits equivalent to this support type.
    #[must_use]
    pub const fn flags(self) -> u8 {
        match self {
            SupportType::Simple => 0,
            SupportType::Pier { high: true, .. } => INTERMEDIATE_SUPPORT | HI_NOT_LO,
            SupportType::Pier { high: false, .. } => INTERMEDIATE_SUPPORT,
            SupportType::Arch => ARCH_SUPPORT,
            SupportType::CableLeft => CABLE_SUPPORT_LEFT,
            SupportType::CableBoth => CABLE_SUPPORT_BOTH,
        }
    }

    /// Whether the bridge is hung from at least one cable anchorage.
    #[must_use]
    pub const fn has_cable(self) -> bool {
        matches!(self, SupportType::CableLeft | SupportType::CableBoth)
    }

    /// Number of support joints prescribed after the deck joints.
    #[must_use]
    pub const fn extra_joints(self) -> usize {
        match self {
            SupportType::Simple | SupportType::Pier { high: true, .. } => 0,
            SupportType::Pier { high: false, .. } | SupportType::CableLeft => 1,
            SupportType::Arch | SupportType::CableBoth => 2,
        }
    }
}

/// Everything the analysis needs to know about the site and its loading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadScenario {
    /// Number of deck joints; they are joints `1..=n_loaded_joints`.
    pub n_loaded_joints: usize,
    /// Support configuration.
    pub support: SupportType,
    /// Length of one grid step in metres.
    pub grid_size: f64,
    /// Which deck/truck combination to apply.
    pub load_case: LoadCaseId,
    /// Cost of preparing the site, added to the bridge cost.
    pub site_cost: f64,
}

impl LoadScenario {
    /// Number of load instances: one per position of the truck plus the
    /// first and last instances, which carry dead load only.
    #[must_use]
    pub const fn n_load_instances(&self) -> usize {
        self.n_loaded_joints + 1
    }

    /// Number of joints fixed by the scenario before any design work.
    #[must_use]
    pub const fn n_prescribed_joints(&self) -> usize {
        self.n_loaded_joints + self.support.extra_joints()
    }
}

/// A decoded ten-digit scenario code together with its site cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    /// The code as given.
    pub code: String,
    /// Selected load case.
    pub load_case: LoadCaseId,
    /// Number of deck panels.
    pub n_panels: usize,
    /// Clearance above the deck in metres.
    pub over_meters: i32,
    /// Depth of the valley below the deck in metres.
    pub under_meters: i32,
    /// Support configuration.
    pub support: SupportType,
    /// Cost of preparing the site.
    pub site_cost: f64,
}

impl ScenarioDescriptor {
    /// Decode a scenario code.
    ///
    /// Digit 1 is the one-based load case, digits 2-3 the panel count,
    /// digits 4-5 and 6-7 the metres over and under the deck, digit 8 the
    /// support (0 simple, 1 arch, 2 cable left, 3 cable both), digit 9 the
    /// pier panel point (0 for none) and digit 10 whether the pier is high.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] when the code is malformed or describes an
    /// impossible site.
    ///
    /// # Examples
    /// ```
    /// use bridgex::{LoadCaseId, ScenarioDescriptor, SupportType};
    ///
    /// let site = ScenarioDescriptor::parse("2050812100", 45_000.0).expect("valid code");
    /// assert_eq!(site.load_case, LoadCaseId::B);
    /// assert_eq!(site.n_panels, 5);
    /// assert_eq!(site.support, SupportType::Arch);
    /// ```
    pub fn parse(code: &str, site_cost: f64) -> Result<Self, ScenarioError> {
        let digits = code
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                ch.to_digit(10).ok_or_else(|| ScenarioError::NotADigit {
                    code: code.to_string(),
                    position: idx + 1,
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        if digits.len() != 10 {
            return Err(ScenarioError::BadLength(code.to_string()));
        }
        let pair = |idx: usize| digits[idx] * 10 + digits[idx + 1];

        let load_case = (digits[0] as usize)
            .checked_sub(1)
            .and_then(LoadCaseId::from_index)
            .ok_or(ScenarioError::UnknownLoadCase(digits[0]))?;
        let n_panels = pair(1) as usize;
        if n_panels == 0 {
            return Err(ScenarioError::NoPanels);
        }
        let n_loaded_joints = n_panels + 1;

        let pier_joint = digits[8] as usize;
        let mut flags = 0;
        if pier_joint > 0 {
            if pier_joint > n_loaded_joints {
                return Err(ScenarioError::PierOffDeck {
                    pier: pier_joint,
                    n_loaded_joints,
                });
            }
            flags |= INTERMEDIATE_SUPPORT;
            if digits[9] > 0 {
                flags |= HI_NOT_LO;
            }
        }
        flags |= match digits[7] {
            0 => 0,
            1 => ARCH_SUPPORT,
            2 => CABLE_SUPPORT_LEFT,
            3 => CABLE_SUPPORT_BOTH,
            other => return Err(ScenarioError::UnknownSupport(other)),
        };

        Ok(Self {
            code: code.to_string(),
            load_case,
            n_panels,
            over_meters: pair(3) as i32,
            under_meters: pair(5) as i32,
            support: SupportType::from_flags(flags, Some(pier_joint)),
            site_cost,
        })
    }

    /// Grid rows available above the deck.
    #[must_use]
    pub const fn over_grids(&self) -> i32 {
        self.over_meters * GRIDS_PER_METRE
    }

    /// Grid rows available below the deck.
    #[must_use]
    pub const fn under_grids(&self) -> i32 {
        self.under_meters * GRIDS_PER_METRE
    }

    /// Grid columns spanned by the deck.
    #[must_use]
    pub fn span_grids(&self) -> i32 {
        self.n_panels as i32 * PANEL_SIZE
    }

    /// The analysis-facing view of this scenario.
    #[must_use]
    pub fn load_scenario(&self) -> LoadScenario {
        LoadScenario {
            n_loaded_joints: self.n_panels + 1,
            support: self.support,
            grid_size: GRID_SIZE,
            load_case: self.load_case,
            site_cost: self.site_cost,
        }
    }

    /// Joints the scenario fixes before design starts, numbered from 1.
    ///
    /// The deck joints come first, followed by a low pier base, the two arch
    /// bases, or the cable anchorages, in that order.
    #[must_use]
    pub fn prescribed_joints(&self) -> Vec<Joint> {
        let mut positions: Vec<(i32, i32)> = (0..=self.n_panels as i32)
            .map(|panel| (panel * PANEL_SIZE, 0))
            .collect();
        let span = self.span_grids();
        let depth = -self.under_grids();
        match self.support {
            SupportType::Pier { joint, high: false } => {
                positions.push(((joint as i32 - 1) * PANEL_SIZE, depth));
            }
            SupportType::Arch => {
                positions.push((0, depth));
                positions.push((span, depth));
            }
            SupportType::CableLeft => {
                positions.push((-CABLE_ANCHORAGE_X_OFFSET, 0));
            }
            SupportType::CableBoth => {
                positions.push((-CABLE_ANCHORAGE_X_OFFSET, 0));
                positions.push((span + CABLE_ANCHORAGE_X_OFFSET, 0));
            }
            SupportType::Simple | SupportType::Pier { high: true, .. } => {}
        }
        positions
            .into_iter()
            .enumerate()
            .map(|(idx, (x, y))| Joint::new(idx + 1, x, y))
            .collect()
    }
}
