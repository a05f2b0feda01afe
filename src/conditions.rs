use bridgex::scenario::PANEL_SIZE;
use bridgex::{
    CrossSection, CrossSectionError, ScenarioDescriptor, Section, SupportType, Topology,
    TopologyError,
};

/// Catalog choice used for every member of the demonstration truss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrattProperties {
    /// Material index into the catalog.
    pub material: usize,
    /// Section family.
    pub section: Section,
    /// Size index into the catalog.
    pub size: usize,
}

impl Default for PrattProperties {
    fn default() -> Self {
        Self {
            material: 1,
            section: Section::Hollow,
            size: 24,
        }
    }
}

impl PrattProperties {
    /// Resolve the catalog choice.
    pub fn cross_section(&self) -> Result<CrossSection, CrossSectionError> {
        CrossSection::new(self.material, self.section, self.size)
    }
}

/// Build a Pratt truss over the scenario's deck and tie every prescribed
/// support joint into it.
///
/// The chord sits one panel above the deck when the site has clearance,
/// otherwise below it. Diagonals slope down toward midspan so they carry
/// tension under gravity (see <https://en.wikipedia.org/wiki/Truss_bridge#Pratt_truss>).
pub fn build_pratt_truss(
    descriptor: &ScenarioDescriptor,
    cross_section: CrossSection,
) -> Result<Topology, TopologyError> {
    let mut truss = Topology::from_scenario(descriptor);
    let n_panels = descriptor.n_panels;
    let deck = |panel_point: usize| panel_point + 1;
    let height = if descriptor.over_grids() > 0 {
        descriptor.over_grids().min(PANEL_SIZE)
    } else if descriptor.under_grids() > 0 {
        -descriptor.under_grids().min(PANEL_SIZE)
    } else {
        PANEL_SIZE
    };

    // Chord joints sit over interior panel points; a single panel gets an apex.
    let chord: Vec<usize> = if n_panels == 1 {
        vec![truss.add_joint(PANEL_SIZE / 2, height)]
    } else {
        (1..n_panels)
            .map(|panel_point| truss.add_joint(panel_point as i32 * PANEL_SIZE, height))
            .collect()
    };
    let first_chord = chord[0];
    let last_chord = chord[chord.len() - 1];

    for panel in 0..n_panels {
        truss.add_member(deck(panel), deck(panel + 1), cross_section)?;
    }
    for pair in chord.windows(2) {
        truss.add_member(pair[0], pair[1], cross_section)?;
    }
    truss.add_member(deck(0), first_chord, cross_section)?;
    truss.add_member(last_chord, deck(n_panels), cross_section)?;

    if n_panels > 1 {
        for (offset, &joint) in chord.iter().enumerate() {
            truss.add_member(deck(offset + 1), joint, cross_section)?;
        }
        // Interior panels run from panel point p to p + 1, chord[p - 1] to chord[p].
        for panel_point in 1..n_panels - 1 {
            if 2 * (panel_point + 1) <= n_panels {
                truss.add_member(chord[panel_point - 1], deck(panel_point + 1), cross_section)?;
            } else {
                truss.add_member(deck(panel_point), chord[panel_point], cross_section)?;
            }
        }
    }

    tie_in_supports(&mut truss, descriptor, cross_section, first_chord, last_chord)?;
    Ok(truss)
}

/// Connect the joints a support type adds beyond the deck.
fn tie_in_supports(
    truss: &mut Topology,
    descriptor: &ScenarioDescriptor,
    cross_section: CrossSection,
    first_chord: usize,
    last_chord: usize,
) -> Result<(), TopologyError> {
    let n_loaded = descriptor.n_panels + 1;
    let extra = n_loaded + 1;
    match descriptor.support {
        SupportType::Pier { joint, high: false } => {
            // A lone post would leave the deck free to sway, so brace it.
            truss.add_member(extra, joint, cross_section)?;
            if joint > 1 {
                truss.add_member(extra, joint - 1, cross_section)?;
            }
            if joint < n_loaded {
                truss.add_member(extra, joint + 1, cross_section)?;
            }
        }
        SupportType::Arch => {
            truss.add_member(extra, 1, cross_section)?;
            truss.add_member(extra, 2, cross_section)?;
            truss.add_member(extra + 1, n_loaded, cross_section)?;
            truss.add_member(extra + 1, n_loaded - 1, cross_section)?;
        }
        SupportType::CableLeft => {
            truss.add_member(extra, first_chord, cross_section)?;
        }
        SupportType::CableBoth => {
            truss.add_member(extra, first_chord, cross_section)?;
            truss.add_member(extra + 1, last_chord, cross_section)?;
        }
        SupportType::Simple | SupportType::Pier { high: true, .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgex::{analyze, Params};

    /// Build and analyse the demonstration truss for a scenario code.
    fn analysed(code: &str) -> (Topology, bridgex::AnalysisReport) {
        let descriptor = ScenarioDescriptor::parse(code, 0.0).expect("valid code");
        let cross_section = PrattProperties::default()
            .cross_section()
            .expect("catalog entry");
        let truss = build_pratt_truss(&descriptor, cross_section).expect("truss builds");
        let report = analyze(&truss, &descriptor.load_scenario(), &Params::default());
        (truss, report)
    }

    #[test]
    fn ten_panel_truss_is_statically_determinate() {
        let (truss, report) = analysed("1100400000");
        assert_eq!(truss.joint_count(), 20);
        assert_eq!(truss.member_count(), 37);
        assert!(truss.unconnected_joints().is_empty());
        assert_eq!(report.error, None);
    }

    #[test]
    fn single_panel_gets_an_apex() {
        let (truss, report) = analysed("1010400000");
        assert_eq!(truss.joint_count(), 3);
        assert_eq!(truss.member_count(), 3);
        assert_eq!(report.error, None);
    }

    #[test]
    fn every_support_type_is_stable() {
        for code in ["2050812100", "3062010030", "4040610021", "1060400200", "1060400300"] {
            let (truss, report) = analysed(code);
            assert!(truss.unconnected_joints().is_empty(), "{code}");
            assert_eq!(report.error, None, "{code}");
        }
    }
}
