//! Static parameter catalog: materials, section shapes and load cases.
//!
//! Units follow the bridge designer's conventions: lengths in metres, forces
//! in kilonewtons, moduli and strengths in kilopascals, densities in kg/m³
//! and unit costs in dollars per cm³.

use serde::{Deserialize, Serialize};

use crate::errors::{CrossSectionError, ParamsError};

/// Number of materials in the catalog.
pub const MATERIAL_COUNT: usize = 3;

/// Number of sizes available in each section family.
pub const SIZE_COUNT: usize = 33;

/// Number of predefined load cases.
pub const LOAD_CASE_COUNT: usize = 4;

/// Factor applied to the deck and self-weight dead loads.
pub const DEAD_LOAD_FACTOR: f64 = 1.35;

/// Nominal section widths in millimetres, by size index.
const WIDTHS: [f64; SIZE_COUNT] = [
    30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 90.0, 100.0, 110.0, 120.0,
    130.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 200.0, 220.0, 240.0, 260.0, 280.0, 300.0,
    320.0, 340.0, 360.0, 400.0, 500.0,
];

/// Cross-section family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Solid square bar.
    Solid,
    /// Hollow square tube.
    Hollow,
}

impl Section {
    /// Index of the family in per-family tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Section::Solid => 0,
            Section::Hollow => 1,
        }
    }
}

/// A structural material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Long descriptive name.
    pub name: String,
    /// Short name used in tables.
    pub short_name: String,
    /// Modulus of elasticity in kPa.
    pub elastic_modulus: f64,
    /// Yield strength in kPa.
    pub yield_strength: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Unit cost by section family, indexed with [`Section::index`].
    pub unit_cost: [f64; 2],
}

impl Material {
    /// Unit cost of this material when rolled into `section`.
    #[must_use]
    pub fn unit_cost(&self, section: Section) -> f64 {
        self.unit_cost[section.index()]
    }
}

/// Geometric properties of one catalog shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Display name such as `120x120x6`.
    pub name: String,
    /// Outside width in millimetres.
    pub width: f64,
    /// Cross-sectional area in m².
    pub area: f64,
    /// Second moment of area in m⁴.
    pub moment: f64,
}

impl Shape {
    /// Solid square bar of the given width.
    #[must_use]
    pub fn solid(width: f64) -> Self {
        Self {
            name: format!("{width}x{width}"),
            width,
            area: width.powi(2) * 1.0e-6,
            moment: width.powi(4) / 12.0 * 1.0e-12,
        }
    }

    /// Hollow square tube of the given width; the wall is a twentieth of the
    /// width but never thinner than 2 mm.
    #[must_use]
    pub fn hollow(width: f64) -> Self {
        let thickness = (width / 20.0).max(2.0);
        let inner = width - 2.0 * thickness;
        Self {
            name: format!("{width}x{width}x{thickness}"),
            width,
            area: (width.powi(2) - inner.powi(2)) * 1.0e-6,
            moment: (width.powi(4) - inner.powi(4)) / 12.0 * 1.0e-12,
        }
    }

    /// Radius of gyration, zero for a shape without area.
    #[must_use]
    pub fn radius_of_gyration(&self) -> f64 {
        if self.area > 0.0 {
            (self.moment / self.area).sqrt()
        } else {
            0.0
        }
    }
}

/// One of the four predefined deck/truck load combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCaseId {
    /// Heavy deck, light truck.
    A,
    /// Heavy deck, heavy truck.
    B,
    /// Light deck, light truck.
    C,
    /// Light deck, heavy truck.
    D,
}

impl LoadCaseId {
    /// Index of the load case in [`Params::load_cases`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            LoadCaseId::A => 0,
            LoadCaseId::B => 1,
            LoadCaseId::C => 2,
            LoadCaseId::D => 3,
        }
    }

    /// Load case for a zero-based index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(LoadCaseId::A),
            1 => Some(LoadCaseId::B),
            2 => Some(LoadCaseId::C),
            3 => Some(LoadCaseId::D),
            _ => None,
        }
    }
}

/// Loads carried by the deck and the design truck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Descriptive name.
    pub name: String,
    /// Factored dead load of the roadway at each deck joint, in kN.
    pub point_dead_load: f64,
    /// Unfactored front axle load in kN.
    pub front_axle_load: f64,
    /// Unfactored rear axle load in kN.
    pub rear_axle_load: f64,
}

impl LoadCase {
    /// Create a load case from the deck weight and the two axle loads.
    fn new(name: &str, deck_weight: f64, front_axle_load: f64, rear_axle_load: f64) -> Self {
        Self {
            name: name.to_string(),
            point_dead_load: DEAD_LOAD_FACTOR * deck_weight + 33.097,
            front_axle_load,
            rear_axle_load,
        }
    }
}

/// A member cross-section: material, family and size index into the catalog.
///
/// Two cross-sections are the same product iff all three indices match.
///
/// # Examples
///
/// ```
/// use bridgex::{CrossSection, Section};
///
/// let tube = CrossSection::new(1, Section::Hollow, 12).expect("in catalog");
/// assert!(CrossSection::new(3, Section::Hollow, 12).is_err());
/// assert_eq!(tube, CrossSection::new(1, Section::Hollow, 12).unwrap());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossSection {
    /// Material index, below [`MATERIAL_COUNT`].
    material: usize,
    /// Section family.
    section: Section,
    /// Size index, below [`SIZE_COUNT`].
    size: usize,
}

impl CrossSection {
    /// Create a cross-section after checking the indices against the catalog
    /// dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CrossSectionError`] when `material` or `size` is out of range.
    pub fn new(material: usize, section: Section, size: usize) -> Result<Self, CrossSectionError> {
        if material >= MATERIAL_COUNT {
            return Err(CrossSectionError::UnknownMaterial(material));
        }
        if size >= SIZE_COUNT {
            return Err(CrossSectionError::UnknownSize(size));
        }
        Ok(Self {
            material,
            section,
            size,
        })
    }

    /// Material index.
    #[must_use]
    pub const fn material(&self) -> usize {
        self.material
    }

    /// Section family.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Size index.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

/// The full parameter catalog consumed by analysis and costing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// The least slenderness ratio that is not allowed.
    pub slenderness_limit: f64,
    /// Factor applied to dead loads.
    pub dead_load_factor: f64,
    /// Factor applied to truck axle loads.
    pub live_load_factor: f64,
    /// Resistance factor for compression, φc.
    pub compression_resistance_factor: f64,
    /// Resistance factor for tension, φt.
    pub tension_resistance_factor: f64,
    /// Cost of making one joint.
    pub connection_cost: f64,
    /// Fee per distinct cross-section ordered.
    pub ordering_fee: f64,
    /// The predefined load cases, indexed by [`LoadCaseId::index`].
    pub load_cases: [LoadCase; LOAD_CASE_COUNT],
    /// Available materials.
    pub materials: [Material; MATERIAL_COUNT],
    /// Shapes by section family, then by size index.
    pub shapes: [Vec<Shape>; 2],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            slenderness_limit: 300.0,
            dead_load_factor: DEAD_LOAD_FACTOR,
            live_load_factor: 1.75 * 1.33,
            compression_resistance_factor: 0.90,
            tension_resistance_factor: 0.95,
            connection_cost: 400.0,
            ordering_fee: 1000.0,
            load_cases: [
                LoadCase::new("Case A (Heavy Deck, Light Truck)", 120.265, 44.0, 181.0),
                LoadCase::new("Case B (Heavy Deck, Heavy Truck)", 120.265, 124.0, 124.0),
                LoadCase::new("Case C (Light Deck, Light Truck)", 82.608, 44.0, 181.0),
                LoadCase::new("Case D (Light Deck, Heavy Truck)", 82.608, 124.0, 124.0),
            ],
            materials: [
                steel("Carbon Steel (A36)", "CS", 250_000.0, [4.30, 6.30]),
                steel("High Strength Steel (A572)", "HSS", 345_000.0, [5.60, 7.00]),
                steel("Quenched & Tempered Steel", "QTS", 485_000.0, [6.00, 7.70]),
            ],
            shapes: [
                WIDTHS.iter().copied().map(Shape::solid).collect(),
                WIDTHS.iter().copied().map(Shape::hollow).collect(),
            ],
        }
    }
}

/// A steel grade differing from the others only in strength and price.
fn steel(name: &str, short_name: &str, yield_strength: f64, unit_cost: [f64; 2]) -> Material {
    Material {
        name: name.to_string(),
        short_name: short_name.to_string(),
        elastic_modulus: 200_000_000.0,
        yield_strength,
        density: 7850.0,
        unit_cost,
    }
}

impl Params {
    /// Load a catalog from JSON and check that every cross-section index
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError`] when the document is malformed, a family does
    /// not list [`SIZE_COUNT`] shapes, or a stiffness property is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridgex::Params;
    ///
    /// let json = serde_json::to_string(&Params::default()).unwrap();
    /// let params = Params::from_json(&json).expect("default catalog round-trips");
    /// assert_eq!(params, Params::default());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Check the invariants that analysis relies on.
    fn validate(&self) -> Result<(), ParamsError> {
        for (family, shapes) in self.shapes.iter().enumerate() {
            if shapes.len() != SIZE_COUNT {
                return Err(ParamsError::SizeCount {
                    family,
                    found: shapes.len(),
                    expected: SIZE_COUNT,
                });
            }
            if shapes.iter().any(|shape| shape.area <= 0.0 || shape.moment <= 0.0) {
                return Err(ParamsError::NonPositive("shape area and moment"));
            }
        }
        if self
            .materials
            .iter()
            .any(|material| material.elastic_modulus <= 0.0 || material.yield_strength <= 0.0)
        {
            return Err(ParamsError::NonPositive("material modulus and yield strength"));
        }
        Ok(())
    }

    /// Material of a cross-section.
    #[must_use]
    pub fn material(&self, cross_section: &CrossSection) -> &Material {
        &self.materials[cross_section.material()]
    }

    /// Shape of a cross-section.
    #[must_use]
    pub fn shape(&self, cross_section: &CrossSection) -> &Shape {
        &self.shapes[cross_section.section().index()][cross_section.size()]
    }

    /// Load case selected by `id`.
    #[must_use]
    pub fn load_case(&self, id: LoadCaseId) -> &LoadCase {
        &self.load_cases[id.index()]
    }

    /// Axial stiffness AE of a cross-section, before dividing by length.
    #[must_use]
    pub fn axial_rigidity(&self, cross_section: &CrossSection) -> f64 {
        self.shape(cross_section).area * self.material(cross_section).elastic_modulus
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn solid_shapes_follow_width_table() {
        let params = Params::default();
        let bar = &params.shapes[Section::Solid.index()][0];
        assert_relative_eq!(bar.area, 900.0e-6);
        assert_relative_eq!(bar.moment, 30.0_f64.powi(4) / 12.0 * 1.0e-12);
        assert_eq!(params.shapes[0].last().map(|shape| shape.width), Some(500.0));
    }

    #[test]
    fn thin_tubes_use_minimum_wall() {
        let tube = Shape::hollow(30.0);
        assert_eq!(tube.name, "30x30x2");
        assert_relative_eq!(tube.area, (900.0 - 676.0) * 1.0e-6);

        let thick = Shape::hollow(200.0);
        assert_relative_eq!(thick.area, (40_000.0 - 180.0_f64.powi(2)) * 1.0e-6);
    }

    #[test]
    fn cross_section_indices_are_checked() {
        assert_eq!(
            CrossSection::new(3, Section::Solid, 0),
            Err(CrossSectionError::UnknownMaterial(3))
        );
        assert_eq!(
            CrossSection::new(0, Section::Solid, SIZE_COUNT),
            Err(CrossSectionError::UnknownSize(SIZE_COUNT))
        );
    }

    #[test]
    fn load_cases_apply_dead_load_factor() {
        let params = Params::default();
        let case = params.load_case(LoadCaseId::C);
        assert_relative_eq!(case.point_dead_load, 1.35 * 82.608 + 33.097);
        assert_relative_eq!(case.rear_axle_load, 181.0);
        assert_eq!(LoadCaseId::from_index(4), None);
    }

    #[test]
    fn short_catalogs_are_rejected() {
        let mut params = Params::default();
        params.shapes[1].pop();
        let json = serde_json::to_string(&params).expect("catalog serializes");
        match Params::from_json(&json) {
            Err(ParamsError::SizeCount { family, found, .. }) => {
                assert_eq!(family, 1);
                assert_eq!(found, SIZE_COUNT - 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
