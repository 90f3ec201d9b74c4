//! Built-in species with NIST-derived heat-capacity data.
//!
//! Heat capacities follow the NIST Chemistry WebBook (Shomate fits) with
//! constant-cp bridges where the fits stop. Latent heats and formation
//! enthalpies come from the CRC Handbook.

use crate::correlation::{LatentHeat, Segment};
use crate::error::{ThermoError, ThermoResult};
use crate::mixture::Mixture;
use crate::species::Species;
use crate::thermo_data::ThermoData;

/// Heat-capacity fit for one catalogued temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fit {
    Constant(f64),
    Shomate([f64; 8]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    /// kg/mol
    pub molar_mass: f64,
    /// J/mol at 298.15 K
    pub delta_h_formation: Option<f64>,
    /// `(min K, max K, fit)`
    pub segments: &'static [(f64, f64, Fit)],
    /// `(K, J/mol)`
    pub latent_heats: &'static [(f64, f64)],
}

impl CatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    pub fn thermo_data(&self) -> ThermoResult<ThermoData> {
        let segments = self
            .segments
            .iter()
            .map(|&(min, max, fit)| match fit {
                Fit::Constant(cp) => Segment::constant(min, max, cp),
                Fit::Shomate(coeffs) => Segment::shomate(min, max, coeffs),
            })
            .collect::<ThermoResult<Vec<_>>>()?;
        let latent_heats = self
            .latent_heats
            .iter()
            .map(|&(kelvin, joules)| LatentHeat::new(kelvin, joules))
            .collect();
        ThermoData::new(segments, latent_heats)
    }

    /// A zero-amount species with no temperature assigned.
    pub fn build(&self) -> ThermoResult<Species> {
        Ok(Species::new(
            self.id,
            self.molar_mass,
            self.thermo_data()?,
            self.delta_h_formation,
        ))
    }
}

const M_H2: f64 = 0.00201588;
const M_O: f64 = 0.0159994;
const M_FE: f64 = 0.055845;
const M_C: f64 = 0.012011;

const H2_SEGMENTS: &[(f64, f64, Fit)] = &[
    (
        273.15,
        1000.0,
        Fit::Shomate([
            33.066178, -11.363417, 11.432816, -2.772874, -0.158558, -9.980797, 172.707974, 0.0,
        ]),
    ),
    (
        1000.0,
        2500.0,
        Fit::Shomate([
            18.563083, 12.257357, -2.859786, 0.268238, 1.977990, -1.147438, 156.288133, 0.0,
        ]),
    ),
    (
        2500.0,
        6000.0,
        Fit::Shomate([
            43.413560, -4.293079, 1.272428, -0.096876, -20.533862, -38.515158, 162.081354, 0.0,
        ]),
    ),
];

const FE_SEGMENTS: &[(f64, f64, Fit)] = &[
    (273.15, 298.0, Fit::Constant(25.09)),
    (
        298.0,
        1809.0,
        Fit::Shomate([
            23.97449, 8.367750, 0.000277, -0.000086, -0.000005, 0.268027, 62.06336, 7.788015,
        ]),
    ),
    (1809.0, 3133.345, Fit::Constant(46.02400)),
];

const FE_LATENT: &[(f64, f64)] = &[(1811.15, 13810.0)];

const CATALOG: [CatalogEntry; 20] = [
    CatalogEntry {
        id: "H2",
        display_name: "Hydrogen",
        aliases: &["hydrogen"],
        molar_mass: M_H2,
        delta_h_formation: Some(0.0),
        segments: H2_SEGMENTS,
        latent_heats: &[],
    },
    CatalogEntry {
        id: "H",
        display_name: "Atomic hydrogen",
        aliases: &["hydrogen plasma"],
        molar_mass: 0.00100794,
        delta_h_formation: Some(217_998.0),
        segments: &[(273.15, 6000.0, Fit::Constant(20.78603))],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "O2",
        display_name: "Oxygen",
        aliases: &["oxygen"],
        molar_mass: 2.0 * M_O,
        delta_h_formation: Some(0.0),
        segments: &[
            (
                100.0,
                700.0,
                Fit::Shomate([
                    31.32234, -20.23531, 57.86644, -36.50624, -0.007374, -8.903471, 246.7945, 0.0,
                ]),
            ),
            (
                700.0,
                2000.0,
                Fit::Shomate([
                    30.03235, 8.772972, -3.988133, 0.788313, -0.741599, -11.32468, 236.1663, 0.0,
                ]),
            ),
            (
                2000.0,
                6000.0,
                Fit::Shomate([
                    20.91111, 10.72071, -2.020498, 0.146449, 9.245722, 5.337651, 237.6185, 0.0,
                ]),
            ),
        ],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "H2O",
        display_name: "Water",
        aliases: &["water", "steam"],
        molar_mass: M_H2 + M_O,
        // liquid water
        delta_h_formation: Some(-285_830.0),
        segments: &[
            (273.15, 373.15, Fit::Constant(75.36)),
            (373.15, 500.0, Fit::Constant(36.57)),
            (
                500.0,
                1700.0,
                Fit::Shomate([
                    30.09200, 6.832514, 6.793435, -2.534480, 0.082139, -250.8810, 223.3967,
                    -241.8264,
                ]),
            ),
            (
                1700.0,
                6000.0,
                Fit::Shomate([
                    41.96426, 8.622053, -1.499780, 0.098119, -11.15764, -272.1797, 219.7809,
                    -241.8264,
                ]),
            ),
        ],
        latent_heats: &[(373.15, 40660.0)],
    },
    CatalogEntry {
        id: "N2",
        display_name: "Nitrogen",
        aliases: &["nitrogen"],
        molar_mass: 0.0280134,
        delta_h_formation: None,
        segments: &[
            (
                100.0,
                500.0,
                Fit::Shomate([
                    28.98641, 1.853978, -9.647459, 16.63537, 0.000117, -8.671914, 226.4168, 0.0,
                ]),
            ),
            (
                500.0,
                2000.0,
                Fit::Shomate([
                    19.50583, 19.88705, -8.598535, 1.369784, 0.527601, -4.935202, 212.3900, 0.0,
                ]),
            ),
            (
                2000.0,
                6000.0,
                Fit::Shomate([
                    35.51872, 1.128728, -0.196103, 0.014662, -4.553760, -18.97091, 224.9810, 0.0,
                ]),
            ),
        ],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "Ar",
        display_name: "Argon",
        aliases: &["argon"],
        molar_mass: 0.039948,
        delta_h_formation: None,
        segments: &[(273.15, 6000.0, Fit::Constant(20.786))],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "Fe",
        display_name: "Iron",
        aliases: &["iron"],
        molar_mass: M_FE,
        delta_h_formation: Some(0.0),
        segments: FE_SEGMENTS,
        latent_heats: FE_LATENT,
    },
    // No dedicated data for steel scrap; treated as iron.
    CatalogEntry {
        id: "Scrap",
        display_name: "Steel scrap",
        aliases: &["scrap"],
        molar_mass: M_FE,
        delta_h_formation: Some(0.0),
        segments: FE_SEGMENTS,
        latent_heats: FE_LATENT,
    },
    CatalogEntry {
        id: "FeO",
        display_name: "Wustite",
        aliases: &["iron(ii) oxide", "wustite"],
        molar_mass: M_FE + M_O,
        delta_h_formation: Some(-272_000.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(49.93)),
            (
                298.0,
                1650.0,
                Fit::Shomate([
                    45.75120, 18.78553, -5.952201, 0.852779, -0.081265, -286.7429, 110.3120,
                    -272.0441,
                ]),
            ),
            (
                1650.0,
                5000.0,
                Fit::Shomate([68.19920, 0.0, 0.0, 0.0, 0.0, -281.4326, 137.8377, -249.5321]),
            ),
        ],
        latent_heats: &[(1650.15, 24100.0)],
    },
    CatalogEntry {
        id: "Fe3O4",
        display_name: "Magnetite",
        aliases: &["magnetite"],
        molar_mass: 3.0 * M_FE + 4.0 * M_O,
        delta_h_formation: Some(-1_118_400.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(147.183)),
            (
                298.0,
                900.0,
                Fit::Shomate([
                    104.2096, 178.5108, 10.61510, 1.132534, -0.994202, -1163.336, 212.0585,
                    -1120.894,
                ]),
            ),
            (900.0, 3000.1, Fit::Constant(200.823)),
        ],
        latent_heats: &[(1870.15, 138_000.0)],
    },
    CatalogEntry {
        id: "Fe2O3",
        display_name: "Hematite",
        aliases: &["hematite"],
        molar_mass: 2.0 * M_FE + 3.0 * M_O,
        delta_h_formation: Some(-824_200.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(103.7443)),
            (
                298.0,
                950.0,
                Fit::Shomate([
                    93.43834, 108.3577, -50.86447, 25.58683, -1.611330, -863.2094, 161.0719,
                    -825.5032,
                ]),
            ),
            (950.0, 1050.0, Fit::Constant(150.6240)),
            (
                1050.0,
                3000.1,
                Fit::Shomate([
                    110.9362, 32.04714, -9.192333, 0.901506, 5.433677, -843.1471, 228.3548,
                    -825.5032,
                ]),
            ),
        ],
        latent_heats: &[(1838.15, 87000.0)],
    },
    CatalogEntry {
        id: "C",
        display_name: "Carbon",
        aliases: &["graphite", "carbon"],
        molar_mass: M_C,
        delta_h_formation: Some(0.0),
        segments: &[(273.15, 3000.1, Fit::Constant(10.68))],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "CO",
        display_name: "Carbon monoxide",
        aliases: &["carbon monoxide"],
        molar_mass: M_C + M_O,
        delta_h_formation: Some(-110_530.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(29.15)),
            (
                298.0,
                1300.0,
                Fit::Shomate([
                    25.56759, 6.096130, 4.054656, -2.671301, 0.131021, -118.0089, 227.3665,
                    -110.5271,
                ]),
            ),
            (
                1300.0,
                6000.0,
                Fit::Shomate([
                    35.15070, 1.300095, -0.205921, 0.013550, -3.282780, -127.8375, 231.7120,
                    -110.5271,
                ]),
            ),
        ],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "CO2",
        display_name: "Carbon dioxide",
        aliases: &["carbon dioxide"],
        molar_mass: M_C + 2.0 * M_O,
        delta_h_formation: Some(-393_510.0),
        segments: &[
            (
                273.15,
                1200.0,
                Fit::Shomate([
                    24.99735, 55.18696, -33.69137, 7.948387, -0.136638, -403.6075, 228.2431,
                    -393.5224,
                ]),
            ),
            (
                1200.0,
                6000.0,
                Fit::Shomate([
                    58.16639, 2.720074, -0.492289, 0.038844, -6.447293, -425.9186, 263.6125,
                    -393.5224,
                ]),
            ),
        ],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "Al2O3",
        display_name: "Alumina",
        aliases: &["alumina"],
        molar_mass: 0.101961,
        delta_h_formation: None,
        segments: &[
            (273.15, 298.0, Fit::Constant(81.0885)),
            (
                298.0,
                2327.0,
                Fit::Shomate([
                    106.9180, 36.62190, -13.97590, 2.157990, -3.157761, -1710.500, 151.7920,
                    -1666.490,
                ]),
            ),
            (2327.0, 4000.0, Fit::Constant(192.4640)),
        ],
        latent_heats: &[(2345.15, 111_100.0)],
    },
    CatalogEntry {
        id: "SiO2",
        display_name: "Silica",
        aliases: &["silica", "quartz"],
        molar_mass: 0.060084,
        delta_h_formation: Some(-910_700.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(44.57)),
            (
                298.0,
                847.0,
                Fit::Shomate([
                    -6.076591, 251.6755, -324.7964, 168.5604, 0.002548, -917.6893, -27.96962,
                    -910.8568,
                ]),
            ),
            (
                847.0,
                1996.0,
                Fit::Shomate([
                    58.75340, 10.27925, -0.131384, 0.025210, 0.025601, -929.3292, 105.8092,
                    -910.8568,
                ]),
            ),
            (1996.0, 3000.1, Fit::Constant(77.99)),
        ],
        latent_heats: &[(1983.15, 9600.0)],
    },
    CatalogEntry {
        id: "CaO",
        display_name: "Lime",
        aliases: &["lime", "calcium oxide"],
        molar_mass: 0.0560774,
        delta_h_formation: None,
        segments: &[
            (273.15, 298.0, Fit::Constant(42.09)),
            (
                298.0,
                3200.0,
                Fit::Shomate([
                    49.95403, 4.887916, -0.352056, 0.046187, -0.825097, -652.9718, 92.56096,
                    -635.0894,
                ]),
            ),
            (3200.0, 4500.0, Fit::Constant(62.76)),
        ],
        latent_heats: &[(2845.15, 80000.0)],
    },
    CatalogEntry {
        id: "MgO",
        display_name: "Magnesia",
        aliases: &["magnesia", "magnesium oxide"],
        molar_mass: 0.0403044,
        delta_h_formation: None,
        segments: &[
            (273.15, 298.0, Fit::Constant(37.01)),
            (
                298.0,
                3105.0,
                Fit::Shomate([
                    47.25995, 5.681621, -0.872665, 0.104300, -1.053955, -619.1316, 76.46176,
                    -601.2408,
                ]),
            ),
            (3105.0, 5000.0, Fit::Constant(66.944)),
        ],
        latent_heats: &[(3098.15, 77000.0)],
    },
    CatalogEntry {
        id: "CH4",
        display_name: "Methane",
        aliases: &["methane", "natural gas"],
        molar_mass: M_C + 2.0 * M_H2,
        delta_h_formation: Some(-74_600.0),
        segments: &[
            (
                273.15,
                1300.0,
                Fit::Shomate([
                    -0.703029, 108.4773, -42.52157, 5.862788, 0.678565, -76.84376, 158.7163,
                    -74.87310,
                ]),
            ),
            (
                1300.0,
                6000.0,
                Fit::Shomate([
                    85.81217, 11.26467, -2.114146, 0.138190, -26.42221, -153.5327, 224.4143,
                    -95.74984,
                ]),
            ),
        ],
        latent_heats: &[],
    },
    CatalogEntry {
        id: "Si",
        display_name: "Silicon",
        aliases: &["silicon"],
        molar_mass: 0.0280855,
        delta_h_formation: Some(0.0),
        segments: &[
            (273.15, 298.0, Fit::Constant(44.57)),
            (
                298.0,
                1685.0,
                Fit::Shomate([
                    22.81719, 3.899510, -0.082885, 0.042111, -0.354063, -8.163946, 43.27846, 0.0,
                ]),
            ),
            (1685.0, 3504.616, Fit::Constant(27.19604)),
        ],
        latent_heats: &[(1414.0, 50210.0)],
    },
];

/// Every catalogued substance.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn filter_catalog(query: &str) -> Vec<CatalogEntry> {
    catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Catalogue entry by exact id (`"H2O"`, `"Fe2O3"`, ...).
pub fn entry(id: &str) -> ThermoResult<&'static CatalogEntry> {
    catalog()
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| ThermoError::SpeciesNotFound {
            species: id.to_string(),
            mixture: "catalog".to_string(),
        })
}

/// Fresh zero-amount species by catalogue id.
pub fn species(id: &str) -> ThermoResult<Species> {
    entry(id)?.build()
}

/// Placeholder species with unit heat capacity, for flows whose composition
/// does not matter.
pub fn dummy(name: &str) -> ThermoResult<Species> {
    let thermo = ThermoData::from_segments(vec![Segment::constant(1.0, 6000.0, 1.0)?])?;
    Ok(Species::new(name, 1.0, thermo, None))
}

/// Dry air by mass: 78.12 % N2, 20.95 % O2, 0.93 % Ar.
pub fn air(mass_kg: f64) -> ThermoResult<Mixture> {
    let mut n2 = species("N2")?;
    n2.set_mass(mass_kg * 0.7812)?;
    let mut o2 = species("O2")?;
    o2.set_mass(mass_kg * 0.2095)?;
    let mut ar = species("Ar")?;
    ar.set_mass(mass_kg * 0.0093)?;
    Mixture::new("Air", vec![n2, o2, ar])
}
