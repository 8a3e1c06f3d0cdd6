//! World and solver configuration.
//!
//! Values are fixed point at runtime. The JSON form uses plain numbers that
//! are converted once at load time, so a settings document yields the same
//! bits on every machine that parses it.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::spatial::grid::{grid_dimensions, MAX_CELLS};

/// How two materials' coefficients merge at a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombineRule {
    Minimum,
    Maximum,
    Average,
    Multiply,
    GeometricMean,
}

impl CombineRule {
    pub fn combine(self, a: FixedPoint, b: FixedPoint) -> FixedPoint {
        match self {
            CombineRule::Minimum => a.min(b),
            CombineRule::Maximum => a.max(b),
            CombineRule::Average => (a + b).half(),
            CombineRule::Multiply => a * b,
            CombineRule::GeometricMean => (a * b).sqrt(),
        }
    }
}

/// Contact solver tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverSettings {
    pub restitution_combine: CombineRule,
    pub friction_combine: CombineRule,
    /// Fraction of the remaining penetration removed per substep (0..=1].
    pub correction_percent: FixedPoint,
    /// Penetration allowed before positional correction kicks in.
    pub slop: FixedPoint,
    /// Tangential speed below which static friction applies.
    pub resting_threshold: FixedPoint,
    /// Lengths and denominators at or below this count as zero.
    pub epsilon: FixedPoint,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            restitution_combine: CombineRule::Minimum,
            friction_combine: CombineRule::GeometricMean,
            correction_percent: FixedPoint::from_ratio(2, 5),
            slop: FixedPoint::from_ratio(1, 100),
            resting_threshold: FixedPoint::from_ratio(1, 100),
            epsilon: FixedPoint::from_ratio(1, 10_000),
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !self.correction_percent.is_positive() || self.correction_percent > FixedPoint::ONE {
            return Err(format!(
                "correctionPercent must be within (0, 1], got {}",
                self.correction_percent
            ));
        }
        if self.slop.is_negative() {
            return Err(format!("slop must not be negative, got {}", self.slop));
        }
        if self.resting_threshold.is_negative() {
            return Err(format!(
                "restingThreshold must not be negative, got {}",
                self.resting_threshold
            ));
        }
        if !self.epsilon.is_positive() {
            return Err(format!("epsilon must be positive, got {}", self.epsilon));
        }
        Ok(())
    }
}

/// Everything a `PhysicsWorld` is configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSettings {
    pub gravity: FixedVector2,
    /// Lower-left corner of the indexed region.
    pub bounds_min: FixedVector2,
    /// Upper-right corner (exclusive).
    pub bounds_max: FixedVector2,
    pub cell_size: FixedPoint,
    pub default_substeps: u32,
    pub solver: SolverSettings,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: FixedVector2::new(FixedPoint::ZERO, -FixedPoint::from_ratio(981, 100)),
            bounds_min: FixedVector2::from_int(-256, -256),
            bounds_max: FixedVector2::from_int(256, 256),
            cell_size: FixedPoint::from_int(4),
            default_substeps: 4,
            solver: SolverSettings::default(),
        }
    }
}

impl WorldSettings {
    pub fn with_gravity(mut self, gravity: FixedVector2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bounds(mut self, min: FixedVector2, max: FixedVector2) -> Self {
        self.bounds_min = min;
        self.bounds_max = max;
        self
    }

    pub fn with_cell_size(mut self, cell_size: FixedPoint) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bounds_max.x <= self.bounds_min.x || self.bounds_max.y <= self.bounds_min.y {
            return Err(format!(
                "bounds are empty: min ({}, {}) max ({}, {})",
                self.bounds_min.x, self.bounds_min.y, self.bounds_max.x, self.bounds_max.y
            ));
        }
        if !self.cell_size.is_positive() {
            return Err(format!("cellSize must be positive, got {}", self.cell_size));
        }
        let (cols, rows) = grid_dimensions(self.bounds_min, self.bounds_max, self.cell_size)
            .ok_or_else(|| "bounds and cellSize do not describe a grid".to_string())?;
        match cols.checked_mul(rows) {
            Some(cells) if cells <= MAX_CELLS => {}
            cells => {
                let cells = cells.map_or_else(|| "more than u64::MAX".to_string(), |n| n.to_string());
                return Err(format!(
                    "cellSize {} yields {cols}x{rows} = {cells} grid cells, exceeds the limit of {MAX_CELLS}",
                    self.cell_size
                ));
            }
        }
        if self.default_substeps == 0 {
            return Err("defaultSubsteps must be at least 1".to_string());
        }
        self.solver.validate()
    }

    /// Parse and validate a camelCase JSON document. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let doc: SettingsDoc = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let settings = doc.into_settings();
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&SettingsDoc::from_settings(self)).unwrap_or_else(|_| "{}".to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsDoc {
    gravity: [f64; 2],
    bounds_min: [f64; 2],
    bounds_max: [f64; 2],
    cell_size: f64,
    default_substeps: u32,
    solver: SolverDoc,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SolverDoc {
    restitution_combine: CombineRule,
    friction_combine: CombineRule,
    correction_percent: f64,
    slop: f64,
    resting_threshold: f64,
    epsilon: f64,
}

fn pair(v: FixedVector2) -> [f64; 2] {
    [v.x.to_f64(), v.y.to_f64()]
}

fn vector(p: [f64; 2]) -> FixedVector2 {
    FixedVector2::from_f64(p[0], p[1])
}

impl SettingsDoc {
    fn from_settings(s: &WorldSettings) -> Self {
        Self {
            gravity: pair(s.gravity),
            bounds_min: pair(s.bounds_min),
            bounds_max: pair(s.bounds_max),
            cell_size: s.cell_size.to_f64(),
            default_substeps: s.default_substeps,
            solver: SolverDoc::from_settings(&s.solver),
        }
    }

    fn into_settings(self) -> WorldSettings {
        WorldSettings {
            gravity: vector(self.gravity),
            bounds_min: vector(self.bounds_min),
            bounds_max: vector(self.bounds_max),
            cell_size: FixedPoint::from_f64(self.cell_size),
            default_substeps: self.default_substeps,
            solver: self.solver.into_settings(),
        }
    }
}

impl Default for SettingsDoc {
    fn default() -> Self {
        Self::from_settings(&WorldSettings::default())
    }
}

impl SolverDoc {
    fn from_settings(s: &SolverSettings) -> Self {
        Self {
            restitution_combine: s.restitution_combine,
            friction_combine: s.friction_combine,
            correction_percent: s.correction_percent.to_f64(),
            slop: s.slop.to_f64(),
            resting_threshold: s.resting_threshold.to_f64(),
            epsilon: s.epsilon.to_f64(),
        }
    }

    fn into_settings(self) -> SolverSettings {
        SolverSettings {
            restitution_combine: self.restitution_combine,
            friction_combine: self.friction_combine,
            correction_percent: FixedPoint::from_f64(self.correction_percent),
            slop: FixedPoint::from_f64(self.slop),
            resting_threshold: FixedPoint::from_f64(self.resting_threshold),
            epsilon: FixedPoint::from_f64(self.epsilon),
        }
    }
}

impl Default for SolverDoc {
    fn default() -> Self {
        Self::from_settings(&SolverSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_rules() {
        let a = FixedPoint::from_ratio(1, 4);
        let b = FixedPoint::ONE;
        assert_eq!(CombineRule::Minimum.combine(a, b), a);
        assert_eq!(CombineRule::Maximum.combine(a, b), b);
        assert_eq!(CombineRule::Average.combine(a, b), FixedPoint::from_ratio(5, 8));
        assert_eq!(CombineRule::Multiply.combine(a, b), a);
        assert_eq!(CombineRule::GeometricMean.combine(a, b), FixedPoint::HALF);
    }

    #[test]
    fn defaults_validate() {
        assert!(WorldSettings::default().validate().is_ok());
    }

    #[test]
    fn empty_object_yields_defaults() {
        let parsed = WorldSettings::from_json("{}").unwrap();
        let defaults = WorldSettings::default();
        assert_eq!(parsed.cell_size, defaults.cell_size);
        assert_eq!(parsed.default_substeps, defaults.default_substeps);
        assert_eq!(parsed.solver.restitution_combine, CombineRule::Minimum);
        assert!((parsed.gravity.y.to_f64() + 9.81).abs() < 1e-6);
    }

    #[test]
    fn partial_solver_section_keeps_other_defaults() {
        let parsed = WorldSettings::from_json(
            r#"{ "cellSize": 8, "solver": { "restitutionCombine": "maximum", "slop": 0.05 } }"#,
        )
        .unwrap();
        assert_eq!(parsed.cell_size, FixedPoint::from_int(8));
        assert_eq!(parsed.solver.restitution_combine, CombineRule::Maximum);
        assert_eq!(parsed.solver.friction_combine, CombineRule::GeometricMean);
        assert!((parsed.solver.slop.to_f64() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = WorldSettings::from_json(r#"{ "cellSize": 0 }"#).unwrap_err();
        assert!(err.contains("cellSize"), "{err}");

        let err = WorldSettings::from_json(r#"{ "boundsMin": [10, 0], "boundsMax": [0, 10] }"#).unwrap_err();
        assert!(err.contains("bounds"), "{err}");

        let err = WorldSettings::from_json(r#"{ "solver": { "correctionPercent": 1.5 } }"#).unwrap_err();
        assert!(err.contains("correctionPercent"), "{err}");

        assert!(WorldSettings::from_json("not json").is_err());
    }

    #[test]
    fn grid_cell_count_is_capped() {
        let err = WorldSettings::from_json(r#"{ "cellSize": 0.0001 }"#).unwrap_err();
        assert!(err.contains("cellSize") && err.contains("exceeds"), "{err}");

        // 2048 x 2048 sits exactly on the cap.
        let at_cap = WorldSettings::default().with_cell_size(FixedPoint::from_ratio(1, 4));
        assert!(at_cap.validate().is_ok());
        let over = WorldSettings::default().with_cell_size(FixedPoint::from_ratio(1, 5));
        assert!(over.validate().is_err());
    }

    #[test]
    fn json_output_parses_back() {
        let settings = WorldSettings::default().with_cell_size(FixedPoint::from_int(2));
        let json = settings.to_json();
        assert!(json.contains("\"cellSize\":2.0"), "{json}");
        assert_eq!(WorldSettings::from_json(&json).unwrap().cell_size, FixedPoint::from_int(2));
    }
}
