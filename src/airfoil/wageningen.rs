//! Blade sections of the Wageningen B-series propellers, reconstructed at any radius from the
//! published offset tables.
//!
//! The section at r/R is built in two stages. First the radial distributions (chord, location and
//! magnitude of the maximum thickness) are fitted over r/R. The offset tables then give the
//! pressure side and thickness as fractions of the maximum thickness, indexed by the position `a`
//! relative to the point of maximum thickness; these are mapped to physical chord fractions and
//! turned into splines of x.

use crate::airfoil::wageningen::mollifier::WeibullMollifier;
use crate::airfoil::wageningen::tables::{
    RadialTable, KR_DRAWING, KR_EAR_MATCHED, KR_FOUR_PLUS, KR_THREE, MAX_THICKNESS_COLUMN,
    OFFSET_RADII, POSITIONS, PRESSURE_OFFSET, RADII, THICKNESS, THICKNESS_A, THICKNESS_B, XTMAX,
    XTMAX_FIT_RANGE,
};
use crate::airfoil::{EdgeTangents, Foil};
use crate::algorithms::linspace;
use crate::errors::{DomainWarning, FoilError};
use crate::interpolate::{LinearInterp2D, Spline1D, Spline2D};
use log::{debug, warn};
use ncollide2d::na::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

pub mod mollifier;
pub mod tables;

/// Degree of the splines over r/R and of the side splines over x
const SPLINE_DEGREE: usize = 5;

/// Degree in both directions of the offset surfaces of the smoothed reconstruction
const SURFACE_DEGREE: usize = 3;

/// Number of stations the smoothed reconstruction is resampled at
const RESAMPLE_COUNT: usize = 100;

/// Chord fraction over which the smoothed suction side is replaced by a square-root rounding
const ROUNDING_LENGTH: f64 = 0.2;

/// Chords at or below this are treated as vanishing
const MIN_CHORD: f64 = 1e-9;

/// Which K(r) = c/D * Z/EAR table the chord distribution is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KrTable {
    /// Oosterveld's table for three blades, Kuiper's for four or more
    #[default]
    OriginalPerBladeCount,

    /// Modified at r/R=0.7 so the blade area integrates back to the requested EAR
    EarMatched,

    /// Averaged from B-series drawings, with an extra station at r/R=0.95
    DrawingDerived,
}

impl KrTable {
    pub fn table(self, blade_count: u32) -> &'static RadialTable {
        match self {
            KrTable::OriginalPerBladeCount if blade_count <= 3 => &KR_THREE,
            KrTable::OriginalPerBladeCount => &KR_FOUR_PLUS,
            KrTable::EarMatched => &KR_EAR_MATCHED,
            KrTable::DrawingDerived => &KR_DRAWING,
        }
    }
}

/// Options of a Wageningen section. Every field has a default, so configuration files only need
/// to list what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageningenOptions {
    /// Thickness forced at the leading edge, as a fraction of the maximum thickness
    pub leading_edge_thickness_ratio: f64,

    /// Thickness forced at the trailing edge, as a fraction of the maximum thickness
    pub trailing_edge_thickness_ratio: f64,

    pub kr_table: KrTable,

    /// Fit smoothing surfaces over (x, r/R) instead of looking the tables up at one radius
    pub smooth_reconstruction: bool,

    /// Penalty weight of the smoothing surfaces. 0.0 is a plain least squares fit.
    pub smoothing_factor: f64,

    /// Fade the thickness in from the leading edge with a Weibull mollifier
    pub smooth_leading_edge: bool,

    /// Distances (suction, pressure) at which the mollifier reaches 95%
    pub smoothing_lengths: (f64, f64),

    /// Weibull shapes (suction, pressure) of the mollifier
    pub smoothing_shapes: (f64, f64),
}

impl Default for WageningenOptions {
    fn default() -> Self {
        Self {
            leading_edge_thickness_ratio: 0.0,
            trailing_edge_thickness_ratio: 0.0,
            kr_table: KrTable::default(),
            smooth_reconstruction: false,
            smoothing_factor: 0.0,
            smooth_leading_edge: false,
            smoothing_lengths: (0.1, 0.1),
            smoothing_shapes: (0.5, 0.5),
        }
    }
}

impl WageningenOptions {
    pub fn with_edge_thickness(mut self, leading: f64, trailing: f64) -> Self {
        self.leading_edge_thickness_ratio = leading;
        self.trailing_edge_thickness_ratio = trailing;
        self
    }

    pub fn with_kr_table(mut self, kr_table: KrTable) -> Self {
        self.kr_table = kr_table;
        self
    }

    pub fn with_smooth_reconstruction(mut self, smoothing_factor: f64) -> Self {
        self.smooth_reconstruction = true;
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn with_smooth_leading_edge(mut self, lengths: (f64, f64), shapes: (f64, f64)) -> Self {
        self.smooth_leading_edge = true;
        self.smoothing_lengths = lengths;
        self.smoothing_shapes = shapes;
        self
    }

    fn validate(&self) -> Result<(), FoilError> {
        for (label, value) in [
            ("leading", self.leading_edge_thickness_ratio),
            ("trailing", self.trailing_edge_thickness_ratio),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(FoilError::invalid(format!(
                    "{} edge thickness ratio must be in [0, 1), got {}",
                    label, value
                )));
            }
        }
        if !(self.smoothing_factor >= 0.0 && self.smoothing_factor.is_finite()) {
            return Err(FoilError::invalid(format!(
                "smoothing factor must be finite and non-negative, got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }

    /// Blends the tabulated (pressure offset, thickness), both over tmax, toward the edge
    /// thickness of the half the column belongs to
    fn blend(&self, column: usize, pressure: f64, thickness: f64) -> (f64, f64) {
        let edge = if column < MAX_THICKNESS_COLUMN {
            self.leading_edge_thickness_ratio
        } else {
            self.trailing_edge_thickness_ratio
        };
        (pressure * (1.0 - edge), thickness * (1.0 - edge) + edge)
    }
}

/// Chord, location of maximum thickness and maximum thickness over the blade radius, for one
/// blade count and area ratio. Lengths are over the propeller radius R.
#[derive(Debug, Clone)]
pub struct RadialDistributions {
    chord: Spline1D,
    xtmax: Spline1D,
    tmax: Spline1D,
}

impl RadialDistributions {
    pub fn new(
        blade_count: u32,
        expanded_area_ratio: f64,
        kr_table: KrTable,
    ) -> Result<RadialDistributions, FoilError> {
        let z = blade_count as f64;
        let kr = kr_table.table(blade_count);
        let chord_values: Vec<f64> = kr
            .values
            .iter()
            .map(|k| k * 2.0 * expanded_area_ratio / z)
            .collect();
        let chord = Spline1D::interpolate(kr.radii, &chord_values, SPLINE_DEGREE)?;

        let xtmax = Spline1D::interpolate_clamped(
            &XTMAX.radii[XTMAX_FIT_RANGE],
            &XTMAX.values[XTMAX_FIT_RANGE],
            (0.0, 0.0),
        )?;

        let tmax_values: Vec<f64> = THICKNESS_A
            .values
            .iter()
            .zip(THICKNESS_B.values.iter())
            .map(|(a, b)| (a * z - b) / 2.0)
            .collect();
        let tmax = Spline1D::interpolate(THICKNESS_A.radii, &tmax_values, SPLINE_DEGREE)?;

        Ok(RadialDistributions { chord, xtmax, tmax })
    }

    /// c/R at r/R
    pub fn chord_coefficient(&self, r_r: f64) -> f64 {
        self.chord.evaluate(r_r)
    }

    /// Location of maximum thickness X_tmax/c, held at the boundary values of the fitted range
    /// (r/R=0.4 to 0.9) outside of it
    pub fn max_thickness_location(&self, r_r: f64) -> f64 {
        let (lo, hi) = (*XTMAX_FIT_RANGE.start(), *XTMAX_FIT_RANGE.end());
        if r_r < XTMAX.radii[lo] {
            XTMAX.values[lo]
        } else if r_r > XTMAX.radii[hi] {
            XTMAX.values[hi]
        } else {
            self.xtmax.evaluate(r_r)
        }
    }

    /// tmax/R at r/R
    pub fn max_thickness_magnitude(&self, r_r: f64) -> f64 {
        self.tmax.evaluate(r_r)
    }

    pub fn max_thickness_to_chord(&self, r_r: f64) -> f64 {
        self.max_thickness_magnitude(r_r) / self.chord_coefficient(r_r)
    }

    /// Chord fraction of the table position `a` (-1 at the leading edge, 0 at the maximum
    /// thickness, 1 at the trailing edge)
    pub fn a_to_x(&self, a: f64, r_r: f64) -> f64 {
        let xt = self.max_thickness_location(r_r);
        if a < 0.0 {
            (1.0 + a) * xt
        } else {
            (1.0 - a) * xt + a
        }
    }

    pub fn x_to_a(&self, x: f64, r_r: f64) -> f64 {
        let xt = self.max_thickness_location(r_r);
        if x <= xt {
            x / xt - 1.0
        } else {
            (x - xt) / (1.0 - xt)
        }
    }

    /// Area ratio implied by the chord distribution, Z * ∫ c/R d(r/R) / (π cos 15°) over the blade
    /// from r/R=0.2 to the tip
    pub fn expanded_area_ratio_estimate(&self, blade_count: u32) -> f64 {
        let area = self.chord.integral(RADII[0], 1.0);
        blade_count as f64 * area / (PI * 15f64.to_radians().cos())
    }
}

/// The y(x) splines of one section, all over chord fractions
#[derive(Debug, Clone)]
struct SideSplines {
    pressure: Spline1D,
    suction: Spline1D,
    half_thickness: Spline1D,
    camber: Spline1D,
}

impl SideSplines {
    fn interpolate(xs: &[f64], pressure: &[f64], suction: &[f64]) -> Result<Self, FoilError> {
        let half: Vec<f64> = suction
            .iter()
            .zip(pressure.iter())
            .map(|(s, p)| 0.5 * (s - p))
            .collect();
        let camber: Vec<f64> = suction
            .iter()
            .zip(pressure.iter())
            .map(|(s, p)| 0.5 * (s + p))
            .collect();

        Ok(SideSplines {
            pressure: Spline1D::interpolate(xs, pressure, SPLINE_DEGREE)?,
            suction: Spline1D::interpolate(xs, suction, SPLINE_DEGREE)?,
            half_thickness: Spline1D::interpolate(xs, &half, SPLINE_DEGREE)?,
            camber: Spline1D::interpolate(xs, &camber, SPLINE_DEGREE)?,
        })
    }
}

/// Pressure and suction offsets y/c over (x, r/R), fitted when the smoothed reconstruction is used
#[derive(Debug, Clone)]
pub struct OffsetSurfaces {
    pressure: Spline2D,
    suction: Spline2D,
    radii: (f64, f64),
}

impl OffsetSurfaces {
    /// Lowest and highest r/R of the table rows the surfaces were fitted over. Outside of it the
    /// surfaces are extrapolated and can cross each other.
    pub fn radius_range(&self) -> (f64, f64) {
        self.radii
    }

    pub fn pressure_offset(&self, x: f64, r_r: f64) -> f64 {
        self.pressure.evaluate(x, r_r)
    }

    pub fn suction_offset(&self, x: f64, r_r: f64) -> f64 {
        self.suction.evaluate(x, r_r)
    }
}

#[derive(Debug, Clone, Copy)]
struct LeadingEdgeMollifiers {
    suction: WeibullMollifier,
    pressure: WeibullMollifier,
}

/// A section of a Wageningen B-series blade at the radius r/R, normalized by its chord.
#[derive(Debug, Clone)]
pub struct WageningenSection {
    blade_count: u32,
    expanded_area_ratio: f64,
    radius_fraction: f64,
    options: WageningenOptions,
    radial: RadialDistributions,
    sides: SideSplines,
    surfaces: Option<OffsetSurfaces>,
    mollifiers: Option<LeadingEdgeMollifiers>,
    warnings: Vec<DomainWarning>,
}

impl WageningenSection {
    /// Builds the section. All splines are fitted here, evaluation afterwards is read-only.
    ///
    /// # Arguments
    ///
    /// * `blade_count` - number of blades Z, at least 2
    ///
    /// * `expanded_area_ratio` - EAR, strictly positive
    ///
    /// * `radius_fraction` - r/R in (0, 1]. Radii below the tables are allowed and reported in
    /// `domain_warnings`, but the chord there has to remain positive.
    pub fn new(
        blade_count: u32,
        expanded_area_ratio: f64,
        radius_fraction: f64,
        options: WageningenOptions,
    ) -> Result<WageningenSection, FoilError> {
        if blade_count < 2 {
            return Err(FoilError::invalid(format!(
                "a propeller needs at least 2 blades, got {}",
                blade_count
            )));
        }
        if !(expanded_area_ratio > 0.0 && expanded_area_ratio.is_finite()) {
            return Err(FoilError::invalid(format!(
                "expanded area ratio must be positive, got {}",
                expanded_area_ratio
            )));
        }
        if !(radius_fraction > 0.0 && radius_fraction <= 1.0) {
            return Err(FoilError::invalid(format!(
                "radius fraction must be in (0, 1], got {}",
                radius_fraction
            )));
        }
        options.validate()?;

        let radial = RadialDistributions::new(blade_count, expanded_area_ratio, options.kr_table)?;
        let chord = radial.chord_coefficient(radius_fraction);
        if !(chord > MIN_CHORD) {
            return Err(FoilError::invalid(format!(
                "chord at r/R={} is {}, no section can be built there",
                radius_fraction, chord
            )));
        }

        let mut warnings = Vec::new();
        check_domain(&radial, radius_fraction, &mut warnings);

        let mollifiers = if options.smooth_leading_edge {
            Some(LeadingEdgeMollifiers {
                suction: WeibullMollifier::from_transition(
                    options.smoothing_lengths.0,
                    options.smoothing_shapes.0,
                )?,
                pressure: WeibullMollifier::from_transition(
                    options.smoothing_lengths.1,
                    options.smoothing_shapes.1,
                )?,
            })
        } else {
            None
        };

        let (sides, surfaces) = if options.smooth_reconstruction {
            let (sides, surfaces) =
                reconstruct_smoothed(&radial, radius_fraction, &options, &mut warnings)?;
            (sides, Some(surfaces))
        } else {
            (reconstruct_from_tables(&radial, radius_fraction, &options)?, None)
        };

        debug!(
            "built B{} EAR={} section at r/R={}: c/R={:.5}, tmax/c={:.5}, xtmax/c={:.4}",
            blade_count,
            expanded_area_ratio,
            radius_fraction,
            chord,
            radial.max_thickness_to_chord(radius_fraction),
            radial.max_thickness_location(radius_fraction)
        );

        Ok(WageningenSection {
            blade_count,
            expanded_area_ratio,
            radius_fraction,
            options,
            radial,
            sides,
            surfaces,
            mollifiers,
            warnings,
        })
    }

    pub fn blade_count(&self) -> u32 {
        self.blade_count
    }

    pub fn expanded_area_ratio(&self) -> f64 {
        self.expanded_area_ratio
    }

    pub fn radius_fraction(&self) -> f64 {
        self.radius_fraction
    }

    pub fn options(&self) -> &WageningenOptions {
        &self.options
    }

    pub fn radial(&self) -> &RadialDistributions {
        &self.radial
    }

    pub fn chord_coefficient(&self, r_r: f64) -> f64 {
        self.radial.chord_coefficient(r_r)
    }

    pub fn max_thickness_location(&self, r_r: f64) -> f64 {
        self.radial.max_thickness_location(r_r)
    }

    pub fn max_thickness_magnitude(&self, r_r: f64) -> f64 {
        self.radial.max_thickness_magnitude(r_r)
    }

    pub fn max_thickness_to_chord(&self, r_r: f64) -> f64 {
        self.radial.max_thickness_to_chord(r_r)
    }

    pub fn a_to_x(&self, a: f64, r_r: f64) -> f64 {
        self.radial.a_to_x(a, r_r)
    }

    pub fn x_to_a(&self, x: f64, r_r: f64) -> f64 {
        self.radial.x_to_a(x, r_r)
    }

    pub fn expanded_area_ratio_estimate(&self) -> f64 {
        self.radial.expanded_area_ratio_estimate(self.blade_count)
    }

    /// Clamping and extrapolation that happened while building the section
    pub fn domain_warnings(&self) -> &[DomainWarning] {
        &self.warnings
    }

    /// The (x, r/R) offset surfaces, only present with the smoothed reconstruction
    pub fn offset_surfaces(&self) -> Option<&OffsetSurfaces> {
        self.surfaces.as_ref()
    }

    /// Mean line y/c
    pub fn camber(&self, x: f64) -> f64 {
        self.sides.camber.evaluate(x)
    }

    /// Half of the local thickness over chord
    pub fn half_thickness(&self, x: f64) -> f64 {
        self.sides.half_thickness.evaluate(x)
    }

    fn suction_slope(&self, x: f64) -> f64 {
        match &self.mollifiers {
            Some(m) => {
                self.sides.camber.derivative(1, x)
                    + self.sides.half_thickness.derivative(1, x) * m.suction.value(x)
                    + self.half_thickness(x) * m.suction.derivative(x)
            }
            None => self.sides.suction.derivative(1, x),
        }
    }

    fn pressure_slope(&self, x: f64) -> f64 {
        match &self.mollifiers {
            Some(m) => {
                self.sides.camber.derivative(1, x)
                    - self.sides.half_thickness.derivative(1, x) * m.pressure.value(x)
                    - self.half_thickness(x) * m.pressure.derivative(x)
            }
            None => self.sides.pressure.derivative(1, x),
        }
    }
}

impl Foil for WageningenSection {
    fn name(&self) -> String {
        format!(
            "B{}_{:.0}_rR={:.2}",
            self.blade_count,
            self.expanded_area_ratio * 100.0,
            self.radius_fraction
        )
    }

    fn suction_x(&self, x: f64) -> f64 {
        x
    }

    fn suction_y(&self, x: f64) -> f64 {
        match &self.mollifiers {
            Some(m) => self.camber(x) + self.half_thickness(x) * m.suction.value(x),
            None => self.sides.suction.evaluate(x),
        }
    }

    fn pressure_x(&self, x: f64) -> f64 {
        x
    }

    fn pressure_y(&self, x: f64) -> f64 {
        match &self.mollifiers {
            Some(m) => self.camber(x) - self.half_thickness(x) * m.pressure.value(x),
            None => self.sides.pressure.evaluate(x),
        }
    }

    /// Vertical when the leading edge is mollified, otherwise the normal of the mean line
    fn leading_edge_tangent(&self) -> EdgeTangents {
        if self.mollifiers.is_some() {
            EdgeTangents::shared(Vector2::new(0.0, 1.0))
        } else {
            EdgeTangents::shared(Vector2::new(-self.sides.camber.derivative(1, 0.0), 1.0))
        }
    }

    fn trailing_edge_tangent(&self) -> EdgeTangents {
        EdgeTangents::from_side_slopes(self.pressure_slope(1.0), self.suction_slope(1.0))
    }
}

impl Display for WageningenSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "WAGENINGEN : {}", self.name())?;
        writeln!(f, "EAR={}", self.expanded_area_ratio)?;
        writeln!(f, "Z={}", self.blade_count)?;
        writeln!(f, "rR={}", self.radius_fraction)?;
        if self.leading_edge_closed() {
            write!(f, "Closed Leading Edge")
        } else {
            write!(f, "Open Leading Edge")
        }
    }
}

/// Records the ways the radius leaves the tabulated ranges
fn check_domain(radial: &RadialDistributions, r_r: f64, warnings: &mut Vec<DomainWarning>) {
    if r_r < RADII[0] {
        let w = DomainWarning::RadialSplineExtrapolated {
            r_r,
            lower: RADII[0],
        };
        warn!("{}", w);
        warnings.push(w);
    }

    if r_r < OFFSET_RADII[0] {
        let w = DomainWarning::OffsetTableClamped {
            r_r,
            lower: OFFSET_RADII[0],
        };
        warn!("{}", w);
        warnings.push(w);
    }

    let (lo, hi) = (*XTMAX_FIT_RANGE.start(), *XTMAX_FIT_RANGE.end());
    if r_r < XTMAX.radii[lo] || r_r > XTMAX.radii[hi] {
        // Every hub and tip section hits this, so it stays at debug
        let w = DomainWarning::MaxThicknessLocationClamped {
            r_r,
            value: radial.max_thickness_location(r_r),
        };
        debug!("{}", w);
        warnings.push(w);
    }

    let tmax = radial.max_thickness_magnitude(r_r);
    if tmax < 0.0 {
        let w = DomainWarning::NegativeThickness { r_r, value: tmax };
        warn!("{}", w);
        warnings.push(w);
    }
}

/// Looks the offset tables up at r/R (bilinear, clamped to the tables) and interpolates the
/// resulting stations over x
fn reconstruct_from_tables(
    radial: &RadialDistributions,
    r_r: f64,
    options: &WageningenOptions,
) -> Result<SideSplines, FoilError> {
    let pressure_table = LinearInterp2D::new(&POSITIONS, &OFFSET_RADII, PRESSURE_OFFSET.rows())?;
    let thickness_table = LinearInterp2D::new(&POSITIONS, &OFFSET_RADII, THICKNESS.rows())?;
    let v1 = pressure_table.row_at(&POSITIONS, r_r);
    let v2 = thickness_table.row_at(&POSITIONS, r_r);
    let scale = radial.max_thickness_to_chord(r_r);

    let xs: Vec<f64> = POSITIONS.iter().map(|a| radial.a_to_x(*a, r_r)).collect();
    let mut pressure = Vec::with_capacity(POSITIONS.len());
    let mut suction = Vec::with_capacity(POSITIONS.len());
    for (column, (p, t)) in v1.iter().zip(v2.iter()).enumerate() {
        let (p, t) = options.blend(column, *p, *t);
        pressure.push(p * scale);
        suction.push((p + t) * scale);
    }

    SideSplines::interpolate(&xs, &pressure, &suction)
}

/// Fits the offset surfaces over every table row, then resamples them at r/R. The suction side
/// near the leading edge is rounded off as a square root from the mean of both sides at x = 0.
fn reconstruct_smoothed(
    radial: &RadialDistributions,
    r_r: f64,
    options: &WageningenOptions,
    warnings: &mut Vec<DomainWarning>,
) -> Result<(SideSplines, OffsetSurfaces), FoilError> {
    let count = OFFSET_RADII.len() * POSITIONS.len();
    let mut xs = Vec::with_capacity(count);
    let mut rs = Vec::with_capacity(count);
    let mut pressure = Vec::with_capacity(count);
    let mut suction = Vec::with_capacity(count);
    let mut radii = (f64::INFINITY, f64::NEG_INFINITY);

    for (row, &r) in OFFSET_RADII.iter().enumerate() {
        let chord = radial.chord_coefficient(r);
        let scale = radial.max_thickness_magnitude(r) / chord;
        if !(chord > MIN_CHORD && scale.is_finite()) {
            let w = DomainWarning::TableRowDropped { r_r: r };
            warn!("{}", w);
            warnings.push(w);
            continue;
        }
        radii = (radii.0.min(r), radii.1.max(r));

        for (column, &a) in POSITIONS.iter().enumerate() {
            let (p, t) = options.blend(
                column,
                PRESSURE_OFFSET.values[row][column],
                THICKNESS.values[row][column],
            );
            xs.push(radial.a_to_x(a, r));
            rs.push(r);
            pressure.push(p * scale);
            suction.push((p + t) * scale);
        }
    }
    if xs.is_empty() {
        return Err(FoilError::degenerate("no offset table row is usable for the surface fit"));
    }

    let s = options.smoothing_factor;
    let surfaces = OffsetSurfaces {
        pressure: Spline2D::fit(&xs, &rs, &pressure, SURFACE_DEGREE, SURFACE_DEGREE, s)?,
        suction: Spline2D::fit(&xs, &rs, &suction, SURFACE_DEGREE, SURFACE_DEGREE, s)?,
        radii,
    };

    // Offsets scale with tmax/c, so a section past the fitted rows is the nearest row rescaled
    let r_fit = r_r.clamp(radii.0, radii.1);
    let ratio = if r_fit == r_r {
        1.0
    } else {
        let w = DomainWarning::SurfaceClamped {
            r_r,
            lower: radii.0,
            upper: radii.1,
        };
        warn!("{}", w);
        warnings.push(w);
        radial.max_thickness_to_chord(r_r) / radial.max_thickness_to_chord(r_fit)
    };
    let pressure_at = |x: f64| surfaces.pressure_offset(x, r_fit) * ratio;
    let suction_at = |x: f64| surfaces.suction_offset(x, r_fit) * ratio;

    let stations = linspace(0.0, 1.0, RESAMPLE_COUNT);
    let mut yp: Vec<f64> = stations.iter().map(|x| pressure_at(*x)).collect();
    let mut ys: Vec<f64> = stations.iter().map(|x| suction_at(*x)).collect();

    let mean = 0.5 * (ys[0] + yp[0]);
    let rate = (mean - suction_at(ROUNDING_LENGTH)) / ROUNDING_LENGTH.sqrt();
    yp[0] = mean;
    for (y, x) in ys.iter_mut().zip(stations.iter()) {
        if *x <= ROUNDING_LENGTH {
            *y = mean - rate * x.sqrt();
        }
    }
    if options.trailing_edge_thickness_ratio == 0.0 {
        ys[RESAMPLE_COUNT - 1] = yp[RESAMPLE_COUNT - 1];
    }

    let sides = SideSplines::interpolate(&stations, &yp, &ys)?;
    Ok((sides, surfaces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;
    use test_case::test_case;

    fn section(z: u32, ear: f64, r_r: f64, options: WageningenOptions) -> WageningenSection {
        WageningenSection::new(z, ear, r_r, options).unwrap()
    }

    fn b4(r_r: f64) -> WageningenSection {
        section(4, 1.0, r_r, WageningenOptions::default())
    }

    #[test]
    fn test_chord_at_table_radius() {
        let foil = b4(0.7);
        assert_relative_eq!(2.144 * 2.0 / 4.0, foil.chord_coefficient(0.7), max_relative = 1e-9);
        assert_relative_eq!(0.04245, foil.max_thickness_magnitude(0.7), max_relative = 1e-9);
    }

    #[test_case(0.3, 0.35)]
    #[test_case(0.2, 0.35)]
    #[test_case(0.4, 0.35)]
    #[test_case(0.7, 0.443)]
    #[test_case(0.9, 0.5)]
    #[test_case(0.95, 0.5)]
    fn test_max_thickness_location(r_r: f64, e: f64) {
        assert_relative_eq!(e, b4(0.7).max_thickness_location(r_r), epsilon = 1e-12);
    }

    #[test]
    fn test_max_thickness_location_smooth_inside() {
        let foil = b4(0.7);
        let mut last = foil.max_thickness_location(0.4);
        for i in 1..=50 {
            let v = foil.max_thickness_location(0.4 + 0.5 * i as f64 / 50.0);
            assert!(v >= last - 1e-3);
            assert!((0.34..0.51).contains(&v));
            last = v;
        }
    }

    #[test]
    fn test_position_round_trip() {
        let foil = b4(0.7);
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let a = rng.gen_range(-1.0..=1.0);
            let r = rng.gen_range(0.2..=1.0);
            let x = foil.a_to_x(a, r);
            assert!((0.0..=1.0).contains(&x));
            assert_relative_eq!(a, foil.x_to_a(x, r), epsilon = 1e-12);
        }
    }

    #[test_case(-1.0, 0.0)]
    #[test_case(0.0, 0.443)]
    #[test_case(1.0, 1.0)]
    #[test_case(-0.5, 0.2215)]
    fn test_position_to_chord(a: f64, e: f64) {
        assert_relative_eq!(e, b4(0.7).a_to_x(a, 0.7), epsilon = 1e-12);
    }

    #[test_case(3, KrTable::OriginalPerBladeCount, 0.05)]
    #[test_case(4, KrTable::OriginalPerBladeCount, 0.05)]
    #[test_case(5, KrTable::OriginalPerBladeCount, 0.05)]
    #[test_case(4, KrTable::EarMatched, 1e-3)]
    #[test_case(4, KrTable::DrawingDerived, 0.05)]
    fn test_area_ratio_estimate(z: u32, kr_table: KrTable, tol: f64) {
        for ear in [0.55, 1.0] {
            let options = WageningenOptions::default().with_kr_table(kr_table);
            let foil = section(z, ear, 0.7, options);
            assert_relative_eq!(ear, foil.expanded_area_ratio_estimate(), max_relative = tol);
        }
    }

    #[test_case(0.3)]
    #[test_case(0.45)]
    #[test_case(0.7)]
    #[test_case(0.95)]
    fn test_thickness_at_max_location(r_r: f64) {
        let foil = b4(r_r);
        let x = foil.max_thickness_location(r_r);
        let t = foil.suction_y(x) - foil.pressure_y(x);
        assert_relative_eq!(foil.max_thickness_to_chord(r_r), t, max_relative = 1e-8);
        assert_relative_eq!(0.5 * t, foil.half_thickness(x), max_relative = 1e-8);
    }

    #[test_case(0.2)]
    #[test_case(0.45)]
    #[test_case(0.7)]
    #[test_case(0.95)]
    fn test_suction_above_pressure(r_r: f64) {
        let foil = b4(r_r);
        for i in 1..200 {
            let x = i as f64 / 200.0;
            assert!(foil.suction_y(x) > foil.pressure_y(x), "x={}", x);
        }
    }

    #[test]
    fn test_default_edges_closed() {
        let foil = b4(0.7);
        assert!(foil.leading_edge_closed());
        assert!(foil.trailing_edge_closed());
        assert_eq!(foil.suction_x(0.3), 0.3);
        assert_eq!(foil.pressure_x(0.3), 0.3);
    }

    #[test]
    fn test_open_edges() {
        let options = WageningenOptions::default().with_edge_thickness(0.1, 0.2);
        let foil = section(4, 1.0, 0.7, options);
        assert!(!foil.leading_edge_closed());
        assert!(!foil.trailing_edge_closed());

        let tc = foil.max_thickness_to_chord(0.7);
        assert_relative_eq!(0.1 * tc, foil.suction_y(0.0) - foil.pressure_y(0.0), max_relative = 1e-8);
        assert_relative_eq!(0.2 * tc, foil.suction_y(1.0) - foil.pressure_y(1.0), max_relative = 1e-8);
    }

    #[test_case(WageningenOptions::default())]
    #[test_case(WageningenOptions::default().with_edge_thickness(0.2, 0.0))]
    #[test_case(WageningenOptions::default().with_smooth_leading_edge((0.1, 0.1), (0.5, 0.5)))]
    #[test_case(WageningenOptions::default().with_smooth_reconstruction(0.0))]
    fn test_leading_edge_tangents_identical(options: WageningenOptions) {
        for r_r in [0.3, 0.7] {
            let foil = section(4, 0.7, r_r, options.clone());
            let le = foil.leading_edge_tangent();
            assert_eq!(le.pressure, le.suction);
            assert!(le.suction.y > 0.0);
        }
    }

    #[test]
    fn test_leading_edge_tangent_follows_mean_line() {
        let foil = b4(0.3);
        let le = foil.leading_edge_tangent();
        let h = 1e-5;
        let slope = (foil.camber(h) - foil.camber(-h)) / (2.0 * h);
        let e = Vector2::new(-slope, 1.0).normalize();
        assert_relative_eq!(e, le.suction.into_inner(), epsilon = 1e-4);
    }

    #[test]
    fn test_smoothed_leading_edge() {
        let options = WageningenOptions::default()
            .with_edge_thickness(0.2, 0.0)
            .with_smooth_leading_edge((0.1, 0.05), (0.5, 0.8));
        let foil = section(4, 0.7, 0.5, options);
        assert_relative_eq!(foil.camber(0.0), foil.suction_y(0.0), epsilon = 1e-15);
        assert_relative_eq!(foil.camber(0.0), foil.pressure_y(0.0), epsilon = 1e-15);
        assert!(foil.leading_edge_closed());

        let le = foil.leading_edge_tangent();
        assert_relative_eq!(0.0, le.suction.x, epsilon = 1e-15);
        assert_relative_eq!(1.0, le.suction.y, epsilon = 1e-15);

        // Past the transition the sides are back on the reconstructed ones
        let plain = section(4, 0.7, 0.5, WageningenOptions::default().with_edge_thickness(0.2, 0.0));
        assert_relative_eq!(plain.suction_y(0.6), foil.suction_y(0.6), max_relative = 1e-3);
        assert_relative_eq!(plain.pressure_y(0.6), foil.pressure_y(0.6), epsilon = 1e-4);
    }

    #[test_case(WageningenOptions::default())]
    #[test_case(WageningenOptions::default().with_smooth_leading_edge((0.1, 0.1), (0.5, 0.5)))]
    fn test_trailing_edge_tangents(options: WageningenOptions) {
        let foil = section(4, 1.0, 0.6, options);
        let te = foil.trailing_edge_tangent();
        assert!(te.suction.x > 0.0);
        assert!(te.pressure.x < 0.0);

        let h = 1e-6;
        let ds = foil.suction_point(1.0) - foil.suction_point(1.0 - h);
        let dp = foil.pressure_point(1.0 - h) - foil.pressure_point(1.0);
        assert_relative_eq!(ds.normalize(), te.suction.into_inner(), epsilon = 1e-4);
        assert_relative_eq!(dp.normalize(), te.pressure.into_inner(), epsilon = 1e-4);
    }

    #[test_case(0.3)]
    #[test_case(0.7)]
    fn test_smoothed_reconstruction(r_r: f64) {
        let options = WageningenOptions::default().with_smooth_reconstruction(0.0);
        let foil = section(4, 1.0, r_r, options);
        let plain = b4(r_r);
        assert!(foil.offset_surfaces().is_some());
        assert!(plain.offset_surfaces().is_none());
        assert!(foil.leading_edge_closed());
        assert!(foil.trailing_edge_closed());

        for i in 1..20 {
            let x = 0.05 * i as f64;
            assert!(foil.suction_y(x) > foil.pressure_y(x), "x={}", x);
        }

        let x = foil.max_thickness_location(r_r);
        let t = foil.suction_y(x) - foil.pressure_y(x);
        assert_relative_eq!(foil.max_thickness_to_chord(r_r), t, max_relative = 0.1);
    }

    #[test]
    fn test_smoothed_reconstruction_drops_vanishing_chord() {
        let options = WageningenOptions::default().with_smooth_reconstruction(1e-6);
        let foil = section(3, 0.5, 0.6, options);
        assert!(foil
            .domain_warnings()
            .contains(&DomainWarning::TableRowDropped { r_r: 1.0 }));
    }

    #[test_case(2, 0.97)]
    #[test_case(3, 0.94)]
    #[test_case(3, 0.97)]
    fn test_smoothed_tip_past_fitted_rows(z: u32, r_r: f64) {
        let options = WageningenOptions::default().with_smooth_reconstruction(0.0);
        let foil = section(z, 0.7, r_r, options);
        assert!(foil.domain_warnings().contains(&DomainWarning::SurfaceClamped {
            r_r,
            lower: 0.15,
            upper: 0.9
        }));
        assert_eq!((0.15, 0.9), foil.offset_surfaces().unwrap().radius_range());

        for i in 2..=18 {
            let x = 0.05 * i as f64;
            assert!(foil.suction_y(x) > foil.pressure_y(x), "x={}", x);
        }

        let x = foil.max_thickness_location(r_r);
        let t = foil.suction_y(x) - foil.pressure_y(x);
        assert_relative_eq!(foil.max_thickness_to_chord(r_r), t, max_relative = 0.15);
    }

    #[test]
    fn test_smoothed_tip_inside_fitted_rows() {
        let options = WageningenOptions::default().with_smooth_reconstruction(0.0);
        let foil = section(4, 0.7, 0.97, options);
        assert_eq!((0.15, 1.0), foil.offset_surfaces().unwrap().radius_range());
        assert!(!foil
            .domain_warnings()
            .iter()
            .any(|w| matches!(w, DomainWarning::SurfaceClamped { .. })));
    }

    #[test]
    fn test_domain_warnings() {
        assert!(b4(0.7).domain_warnings().is_empty());

        let hub = b4(0.18);
        assert!(hub
            .domain_warnings()
            .iter()
            .any(|w| matches!(w, DomainWarning::RadialSplineExtrapolated { .. })));
        assert!(!hub
            .domain_warnings()
            .iter()
            .any(|w| matches!(w, DomainWarning::OffsetTableClamped { .. })));

        let deep = b4(0.1);
        assert!(deep
            .domain_warnings()
            .iter()
            .any(|w| matches!(w, DomainWarning::OffsetTableClamped { .. })));

        assert!(b4(0.3)
            .domain_warnings()
            .contains(&DomainWarning::MaxThicknessLocationClamped { r_r: 0.3, value: 0.35 }));
    }

    #[test_case(1, 1.0, 0.7)]
    #[test_case(4, 0.0, 0.7)]
    #[test_case(4, -1.0, 0.7)]
    #[test_case(4, 1.0, 0.0)]
    #[test_case(4, 1.0, 1.2)]
    #[test_case(4, 1.0, f64::NAN)]
    #[test_case(3, 1.0, 1.0)]
    fn test_invalid_specification(z: u32, ear: f64, r_r: f64) {
        let r = WageningenSection::new(z, ear, r_r, WageningenOptions::default());
        assert!(matches!(r, Err(FoilError::InvalidSpecification(_))));
    }

    #[test_case(WageningenOptions::default().with_edge_thickness(1.0, 0.0))]
    #[test_case(WageningenOptions::default().with_edge_thickness(0.0, -0.1))]
    #[test_case(WageningenOptions::default().with_smooth_reconstruction(-1.0))]
    #[test_case(WageningenOptions::default().with_smooth_leading_edge((0.0, 0.1), (0.5, 0.5)))]
    fn test_invalid_options(options: WageningenOptions) {
        let r = WageningenSection::new(4, 1.0, 0.7, options);
        assert!(matches!(r, Err(FoilError::InvalidSpecification(_))));
    }

    #[test]
    fn test_tip_section_with_tip_chord() {
        let foil = b4(1.0);
        assert!(foil.chord_coefficient(1.0) > 0.0);
        assert!(foil.suction_y(0.5) > foil.pressure_y(0.5));
    }

    #[test]
    fn test_name_and_display() {
        let foil = b4(0.7);
        assert_eq!("B4_100_rR=0.70", foil.name());
        let text = foil.to_string();
        assert!(text.contains("Z=4"));
        assert!(text.ends_with("Closed Leading Edge"));
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: WageningenOptions =
            serde_json::from_str(r#"{"kr_table": "ear_matched", "smoothing_lengths": [0.2, 0.05]}"#)
                .unwrap();
        assert_eq!(KrTable::EarMatched, options.kr_table);
        assert_eq!((0.2, 0.05), options.smoothing_lengths);
        assert_eq!((0.5, 0.5), options.smoothing_shapes);
        assert!(!options.smooth_leading_edge);
    }
}
