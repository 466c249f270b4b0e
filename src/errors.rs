use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoilError {
    /// The parameters describing a foil are out of range. Nothing is constructed.
    #[error("invalid foil specification: {0}")]
    InvalidSpecification(String),

    /// A spline could not be fitted to the data it was given. With the compiled-in tables this
    /// points to a bug in a table or in a coordinate transform.
    #[error("degenerate spline input: {0}")]
    DegenerateInput(String),

    #[error("could not read foil configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FoilError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FoilError::InvalidSpecification(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        FoilError::DegenerateInput(msg.into())
    }
}

/// Non-fatal notices raised while building a tabulated foil. The geometry is still defined (the
/// tables are clamped or the splines extrapolated) but a caller may want to know it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainWarning {
    /// The radius lies below the first radius of the chord/thickness tables, so the radial
    /// splines are extrapolated.
    RadialSplineExtrapolated { r_r: f64, lower: f64 },

    /// The radius lies below the first row of the offset tables, which are clamped to that row.
    OffsetTableClamped { r_r: f64, lower: f64 },

    /// The location of maximum thickness is held at a boundary value of its table.
    MaxThicknessLocationClamped { r_r: f64, value: f64 },

    /// A negative maximum thickness came out of the tables. It is kept as-is.
    NegativeThickness { r_r: f64, value: f64 },

    /// A table row had no finite physical value (usually a vanishing chord) and was left out of a
    /// surface fit.
    TableRowDropped { r_r: f64 },

    /// The radius lies outside the rows the offset surfaces were fitted over. The section is
    /// taken at the nearest fitted radius and rescaled to the local thickness.
    SurfaceClamped { r_r: f64, lower: f64, upper: f64 },
}

impl Display for DomainWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainWarning::RadialSplineExtrapolated { r_r, lower } => write!(
                f,
                "r/R={:.3} is below the radial tables (r/R>={:.2}), values are extrapolated",
                r_r, lower
            ),
            DomainWarning::OffsetTableClamped { r_r, lower } => write!(
                f,
                "r/R={:.3} is below the offset tables (r/R>={:.2}), first row is used",
                r_r, lower
            ),
            DomainWarning::MaxThicknessLocationClamped { r_r, value } => write!(
                f,
                "location of max thickness at r/R={:.3} held at {:.3}",
                r_r, value
            ),
            DomainWarning::NegativeThickness { r_r, value } => {
                write!(f, "negative max thickness {:.5} at r/R={:.3}", value, r_r)
            }
            DomainWarning::TableRowDropped { r_r } => {
                write!(f, "table row r/R={:.2} has no finite values and was dropped", r_r)
            }
            DomainWarning::SurfaceClamped { r_r, lower, upper } => write!(
                f,
                "r/R={:.3} is outside the fitted offset surfaces (r/R {:.2} to {:.2}), nearest row is used",
                r_r, lower, upper
            ),
        }
    }
}
