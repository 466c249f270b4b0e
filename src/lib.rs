//! Parametric airfoil sections: NACA 4-digit foils and Wageningen B-series propeller sections,
//! sampled into point sets with edge tangents ready for a drafting tool.

pub mod airfoil;
pub mod algorithms;
pub mod errors;
pub mod interpolate;
pub mod serialize;

pub use airfoil::export::FoilOutline;
pub use airfoil::naca::Naca4Digit;
pub use airfoil::sampling::{Side, Spacing};
pub use airfoil::specification::FoilSpecification;
pub use airfoil::wageningen::{KrTable, WageningenOptions, WageningenSection};
pub use airfoil::{CamberThickness, EdgeTangents, Foil};
pub use errors::{DomainWarning, FoilError};
