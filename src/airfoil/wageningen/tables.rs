//! Reference data of the Wageningen B-series propellers (Oosterveld & van Oossanen 1975,
//! Kuiper 1992). All tables are process-wide constants and are only ever read.

/// A quantity tabulated against the non-dimensional radius r/R
#[derive(Debug)]
pub struct RadialTable {
    pub name: &'static str,
    pub radii: &'static [f64],
    pub values: &'static [f64],
}

/// A quantity tabulated against r/R (rows) and the position `a` relative to the point of maximum
/// thickness (columns). Values are fractions of the maximum thickness, not percentages.
#[derive(Debug)]
pub struct PositionTable {
    pub name: &'static str,
    pub radii: &'static [f64],
    pub positions: &'static [f64],
    pub values: &'static [[f64; 20]],
}

impl PositionTable {
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.iter().map(|r| r.to_vec()).collect()
    }
}

pub const RADII: [f64; 9] = [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// The drawing-derived chord table has an extra station at r/R=0.95
pub const RADII_DRAWING: [f64; 10] = [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95, 1.0];

/// K(r) = c(r)/D * Z/EAR for four or more blades (Oosterveld 1975, same as Kuiper 1992)
pub static KR_FOUR_PLUS: RadialTable = RadialTable {
    name: "K(r), Z>=4",
    radii: &RADII,
    values: &[1.662, 1.882, 2.05, 2.152, 2.187, 2.144, 1.970, 1.582, 0.68],
};

/// K(r) for three blades (Oosterveld 1975)
pub static KR_THREE: RadialTable = RadialTable {
    name: "K(r), Z=3",
    radii: &RADII,
    values: &[1.633, 1.832, 2.0, 2.12, 2.186, 2.168, 2.127, 1.657, 0.0],
};

/// K(r) adjusted at r/R=0.7 so that the integrated blade area gives back the requested EAR
pub static KR_EAR_MATCHED: RadialTable = RadialTable {
    name: "K(r), EAR matched",
    radii: &RADII,
    values: &[1.633, 1.832, 2.0, 2.12, 2.186, 2.199, 2.127, 1.657, 0.0],
};

/// K(r) from the mean of the B4-100, B5-105, B4-55 and B5-75 drawings
pub static KR_DRAWING: RadialTable = RadialTable {
    name: "K(r), drawings",
    radii: &RADII_DRAWING,
    values: &[
        1.630860093322964,
        1.834640509520060,
        2.004486224599534,
        2.120805579441116,
        2.176620735204807,
        2.127005486463469,
        1.950603483933783,
        1.586311948351957,
        1.194496769953584,
        0.0,
    ],
};

/// Location of maximum thickness X_tmax/c (Kuiper 1992), with r/R=0.4 lowered from 0.351 to
/// 0.35 so the spline can leave the hub plateau with zero slope
pub static XTMAX: RadialTable = RadialTable {
    name: "Xtmax/c",
    radii: &RADII,
    values: &[0.35, 0.35, 0.35, 0.355, 0.389, 0.443, 0.486, 0.5, 0.5],
};

/// Index range of `XTMAX` that the spline is fitted over. Outside of it the boundary values
/// are used.
pub const XTMAX_FIT_RANGE: std::ops::RangeInclusive<usize> = 2..=7;

/// Maximum thickness coefficients, tmax/R = (A(r) * Z - B(r)) / 2
pub static THICKNESS_A: RadialTable = RadialTable {
    name: "A(r)",
    radii: &RADII,
    values: &[0.0526, 0.0464, 0.0402, 0.0340, 0.0278, 0.0216, 0.0154, 0.0092, 0.003],
};

pub static THICKNESS_B: RadialTable = RadialTable {
    name: "B(r)",
    radii: &RADII,
    values: &[0.0040, 0.0035, 0.0030, 0.0025, 0.0020, 0.0015, 0.0010, 0.0005, 0.0],
};

pub const OFFSET_RADII: [f64; 12] = [
    0.15, 0.20, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.85, 0.9, 1.0,
];

/// Positions relative to the point of maximum thickness: -1 is the leading edge, 0 the maximum
/// thickness and 1 the trailing edge
pub const POSITIONS: [f64; 20] = [
    -1.0, -0.95, -0.9, -0.85, -0.8, -0.7, -0.6, -0.5, -0.4, -0.2, 0.0, 0.2, 0.4, 0.5, 0.6, 0.7,
    0.8, 0.9, 0.95, 1.0,
];

/// Index of `a = 0` in `POSITIONS`. Columns before it belong to the leading half.
pub const MAX_THICKNESS_COLUMN: usize = 10;

/// V1: pressure side offset over tmax
pub static PRESSURE_OFFSET: PositionTable = PositionTable {
    name: "V1",
    radii: &OFFSET_RADII,
    positions: &POSITIONS,
    values: &[
        [
            0.3860, 0.3150, 0.2642, 0.2230, 0.1870, 0.1320, 0.0920, 0.0615, 0.0384, 0.0096, 0.0,
            0.0365, 0.0955, 0.1280, 0.1610, 0.1950, 0.2300, 0.2650, 0.2824, 0.3000,
        ],
        [
            0.3560, 0.2821, 0.2353, 0.2000, 0.1685, 0.1180, 0.0804, 0.0520, 0.0304, 0.0049, 0.0,
            0.0172, 0.0592, 0.0880, 0.1207, 0.1570, 0.1967, 0.2400, 0.2630, 0.2826,
        ],
        [
            0.3256, 0.2513, 0.2068, 0.1747, 0.1465, 0.1008, 0.0669, 0.0417, 0.0224, 0.0031, 0.0,
            0.0084, 0.0350, 0.0579, 0.0899, 0.1246, 0.1651, 0.2115, 0.2372, 0.2598,
        ],
        [
            0.2923, 0.2186, 0.1760, 0.1445, 0.1191, 0.0790, 0.0503, 0.0300, 0.0148, 0.0027, 0.0,
            0.0033, 0.0202, 0.0376, 0.0623, 0.0943, 0.1333, 0.1790, 0.2040, 0.2306,
        ],
        [
            0.2181, 0.1467, 0.1088, 0.0833, 0.0637, 0.0357, 0.0189, 0.0090, 0.0033, 0.0, 0.0,
            0.0, 0.0044, 0.0116, 0.0214, 0.0395, 0.0630, 0.0972, 0.1200, 0.1467,
        ],
        [
            0.1278, 0.0778, 0.0500, 0.0328, 0.0211, 0.0085, 0.0034, 0.0008, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0012, 0.0040, 0.0100, 0.0190, 0.0330, 0.0420, 0.0522,
        ],
        [
            0.0382, 0.0169, 0.0067, 0.0022, 0.0006, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        [0.0; 20],
        [0.0; 20],
        [0.0; 20],
        [0.0; 20],
        [0.0; 20],
    ],
};

/// V2: thickness over tmax. Some entries differ from the published table near the hub
/// (r/R=0.15 at a=-0.9, 0.9, 0.95; r/R=0.2 at a=0.95; r/R=0.3 at a=-0.4) to remove kinks.
pub static THICKNESS: PositionTable = PositionTable {
    name: "V2",
    radii: &OFFSET_RADII,
    positions: &POSITIONS,
    values: &[
        [
            0.0, 0.1380, 0.2600, 0.3665, 0.4520, 0.5995, 0.7105, 0.8055, 0.8825, 0.9749, 1.0,
            0.9360, 0.7805, 0.6770, 0.5585, 0.4280, 0.2870, 0.1432, 0.0700, 0.0,
        ],
        [
            0.0, 0.1560, 0.2840, 0.3905, 0.4777, 0.6190, 0.7277, 0.8170, 0.8875, 0.9750, 1.0,
            0.9446, 0.7984, 0.6995, 0.5842, 0.4535, 0.3060, 0.1455, 0.0700, 0.0,
        ],
        [
            0.0, 0.1758, 0.3042, 0.4108, 0.4982, 0.6359, 0.7415, 0.8259, 0.8899, 0.9751, 1.0,
            0.9519, 0.8139, 0.7184, 0.6050, 0.4740, 0.3228, 0.1567, 0.0725, 0.0,
        ],
        [
            0.0, 0.1890, 0.3197, 0.4265, 0.5130, 0.6505, 0.7520, 0.8315, 0.8923, 0.9750, 1.0,
            0.9583, 0.8265, 0.7335, 0.6195, 0.4885, 0.3360, 0.1670, 0.0800, 0.0,
        ],
        [
            0.0, 0.1935, 0.3235, 0.4335, 0.5220, 0.6590, 0.7593, 0.8345, 0.8933, 0.9725, 1.0,
            0.9645, 0.8415, 0.7525, 0.6353, 0.5040, 0.3500, 0.1810, 0.0905, 0.0,
        ],
        [
            0.0, 0.1750, 0.3056, 0.4135, 0.5039, 0.6430, 0.7478, 0.8275, 0.8880, 0.9710, 1.0,
            0.9639, 0.8456, 0.7580, 0.6439, 0.5140, 0.3569, 0.1865, 0.0950, 0.0,
        ],
        [
            0.0, 0.1485, 0.2720, 0.3775, 0.4620, 0.6060, 0.7200, 0.8090, 0.8790, 0.9690, 1.0,
            0.9613, 0.8426, 0.7530, 0.6415, 0.5110, 0.3585, 0.1885, 0.0965, 0.0,
        ],
        [
            0.0, 0.1240, 0.2337, 0.3300, 0.4140, 0.5615, 0.6840, 0.7850, 0.8660, 0.9675, 1.0,
            0.96, 0.84, 0.75, 0.64, 0.51, 0.36, 0.19, 0.0975, 0.0,
        ],
        [
            0.0, 0.1050, 0.2028, 0.2925, 0.3765, 0.5265, 0.6545, 0.7635, 0.8520, 0.9635, 1.0,
            0.96, 0.84, 0.75, 0.64, 0.51, 0.36, 0.19, 0.0975, 0.0,
        ],
        [
            0.0, 0.1000, 0.1950, 0.2830, 0.3660, 0.5160, 0.6455, 0.7550, 0.8450, 0.9615, 1.0,
            0.96, 0.84, 0.75, 0.64, 0.51, 0.36, 0.19, 0.0975, 0.0,
        ],
        [
            0.0, 0.0975, 0.1900, 0.2775, 0.3600, 0.51, 0.6400, 0.75, 0.8400, 0.9600, 1.0, 0.96,
            0.84, 0.75, 0.64, 0.51, 0.36, 0.19, 0.0975, 0.0,
        ],
        [
            0.0, 0.0975, 0.1900, 0.2775, 0.3600, 0.51, 0.6400, 0.75, 0.8400, 0.9600, 1.0, 0.96,
            0.84, 0.75, 0.64, 0.51, 0.36, 0.19, 0.0975, 0.0,
        ],
    ],
};
