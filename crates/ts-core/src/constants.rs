/// Energy above this earns a rising score bonus
pub const ENERGY_BAND_HIGH: f64 = 70.0;

/// Lower edge of the middle energy band
pub const ENERGY_BAND_MID: f64 = 40.0;

/// Bonus slope per energy point above the high band edge
pub const ENERGY_SLOPE_HIGH: f64 = 0.01;

/// Base coefficient at the bottom of the middle band
pub const ENERGY_BASE_MID: f64 = 0.85;

/// Coefficient slope inside the middle band
pub const ENERGY_SLOPE_MID: f64 = 0.005;

/// Flat coefficient for the depleted band
pub const ENERGY_COEFF_LOW: f64 = 0.7;

/// Combo coefficient after one recent positive behavior
pub const COMBO_STEP_ONE: f64 = 1.1;

/// Combo coefficient after two recent positive behaviors
pub const COMBO_STEP_TWO: f64 = 1.2;

/// Same named behavior count at which diminishing returns kick in
pub const REPEAT_THRESHOLD: u32 = 3;

/// Score multiplier once the repeat threshold is reached
pub const REPEAT_DAMPENING: f64 = 0.8;

/// Score multiplier for a repeat within the short-interval gap
pub const SHORT_INTERVAL_DAMPENING: f64 = 0.7;

/// Recent recovery-behavior count at which recovery farming is dampened
pub const RECOVERY_SPAM_THRESHOLD: usize = 2;

/// Score multiplier applied to recovery behaviors past the spam threshold
pub const RECOVERY_SPAM_DAMPENING: f64 = 0.8;

/// Energy-status band edges, as fractions of energy_max (descending)
pub const STATUS_FRAC_ENERGIZED: f64 = 0.75;
pub const STATUS_FRAC_GOOD: f64 = 7.0 / 12.0;
pub const STATUS_FRAC_FAIR: f64 = 5.0 / 12.0;
pub const STATUS_FRAC_LOW: f64 = 0.25;

/// Energy a brand-new user starts with (clamped to energy_max)
pub const INITIAL_ENERGY: f64 = 100.0;
