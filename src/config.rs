//! Table configuration: initial capacity, growth threshold and hash multipliers.

/// Capacity of a freshly constructed table.
pub const DEFAULT_CAPACITY: usize = 8;
/// Projected load at which `add` grows the table before inserting.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;
/// Multiplier of the start-index fold (h1).
pub const DEFAULT_PRIMARY_MULTIPLIER: u64 = 11;
/// Multiplier of the step fold (h2).
pub const DEFAULT_STEP_MULTIPLIER: u64 = 13;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Odd probe steps only cover every slot when the capacity is a power of two.
    #[error("initial capacity must be a non-zero power of two, got {0}")]
    CapacityNotPowerOfTwo(usize),
    #[error("max load factor must lie in (0, 1], got {0}")]
    LoadFactorOutOfRange(f64),
}

/// Parameters of a `DoubleHashSet`. The defaults reproduce the classic
/// 8-slot table with multipliers 11 and 13 growing at 0.75 load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub primary_multiplier: u64,
    pub step_multiplier: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            primary_multiplier: DEFAULT_PRIMARY_MULTIPLIER,
            step_multiplier: DEFAULT_STEP_MULTIPLIER,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn with_multipliers(mut self, primary: u64, step: u64) -> Self {
        self.primary_multiplier = primary;
        self.step_multiplier = step;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo(self.initial_capacity));
        }
        let lf = self.max_load_factor;
        if !(lf.is_finite() && lf > 0.0 && lf <= 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange(lf));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.initial_capacity, 8);
        assert_eq!(cfg.max_load_factor, 0.75);
        assert_eq!((cfg.primary_multiplier, cfg.step_multiplier), (11, 13));
        assert!(cfg.validate().is_ok());
    }

    /// Invariant: zero and non-power-of-two capacities are rejected.
    #[test]
    fn capacity_must_be_power_of_two() {
        for bad in [0usize, 3, 6, 12, 100] {
            let cfg = TableConfig::new().with_initial_capacity(bad);
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::CapacityNotPowerOfTwo(bad))
            );
        }
        for good in [1usize, 2, 64, 1 << 20] {
            assert!(TableConfig::new()
                .with_initial_capacity(good)
                .validate()
                .is_ok());
        }
    }

    #[test]
    fn load_factor_bounds() {
        for bad in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let res = TableConfig::new().with_max_load_factor(bad).validate();
            assert!(
                matches!(res, Err(ConfigError::LoadFactorOutOfRange(_))),
                "{bad} should be rejected"
            );
        }
        assert!(TableConfig::new().with_max_load_factor(1.0).validate().is_ok());
        assert!(TableConfig::new().with_max_load_factor(0.1).validate().is_ok());
    }
}
