use strum::Display;

/// The hardware addressing ceiling for the resident data group. No mode may
/// allow DGROUP past this.
pub const HARD_LIMIT: u32 = 0x10000;

/// Build-mode threshold profile for the DGROUP size check. Diagnostics are
/// traded for resident footprint, so each mode gets its own max/warn pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Display)]
pub enum BuildMode {
    /// Full diagnostics retained; the red zone up to 64KB is allowed.
    #[strum(serialize = "DEBUG")]
    Debug,
    /// Guarded init diagnostics off.
    #[strum(serialize = "RELEASE")]
    Release,
    /// Logging and stats stripped; smallest footprint.
    #[strum(serialize = "PRODUCTION")]
    Production,
}

impl BuildMode {
    /// DGROUP at or above this size fails the build.
    pub fn max_size(self) -> u32 {
        match self {
            BuildMode::Debug => 0x10000,
            BuildMode::Release => 0xE800,
            BuildMode::Production => 0xE000,
        }
    }

    /// DGROUP at or above this size warns about shrinking headroom.
    pub fn warn_size(self) -> u32 {
        match self {
            BuildMode::Debug => 0xF200,
            BuildMode::Release => 0xE000,
            BuildMode::Production => 0xD800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_ordered() {
        for mode in [BuildMode::Debug, BuildMode::Release, BuildMode::Production] {
            assert!(mode.warn_size() <= mode.max_size(), "{mode}");
            assert!(mode.max_size() <= HARD_LIMIT, "{mode}");
        }
    }
}
