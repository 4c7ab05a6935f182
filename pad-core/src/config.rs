//! Polling loop configuration.

/// Polling loop settings.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Pause between two polls, in milliseconds.
    pub poll_interval_ms: u32,
    /// How long the splash screen stays up, in milliseconds.
    pub splash_ms: u32,
    /// Reject frames whose check byte is not `0x5A`.
    pub verify_frames: bool,
}

/// Default settings: 20 Hz polling, 1.5 s splash, frames verified.
pub const DEFAULT_CONFIG: PollConfig = PollConfig {
    poll_interval_ms: 50,
    splash_ms: 1500,
    verify_frames: true,
};

impl PollConfig {
    /// Accept every frame that was fully acknowledged, whatever its check
    /// byte.
    #[must_use]
    pub const fn lenient(self) -> Self {
        Self {
            verify_frames: false,
            ..self
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_keeps_timing() {
        let config = DEFAULT_CONFIG.lenient();
        assert!(!config.verify_frames);
        assert_eq!(config.poll_interval_ms, DEFAULT_CONFIG.poll_interval_ms);
        assert_eq!(config.splash_ms, DEFAULT_CONFIG.splash_ms);
    }
}
