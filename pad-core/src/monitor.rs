//! PadMonitor: polls a pad source and shows the result on a display sink.

use psx_proto::{decode, AckTimeout, ControllerState, FrameError};

use crate::config::PollConfig;
use crate::display::{DisplayError, DisplaySink};
use crate::input::PadSource;
use crate::render;

/// Polls a pad and mirrors its state on a character display.
///
/// One call to [`poll_once`](Self::poll_once) is one cycle of the main
/// loop; the caller owns the pause between cycles.
///
/// # Error Handling
///
/// A failed poll changes nothing: the last good state is kept and the
/// display keeps showing it. The next cycle is the retry.
pub struct PadMonitor<P, S> {
    source: P,
    sink: S,
    config: PollConfig,
    last: Option<ControllerState>,
    stats: PollStats,
}

impl<P: PadSource, S: DisplaySink> PadMonitor<P, S> {
    /// Create a monitor from a pad source, a display sink and settings.
    pub fn new(source: P, sink: S, config: PollConfig) -> Self {
        Self {
            source,
            sink,
            config,
            last: None,
            stats: PollStats::default(),
        }
    }

    /// Clear the display and show the splash screen.
    pub fn show_splash(&mut self) -> Result<(), DisplayError> {
        self.sink.clear()?;
        let lines = render::splash()?;
        self.write_lines(&lines)
    }

    /// Run one poll cycle.
    ///
    /// On success the decoded state becomes the last known state and is
    /// drawn. Display errors are reported after the state has been stored.
    pub fn poll_once(&mut self) -> Result<ControllerState, PollError> {
        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(timeout) => {
                self.stats.record_ack_timeout();
                debug!("poll failed: no ack for byte {}", timeout.byte_index);
                return Err(PollError::AckTimeout(timeout));
            }
        };

        if self.config.verify_frames {
            if let Err(err) = frame.verify() {
                self.stats.record_bad_frame();
                warn!("rejected frame: {:?}", err);
                return Err(PollError::BadFrame(err));
            }
        }

        let state = decode(frame);
        trace!("pad state: {:?}", state);
        self.stats.record_success();
        self.last = Some(state);

        let lines = render::render(&state).map_err(DisplayError::from)?;
        self.write_lines(&lines)?;
        Ok(state)
    }

    /// The last successfully decoded state, if any.
    pub fn last_state(&self) -> Option<&ControllerState> {
        self.last.as_ref()
    }

    /// Poll counters.
    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    /// Active settings.
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Get a reference to the pad source.
    pub fn source(&self) -> &P {
        &self.source
    }

    /// Get a mutable reference to the pad source.
    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    /// Get a reference to the display sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the display sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Decompose the monitor into its source and sink.
    pub fn into_parts(self) -> (P, S) {
        (self.source, self.sink)
    }

    fn write_lines(&mut self, lines: &[render::Line; 2]) -> Result<(), DisplayError> {
        for (row, line) in (0u8..).zip(lines.iter()) {
            self.sink.write_text(row, 0, line)?;
        }
        Ok(())
    }
}

/// Counters kept across poll cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollStats {
    /// Polls that produced a state.
    pub good: u32,
    /// Polls aborted by a missing acknowledge.
    pub ack_timeouts: u32,
    /// Frames rejected by verification.
    pub bad_frames: u32,
    /// Failed polls since the last good one.
    pub consecutive_failures: u32,
}

impl PollStats {
    fn record_success(&mut self) {
        self.good = self.good.wrapping_add(1);
        self.consecutive_failures = 0;
    }

    fn record_ack_timeout(&mut self) {
        self.ack_timeouts = self.ack_timeouts.wrapping_add(1);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    fn record_bad_frame(&mut self) {
        self.bad_frames = self.bad_frames.wrapping_add(1);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }
}

/// Error type for a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError {
    /// The pad stopped acknowledging mid-transaction.
    AckTimeout(AckTimeout),
    /// The frame failed verification.
    BadFrame(FrameError),
    /// The state was decoded but could not be drawn.
    Display(DisplayError),
}

impl From<AckTimeout> for PollError {
    fn from(err: AckTimeout) -> Self {
        PollError::AckTimeout(err)
    }
}

impl From<FrameError> for PollError {
    fn from(err: FrameError) -> Self {
        PollError::BadFrame(err)
    }
}

impl From<DisplayError> for PollError {
    fn from(err: DisplayError) -> Self {
        PollError::Display(err)
    }
}
