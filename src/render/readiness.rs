//! Readiness protocol for script-populated report content.
//!
//! Rendered markup fills its dynamic regions asynchronously after load and
//! exposes no completion signal beyond DOM presence, so the controller polls
//! the primary region, falls back to the secondary region, and finally to a
//! fixed stabilization delay. A timeout here is an expected degradation, not
//! a failure: every path ends in a capture attempt.

use std::time::Duration;

pub const PRIMARY_REGION: &str = "#opportunities-list > div";
pub const SECONDARY_REGION: &str = "#warnings-list > div";

pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(15);
pub const SECONDARY_TIMEOUT: Duration = Duration::from_secs(10);
pub const FALLBACK_DELAY: Duration = Duration::from_secs(5);
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Minimal view of a live page session the protocol needs.
pub trait PageProbe {
    /// Blocks until an element matching `selector` exists, or `timeout`
    /// elapses. Engine-level faults count as absence; they surface later at
    /// capture time.
    fn element_appears(&self, selector: &str, timeout: Duration) -> bool;

    /// Wall-clock pause between protocol steps.
    fn pause(&self, duration: Duration);
}

/// Which signal ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessSignal {
    Primary,
    Secondary,
    FallbackDelay,
}

enum Step {
    AwaitingPrimary,
    AwaitingSecondary,
    FixedDelay,
    Settle(ReadinessSignal),
}

/// Drives the page to readiness and reports which signal resolved it.
/// Always terminates; never an error.
pub fn await_content(probe: &impl PageProbe) -> ReadinessSignal {
    let mut step = Step::AwaitingPrimary;

    loop {
        step = match step {
            Step::AwaitingPrimary => {
                if probe.element_appears(PRIMARY_REGION, PRIMARY_TIMEOUT) {
                    Step::Settle(ReadinessSignal::Primary)
                } else {
                    Step::AwaitingSecondary
                }
            }
            Step::AwaitingSecondary => {
                if probe.element_appears(SECONDARY_REGION, SECONDARY_TIMEOUT) {
                    Step::Settle(ReadinessSignal::Secondary)
                } else {
                    Step::FixedDelay
                }
            }
            Step::FixedDelay => {
                probe.pause(FALLBACK_DELAY);
                Step::Settle(ReadinessSignal::FallbackDelay)
            }
            Step::Settle(signal) => {
                probe.pause(SETTLE_DELAY);
                return signal;
            }
        }
    }
}
