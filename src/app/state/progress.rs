use std::time::{Duration, Instant};

/// Cosmetic percentage/label pairs shown while a request is in flight. The
/// final stage holds until the real response arrives; none of this tracks
/// actual server progress.
const PROGRESS_STAGES: [(u8, &str); 6] = [
    (8, "Uploading file"),
    (24, "Reading the document"),
    (46, "Drafting the script"),
    (68, "Synthesizing host voices"),
    (88, "Stitching the episode"),
    (97, "Wrapping up"),
];

#[derive(Debug, Clone, Copy)]
pub(in crate::app) struct ProgressRun {
    pub(in crate::app) stage: usize,
    pub(in crate::app) entered_stage_at: Instant,
    pub(in crate::app) request_id: u64,
}

/// The whole indicator is one optional value. Cancelling on error or on a
/// superseding result is a single assignment, so no timer can outlive the
/// request that started it.
#[derive(Debug, Default)]
pub(in crate::app) struct ProgressState {
    run: Option<ProgressRun>,
}

impl ProgressState {
    pub(in crate::app) fn start(&mut self, request_id: u64, now: Instant) {
        self.run = Some(ProgressRun {
            stage: 0,
            entered_stage_at: now,
            request_id,
        });
    }

    pub(in crate::app) fn clear(&mut self) {
        self.run = None;
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        self.run.is_some()
    }

    pub(in crate::app) fn request_id(&self) -> Option<u64> {
        self.run.map(|run| run.request_id)
    }

    pub(in crate::app) fn current(&self) -> Option<(u8, &'static str)> {
        self.run.map(|run| PROGRESS_STAGES[run.stage])
    }

    /// Advance to the next stage once the per-stage delay has elapsed,
    /// freezing on the final stage.
    pub(in crate::app) fn advance_due(&mut self, now: Instant, stage_delay: Duration) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if run.stage + 1 >= PROGRESS_STAGES.len() {
            return false;
        }
        if now.duration_since(run.entered_stage_at) < stage_delay {
            return false;
        }
        run.stage += 1;
        run.entered_stage_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn advances_on_delay_and_freezes_on_final_stage() {
        let mut progress = ProgressState::default();
        let t0 = Instant::now();
        progress.start(7, t0);
        assert_eq!(progress.current(), Some(PROGRESS_STAGES[0]));

        // Not yet due.
        assert!(!progress.advance_due(t0 + Duration::from_millis(100), DELAY));

        let mut now = t0;
        for expected in 1..PROGRESS_STAGES.len() {
            now += DELAY;
            assert!(progress.advance_due(now, DELAY));
            assert_eq!(progress.current(), Some(PROGRESS_STAGES[expected]));
        }
        // Holds at the last cosmetic stage until the real response lands.
        assert!(!progress.advance_due(now + Duration::from_secs(60), DELAY));
        assert_eq!(progress.current(), Some(PROGRESS_STAGES[5]));
        assert_eq!(progress.current().unwrap().0, 97);
    }

    #[test]
    fn cancellation_is_a_single_clear() {
        let mut progress = ProgressState::default();
        progress.start(3, Instant::now());
        assert!(progress.is_active());
        progress.clear();
        assert!(!progress.is_active());
        assert!(progress.current().is_none());
        assert!(!progress.advance_due(Instant::now(), DELAY));
    }

    #[test]
    fn restart_supersedes_previous_run() {
        let mut progress = ProgressState::default();
        let t0 = Instant::now();
        progress.start(1, t0);
        progress.advance_due(t0 + DELAY, DELAY);
        progress.start(2, t0 + DELAY * 2);
        assert_eq!(progress.request_id(), Some(2));
        assert_eq!(progress.current(), Some(PROGRESS_STAGES[0]));
    }
}
