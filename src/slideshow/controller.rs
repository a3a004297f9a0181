//! The slideshow state machine.
//!
//! One [`SlideshowController`] owns everything about a running slideshow:
//! the slides, the current index, the lazy-load window, the autoplay
//! deadline and an in-progress touch. Every mutation goes through `&mut self`
//! and every time-dependent call takes `now`, so the controller can be driven
//! by a UI event loop or a test alike.
//!
//! ## Lifecycle
//!
//! ```text
//! load ──► fetch /memories.json ──┬─ error ──► Failed  (title shows instruction, no slides)
//!                                 ├─ []    ──► Empty   (prompt slide, no timer)
//!                                 └─ [..]  ──► Ready   (slide 0 shown, timer armed)
//! ```
//!
//! Only the shown slide and its two neighbours hold a real media source.
//! Moving on returns slides that fall out of that window to `Deferred`.

use super::input::{Direction, Input, Key, click_direction, swipe_direction};
use super::playback::{HeadlessPlayback, Playback};
use super::slide::{MediaSlot, Slide, window_indices};
use super::source::{LoadError, ManifestSource, fetch_entries};
use super::timer::AutoAdvance;
use crate::config::SlideshowConfig;
use crate::types::MemoryEntry;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Title shown while the slideshow is usable.
pub const DEFAULT_TITLE: &str = "Memories";

/// Replaces the title when the manifest cannot be loaded.
pub const MISSING_MANIFEST_MESSAGE: &str = "Please run 'memories scan' first.";

/// Shown in place of slides when the manifest is empty.
pub const EMPTY_PROMPT: &str = "Add photos to public/memories and run 'memories scan'.";

#[derive(Debug)]
pub enum Status {
    Ready,
    Empty,
    Failed(LoadError),
}

pub struct SlideshowController<P: Playback = HeadlessPlayback> {
    slides: Vec<Slide>,
    current: usize,
    progress: f64,
    status: Status,
    timer: AutoAdvance,
    swipe_threshold: f64,
    touch_start_x: Option<f64>,
    playback: P,
}

impl<P: Playback> SlideshowController<P> {
    /// Fetch the manifest once and build the slideshow from it.
    ///
    /// Load failures are not returned: they leave the controller in
    /// [`Status::Failed`] with no slides, and the title switches to
    /// [`MISSING_MANIFEST_MESSAGE`]. Nothing is retried.
    pub fn load(
        source: &impl ManifestSource,
        settings: &SlideshowConfig,
        playback: P,
        now: Instant,
    ) -> Self {
        match fetch_entries(source) {
            Ok(entries) => Self::from_entries(entries, settings, playback, now),
            Err(e) => {
                error!(url = source.manifest_url(), error = %e, "failed to load manifest");
                let mut controller = Self::idle(settings, playback);
                controller.status = Status::Failed(e);
                controller
            }
        }
    }

    /// Build the slideshow from already-loaded entries and show the first one.
    pub fn from_entries(
        entries: Vec<MemoryEntry>,
        settings: &SlideshowConfig,
        playback: P,
        now: Instant,
    ) -> Self {
        let mut controller = Self::idle(settings, playback);
        controller.slides = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Slide::new(i, entry))
            .collect();

        if controller.slides.is_empty() {
            warn!("manifest is empty, nothing to show");
            return controller;
        }

        info!(slides = controller.slides.len(), "slideshow ready");
        controller.status = Status::Ready;
        controller.go_to_slide(0);
        controller.timer.reset(now);
        controller
    }

    fn idle(settings: &SlideshowConfig, playback: P) -> Self {
        Self {
            slides: Vec::new(),
            current: 0,
            progress: 0.0,
            status: Status::Empty,
            timer: AutoAdvance::new(settings.auto_advance()),
            swipe_threshold: settings.swipe_threshold_px,
            touch_start_x: None,
            playback,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Show the slide at `index`, wrapping around both ends.
    ///
    /// Does not touch the autoplay timer. No-op without slides.
    pub fn go_to_slide(&mut self, index: isize) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        let index = index.rem_euclid(len as isize) as usize;
        self.current = index;
        self.update_slide_state(index);
        self.progress = (index + 1) as f64 / len as f64 * 100.0;
        debug!(index, progress = self.progress, "showing slide");
    }

    /// Mark `index` active, play its video if it is already loaded, move the
    /// lazy window onto it, and pause every other video. Out-of-range indices
    /// wrap.
    ///
    /// Returns the slides that left the window and went back to `Deferred`.
    pub fn update_slide_state(&mut self, index: usize) -> Vec<usize> {
        if self.slides.is_empty() {
            return Vec::new();
        }
        let index = index % self.slides.len();
        for slide in &mut self.slides {
            slide.active = slide.index == index;
        }

        // Playback starts before the window moves: a video that only loads
        // now starts on its next visit.
        let playable = self
            .slides
            .get(index)
            .is_some_and(|s| s.entry.is_video() && s.is_loaded());
        if playable {
            if let Err(e) = self.playback.play(index) {
                warn!(index, error = %e, "video playback did not start");
            }
        }

        let window = window_indices(index, self.slides.len());
        let mut released = Vec::new();
        for slide in &mut self.slides {
            let in_window = window.contains(&slide.index);
            match (in_window, slide.media) {
                (true, MediaSlot::Deferred) => {
                    slide.media = MediaSlot::Loaded;
                    if slide.entry.is_video() {
                        self.playback.load(slide.index, &slide.entry.path);
                    }
                }
                (false, MediaSlot::Loaded) => {
                    slide.media = MediaSlot::Deferred;
                    released.push(slide.index);
                }
                _ => {}
            }
        }

        for slide in &self.slides {
            if slide.entry.is_video() && slide.index != index {
                self.playback.pause(slide.index);
            }
        }
        released
    }

    pub fn next_slide(&mut self, now: Instant) {
        self.go_to_slide(self.current as isize + 1);
        self.timer.reset(now);
    }

    pub fn prev_slide(&mut self, now: Instant) {
        self.go_to_slide(self.current as isize - 1);
        self.timer.reset(now);
    }

    fn navigate(&mut self, direction: Direction, now: Instant) {
        match direction {
            Direction::Next => self.next_slide(now),
            Direction::Prev => self.prev_slide(now),
        }
    }

    /// Advance if the autoplay deadline has passed. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.is_due(now) {
            return false;
        }
        debug!("autoplay advancing");
        self.next_slide(now);
        true
    }

    /// Apply one input event. Ignored while there is nothing to show.
    pub fn handle_input(&mut self, input: Input, now: Instant) {
        if self.slides.is_empty() {
            return;
        }
        match input {
            Input::Key(Key::ArrowRight) => self.next_slide(now),
            Input::Key(Key::ArrowLeft) => self.prev_slide(now),
            Input::Key(Key::Other) => {}
            Input::TouchStart { x } => self.touch_start_x = Some(x),
            Input::TouchEnd { x } => {
                let swipe = self
                    .touch_start_x
                    .take()
                    .and_then(|start| swipe_direction(start, x, self.swipe_threshold));
                if let Some(direction) = swipe {
                    self.navigate(direction, now);
                }
                self.timer.reset(now);
            }
            Input::Click { x, viewport_width } => {
                self.navigate(click_direction(x, viewport_width), now);
                self.timer.reset(now);
            }
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Title text, replaced by the load instruction on failure.
    pub fn title(&self) -> &'static str {
        match self.status {
            Status::Failed(_) => MISSING_MANIFEST_MESSAGE,
            Status::Ready | Status::Empty => DEFAULT_TITLE,
        }
    }

    /// Share of the slideshow seen so far, in percent.
    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    /// Horizontal offset of the slide strip, in viewport widths.
    pub fn translate_vw(&self) -> i64 {
        -100 * self.current as i64
    }

    /// Indices whose media currently hold a real source.
    pub fn loaded_indices(&self) -> Vec<usize> {
        self.slides
            .iter()
            .filter(|s| s.is_loaded())
            .map(|s| s.index)
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slideshow::playback::tests::RecordingPlayback;
    use crate::slideshow::source::tests::StaticSource;
    use crate::test_helpers::memories;
    use std::time::Duration;

    fn settings() -> SlideshowConfig {
        SlideshowConfig::default()
    }

    fn controller(names: &[&str], now: Instant) -> SlideshowController<RecordingPlayback> {
        SlideshowController::from_entries(
            memories(names),
            &settings(),
            RecordingPlayback::default(),
            now,
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_builds_one_slide_per_entry() {
        let json = serde_json::to_string(&memories(&["a.jpg", "b.mp4", "c.png"])).unwrap();
        let source = StaticSource(Some(json));

        let c = SlideshowController::load(&source, &settings(), HeadlessPlayback, Instant::now());

        assert!(matches!(c.status(), Status::Ready));
        assert_eq!(c.slides().len(), 3);
        assert_eq!(c.slides()[1].entry.filename, "b.mp4");
        assert_eq!(c.title(), DEFAULT_TITLE);
    }

    #[test]
    fn failed_fetch_replaces_title_and_shows_nothing() {
        let c = SlideshowController::load(
            &StaticSource(None),
            &settings(),
            HeadlessPlayback,
            Instant::now(),
        );

        assert!(matches!(c.status(), Status::Failed(LoadError::ManifestMissing { .. })));
        assert_eq!(c.title(), MISSING_MANIFEST_MESSAGE);
        assert!(c.slides().is_empty());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn malformed_manifest_surfaces_the_same_way() {
        let source = StaticSource(Some("[{\"filename\": 1}]".to_string()));
        let c = SlideshowController::load(&source, &settings(), HeadlessPlayback, Instant::now());

        assert!(matches!(c.status(), Status::Failed(LoadError::Malformed(_))));
        assert_eq!(c.title(), MISSING_MANIFEST_MESSAGE);
        assert!(c.slides().is_empty());
    }

    #[test]
    fn empty_manifest_has_no_motion() {
        let now = Instant::now();
        let mut c = SlideshowController::load(
            &StaticSource(Some("[]".to_string())),
            &settings(),
            HeadlessPlayback,
            now,
        );

        assert!(matches!(c.status(), Status::Empty));
        assert_eq!(c.next_deadline(), None);

        c.go_to_slide(3);
        c.handle_input(Input::Key(Key::ArrowRight), now);
        assert!(!c.tick(now + ms(60_000)));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn initial_state_shows_first_slide() {
        let now = Instant::now();
        let c = controller(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"], now);

        assert_eq!(c.current_index(), 0);
        assert!(c.slides()[0].active);
        assert_eq!(c.loaded_indices(), vec![0, 1, 4]);
        assert_eq!(c.translate_vw(), 0);
        assert_eq!(c.next_deadline(), Some(now + ms(5000)));
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn go_to_slide_wraps_both_ends() {
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"], Instant::now());

        c.go_to_slide(-1);
        assert_eq!(c.current_index(), 3);

        c.go_to_slide(4);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn three_entries_progress_and_wrap() {
        let now = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], now);

        c.go_to_slide(2);
        assert_eq!(c.progress_percent(), 100.0);
        assert_eq!(c.translate_vw(), -200);

        c.next_slide(now);
        assert_eq!(c.current_index(), 0);
        assert!((c.progress_percent() - 33.333).abs() < 0.01);
        assert_eq!(c.translate_vw(), 0);
    }

    #[test]
    fn prev_from_first_goes_to_last() {
        let now = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], now);

        c.prev_slide(now);
        assert_eq!(c.current_index(), 2);
        assert!(c.slides()[2].active);
        assert_eq!(c.slides().iter().filter(|s| s.active).count(), 1);
    }

    #[test]
    fn single_slide_navigation_stays_put() {
        let now = Instant::now();
        let mut c = controller(&["only.jpg"], now);

        c.next_slide(now);
        c.prev_slide(now);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.progress_percent(), 100.0);
        assert_eq!(c.loaded_indices(), vec![0]);
    }

    // =========================================================================
    // Lazy window
    // =========================================================================

    #[test]
    fn window_holds_exactly_neighbours() {
        let names = ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg", "f.jpg"];
        let mut c = controller(&names, Instant::now());

        for i in 0..names.len() {
            c.go_to_slide(i as isize);
            let n = names.len();
            let mut expected = vec![(i + n - 1) % n, i, (i + 1) % n];
            expected.sort();
            assert_eq!(c.loaded_indices(), expected, "showing slide {i}");
        }
    }

    #[test]
    fn slides_leaving_window_are_released() {
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"], Instant::now());

        let released = c.update_slide_state(2);

        // Window moved from {4, 0, 1} to {1, 2, 3}.
        assert_eq!(released, vec![0, 4]);
        assert_eq!(c.slides()[0].src(), None);
        assert_eq!(c.slides()[2].src(), Some("/memories/c.jpg"));
    }

    #[test]
    fn slide_state_wraps_out_of_range_index() {
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"], Instant::now());

        c.update_slide_state(7);
        assert_eq!(c.loaded_indices(), vec![1, 2, 3]);
        assert!(c.slides()[2].active);

        c.update_slide_state(usize::MAX);
        let expected = usize::MAX % 5;
        assert!(c.slides()[expected].active);
        assert_eq!(c.loaded_indices().len(), 3);
    }

    // =========================================================================
    // Video playback
    // =========================================================================

    #[test]
    fn video_loaded_when_entering_window() {
        let c = controller(&["a.jpg", "b.mp4", "c.jpg", "d.jpg"], Instant::now());

        assert_eq!(c.playback().loaded(), vec![1]);
        assert!(c.playback().played().is_empty());
    }

    #[test]
    fn preloaded_video_plays_when_shown() {
        let now = Instant::now();
        let mut c = controller(&["a.jpg", "b.mp4", "c.jpg", "d.jpg"], now);
        c.playback_mut().clear();

        c.next_slide(now);

        assert_eq!(c.playback().played(), vec![1]);
        assert!(c.playback().paused().is_empty());
    }

    #[test]
    fn video_not_yet_loaded_does_not_play() {
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg", "d.mov", "e.jpg"], Instant::now());
        c.playback_mut().clear();

        // Jump straight to a video outside the window.
        c.go_to_slide(3);

        assert!(c.playback().played().is_empty());
        assert_eq!(c.playback().loaded(), vec![3]);
    }

    #[test]
    fn other_videos_are_paused() {
        let now = Instant::now();
        let mut c = controller(&["a.mp4", "b.mp4", "c.jpg", "d.mov"], now);
        c.playback_mut().clear();

        c.next_slide(now);

        assert_eq!(c.playback().played(), vec![1]);
        assert_eq!(c.playback().paused(), vec![0, 3]);
    }

    #[test]
    fn blocked_playback_keeps_navigating() {
        let now = Instant::now();
        let mut c = SlideshowController::from_entries(
            memories(&["a.jpg", "b.mp4", "c.jpg"]),
            &settings(),
            RecordingPlayback::blocked(),
            now,
        );

        c.next_slide(now);
        c.next_slide(now);

        assert_eq!(c.current_index(), 2);
        assert_eq!(c.playback().played(), vec![1]);
    }

    // =========================================================================
    // Autoplay
    // =========================================================================

    #[test]
    fn tick_advances_after_delay() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        assert!(!c.tick(start + ms(4999)));
        assert_eq!(c.current_index(), 0);

        assert!(c.tick(start + ms(5000)));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.next_deadline(), Some(start + ms(10_000)));
    }

    #[test]
    fn manual_navigation_restarts_full_delay() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.next_slide(start + ms(4000));

        assert!(!c.tick(start + ms(5000)));
        assert_eq!(c.current_index(), 1);
        assert!(c.tick(start + ms(9000)));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn go_to_slide_leaves_timer_alone() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.go_to_slide(2);
        assert_eq!(c.next_deadline(), Some(start + ms(5000)));
    }

    #[test]
    fn configured_delay_is_used() {
        let start = Instant::now();
        let settings = SlideshowConfig {
            auto_advance_ms: 1500,
            ..SlideshowConfig::default()
        };
        let c = SlideshowController::from_entries(
            memories(&["a.jpg", "b.jpg"]),
            &settings,
            HeadlessPlayback,
            start,
        );
        assert_eq!(c.next_deadline(), Some(start + ms(1500)));
    }

    // =========================================================================
    // Input
    // =========================================================================

    #[test]
    fn arrow_keys_navigate_and_reset_timer() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.handle_input(Input::Key(Key::ArrowRight), start + ms(1000));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.next_deadline(), Some(start + ms(6000)));

        c.handle_input(Input::Key(Key::ArrowLeft), start + ms(2000));
        c.handle_input(Input::Key(Key::ArrowLeft), start + ms(2000));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn other_keys_do_nothing() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg"], start);

        c.handle_input(Input::Key(Key::Other), start + ms(1000));

        assert_eq!(c.current_index(), 0);
        assert_eq!(c.next_deadline(), Some(start + ms(5000)));
    }

    #[test]
    fn leftward_swipe_goes_forward() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.handle_input(Input::TouchStart { x: 300.0 }, start);
        c.handle_input(Input::TouchEnd { x: 200.0 }, start);
        assert_eq!(c.current_index(), 1);

        c.handle_input(Input::TouchStart { x: 100.0 }, start);
        c.handle_input(Input::TouchEnd { x: 220.0 }, start);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn short_swipe_only_resets_timer() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.handle_input(Input::TouchStart { x: 300.0 }, start + ms(3000));
        c.handle_input(Input::TouchEnd { x: 260.0 }, start + ms(3000));

        assert_eq!(c.current_index(), 0);
        assert_eq!(c.next_deadline(), Some(start + ms(8000)));
    }

    #[test]
    fn touch_end_without_start_is_not_a_swipe() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.handle_input(Input::TouchEnd { x: 0.0 }, start);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn swipe_threshold_is_configurable() {
        let start = Instant::now();
        let settings = SlideshowConfig {
            swipe_threshold_px: 10.0,
            ..SlideshowConfig::default()
        };
        let mut c = SlideshowController::from_entries(
            memories(&["a.jpg", "b.jpg"]),
            &settings,
            HeadlessPlayback,
            start,
        );

        c.handle_input(Input::TouchStart { x: 100.0 }, start);
        c.handle_input(Input::TouchEnd { x: 80.0 }, start);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn click_halves_pick_direction() {
        let start = Instant::now();
        let mut c = controller(&["a.jpg", "b.jpg", "c.jpg"], start);

        c.handle_input(Input::Click { x: 900.0, viewport_width: 1200.0 }, start + ms(500));
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.next_deadline(), Some(start + ms(5500)));

        c.handle_input(Input::Click { x: 600.0, viewport_width: 1200.0 }, start);
        assert_eq!(c.current_index(), 0);
    }
}
