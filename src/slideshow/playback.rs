//! Video playback seam.
//!
//! The controller decides *when* a video loads, plays, or pauses; a
//! [`Playback`] implementation does it. Slides are identified by index.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The platform refused to start playback (e.g. autoplay policy).
    #[error("Playback blocked: {0}")]
    Blocked(String),
}

pub trait Playback {
    /// A video slide received its real source; start buffering it.
    fn load(&mut self, index: usize, src: &str);

    fn play(&mut self, index: usize) -> Result<(), PlaybackError>;

    fn pause(&mut self, index: usize);
}

/// Playback for contexts with no video surface: every call succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPlayback;

impl Playback for HeadlessPlayback {
    fn load(&mut self, _index: usize, _src: &str) {}

    fn play(&mut self, _index: usize) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self, _index: usize) {}
}
