//! Slideshow controller.
//!
//! Loads the manifest once, builds one slide per entry, and drives
//! navigation, lazy media loading, autoplay and input. Nothing here knows
//! about a DOM or a window system: input arrives as [`Input`] values, time as
//! [`Instant`](std::time::Instant)s, and video playback goes through the
//! [`Playback`] trait. [`render`] turns the current state into HTML.
//!
//! | Module | Role |
//! |--------|------|
//! | `controller` | [`SlideshowController`] state machine |
//! | `slide` | [`Slide`], [`MediaSlot`], the three-slide lazy window |
//! | `source` | [`ManifestSource`] trait, [`WebRootSource`], [`LoadError`] |
//! | `timer` | [`AutoAdvance`] autoplay deadline |
//! | `input` | [`Input`] events, swipe and click classification |
//! | `playback` | [`Playback`] trait, [`HeadlessPlayback`] |
//! | [`render`] | maud rendering of the slide strip |

mod controller;
mod input;
mod playback;
pub mod render;
mod slide;
mod source;
mod timer;

pub use controller::{
    DEFAULT_TITLE, EMPTY_PROMPT, MISSING_MANIFEST_MESSAGE, SlideshowController, Status,
};
pub use input::{Direction, Input, Key, click_direction, swipe_direction};
pub use playback::{HeadlessPlayback, Playback, PlaybackError};
pub use render::render_page;
pub use slide::{MediaSlot, Slide, window_indices};
pub use source::{LoadError, ManifestSource, WebRootSource, fetch_entries};
pub use timer::AutoAdvance;
