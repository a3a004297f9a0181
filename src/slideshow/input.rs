//! User input, independent of any UI toolkit.

/// Keys the slideshow reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// One input event. Coordinates are in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Key(Key),
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    Click { x: f64, viewport_width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Swipe direction for a touch that travelled from `start_x` to `end_x`.
///
/// Travel must exceed `threshold` pixels: a leftward swipe shows the next
/// slide, a rightward one the previous.
///
/// ```
/// # use memories::slideshow::{Direction, swipe_direction};
/// assert_eq!(swipe_direction(300.0, 200.0, 50.0), Some(Direction::Next));
/// assert_eq!(swipe_direction(300.0, 340.0, 50.0), None);
/// ```
pub fn swipe_direction(start_x: f64, end_x: f64, threshold: f64) -> Option<Direction> {
    if end_x < start_x - threshold {
        Some(Direction::Next)
    } else if end_x > start_x + threshold {
        Some(Direction::Prev)
    } else {
        None
    }
}

/// Clicks on the right half go forward, everything else goes back.
pub fn click_direction(x: f64, viewport_width: f64) -> Direction {
    if x > viewport_width / 2.0 {
        Direction::Next
    } else {
        Direction::Prev
    }
}
