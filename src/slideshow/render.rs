//! HTML rendering of the slideshow state.
//!
//! Renders whatever the controller currently holds: deferred media keep their
//! URL in `data-src` only, loaded media also carry `src`. The strip offset and
//! progress bar width reflect the current slide.
//!
//! Styles are embedded at compile time from `static/slideshow.css`.

use super::controller::{EMPTY_PROMPT, SlideshowController, Status};
use super::playback::Playback;
use super::slide::Slide;
use maud::{DOCTYPE, Markup, html};

const CSS: &str = include_str!("../../static/slideshow.css");

/// Month and year, e.g. "June 2021".
pub fn date_label(slide: &Slide) -> String {
    slide.entry.date.format("%B %Y").to_string()
}

/// Render the full slideshow page.
pub fn render_page<P: Playback>(controller: &SlideshowController<P>) -> Markup {
    let strip_style = format!("transform: translateX({}vw);", controller.translate_vw());
    let progress_style = format!("width: {:.1}%;", controller.progress_percent());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (controller.title()) }
                style { (CSS) }
            }
            body {
                h1.title { (controller.title()) }
                div.progress style=(progress_style) {}
                div.slider style=(strip_style) {
                    @match controller.status() {
                        Status::Ready => {
                            @for slide in controller.slides() {
                                (render_slide(slide))
                            }
                        }
                        Status::Empty => {
                            div.slide {
                                h1.empty-prompt { (EMPTY_PROMPT) }
                            }
                        }
                        Status::Failed(_) => {}
                    }
                }
            }
        }
    }
}

/// Render one slide.
pub fn render_slide(slide: &Slide) -> Markup {
    let deferred = !slide.is_loaded();
    html! {
        div.slide.active[slide.active] data-index=(slide.index) {
            @if slide.entry.is_video() {
                video.slide-bg.lazy[deferred] data-src=(slide.entry.path) src=[slide.src()] loop muted playsinline {}
            } @else {
                img.slide-bg.lazy[deferred] data-src=(slide.entry.path) src=[slide.src()] alt="Memory";
            }
            div.slide-content {
                div.date-label { (date_label(slide)) }
                @if !slide.entry.caption.is_empty() {
                    h2.caption { (slide.entry.caption) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideshowConfig;
    use crate::slideshow::controller::MISSING_MANIFEST_MESSAGE;
    use crate::slideshow::playback::HeadlessPlayback;
    use crate::slideshow::source::tests::StaticSource;
    use crate::test_helpers::{memories, memory};
    use std::time::Instant;

    fn ready(names: &[&str]) -> SlideshowController {
        SlideshowController::from_entries(
            memories(names),
            &SlideshowConfig::default(),
            HeadlessPlayback,
            Instant::now(),
        )
    }

    #[test]
    fn page_includes_doctype_and_title() {
        let html = render_page(&ready(&["a.jpg"])).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 class=\"title\">Memories</h1>"));
    }

    #[test]
    fn one_slide_per_entry() {
        let html = render_page(&ready(&["a.jpg", "b.mp4", "c.png", "d.jpg"])).into_string();
        assert_eq!(html.matches("data-index=").count(), 4);
        assert_eq!(html.matches("<video").count(), 1);
    }

    #[test]
    fn only_window_carries_src() {
        let html = render_page(&ready(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"])).into_string();

        for name in ["a", "b", "e"] {
            assert!(html.contains(&format!(" src=\"/memories/{name}.jpg\"")), "{name} loaded");
        }
        for name in ["c", "d"] {
            assert!(!html.contains(&format!(" src=\"/memories/{name}.jpg\"")), "{name} deferred");
            assert!(html.contains(&format!("data-src=\"/memories/{name}.jpg\"")));
        }
        assert_eq!(html.matches("slide-bg lazy").count(), 2);
    }

    #[test]
    fn active_slide_marked() {
        let html = render_page(&ready(&["a.jpg", "b.jpg"])).into_string();
        assert!(html.contains("class=\"slide active\" data-index=\"0\""));
        assert!(html.contains("class=\"slide\" data-index=\"1\""));
    }

    #[test]
    fn strip_offset_and_progress_follow_current_slide() {
        let mut c = ready(&["a.jpg", "b.jpg", "c.jpg"]);
        c.go_to_slide(2);

        let html = render_page(&c).into_string();
        assert!(html.contains("transform: translateX(-200vw);"));
        assert!(html.contains("width: 100.0%;"));
    }

    #[test]
    fn date_label_is_month_and_year() {
        // 1970-01-01 + 200 days
        let slide = Slide::new(0, memory("a.jpg", 200));
        assert_eq!(date_label(&slide), "July 1970");
    }

    #[test]
    fn caption_rendered_only_when_set() {
        let mut entry = memory("a.jpg", 1);
        let plain = render_slide(&Slide::new(0, entry.clone())).into_string();
        assert!(!plain.contains("caption"));

        entry.caption = "Beach <day>".to_string();
        let captioned = render_slide(&Slide::new(0, entry)).into_string();
        assert!(captioned.contains("<h2 class=\"caption\">Beach &lt;day&gt;</h2>"));
    }

    #[test]
    fn empty_manifest_shows_prompt() {
        let c = SlideshowController::from_entries(
            Vec::new(),
            &SlideshowConfig::default(),
            HeadlessPlayback,
            Instant::now(),
        );
        let html = render_page(&c).into_string();
        let prompt = html! { (EMPTY_PROMPT) }.into_string();
        assert!(html.contains(&prompt));
        assert!(!html.contains("data-index"));
    }

    #[test]
    fn failed_load_shows_instruction_and_no_slides() {
        let c = SlideshowController::load(
            &StaticSource(None),
            &SlideshowConfig::default(),
            HeadlessPlayback,
            Instant::now(),
        );
        let html = render_page(&c).into_string();
        let title = html! { h1.title { (MISSING_MANIFEST_MESSAGE) } }.into_string();
        assert!(html.contains(&title));
        assert!(!html.contains("data-index"));
        assert!(!html.contains("class=\"slide\""));
        assert!(!html.contains("class=\"slide "));
    }
}
