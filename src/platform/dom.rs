//! HUD text in DOM elements
//!
//! Elements are looked up by id. A missing element is replaced by a detached
//! placeholder so the page can omit any of them.

use web_sys::{Document, Element};

use crate::error::{GameError, Result};
use crate::present::{Hud, PresentationSink};
use crate::round::RoundEvent;

/// Element ids the sink writes into
pub const SCORE_ID: &str = "score";
pub const RESULT_ID: &str = "result";
pub const THROWS_LEFT_ID: &str = "throws-left";
pub const GAME_OVER_ID: &str = "game-over";

pub struct DomTextSink {
    hud: Hud,
    score: Element,
    result: Element,
    throws_left: Element,
    game_over: Element,
}

/// Find an element, or make a throwaway one that is never attached
fn element_or_placeholder(document: &Document, id: &str) -> Result<Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    log::warn!("No #{} element, HUD text goes to a placeholder", id);
    document
        .create_element("div")
        .map_err(|e| GameError::Presentation(format!("create placeholder for #{id}: {e:?}")))
}

impl DomTextSink {
    pub fn new(sound: bool, confetti: bool) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::Presentation("no document".into()))?;

        Ok(Self {
            hud: Hud::new(sound, confetti),
            score: element_or_placeholder(&document, SCORE_ID)?,
            result: element_or_placeholder(&document, RESULT_ID)?,
            throws_left: element_or_placeholder(&document, THROWS_LEFT_ID)?,
            game_over: element_or_placeholder(&document, GAME_OVER_ID)?,
        })
    }

    /// Take pending sound/confetti cues for the page to play
    pub fn drain_cues(&mut self) -> Vec<crate::present::Cue> {
        self.hud.drain_cues()
    }

    fn render(&self) -> Result<()> {
        self.score.set_text_content(Some(self.hud.score_text.as_str()));
        self.result.set_text_content(Some(self.hud.result_text.as_str()));
        self.throws_left.set_text_content(Some(self.hud.throws_left_text.as_str()));
        let class = if self.hud.game_over { "visible" } else { "hidden" };
        self.game_over
            .set_attribute("class", class)
            .map_err(|e| GameError::Presentation(format!("#{GAME_OVER_ID} class: {e:?}")))
    }
}

impl PresentationSink for DomTextSink {
    fn notify(&mut self, event: &RoundEvent) -> Result<()> {
        self.hud.notify(event)?;
        self.render()
    }
}
