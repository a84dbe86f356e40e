//! Score display and game-over notice

/// Text shown when a run ends
pub fn game_over_message(final_score: u32) -> String {
    format!("Game Over! Final Score: {}", final_score)
}

/// Anything that can show the current score
pub trait Scoreboard {
    fn set_score(&mut self, score: u32);

    /// Show the final score. May block (e.g. a browser alert).
    fn announce_game_over(&mut self, final_score: u32);
}

/// Scoreboard that writes to the log (native demo)
#[derive(Debug, Default)]
pub struct LogScoreboard {
    pub score: u32,
    pub best: u32,
}

impl Scoreboard for LogScoreboard {
    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.best = self.best.max(score);
    }

    fn announce_game_over(&mut self, final_score: u32) {
        log::info!("{} (best {})", game_over_message(final_score), self.best);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::DomScoreboard;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{Scoreboard, game_over_message};

    /// Writes the score into a DOM element and alerts on game over
    pub struct DomScoreboard {
        element: Option<web_sys::Element>,
    }

    impl DomScoreboard {
        pub fn new(element_id: &str) -> Self {
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(element_id));
            if element.is_none() {
                log::warn!("Score element #{} not found", element_id);
            }
            Self { element }
        }
    }

    impl Scoreboard for DomScoreboard {
        fn set_score(&mut self, score: u32) {
            if let Some(el) = &self.element {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn announce_game_over(&mut self, final_score: u32) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&game_over_message(final_score));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        assert_eq!(game_over_message(17), "Game Over! Final Score: 17");
    }

    #[test]
    fn test_log_scoreboard_tracks_best() {
        let mut board = LogScoreboard::default();
        board.set_score(4);
        board.set_score(0);
        assert_eq!(board.score, 0);
        assert_eq!(board.best, 4);
    }
}
