use crate::config::RevealConfig;

/// Where the loading overlay is in its reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// At least one readiness signal is still missing.
    Waiting,
    /// Both signals arrived; grace delay running.
    Delay,
    /// Overlay fading out.
    Fading,
    /// Overlay fully transparent.
    Done,
}

/// Fades the loading overlay out once the page has loaded AND the hero video
/// has a decodable frame, after a fixed grace delay.
///
/// Times are wall-clock seconds; only the first occurrence of each signal counts.
#[derive(Clone, Debug)]
pub struct RevealGate {
    config: RevealConfig,
    page_loaded_at: Option<f64>,
    first_frame_at: Option<f64>,
}

impl RevealGate {
    /// Gate with neither signal received.
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            page_loaded_at: None,
            first_frame_at: None,
        }
    }

    /// Record the page-loaded signal.
    pub fn page_loaded(&mut self, now_s: f64) {
        self.page_loaded_at.get_or_insert(now_s);
    }

    /// Record the hero first-frame signal.
    pub fn first_frame(&mut self, now_s: f64) {
        self.first_frame_at.get_or_insert(now_s);
    }

    /// When the second signal arrived.
    pub fn ready_at(&self) -> Option<f64> {
        Some(self.page_loaded_at?.max(self.first_frame_at?))
    }

    /// When the fade begins, once both signals arrived.
    pub fn fade_starts_at(&self) -> Option<f64> {
        self.ready_at().map(|t| t + self.config.grace_delay_s)
    }

    /// Phase at wall-clock `now_s`.
    pub fn phase(&self, now_s: f64) -> RevealPhase {
        let Some(start) = self.fade_starts_at() else {
            return RevealPhase::Waiting;
        };
        if now_s < start {
            RevealPhase::Delay
        } else if now_s < start + self.config.fade_duration_s {
            RevealPhase::Fading
        } else {
            RevealPhase::Done
        }
    }

    /// Overlay opacity: 1 until the fade starts, then eased down to 0.
    pub fn overlay_opacity(&self, now_s: f64) -> f64 {
        match self.phase(now_s) {
            RevealPhase::Waiting | RevealPhase::Delay => 1.0,
            RevealPhase::Done => 0.0,
            RevealPhase::Fading => {
                let start = self.fade_starts_at().unwrap_or(now_s);
                let t = (now_s - start) / self.config.fade_duration_s;
                1.0 - self.config.ease.apply(t)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/reveal.rs"]
mod tests;
