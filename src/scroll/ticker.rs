/// Clamp applied to unusually long gaps between frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LagSmoothing {
    /// Gaps longer than this (ms) are treated as lag.
    pub threshold_ms: f64,
    /// Elapsed time (ms) substituted for a lagging frame.
    pub adjusted_lag_ms: f64,
}

impl Default for LagSmoothing {
    fn default() -> Self {
        Self {
            threshold_ms: 500.0,
            adjusted_lag_ms: 33.0,
        }
    }
}

/// One tick of the frame clock.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TickerFrame {
    /// 1-based tick count.
    pub frame: u64,
    /// Seconds of ticker time since the first tick.
    pub time_s: f64,
    /// Seconds since the previous tick.
    pub delta_s: f64,
}

/// Frame clock converting wall-clock milliseconds into animation time.
///
/// With lag smoothing disabled, ticker time tracks wall time exactly so a long
/// stall is followed by a single large step instead of a slowed-down catch-up.
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    lag: Option<LagSmoothing>,
    last_ms: Option<f64>,
    time_s: f64,
    frame: u64,
}

impl Ticker {
    /// Clock at time 0; `None` disables lag smoothing.
    pub fn new(lag: Option<LagSmoothing>) -> Self {
        Self {
            lag,
            ..Self::default()
        }
    }

    /// Configure lag smoothing; a zero threshold disables it.
    pub fn set_lag_smoothing(&mut self, threshold_ms: f64, adjusted_lag_ms: f64) {
        self.lag = (threshold_ms > 0.0).then_some(LagSmoothing {
            threshold_ms,
            adjusted_lag_ms: adjusted_lag_ms.min(threshold_ms),
        });
    }

    /// Active lag smoothing, if any.
    pub fn lag_smoothing(&self) -> Option<LagSmoothing> {
        self.lag
    }

    /// Seconds of ticker time so far.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Advance to wall-clock `now_ms`; the first tick has a zero delta.
    pub fn tick(&mut self, now_ms: f64) -> TickerFrame {
        let mut elapsed_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if let Some(lag) = self.lag
            && elapsed_ms > lag.threshold_ms
        {
            tracing::debug!(elapsed_ms, "lag smoothing clamped frame gap");
            elapsed_ms = lag.adjusted_lag_ms;
        }
        let delta_s = elapsed_ms / 1000.0;
        self.time_s += delta_s;
        self.frame += 1;
        TickerFrame {
            frame: self.frame,
            time_s: self.time_s,
            delta_s,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/ticker.rs"]
mod tests;
