/// Wall-clock playback position for timelines that are not scrubbed by scroll.
///
/// Time only moves inside [`Playhead::advance`]; every control call is instantaneous.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    progress: f64,
    duration: f64,
    reversed: bool,
    playing: bool,
}

impl Playhead {
    /// Paused at the start.
    pub fn new(duration: f64) -> Self {
        Self {
            progress: 0.0,
            duration: duration.max(0.0),
            reversed: false,
            playing: false,
        }
    }

    /// Current position in seconds.
    pub fn time(&self) -> f64 {
        self.progress * self.duration
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Position normalized to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether `advance` moves the position.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether playback runs toward the start.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Play forward from the current position.
    pub fn play(&mut self) {
        self.reversed = false;
        self.playing = true;
    }

    /// Play backward from the current position.
    pub fn reverse(&mut self) {
        self.reversed = true;
        self.playing = true;
    }

    /// Stop in place.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continue in whichever direction was last set.
    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Jump to the start and play forward.
    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.play();
    }

    /// Jump to the start and stop.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.reversed = false;
        self.playing = false;
    }

    /// Jump to the end and stop.
    pub fn complete(&mut self) {
        self.progress = 1.0;
        self.reversed = false;
        self.playing = false;
    }

    /// Advance by `dt` seconds. Returns `true` when the position changed.
    ///
    /// A zero-length playhead jumps straight to whichever end it is heading for.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing || dt < 0.0 {
            return false;
        }
        let before = self.progress;
        let step = if self.duration > 0.0 {
            dt / self.duration
        } else {
            1.0
        };
        if self.reversed {
            self.progress = (self.progress - step).max(0.0);
            if self.progress <= 0.0 {
                self.playing = false;
            }
        } else {
            self.progress = (self.progress + step).min(1.0);
            if self.progress >= 1.0 {
                self.playing = false;
            }
        }
        self.progress != before
    }
}
