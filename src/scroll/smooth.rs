use crate::{
    animation::ease::Ease,
    foundation::core::ScrollDirection,
    foundation::error::{SanctuaryError, SanctuaryResult},
};

/// Tuning for [`SmoothScroller`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollOptions {
    /// Seconds an input takes to settle.
    pub duration_s: f64,
    /// Curve applied over `duration_s`.
    pub ease: Ease,
    /// Amplification applied to wheel deltas.
    pub wheel_multiplier: f64,
    /// Amplification applied to touch-originated deltas.
    pub touch_multiplier: f64,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration_s: 1.2,
            ease: Ease::ExpoOutClamped,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
        }
    }
}

impl SmoothScrollOptions {
    /// Reject non-positive or non-finite tuning.
    pub fn validate(&self) -> SanctuaryResult<()> {
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(SanctuaryError::validation(
                "smooth scroll duration must be finite and > 0",
            ));
        }
        for (name, m) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !m.is_finite() || m <= 0.0 {
                return Err(SanctuaryError::validation(format!(
                    "smooth scroll {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Raw input-device scroll delta in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScrollInput {
    /// Mouse wheel or trackpad.
    Wheel {
        /// Horizontal delta; ignored.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Touch drag.
    Touch {
        /// Horizontal delta; ignored.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
}

/// What happened to an input handed to the scroller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDisposition {
    /// Translated into virtual scroll; the native default must be suppressed.
    Consumed,
    /// Not a vertical gesture; left alone.
    Ignored,
    /// Scroller is destroyed; native scrolling applies.
    Native,
}

/// Virtual scroll state broadcast once per frame while it changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollEvent {
    /// Virtual offset in pixels.
    pub scroll: f64,
    /// Maximum offset.
    pub limit: f64,
    /// Offset change since the previous event.
    pub velocity: f64,
    /// Direction of that change.
    pub direction: ScrollDirection,
    /// `scroll / limit`, or 1 when there is nothing to scroll.
    pub progress: f64,
}

/// Subscription returned by [`SmoothScroller::on_scroll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug)]
struct Glide {
    from: f64,
    to: f64,
    elapsed_s: f64,
}

type Listener = Box<dyn FnMut(&ScrollEvent)>;

/// Eased virtual scroll position driven by wheel/touch input.
///
/// Inputs only move the target; the visible offset moves inside [`SmoothScroller::raf`],
/// which must be called once per animation frame.
pub struct SmoothScroller {
    opts: SmoothScrollOptions,
    animated: f64,
    target: f64,
    limit: f64,
    velocity: f64,
    direction: ScrollDirection,
    glide: Option<Glide>,
    last_time_ms: Option<f64>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    destroyed: bool,
}

impl std::fmt::Debug for SmoothScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothScroller")
            .field("animated", &self.animated)
            .field("target", &self.target)
            .field("limit", &self.limit)
            .field("listeners", &self.listeners.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl SmoothScroller {
    /// Scroller at offset 0 with the given limit.
    pub fn new(opts: SmoothScrollOptions, limit: f64) -> SanctuaryResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            animated: 0.0,
            target: 0.0,
            limit: limit.max(0.0),
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            glide: None,
            last_time_ms: None,
            listeners: Vec::new(),
            next_listener: 0,
            destroyed: false,
        })
    }

    /// Current virtual offset.
    pub fn scroll(&self) -> f64 {
        self.animated
    }

    /// Offset the current glide settles on.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Maximum offset.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Whether a glide is in progress.
    pub fn is_scrolling(&self) -> bool {
        self.glide.is_some()
    }

    /// Whether [`SmoothScroller::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Subscribe to scroll notifications.
    pub fn on_scroll(&mut self, f: impl FnMut(&ScrollEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Change the maximum scroll offset (document height minus viewport).
    ///
    /// A visible offset beyond the new limit is clamped and broadcast like any other move.
    pub fn set_limit(&mut self, limit: f64) -> Option<ScrollEvent> {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        if let Some(g) = &mut self.glide {
            g.to = g.to.min(self.limit);
        }
        if self.animated > self.limit && !self.destroyed {
            return self.set_animated(self.limit);
        }
        None
    }

    /// Feed one raw input event.
    pub fn input(&mut self, input: ScrollInput) -> InputDisposition {
        if self.destroyed {
            return InputDisposition::Native;
        }
        let delta = match input {
            ScrollInput::Wheel { dy, .. } => dy * self.opts.wheel_multiplier,
            ScrollInput::Touch { dy, .. } => dy * self.opts.touch_multiplier,
        };
        if delta == 0.0 || !delta.is_finite() {
            return InputDisposition::Ignored;
        }
        self.glide_to(self.target + delta);
        InputDisposition::Consumed
    }

    /// Move to `target`. `immediate` jumps and notifies at once; otherwise the
    /// move eases over the configured duration.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) -> Option<ScrollEvent> {
        if self.destroyed {
            return None;
        }
        if immediate {
            let target = target.clamp(0.0, self.limit);
            self.glide = None;
            self.target = target;
            return self.set_animated(target);
        }
        self.glide_to(target);
        None
    }

    fn glide_to(&mut self, target: f64) {
        self.target = target.clamp(0.0, self.limit);
        self.glide = Some(Glide {
            from: self.animated,
            to: self.target,
            elapsed_s: 0.0,
        });
    }

    /// Advance the interpolation to `time_ms` and notify listeners when the
    /// virtual offset changed. The returned event is the one just broadcast.
    pub fn raf(&mut self, time_ms: f64) -> Option<ScrollEvent> {
        if self.destroyed {
            return None;
        }
        let dt_s = match self.last_time_ms.replace(time_ms) {
            Some(prev) => ((time_ms - prev) * 0.001).max(0.0),
            None => 0.0,
        };

        let glide = self.glide.as_mut()?;
        glide.elapsed_s += dt_s;
        let linear = (glide.elapsed_s / self.opts.duration_s).clamp(0.0, 1.0);
        let done = linear >= 1.0;
        let eased = if done { 1.0 } else { self.opts.ease.apply(linear) };
        let next = glide.from + (glide.to - glide.from) * eased;
        if done {
            self.glide = None;
        }
        let event = self.set_animated(next);
        if done && event.is_none() {
            self.velocity = 0.0;
            self.direction = ScrollDirection::Idle;
        }
        event
    }

    fn set_animated(&mut self, next: f64) -> Option<ScrollEvent> {
        if next == self.animated {
            return None;
        }
        self.velocity = next - self.animated;
        self.direction = ScrollDirection::between(self.animated, next);
        self.animated = next;
        let event = ScrollEvent {
            scroll: self.animated,
            limit: self.limit,
            velocity: self.velocity,
            direction: self.direction,
            progress: if self.limit == 0.0 {
                1.0
            } else {
                self.animated / self.limit
            },
        };
        tracing::trace!(scroll = event.scroll, velocity = event.velocity, "virtual scroll");
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        Some(event)
    }

    /// Release every listener and stop intercepting input.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        tracing::debug!(listeners = self.listeners.len(), "smooth scroller destroyed");
        self.listeners.clear();
        self.glide = None;
        self.destroyed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
