use crate::{
    animation::playhead::Playhead,
    animation::ease::Ease,
    animation::tween::{Lerp, Property, PropertyValue, Timeline},
    engine::layout::LayoutSource,
    engine::style::StyleStore,
    engine::trigger::{
        Crossing, FreeTween, ProgressHook, ToggleAction, TriggerAction, TriggerEnd, TriggerMode,
        TriggerRegion,
    },
    foundation::core::{ElementBox, ElementId},
    foundation::error::{SanctuaryError, SanctuaryResult},
};

/// Identifies one registered trigger region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TriggerHandle(u64);

/// Minimal contract the choreography needs from a scroll-driven animation engine.
pub trait TimelineEngine {
    /// Register a region and what it animates. Fails if the anchor is not laid out.
    fn register(
        &mut self,
        region: TriggerRegion,
        action: TriggerAction,
        layout: &dyn LayoutSource,
    ) -> SanctuaryResult<TriggerHandle>;

    /// Kill a region and clear every inline style it wrote.
    fn revert(&mut self, handle: TriggerHandle) -> bool;

    /// Re-measure all boundaries and layout-dependent values.
    fn refresh(&mut self, layout: &dyn LayoutSource);

    /// Recompute every region's progress for a new virtual scroll offset.
    fn update(&mut self, scroll: f64);

    /// Advance wall-clock driven playback by `dt_s` seconds.
    fn advance(&mut self, dt_s: f64);

    /// Write an inline value immediately, overriding any in-flight free tween on it.
    fn set(&mut self, target: &ElementId, property: Property, value: PropertyValue);

    /// Number of live regions.
    fn region_count(&self) -> usize;

    /// Inline styles written so far.
    fn styles(&self) -> &StyleStore;
}

/// Whether the scroll offset is before, inside, or past a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Zone {
    /// Scroll is above `start`.
    Before,
    /// `start <= scroll <= end`.
    Active,
    /// Scroll is past `end`.
    After,
}

impl Zone {
    fn crossings(self, next: Zone) -> &'static [Crossing] {
        match (self, next) {
            (Zone::Before, Zone::Active) => &[Crossing::Enter],
            (Zone::Before, Zone::After) => &[Crossing::Enter, Crossing::Leave],
            (Zone::Active, Zone::After) => &[Crossing::Leave],
            (Zone::After, Zone::Active) => &[Crossing::EnterBack],
            (Zone::After, Zone::Before) => &[Crossing::EnterBack, Crossing::LeaveBack],
            (Zone::Active, Zone::Before) => &[Crossing::LeaveBack],
            _ => &[],
        }
    }
}

/// Scroll-space boundaries of a region after pin spacing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Bounds {
    /// Offset where progress leaves 0.
    pub start: f64,
    /// Offset where progress reaches 1.
    pub end: f64,
}

impl Bounds {
    /// `clamp((scroll - start) / (end - start), 0, 1)`; a zero-length region is a step.
    pub fn progress(self, scroll: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / len).clamp(0.0, 1.0)
    }

    fn zone(self, scroll: f64) -> Zone {
        if scroll < self.start {
            Zone::Before
        } else if scroll > self.end {
            Zone::After
        } else {
            Zone::Active
        }
    }
}

/// Pinned element state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinState {
    /// Whether the element is currently held in place.
    pub active: bool,
    /// Extra vertical translation holding the element in place.
    pub offset: f64,
}

struct Region {
    handle: TriggerHandle,
    region: TriggerRegion,
    timeline: Option<Timeline>,
    hook: Option<ProgressHook>,
    playhead: Option<Playhead>,
    anchor: ElementBox,
    raw: Bounds,
    bounds: Bounds,
    zone: Zone,
    progress: Option<f64>,
    // Channels written by free tweens this region's hook requested.
    hook_channels: Vec<(ElementId, Property)>,
}

impl Region {
    fn pin_distance(&self) -> f64 {
        if self.region.pin {
            (self.raw.end - self.raw.start).max(0.0)
        } else {
            0.0
        }
    }
}

struct RunningTween {
    owner: TriggerHandle,
    tween: FreeTween,
    from: PropertyValue,
    elapsed_s: f64,
}

/// In-process scroll-timeline engine.
///
/// All state advances inside [`TimelineEngine::update`] and [`TimelineEngine::advance`];
/// nothing runs in the background.
#[derive(Default)]
pub struct ScrollTimelineEngine {
    regions: Vec<Region>,
    running: Vec<RunningTween>,
    styles: StyleStore,
    scroll: f64,
    next_handle: u64,
}

impl std::fmt::Debug for ScrollTimelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTimelineEngine")
            .field("regions", &self.regions.len())
            .field("running", &self.running.len())
            .field("scroll", &self.scroll)
            .finish()
    }
}

impl ScrollTimelineEngine {
    /// Engine with no regions at scroll offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the last `update`.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Resolved boundaries of a live region.
    pub fn bounds(&self, handle: TriggerHandle) -> Option<Bounds> {
        self.find(handle).map(|r| r.bounds)
    }

    /// Last computed progress; `None` for unknown handles or before the first evaluation.
    pub fn progress(&self, handle: TriggerHandle) -> Option<f64> {
        self.find(handle).and_then(|r| r.progress)
    }

    /// Where the last update left the region.
    pub fn zone(&self, handle: TriggerHandle) -> Option<Zone> {
        self.find(handle).map(|r| r.zone)
    }

    /// Scroll space reserved by every pinned region.
    pub fn pin_spacing(&self) -> f64 {
        self.regions.iter().map(Region::pin_distance).sum()
    }

    /// Pin state of `anchor`, if some pinned region uses it.
    pub fn pin_state(&self, anchor: &ElementId) -> Option<PinState> {
        let r = self
            .regions
            .iter()
            .find(|r| r.region.pin && &r.region.anchor == anchor)?;
        let offset = match r.zone {
            Zone::Before => 0.0,
            Zone::Active => self.scroll - r.bounds.start,
            Zone::After => r.bounds.end - r.bounds.start,
        };
        Some(PinState {
            active: r.zone == Zone::Active,
            offset,
        })
    }

    /// Number of free tweens still animating.
    pub fn running_tweens(&self) -> usize {
        self.running.len()
    }

    fn find(&self, handle: TriggerHandle) -> Option<&Region> {
        self.regions.iter().find(|r| r.handle == handle)
    }

    fn raw_bounds(region: &TriggerRegion, anchor: ElementBox, layout: &dyn LayoutSource) -> Bounds {
        let vh = layout.viewport().height;
        let start = region
            .start
            .scroll_offset(anchor.top(), anchor.height(), vh);
        let end = match &region.end {
            TriggerEnd::Position(p) => p.scroll_offset(anchor.top(), anchor.height(), vh),
            TriggerEnd::Distance(d) => start + d,
            TriggerEnd::Measured(m) => start + layout.measure(m).unwrap_or(0.0),
        };
        Bounds {
            start,
            end: end.max(start),
        }
    }

    /// Shift every region below a pinned element by that pin's reserved distance.
    fn apply_pin_spacing(&mut self) {
        let pins: Vec<(ElementId, f64, f64)> = self
            .regions
            .iter()
            .filter(|r| r.region.pin)
            .map(|r| (r.region.anchor.clone(), r.anchor.bottom(), r.pin_distance()))
            .collect();
        for r in &mut self.regions {
            let shift: f64 = pins
                .iter()
                .filter(|(anchor, bottom, _)| *anchor != r.region.anchor && r.anchor.top() >= *bottom)
                .map(|(_, _, d)| d)
                .sum();
            r.bounds = Bounds {
                start: r.raw.start + shift,
                end: r.raw.end + shift,
            };
        }
    }

    fn evaluate(&mut self, idx: usize, force_render: bool) {
        let scroll = self.scroll;
        let region = &mut self.regions[idx];
        let progress = region.bounds.progress(scroll);
        let zone = region.bounds.zone(scroll);
        let crossings = region.zone.crossings(zone);
        region.zone = zone;
        let changed = region.progress != Some(progress);
        region.progress = Some(progress);

        let mut render_at = None;
        match region.region.mode {
            TriggerMode::Scrub => {
                if changed || force_render {
                    render_at = region.timeline.as_ref().map(|tl| progress * tl.duration());
                }
            }
            TriggerMode::Toggle(actions) => {
                if let Some(playhead) = region.playhead.as_mut() {
                    for &crossing in crossings {
                        apply_toggle(playhead, actions.for_crossing(crossing));
                    }
                    if !crossings.is_empty() || force_render {
                        render_at = Some(playhead.time());
                    }
                }
            }
            TriggerMode::Observe => {}
        }

        if !crossings.is_empty() {
            tracing::trace!(anchor = %region.region.anchor, ?crossings, progress, "trigger crossing");
        }

        let request = if changed {
            region.hook.as_mut().and_then(|hook| hook(progress))
        } else {
            None
        };

        if let (Some(t), Some(tl)) = (render_at, region.timeline.as_ref()) {
            write_samples(&mut self.styles, tl, t);
        }
        if let Some(req) = request {
            let region = &mut self.regions[idx];
            let channel = (req.target.clone(), req.property);
            if !region.hook_channels.contains(&channel) {
                region.hook_channels.push(channel);
            }
            let owner = region.handle;
            self.start_free_tween(owner, req);
        }
    }

    /// Start a free tween, killing any in-flight tween on the same channel.
    fn start_free_tween(&mut self, owner: TriggerHandle, tween: FreeTween) {
        self.running
            .retain(|r| !(r.tween.target == tween.target && r.tween.property == tween.property));
        let from = self.styles.resolved(&tween.target, tween.property);
        tracing::debug!(target = %tween.target, property = ?tween.property, "free tween started");
        if tween.duration <= 0.0 {
            self.styles.set(&tween.target, tween.property, tween.to);
            return;
        }
        self.running.push(RunningTween {
            owner,
            tween,
            from,
            elapsed_s: 0.0,
        });
    }
}

fn apply_toggle(playhead: &mut Playhead, action: ToggleAction) {
    match action {
        ToggleAction::Play => playhead.play(),
        ToggleAction::Pause => playhead.pause(),
        ToggleAction::Resume => playhead.resume(),
        ToggleAction::Reverse => playhead.reverse(),
        ToggleAction::Restart => playhead.restart(),
        ToggleAction::Reset => playhead.reset(),
        ToggleAction::Complete => playhead.complete(),
        ToggleAction::None => {}
    }
}

fn write_samples(styles: &mut StyleStore, timeline: &Timeline, t: f64) {
    match timeline.sample(t) {
        Ok(samples) => {
            for s in samples {
                styles.set(&s.target, s.property, s.value);
            }
        }
        Err(err) => tracing::warn!(%err, "timeline sample skipped"),
    }
}

fn ease_value(from: PropertyValue, to: PropertyValue, ease: Ease, t: f64) -> PropertyValue {
    if t >= 1.0 {
        return to;
    }
    PropertyValue::lerp(&from, &to, ease.apply(t))
}

impl TimelineEngine for ScrollTimelineEngine {
    #[tracing::instrument(skip(self, action, layout), fields(anchor = %region.anchor))]
    fn register(
        &mut self,
        region: TriggerRegion,
        action: TriggerAction,
        layout: &dyn LayoutSource,
    ) -> SanctuaryResult<TriggerHandle> {
        let anchor = layout.element(&region.anchor).ok_or_else(|| {
            SanctuaryError::trigger(format!("anchor \"{}\" is not laid out", region.anchor))
        })?;
        if matches!(region.mode, TriggerMode::Scrub | TriggerMode::Toggle(_))
            && action.timeline.is_none()
        {
            return Err(SanctuaryError::trigger(
                "scrub and toggle regions need a timeline",
            ));
        }

        let mut timeline = action.timeline;
        if let Some(tl) = timeline.as_mut() {
            tl.resolve(|m| layout.measure(m));
        }
        let playhead = match region.mode {
            TriggerMode::Toggle(_) => timeline.as_ref().map(|tl| Playhead::new(tl.duration())),
            _ => None,
        };

        let handle = TriggerHandle(self.next_handle);
        self.next_handle += 1;
        let raw = Self::raw_bounds(&region, anchor, layout);
        tracing::debug!(start = raw.start, end = raw.end, pin = region.pin, "region registered");
        self.regions.push(Region {
            handle,
            region,
            timeline,
            hook: action.on_update,
            playhead,
            anchor,
            raw,
            bounds: raw,
            zone: Zone::Before,
            progress: None,
            hook_channels: Vec::new(),
        });
        self.apply_pin_spacing();
        let idx = self.regions.len() - 1;
        self.evaluate(idx, true);
        Ok(handle)
    }

    fn revert(&mut self, handle: TriggerHandle) -> bool {
        let Some(pos) = self.regions.iter().position(|r| r.handle == handle) else {
            return false;
        };
        let region = self.regions.remove(pos);
        if let Some(tl) = &region.timeline {
            for (target, property) in tl.channels() {
                self.styles.clear(target, property);
            }
        }
        self.running.retain(|r| r.owner != handle);
        for (target, property) in &region.hook_channels {
            self.styles.clear(target, *property);
        }
        if region.region.pin {
            self.apply_pin_spacing();
        }
        tracing::debug!(anchor = %region.region.anchor, "region reverted");
        true
    }

    #[tracing::instrument(skip(self, layout))]
    fn refresh(&mut self, layout: &dyn LayoutSource) {
        for r in &mut self.regions {
            match layout.element(&r.region.anchor) {
                Some(anchor) => r.anchor = anchor,
                None => {
                    tracing::warn!(anchor = %r.region.anchor, "anchor vanished, keeping last measurement");
                }
            }
            r.raw = Self::raw_bounds(&r.region, r.anchor, layout);
            if let Some(tl) = r.timeline.as_mut() {
                tl.resolve(|m| layout.measure(m));
            }
        }
        self.apply_pin_spacing();
        for idx in 0..self.regions.len() {
            self.evaluate(idx, true);
        }
    }

    fn update(&mut self, scroll: f64) {
        self.scroll = scroll;
        for idx in 0..self.regions.len() {
            self.evaluate(idx, false);
        }
    }

    fn advance(&mut self, dt_s: f64) {
        for r in &mut self.regions {
            let (Some(playhead), Some(tl)) = (r.playhead.as_mut(), r.timeline.as_ref()) else {
                continue;
            };
            if playhead.advance(dt_s) {
                write_samples(&mut self.styles, tl, playhead.time());
            }
        }

        for r in &mut self.running {
            r.elapsed_s += dt_s;
            let t = (r.elapsed_s / r.tween.duration).clamp(0.0, 1.0);
            self.styles.set(
                &r.tween.target,
                r.tween.property,
                ease_value(r.from, r.tween.to, r.tween.ease, t),
            );
        }
        self.running.retain(|r| r.elapsed_s < r.tween.duration);
    }

    fn set(&mut self, target: &ElementId, property: Property, value: PropertyValue) {
        self.running
            .retain(|r| !(&r.tween.target == target && r.tween.property == property));
        self.styles.set(target, property, value);
    }

    fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn styles(&self) -> &StyleStore {
        &self.styles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scroll_timeline.rs"]
mod tests;
