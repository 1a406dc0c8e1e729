use crate::{
    engine::scroll_timeline::{TimelineEngine, TriggerHandle},
    foundation::core::ElementId,
};

/// The five independent trigger groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Per-tile fade and slide in.
    GalleryEntrance,
    /// Header title drift and fade.
    TitleParallax,
    /// Pinned fly-through with the text phrases.
    ZoomHero,
    /// Pinned sideways story track.
    HorizontalTrack,
    /// Page color zones over the story track.
    Background,
}

/// An animation left out because its element was not laid out.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Skipped {
    /// Group the animation belonged to.
    pub group: Group,
    /// Missing element.
    pub element: ElementId,
}

/// Owns every region the choreography registered; released together by [`revert`].
///
/// [`revert`]: ChoreographyContext::revert
#[derive(Debug, Default)]
pub struct ChoreographyContext {
    handles: Vec<(Group, TriggerHandle)>,
    skipped: Vec<Skipped>,
}

impl ChoreographyContext {
    pub(crate) fn push(&mut self, group: Group, handle: TriggerHandle) {
        self.handles.push((group, handle));
    }

    pub(crate) fn skip(&mut self, group: Group, element: ElementId) {
        tracing::warn!(?group, %element, "element absent, animation skipped");
        self.skipped.push(Skipped { group, element });
    }

    /// Number of owned regions.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no region is owned.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handles registered for `group`, in registration order.
    pub fn handles(&self, group: Group) -> impl Iterator<Item = TriggerHandle> + '_ {
        self.handles
            .iter()
            .filter(move |(g, _)| *g == group)
            .map(|(_, h)| *h)
    }

    /// Animations skipped at mount, in encounter order.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Revert every owned region, newest first. Returns how many the engine still knew.
    pub fn revert<E: TimelineEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let mut reverted = 0;
        while let Some((_, handle)) = self.handles.pop() {
            if engine.revert(handle) {
                reverted += 1;
            }
        }
        tracing::debug!(reverted, "choreography reverted");
        reverted
    }
}
