pub(crate) mod ease;
pub(crate) mod playhead;
pub(crate) mod tween;
