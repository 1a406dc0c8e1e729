use crate::{
    content::ids,
    content::registry::Registry,
    engine::layout::Document,
    foundation::core::{ElementBox, Rect, Viewport},
};

const GALLERY_PADDING_PX: f64 = 64.0;
const GALLERY_GAP_PX: f64 = 16.0;

/// Column count of the gallery masonry for a viewport width.
pub fn gallery_columns(viewport_width: f64) -> usize {
    if viewport_width < 768.0 {
        1
    } else if viewport_width < 1024.0 {
        2
    } else {
        3
    }
}

/// Width of one story panel on the horizontal track.
pub fn story_panel_width(viewport: Viewport) -> f64 {
    if viewport.width < 768.0 {
        viewport.vw(90.0)
    } else {
        viewport.vw(60.0)
    }
}

/// Lay the page out top to bottom: header, zoom hero, gallery, story track, booking.
pub fn compose_layout(registry: &Registry, viewport: Viewport) -> Document {
    let mut doc = Document::new(viewport);
    let w = viewport.width;

    let mut y = header(&mut doc, viewport);
    y = zoom_hero(&mut doc, registry, viewport, y);
    y = gallery(&mut doc, registry, viewport, y);
    y = horizontal(&mut doc, registry, viewport, y);
    let booking = Rect::new(0.0, y, w, y + viewport.vh(50.0));
    doc.insert(ids::BOOKING, ElementBox::new(booking));

    let bottom = booking.y1;
    doc.insert(ids::PAGE, ElementBox::new(Rect::new(0.0, 0.0, w, bottom)));
    doc.insert(
        ids::HAZE_OVERLAY,
        ElementBox::new(Rect::new(0.0, 0.0, w, viewport.height)),
    );
    doc
}

fn header(doc: &mut Document, viewport: Viewport) -> f64 {
    let h = viewport.vh(70.0);
    let rect = Rect::new(0.0, 0.0, viewport.width, h);
    doc.insert(ids::HEADER, ElementBox::new(rect));
    doc.insert(ids::HERO_VIDEO, ElementBox::new(rect));
    let title_h = h * 0.25;
    let title_y = (h - title_h) / 2.0;
    doc.insert(
        ids::MAIN_TITLE,
        ElementBox::new(Rect::new(0.0, title_y, viewport.width, title_y + title_h)),
    );
    h
}

fn zoom_hero(doc: &mut Document, registry: &Registry, viewport: Viewport, y: f64) -> f64 {
    let (w, h) = (viewport.width, viewport.height);
    let section = Rect::new(0.0, y, w, y + h);
    doc.insert(ids::ZOOM_SECTION, ElementBox::new(section));
    doc.insert(ids::WINDOW_OVERLAY, ElementBox::new(section));
    doc.insert(ids::ZOOM_FOREGROUND, ElementBox::new(section));
    doc.insert(
        ids::SCROLL_INDICATOR,
        ElementBox::new(Rect::new(w / 2.0 - 24.0, y + h - 96.0, w / 2.0 + 24.0, y + h - 32.0)),
    );
    let text_h = viewport.vh(30.0);
    let text_y = y + (h - text_h) / 2.0;
    for i in 0..registry.fly_texts.len() {
        doc.insert(
            ids::fly_text(i),
            ElementBox::new(Rect::new(0.0, text_y, w, text_y + text_h)),
        );
    }
    section.y1
}

/// Masonry: each tile goes to the shortest run of columns its span fits.
fn gallery(doc: &mut Document, registry: &Registry, viewport: Viewport, y: f64) -> f64 {
    let cols = gallery_columns(viewport.width);
    let inner_w = (viewport.width - 2.0 * GALLERY_PADDING_PX).max(1.0);
    let col_w = ((inner_w - (cols as f64 - 1.0) * GALLERY_GAP_PX) / cols as f64).max(1.0);
    let top = y + GALLERY_PADDING_PX;
    let mut heights = vec![top; cols];

    for (i, tile) in registry.tiles.iter().enumerate() {
        let layout = tile.layout();
        let span = layout.col_span().clamp(1, cols);
        let (col, tile_y) = (0..=cols - span)
            .map(|c| {
                let run_top = heights[c..c + span].iter().copied().fold(top, f64::max);
                (c, run_top)
            })
            .fold((0, f64::INFINITY), |best, cand| {
                if cand.1 < best.1 { cand } else { best }
            });
        let tile_w = span as f64 * col_w + (span as f64 - 1.0) * GALLERY_GAP_PX;
        let tile_h = tile_w / layout.aspect();
        let x = GALLERY_PADDING_PX + col as f64 * (col_w + GALLERY_GAP_PX);
        let rect = Rect::new(x, tile_y, x + tile_w, tile_y + tile_h);
        doc.insert(ids::tile(i), ElementBox::new(rect));
        if tile.media_source().is_some() {
            doc.insert(ids::tile_video(i), ElementBox::new(rect));
        }
        for h in &mut heights[col..col + span] {
            *h = tile_y + tile_h + GALLERY_GAP_PX;
        }
    }

    let content_bottom = heights.iter().copied().fold(top, f64::max);
    let bottom = content_bottom + GALLERY_PADDING_PX;
    doc.insert(
        ids::GALLERY,
        ElementBox::new(Rect::new(0.0, y, viewport.width, bottom)),
    );
    bottom
}

fn horizontal(doc: &mut Document, registry: &Registry, viewport: Viewport, y: f64) -> f64 {
    let section = Rect::new(0.0, y, viewport.width, y + viewport.height);
    let panel_w = story_panel_width(viewport);
    let inset = viewport.vw(10.0);
    for i in 0..registry.story_panels.len() {
        let x = inset + i as f64 * panel_w;
        doc.insert(
            ids::story_panel(i),
            ElementBox::new(Rect::new(x, section.y0, x + panel_w, section.y1)),
        );
    }
    let track_width = 2.0 * inset + registry.story_panels.len() as f64 * panel_w;
    doc.insert(ids::HORIZONTAL_SECTION, ElementBox::new(section));
    doc.insert(
        ids::HORIZONTAL_TRACK,
        ElementBox::with_scroll_width(section, track_width),
    );
    section.y1
}

#[cfg(test)]
#[path = "../../tests/unit/site/layout.rs"]
mod tests;
