//! Synthetic tally-form rasters for end-to-end tests.
//!
//! The form is drawn at source resolution with the template model built
//! alongside it, so the expected geometry is known exactly: a keyword patch
//! anchors the layout, one bordered table contains two digit cells, and each
//! cell holds two solid "digit" blobs.

use image::{GrayImage, Luma};
use telegrama::bitmap::INK;
use telegrama::model::{FieldKind, TemplateField, TemplateModel};
use telegrama::types::RectF;

/// Patch top-left corner at source resolution.
pub const ANCHOR: [f32; 2] = [80.0, 60.0];
// Placed well away from the anchor so the per-edge extent ratios in the
// alignment refinement are insensitive to single-pixel detection error.
pub const TABLE_RECT: RectF = RectF {
    x: 160.0,
    y: 160.0,
    w: 400.0,
    h: 240.0,
};
pub const CELL_RECTS: [RectF; 2] = [
    RectF {
        x: 200.0,
        y: 200.0,
        w: 120.0,
        h: 60.0,
    },
    RectF {
        x: 360.0,
        y: 200.0,
        w: 120.0,
        h: 60.0,
    },
];
/// Digit blob top-left offsets inside each cell, and the blob extent.
pub const DIGIT_OFFSETS: [[u32; 2]; 2] = [[20, 18], [60, 18]];
pub const DIGIT_SIZE: [u32; 2] = [14, 24];

pub fn fill(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, Luma([INK]));
        }
    }
}

/// Hollow rectangle with `t`-pixel-thick edges.
pub fn rect_border(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32, t: u32) {
    fill(img, x0, y0, w, t);
    fill(img, x0, y0 + h - t, w, t);
    fill(img, x0, y0, t, h);
    fill(img, x0 + w - t, y0, t, h);
}

/// Three hollow blocks separated by slots; distinctive enough for a clean
/// correlation peak and large enough to survive despeckling. Ink stays the
/// minority class, like a real printed keyword, so binarization keeps the
/// patch as authored instead of inverting it.
pub fn keyword_patch() -> GrayImage {
    let mut patch = GrayImage::new(64, 24);
    rect_border(&mut patch, 0, 0, 20, 24, 3);
    rect_border(&mut patch, 24, 0, 16, 24, 3);
    rect_border(&mut patch, 44, 0, 20, 24, 3);
    patch
}

/// Template model matching [`draw_form`], reference at the origin.
pub fn template_model() -> TemplateModel {
    TemplateModel {
        reference: [0.0, 0.0],
        tables: vec![TemplateField {
            id: "t1".into(),
            kind: FieldKind::Table,
            rect: TABLE_RECT,
        }],
        cells: CELL_RECTS
            .iter()
            .enumerate()
            .map(|(i, &rect)| TemplateField {
                id: format!("c{}", i + 1),
                kind: FieldKind::Cell,
                rect,
            })
            .collect(),
    }
}

/// Draws the full form: keyword patch at [`ANCHOR`], bordered table, and two
/// digit blobs per cell, all placed relative to the anchor so the template
/// projects onto them exactly.
pub fn draw_form() -> GrayImage {
    let mut img = GrayImage::new(800, 600);
    let (ax, ay) = (ANCHOR[0] as u32, ANCHOR[1] as u32);

    let patch = keyword_patch();
    for (x, y, p) in patch.enumerate_pixels() {
        if p.0[0] == INK {
            img.put_pixel(ax + x, ay + y, *p);
        }
    }

    rect_border(
        &mut img,
        ax + TABLE_RECT.x as u32,
        ay + TABLE_RECT.y as u32,
        TABLE_RECT.w as u32,
        TABLE_RECT.h as u32,
        4,
    );

    for cell in &CELL_RECTS {
        for (off, size) in DIGIT_OFFSETS.iter().zip([DIGIT_SIZE; 2]) {
            fill(
                &mut img,
                ax + cell.x as u32 + off[0],
                ay + cell.y as u32 + off[1],
                size[0],
                size[1],
            );
        }
    }
    img
}
