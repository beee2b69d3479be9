mod common;

use common::synthetic_form::{draw_form, keyword_patch, template_model, ANCHOR, TABLE_RECT};
use telegrama::rotation::deskew;
use telegrama::{FormReader, ReaderParams};

#[test]
fn keyword_patch_fixture_survives_binarization() {
    // The reader binarizes the patch with the minority-ink rule; a fixture
    // with majority ink would be searched for as its own negative.
    let patch = keyword_patch();
    let total = u64::from(patch.width()) * u64::from(patch.height());
    assert!(
        telegrama::bitmap::ink_count(&patch) * 2 < total,
        "patch ink must stay the minority class"
    );
    assert_eq!(telegrama::binarize::binarize(&patch), patch);
}

#[test]
fn straight_form_is_fully_extracted() {
    let form = draw_form();
    let reader = FormReader::new(ReaderParams::default(), template_model(), &keyword_patch());
    let fx = reader.process(&form).expect("pipeline should succeed");
    let report = &fx.report;

    assert!(
        report.rotation_deg.abs() <= 0.5,
        "rotation={}",
        report.rotation_deg
    );
    assert!(
        (report.anchor.x - ANCHOR[0] * 0.5).abs() <= 3.0,
        "anchor.x={}",
        report.anchor.x
    );
    assert!(
        (report.anchor.y - ANCHOR[1] * 0.5).abs() <= 3.0,
        "anchor.y={}",
        report.anchor.y
    );

    assert!(report.horizontal_lines >= 2, "{} hl", report.horizontal_lines);
    assert!(report.vertical_lines >= 2, "{} vl", report.vertical_lines);
    assert!(report.quad_count >= 1);
    assert!(report.alignment_matches >= 1);
    assert!(!report.degraded_alignment);
    assert!(
        (report.transform.scale_x - 0.5).abs() <= 0.02,
        "scale_x={}",
        report.transform.scale_x
    );
    assert!(
        (report.transform.scale_y - 0.5).abs() <= 0.02,
        "scale_y={}",
        report.transform.scale_y
    );

    assert_eq!(fx.tables.len(), 1);
    let crop = &fx.tables[0].crop;
    assert!(
        (crop.width() as f32 - TABLE_RECT.w).abs() <= 8.0,
        "table crop width={}",
        crop.width()
    );
    assert!(
        (crop.height() as f32 - TABLE_RECT.h).abs() <= 8.0,
        "table crop height={}",
        crop.height()
    );

    assert_eq!(fx.cells.len(), 2);
    for (cell, report_cell) in fx.cells.iter().zip(&report.cells) {
        assert!(!report_cell.segmentation_anomaly, "cell {}", cell.id);
        assert_eq!(
            report_cell.digit_boxes.len(),
            2,
            "cell {} digit boxes",
            cell.id
        );
        let boxes = &report_cell.digit_boxes;
        assert!(boxes[0].x2 < boxes[1].x1, "boxes must be ordered");
        assert_eq!(cell.digits.len(), 2);
        for digit in &cell.digits {
            assert!(
                telegrama::bitmap::ink_count(digit) > 0,
                "digit crop must carry ink"
            );
        }
    }
}

#[test]
fn rotated_form_is_rectified_and_extracted() {
    // Rotating by -(-2.0) = +2 degrees; the estimator should read it back.
    let rotated = deskew(&draw_form(), -2.0);
    let reader = FormReader::new(ReaderParams::default(), template_model(), &keyword_patch());
    let fx = reader.process(&rotated).expect("pipeline should succeed");
    let report = &fx.report;

    assert!(
        (report.rotation_deg - 2.0).abs() <= 0.5,
        "rotation={}",
        report.rotation_deg
    );
    assert!(report.quad_count >= 1);
    assert!(!report.degraded_alignment);
    assert!(
        (report.transform.scale_x - 0.5).abs() <= 0.03,
        "scale_x={}",
        report.transform.scale_x
    );

    assert_eq!(fx.cells.len(), 2);
    for report_cell in &report.cells {
        assert!(!report_cell.segmentation_anomaly);
        assert_eq!(report_cell.digit_boxes.len(), 2);
    }
}

#[test]
fn unmatched_template_degrades_but_still_crops() {
    // Shift the template's table far from any drawn rectangle: no quad can
    // clear the overlap threshold, so the scale falls back to identity and
    // crops still come out at the coarse placement.
    let mut model = template_model();
    model.tables[0].rect.x += 600.0;
    let reader = FormReader::new(ReaderParams::default(), model, &keyword_patch());
    let fx = reader.process(&draw_form()).expect("degraded is not fatal");

    assert!(fx.report.degraded_alignment);
    assert_eq!(fx.report.alignment_matches, 0);
    assert_eq!(fx.report.transform.scale_x, 0.5);
    assert_eq!(fx.tables.len(), 1);
    assert_eq!(fx.cells.len(), 2);
}
