//! Master template parsing.
//!
//! The form layout is authored as an SVG master: rectangle primitives carry
//! a label attribute classifying them (exactly `REFERENCIA` for the
//! reference origin, `TABLA*` for tables, `CELDA*` for cells) and an `id`
//! reused as the output artifact name. One embedded `<image>` element (the
//! scanned background the layout was traced over) anchors the absolute
//! coordinates; every position is re-expressed relative to that anchor and
//! then to the reference rectangle, making template space independent of
//! the master file's own coordinate system.

use crate::errors::FormError;
use crate::types::RectF;
use roxmltree::{Document, Node};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Logical role of a template field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Table,
    Cell,
}

/// One logical rectangle of the form, in template space.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateField {
    /// Unique identifier, reused as the output artifact name.
    pub id: String,
    pub kind: FieldKind,
    /// Position relative to the reference origin; extent as authored.
    pub rect: RectF,
}

/// Parsed form layout. Immutable after parsing; share it read-only across
/// every image processed with the same form model.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateModel {
    /// Reference origin relative to the background-image anchor.
    pub reference: [f32; 2],
    pub tables: Vec<TemplateField>,
    pub cells: Vec<TemplateField>,
}

/// Reads and parses a master template file.
pub fn parse_model(path: &Path) -> Result<TemplateModel, FormError> {
    let text = fs::read_to_string(path).map_err(|source| FormError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_model_str(&text).map_err(|reason| FormError::MalformedTemplate {
        path: path.to_path_buf(),
        reason,
    })
}

fn attr_f32(node: Node<'_, '_>, name: &str) -> Result<f32, String> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| format!("<{}> missing attribute '{name}'", node.tag_name().name()))?;
    raw.trim()
        .parse::<f32>()
        .map_err(|_| format!("attribute '{name}' is not a number: {raw:?}"))
}

fn parse_model_str(text: &str) -> Result<TemplateModel, String> {
    let doc = Document::parse(text).map_err(|e| e.to_string())?;

    let mut reference: Option<[f32; 2]> = None;
    let mut raw_fields: Vec<(FieldKind, String, [f32; 4])> = Vec::new();

    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "rect")
    {
        // Labels live in an editor namespace; match by local name.
        let label = node
            .attributes()
            .find(|a| a.name() == "label")
            .map(|a| a.value().trim_start())
            .unwrap_or("");
        if label == "REFERENCIA" {
            reference = Some([attr_f32(node, "x")?, attr_f32(node, "y")?]);
            continue;
        }
        let kind = if label.starts_with("TABLA") {
            FieldKind::Table
        } else if label.starts_with("CELDA") {
            FieldKind::Cell
        } else {
            continue;
        };
        let id = node.attribute("id").unwrap_or("").trim_start().to_string();
        let geom = [
            attr_f32(node, "x")?,
            attr_f32(node, "y")?,
            attr_f32(node, "width")?,
            attr_f32(node, "height")?,
        ];
        raw_fields.push((kind, id, geom));
    }

    let image = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "image")
        .ok_or_else(|| "missing background <image> element".to_string())?;
    let image_anchor = [attr_f32(image, "x")?, attr_f32(image, "y")?];

    let reference = reference.ok_or_else(|| "missing REFERENCIA rectangle".to_string())?;
    let origin = [reference[0] - image_anchor[0], reference[1] - image_anchor[1]];

    let mut tables = Vec::new();
    let mut cells = Vec::new();
    for (kind, id, [x, y, w, h]) in raw_fields {
        let field = TemplateField {
            id,
            kind,
            rect: RectF::new(
                x - image_anchor[0] - origin[0],
                y - image_anchor[1] - origin[1],
                w,
                h,
            ),
        };
        match kind {
            FieldKind::Table => tables.push(field),
            FieldKind::Cell => cells.push(field),
        }
    }

    Ok(TemplateModel {
        reference: origin,
        tables,
        cells,
    })
}
