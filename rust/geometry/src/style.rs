// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material styling
//!
//! colour → shading → surface style → presentation style assignment,
//! attached to a representation item through a styled item.

use ifc_export_core::{
    ColourRgb, EntityId, EntityWriter, PresentationStyleAssignment, RecordSink, StyledItem,
    SurfaceSide, SurfaceStyle, SurfaceStyleShading,
};

use crate::error::Result;
use crate::mesh::Material;

/// Name written on generated surface styles
pub const STYLE_NAME: &str = "material";

/// Write the style chain for `material`.
///
/// Returns the presentation style assignment, or `None` when the material
/// has no color (nothing is written then).
pub fn presentation_style<S: RecordSink>(
    w: &mut EntityWriter<S>,
    material: &Material,
) -> Result<Option<EntityId>> {
    let color = match material.color {
        Some(color) => color,
        None => return Ok(None),
    };
    material.validate()?;

    let surface_colour = w.add(ColourRgb {
        name: None,
        red: color.r,
        green: color.g,
        blue: color.b,
    })?;
    let shading = w.add(SurfaceStyleShading {
        surface_colour,
        transparency: material.transparency(),
    })?;
    let style = w.add(SurfaceStyle {
        name: Some(STYLE_NAME.to_string()),
        side: SurfaceSide::Both,
        styles: vec![shading],
    })?;
    let assignment = w.add(PresentationStyleAssignment {
        styles: vec![style],
    })?;
    Ok(Some(assignment))
}

/// Style `item` with `material`; returns the styled item if one was written
pub fn style_item<S: RecordSink>(
    w: &mut EntityWriter<S>,
    item: EntityId,
    material: &Material,
) -> Result<Option<EntityId>> {
    let assignment = match presentation_style(w, material)? {
        Some(assignment) => assignment,
        None => return Ok(None),
    };
    let styled = w.add(StyledItem {
        item: Some(item),
        styles: vec![assignment],
        name: None,
    })?;
    Ok(Some(styled))
}
