// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh and material input types

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Minimum index count before triangle extraction goes parallel
const PARALLEL_THRESHOLD: usize = 3 * 4096;

/// One triangle as three world-space corners
pub type Triangle = [Point3<f64>; 3];

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleMesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check buffer shapes, index ranges and coordinate finiteness.
    ///
    /// A mesh that passes can be traversed without dropping a triangle.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::PositionCountNotMultipleOfThree {
                len: self.positions.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::IndexCountNotMultipleOfThree {
                len: self.indices.len(),
            });
        }
        if self.indices.is_empty() {
            return Err(Error::EmptyMesh("mesh has no triangles".to_string()));
        }
        if let Some(i) = self.positions.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteCoordinate(format!("vertex {}", i / 3)));
        }

        let vertex_count = self.vertex_count();
        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(Error::IndexOutOfRange {
                slot,
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    #[inline]
    fn vertex(&self, index: u32) -> Point3<f64> {
        let base = index as usize * 3;
        Point3::new(
            self.positions[base] as f64,
            self.positions[base + 1] as f64,
            self.positions[base + 2] as f64,
        )
    }

    /// Validate, then resolve every triangle in index-buffer order.
    ///
    /// Shared vertices are resolved once per triangle that uses them.
    pub fn triangles(&self) -> Result<Vec<Triangle>> {
        self.validate()?;
        let corners = |tri: &[u32]| [self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])];
        let triangles = if self.indices.len() >= PARALLEL_THRESHOLD {
            self.indices.par_chunks_exact(3).map(corners).collect()
        } else {
            self.indices.chunks_exact(3).map(corners).collect()
        };
        Ok(triangles)
    }
}

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Surface material of one mesh
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Without a color no style is written for the mesh
    pub color: Option<Color>,
    /// 1 is fully opaque
    #[cfg_attr(feature = "serde", serde(default = "default_opacity"))]
    pub opacity: f64,
}

#[cfg(feature = "serde")]
fn default_opacity() -> f64 {
    1.0
}

impl Material {
    pub fn new(color: Color, opacity: f64) -> Self {
        Self {
            color: Some(color),
            opacity,
        }
    }

    /// Transparency as written to the shading record: `1 - opacity`
    #[inline]
    pub fn transparency(&self) -> f64 {
        1.0 - self.opacity
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::InvalidMaterial(format!(
                "opacity {} outside [0, 1]",
                self.opacity
            )));
        }
        if let Some(c) = self.color {
            if [c.r, c.g, c.b].iter().any(|v| !(0.0..=1.0).contains(v)) {
                return Err(Error::InvalidMaterial(format!(
                    "color ({}, {}, {}) outside [0, 1]",
                    c.r, c.g, c.b
                )));
            }
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[rustfmt::skip]
    fn quad() -> TriangleMesh {
        TriangleMesh::new(
            vec![
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                1.0, 1.0, 0.0,
                0.0, 1.0, 0.0,
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_triangles_resolve_shared_vertices_per_triangle() {
        let triangles = quad().triangles().unwrap();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0][0], triangles[1][0]);
        assert_eq!(triangles[1][2], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rejects_partial_triangle() {
        let mut mesh = quad();
        mesh.indices.push(1);
        assert!(matches!(
            mesh.validate(),
            Err(Error::IndexCountNotMultipleOfThree { len: 7 })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mut mesh = quad();
        mesh.indices[4] = 4;
        assert!(matches!(
            mesh.triangles(),
            Err(Error::IndexOutOfRange {
                slot: 4,
                index: 4,
                vertex_count: 4
            })
        ));
    }

    #[test]
    fn test_rejects_empty_and_malformed_positions() {
        assert!(matches!(
            TriangleMesh::default().validate(),
            Err(Error::EmptyMesh(_))
        ));
        let mut mesh = quad();
        mesh.positions.pop();
        assert!(matches!(
            mesh.validate(),
            Err(Error::PositionCountNotMultipleOfThree { len: 11 })
        ));
        let mut mesh = quad();
        mesh.positions[5] = f32::NAN;
        assert!(matches!(
            mesh.validate(),
            Err(Error::NonFiniteCoordinate(_))
        ));
    }

    #[test]
    fn test_large_mesh_keeps_order() {
        let n = 10_000u32;
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for i in 0..n {
            positions.extend_from_slice(&[i as f32, 0.0, 0.0]);
            positions.extend_from_slice(&[i as f32, 1.0, 0.0]);
            positions.extend_from_slice(&[i as f32, 0.0, 1.0]);
            indices.extend_from_slice(&[3 * i, 3 * i + 1, 3 * i + 2]);
        }
        let triangles = TriangleMesh::new(positions, indices).triangles().unwrap();
        assert_eq!(triangles.len(), n as usize);
        for (i, tri) in triangles.iter().enumerate() {
            assert_eq!(tri[0].x, i as f64);
        }
    }

    #[test]
    fn test_transparency_inverts_opacity() {
        let material = Material::new(Color::new(1.0, 0.0, 0.0), 0.25);
        assert_relative_eq!(material.transparency(), 0.75);
        assert_relative_eq!(1.0 - material.transparency(), 0.25);
    }

    #[test]
    fn test_material_validation() {
        assert!(Material::new(Color::new(0.5, 0.5, 0.5), 1.0).validate().is_ok());
        assert!(Material::new(Color::new(0.5, 0.5, 0.5), 1.5).validate().is_err());
        assert!(Material::new(Color::new(2.0, 0.5, 0.5), 0.5).validate().is_err());
        assert!(Material::new(Color::new(0.5, 0.5, 0.5), f64::NAN).validate().is_err());
    }
}
