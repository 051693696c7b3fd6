//! Scene building: vector paths in, one named group of extruded meshes out.
//!
//! Each closed subpath of a [`PathDocument`] path becomes a ring. Rings of the
//! same path are paired up by the path's fill rule (nonzero unless the path
//! says `evenodd`): a ring with empty space outside and fill inside starts a
//! shape, and a ring with fill outside and empty space inside is a hole of the
//! innermost shape around it. Every resulting shape is extruded into its own [`Mesh`]; all meshes share a
//! single [`Material`] and live in one [`Model3D`].

use glam::{DVec2, DVec3};
use vectorize::geometry::{self, Point2};
use vectorize::{FillRule, PathDocument, PathElement};

use crate::consts::{MATERIAL_COLOR, MATERIAL_SHININESS, MATERIAL_SPECULAR, MODEL_GROUP_NAME};
use crate::extrude::{self, ExtrudeError, ExtrudeOptions, Mesh, Shape};

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

/// Rings closer than this are treated as coincident points.
const RING_TOLERANCE: f64 = 1e-9;

/// Error returned by [`build`].
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A shape of the given path could not be extruded.
    #[error("path {path}: {source}")]
    Extrude {
        path: usize,
        #[source]
        source: ExtrudeError,
    },
}

/// Phong surface shared by every mesh of a model.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse colour as `0xRRGGBB`.
    pub color: u32,
    /// Specular colour as `0xRRGGBB`.
    pub specular: u32,
    pub shininess: f64,
    /// Front and back faces are both lit and drawn.
    pub double_sided: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: MATERIAL_COLOR,
            specular: MATERIAL_SPECULAR,
            shininess: MATERIAL_SHININESS,
            double_sided: true,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self { min: b.min.min(p), max: b.max.max(p) }))
    }

    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// The box after uniform `scale` about the origin followed by `offset`.
    #[must_use]
    pub fn transformed(&self, scale: f64, offset: DVec3) -> Self {
        let a = self.min * scale + offset;
        let b = self.max * scale + offset;
        Self { min: a.min(b), max: a.max(b) }
    }
}

/// A named group of meshes with a uniform scale and a translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Model3D {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub material: Material,
    pub scale: f64,
    pub position: DVec3,
}

impl Model3D {
    /// An empty group with identity transform.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            meshes: Vec::new(),
            material: Material::default(),
            scale: 1.0,
            position: DVec3::ZERO,
        }
    }

    /// Map a mesh-space point into world space.
    #[must_use]
    pub fn to_world(&self, p: DVec3) -> DVec3 {
        p * self.scale + self.position
    }

    /// Bounds of all mesh vertices before the group transform.
    #[must_use]
    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.meshes.iter().flat_map(|m| m.positions.iter().copied()))
    }

    /// Bounds of all mesh vertices after the group transform.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.local_bounds().map(|b| b.transformed(self.scale, self.position))
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles.len()).sum()
    }
}

/// Extrude every shape of `doc` into one [`Model3D`] named `"svgGroup"`.
///
/// An empty document yields a model with no meshes.
///
/// # Errors
///
/// Returns [`SceneError::Extrude`] when a shape cannot be triangulated.
pub fn build(doc: &PathDocument, options: &ExtrudeOptions) -> Result<Model3D, SceneError> {
    let mut model = Model3D::new(MODEL_GROUP_NAME);
    for (path, element) in doc.paths.iter().enumerate() {
        for shape in shapes_from_path(element) {
            let mesh = extrude::extrude(&shape, options).map_err(|source| SceneError::Extrude { path, source })?;
            model.meshes.push(mesh);
        }
    }
    tracing::info!(
        meshes = model.meshes.len(),
        triangles = model.triangle_count(),
        depth = options.depth,
        "built model"
    );
    Ok(model)
}

/// Split one path into shapes using its fill rule.
///
/// Each ring is judged by the winding number just outside and just inside its
/// first vertex. Rings with fill on both sides or on neither side add nothing.
/// Open subpaths are closed implicitly, as fill does. Rings with fewer than
/// three distinct points or zero area are dropped.
#[must_use]
pub fn shapes_from_path(element: &PathElement) -> Vec<Shape> {
    let rings: Vec<Vec<Point2>> = element
        .subpaths
        .iter()
        .map(|s| geometry::dedup_ring(&s.points, RING_TOLERANCE))
        .filter(|r| r.len() >= 3 && geometry::signed_area(r).abs() > RING_TOLERANCE)
        .collect();

    let turns: Vec<i32> = rings
        .iter()
        .map(|r| if geometry::signed_area(r) > 0.0 { 1 } else { -1 })
        .collect();
    let nesting: Vec<Vec<usize>> = rings
        .iter()
        .enumerate()
        .map(|(i, ring)| containers(&rings, i, ring[0]).collect())
        .collect();

    let rule = element.fill_rule;
    let filled = |winding: i32| match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => winding % 2 != 0,
    };
    // (filled just outside, filled just inside) for every ring.
    let sides: Vec<(bool, bool)> = (0..rings.len())
        .map(|i| {
            let outside = match rule {
                FillRule::NonZero => nesting[i].iter().map(|&j| turns[j]).sum(),
                FillRule::EvenOdd => i32::from(nesting[i].len() % 2 == 1),
            };
            let inside = match rule {
                FillRule::NonZero => outside + turns[i],
                FillRule::EvenOdd => outside + 1,
            };
            (filled(outside), filled(inside))
        })
        .collect();
    let is_outer = |i: usize| sides[i] == (false, true);

    let mut shapes: Vec<(usize, Shape)> = Vec::new();
    for (i, ring) in rings.iter().enumerate() {
        if is_outer(i) {
            shapes.push((i, Shape { outer: to_dvec(ring), holes: Vec::new() }));
        }
    }
    for (i, ring) in rings.iter().enumerate() {
        if sides[i] != (true, false) {
            continue;
        }
        let owner = nesting[i]
            .iter()
            .copied()
            .filter(|&j| is_outer(j))
            .max_by_key(|&j| nesting[j].len());
        match owner.and_then(|owner| shapes.iter_mut().find(|(k, _)| *k == owner)) {
            Some((_, shape)) => shape.holes.push(to_dvec(ring)),
            None => tracing::debug!(ring = i, "hole ring has no enclosing shape"),
        }
    }
    shapes.into_iter().map(|(_, shape)| shape).collect()
}

/// Indices of the rings other than `i` that contain `point`.
fn containers(rings: &[Vec<Point2>], i: usize, point: Point2) -> impl Iterator<Item = usize> + '_ {
    rings
        .iter()
        .enumerate()
        .filter(move |&(j, other)| j != i && geometry::contains(other, point))
        .map(|(j, _)| j)
}

fn to_dvec(ring: &[Point2]) -> Vec<DVec2> {
    ring.iter().map(|p| DVec2::new(p.x, p.y)).collect()
}

/// The scene's model slot. Holds at most one model at a time.
#[derive(Debug, Default)]
pub struct SceneGraph {
    active: Option<Model3D>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `model`, returning the model it displaced, if any.
    pub fn replace(&mut self, model: Model3D) -> Option<Model3D> {
        let previous = self.active.replace(model);
        if let Some(old) = &previous {
            tracing::debug!(name = %old.name, "replaced active model");
        }
        previous
    }

    /// Remove and return the active model.
    pub fn clear(&mut self) -> Option<Model3D> {
        self.active.take()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Model3D> {
        self.active.as_ref()
    }

    /// The active model if it carries `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Model3D> {
        self.active.as_ref().filter(|m| m.name == name)
    }
}
