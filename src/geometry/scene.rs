use crate::foundation::core::DMat4;
use crate::foundation::error::{PrimkitError, PrimkitResult};
use crate::geometry::framing::{Framing, frame};
use crate::geometry::mesh::{Aabb, LocalMesh};
use crate::geometry::primitive::build;
use crate::geometry::transform::compose;
use crate::scene::model::{Color, PrimitiveKind, ScenePlan};

/// One object resolved into world-placed geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectGeometry {
    /// Object name from the plan.
    pub name: String,
    /// Resolved primitive type.
    pub kind: PrimitiveKind,
    /// Surface color.
    pub color: Color,
    /// Local-space mesh.
    pub mesh: LocalMesh,
    /// Local-to-world pose.
    pub pose: DMat4,
    /// Bounds of the posed mesh.
    pub world_bounds: Aabb,
}

/// Everything a renderer adapter needs to draw a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGeometry {
    /// Objects in plan order.
    pub objects: Vec<ObjectGeometry>,
    /// Camera placement.
    pub camera: Framing,
    /// Clear color.
    pub background: Color,
    /// Output size in pixels.
    pub resolution: (u32, u32),
}

impl SceneGeometry {
    /// Union of every object's world bounds.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::union_all(self.objects.iter().map(|o| o.world_bounds))
    }

    /// Total triangle count.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}

/// Apply the primitive builder, transform composer and framer to every object of a plan.
///
/// Objects with unsupported types are skipped. The camera is auto-framed unless the plan's
/// camera has an explicit `look_at`, in which case it sits at the camera location.
#[tracing::instrument(skip(plan), fields(objects = plan.objects.len()))]
pub fn compile_scene(plan: &ScenePlan) -> PrimkitResult<SceneGeometry> {
    let mut objects = Vec::with_capacity(plan.objects.len());
    for o in &plan.objects {
        let Some(kind) = o.kind.primitive() else {
            tracing::debug!(name = %o.name, "skipping unsupported object");
            continue;
        };
        let mesh = build(&o.kind, &o.dimensions)
            .map_err(|e| in_object(&o.name, e))?
            .ok_or_else(|| PrimkitError::geometry(format!("object '{}': no geometry", o.name)))?;
        let pose = compose(&o.transform);
        let world_bounds = mesh
            .transformed_bounds(&pose)
            .ok_or_else(|| PrimkitError::geometry(format!("object '{}': empty mesh", o.name)))?;
        objects.push(ObjectGeometry {
            name: o.name.clone(),
            kind,
            color: o.color,
            mesh,
            pose,
            world_bounds,
        });
    }

    let camera = match plan.camera.look_at {
        Some(target) => Framing::looking_at(plan.camera.transform.location.into(), target.into()),
        None => {
            let bounds: Vec<Aabb> = objects.iter().map(|o| o.world_bounds).collect();
            frame(&bounds)
        }
    };

    tracing::debug!(eye = ?camera.eye, distance = camera.distance, "camera placed");

    Ok(SceneGeometry {
        objects,
        camera,
        background: plan.render.background_color,
        resolution: (plan.render.resolution_x, plan.render.resolution_y),
    })
}

fn in_object(name: &str, e: PrimkitError) -> PrimkitError {
    match e {
        PrimkitError::Validation(m) => PrimkitError::validation(format!("object '{name}': {m}")),
        PrimkitError::Geometry(m) => PrimkitError::geometry(format!("object '{name}': {m}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scene.rs"]
mod tests;
