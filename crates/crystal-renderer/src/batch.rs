//! Draw batching.
//!
//! Visible objects are grouped by pipeline state and geometry so each group
//! is a single instanced draw. Groups are ordered opaque, then alpha, then
//! additive; within a group, scene order is kept.

use std::ops::Range;

use crystal_core::Frame;
use crystal_core::resources::{BlendMode, GeometryHandle, MaterialParams, Side};

use crate::vertex::ObjectInstance;

/// Fixed-function state a material needs from its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub blend: BlendMode,
    pub side: Side,
    pub depth_write: bool,
}

impl PipelineKey {
    pub fn for_material(material: &MaterialParams) -> Self {
        Self {
            blend: material.blend,
            side: material.side,
            depth_write: material.depth_write,
        }
    }

    fn sort_key(&self) -> (i32, u8, bool) {
        let side = match self.side {
            Side::Front => 0,
            Side::Back => 1,
            Side::Double => 2,
        };
        (self.blend.sort_order(), side, !self.depth_write)
    }
}

/// One instanced draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub key: PipelineKey,
    pub geometry: GeometryHandle,
    pub instances: Range<u32>,
}

pub fn instance_for(transform: glam::Mat4, material: &MaterialParams) -> ObjectInstance {
    ObjectInstance {
        model: transform.to_cols_array_2d(),
        color: material.rgba(),
        surface: [
            material.metalness,
            material.roughness,
            material.clearcoat,
            material.iridescence,
        ],
        extra: [
            material.transmission,
            if material.unlit { 1.0 } else { 0.0 },
            0.0,
            0.0,
        ],
    }
}

/// Fill `instances` with per-object data and return the batches drawing them.
pub fn collect_batches(frame: &Frame<'_>, instances: &mut Vec<ObjectInstance>) -> Vec<DrawBatch> {
    instances.clear();

    let mut entries: Vec<(PipelineKey, GeometryHandle, ObjectInstance)> = frame
        .scene
        .objects()
        .iter()
        .filter(|object| object.visible)
        .filter_map(|object| {
            let material = frame.resources.material(object.material)?;
            frame.resources.geometry(object.geometry)?;
            Some((
                PipelineKey::for_material(material),
                object.geometry,
                instance_for(object.transform.to_mat4(), material),
            ))
        })
        .collect();

    entries.sort_by_key(|(key, geometry, _)| (key.sort_key(), *geometry));

    let mut batches: Vec<DrawBatch> = Vec::new();
    for (key, geometry, instance) in entries {
        let index = instances.len() as u32;
        instances.push(instance);
        match batches.last_mut() {
            Some(batch) if batch.key == key && batch.geometry == geometry => {
                batch.instances.end = index + 1;
            }
            _ => batches.push(DrawBatch {
                key,
                geometry,
                instances: index..index + 1,
            }),
        }
    }
    batches
}
