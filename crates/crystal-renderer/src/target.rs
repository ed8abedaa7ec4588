//! Offscreen square render target.

use crate::constants::{CLEAR_COLOR, DEPTH_FORMAT, SAMPLE_COUNT};

/// Colour and depth attachments of one widget surface.
///
/// Views keep their textures alive, so only the views are held.
pub struct RenderTarget {
    /// Single-sample texture the host samples from.
    view: wgpu::TextureView,
    /// Multisampled colour attachment resolved into `view`; `None` when MSAA is off.
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
    edge: u32,
}

fn square(edge: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: edge.max(1),
        height: edge.max(1),
        depth_or_array_layers: 1,
    }
}

/// Create the multisampled colour view, or `None` if SAMPLE_COUNT <= 1.
fn create_msaa_view(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    edge: u32,
) -> Option<wgpu::TextureView> {
    if SAMPLE_COUNT <= 1 {
        return None;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Widget MSAA Surface"),
        size: square(edge),
        mip_level_count: 1,
        sample_count: SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
}

impl RenderTarget {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, edge: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Widget Surface"),
            size: square(edge),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Widget Depth"),
            size: square(edge),
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            view,
            msaa_view: create_msaa_view(device, format, edge),
            depth_view,
            edge,
        }
    }

    /// The resolved surface, ready to be sampled.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Colour attachment for a render pass: the MSAA view resolving into the
    /// surface, or the surface itself without MSAA.
    pub fn color_attachment(&self) -> wgpu::RenderPassColorAttachment<'_> {
        let (view, resolve_target, store) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&self.view), wgpu::StoreOp::Discard),
            None => (&self.view, None, wgpu::StoreOp::Store),
        };
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store,
            },
        }
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }
}
