//! Registration of widget surfaces as egui textures.

use crystal_renderer::WgpuDriver;

/// egui texture mirroring a driver's offscreen surface.
#[derive(Debug, Default)]
pub struct SurfaceTexture {
    id: Option<egui::TextureId>,
    generation: Option<u64>,
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-register the surface if the driver replaced it since the last call.
    pub fn sync(
        &mut self,
        driver: &WgpuDriver,
        render_state: &egui_wgpu::RenderState,
    ) -> Option<egui::TextureId> {
        if self.generation == Some(driver.generation()) {
            return self.id;
        }

        let mut renderer = render_state.renderer.write();
        if let Some(old) = self.id.take() {
            renderer.free_texture(&old);
        }
        self.id = driver.target_view().map(|view| {
            renderer.register_native_texture(&render_state.device, view, wgpu::FilterMode::Linear)
        });
        self.generation = Some(driver.generation());

        tracing::trace!("Surface texture now {:?}", self.id);
        self.id
    }

    pub fn free(&mut self, render_state: &egui_wgpu::RenderState) {
        if let Some(id) = self.id.take() {
            render_state.renderer.write().free_texture(&id);
        }
        self.generation = None;
    }
}
