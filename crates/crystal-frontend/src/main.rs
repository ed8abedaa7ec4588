//! Crystal Scenes native host

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "crystal_frontend=debug,crystal_core=info,crystal_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Crystal Scenes");

    // Widget surfaces stay within downlevel limits so software adapters work too
    let wgpu_options = egui_wgpu::WgpuConfiguration {
        wgpu_setup: egui_wgpu::WgpuSetup::CreateNew {
            supported_backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            power_preference: wgpu::PowerPreference::LowPower,
            device_descriptor: std::sync::Arc::new(|adapter| wgpu::DeviceDescriptor {
                label: Some("crystal-scenes device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            }),
        },
        ..Default::default()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1320.0, 560.0])
            .with_min_inner_size([640.0, 360.0])
            .with_title("Crystal Scenes"),
        wgpu_options,
        ..Default::default()
    };

    eframe::run_native(
        "crystal-scenes",
        native_options,
        Box::new(|cc| Ok(Box::new(crystal_frontend::CrystalApp::new(cc)))),
    )
}
