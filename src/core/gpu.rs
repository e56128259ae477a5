use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};
use winit::window::Window;

/// Shared GPU handle: device and queue behind Arcs so the presenter can
/// clone it cheaply.
///
/// Any failure here (no adapter, no device, surface creation refused) is the
/// "graphics capability unavailable" case: the caller degrades to rendering
/// no backdrop at all instead of failing the host.
#[derive(Clone)]
pub struct GpuContext {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a surface for the window plus a context whose adapter is
    /// compatible with it. Surface and adapter must come from the same
    /// instance. The adapter is returned so the caller can query surface
    /// capabilities.
    pub async fn for_window(window: Arc<Window>) -> Result<(Self, Surface<'static>, Adapter)> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create render surface")?;

        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        Ok((
            Self {
                device: Arc::new(device),
                queue: Arc::new(queue),
            },
            surface,
            adapter,
        ))
    }

    /// Get reference to the device
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Get reference to the queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Request adapter with surface compatibility
    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("no compatible graphics adapter: {e:?}"))
    }

    /// Request device and queue
    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: Features::empty(),
                required_limits: Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| anyhow!("failed to create device: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_semantics() {
        // Arc-backed clone is the whole point of the type (compile-time check)
        fn assert_clone<T: Clone>() {}
        assert_clone::<GpuContext>();
    }
}
