use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::collections::BTreeMap;
use tableau_assets::{AssetError, DecodedImage, TextureBackend, TextureHandle, mip_level_count};

/// One level of a mip chain, RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Reject extents the device cannot allocate before anything is uploaded.
pub fn check_extent(width: u32, height: u32, max_dimension: u32) -> Result<(), AssetError> {
    if width == 0 || height == 0 {
        return Err(AssetError::Upload(format!("empty image ({width}x{height})")));
    }
    if width.max(height) > max_dimension {
        return Err(AssetError::Upload(format!(
            "{width}x{height} exceeds the device limit of {max_dimension} pixels per side"
        )));
    }
    Ok(())
}

/// Full mip chain for an RGBA8 image, level 0 first, down to 1x1.
pub fn mip_chain(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<MipLevel>, AssetError> {
    let base = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        AssetError::Upload(format!("pixel buffer does not match {width}x{height} RGBA"))
    })?;
    let count = mip_level_count(width, height);
    let mut levels = Vec::with_capacity(count as usize);
    let mut current = base;
    for level in 0..count {
        if level > 0 {
            let w = (current.width() / 2).max(1);
            let h = (current.height() / 2).max(1);
            current = imageops::resize(&current, w, h, FilterType::Triangle);
        }
        levels.push(MipLevel {
            width: current.width(),
            height: current.height(),
            pixels: current.as_raw().clone(),
        });
    }
    Ok(levels)
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU textures, their slot bindings and the shared sampler.
///
/// Each texture owns a bind group for group 2 of the scene pipeline, so
/// "binding to a slot" is just recording which bind group a slot selects.
pub struct TextureStore {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: BTreeMap<TextureHandle, GpuTexture>,
    slots: BTreeMap<usize, TextureHandle>,
    fallback: GpuTexture,
    max_dimension: u32,
    next_id: u32,
}

impl TextureStore {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Repeat so UV scales above 1 tile the texture.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white = MipLevel {
            width: 1,
            height: 1,
            pixels: vec![u8::MAX; 4],
        };
        let fallback = upload(device, queue, &layout, &sampler, "fallback_texture", &[white]);

        Self {
            layout,
            sampler,
            textures: BTreeMap::new(),
            slots: BTreeMap::new(),
            fallback,
            max_dimension: device.limits().max_texture_dimension_2d,
            next_id: 0,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for a sampler slot. Negative or unbound slots get the
    /// white fallback.
    pub fn bind_group(&self, slot: i32) -> &wgpu::BindGroup {
        usize::try_from(slot)
            .ok()
            .and_then(|s| self.slots.get(&s))
            .and_then(|handle| self.textures.get(handle))
            .map_or(&self.fallback.bind_group, |t| &t.bind_group)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn bound_slots(&self) -> usize {
        self.slots.len()
    }

    /// A [`TextureBackend`] that uploads into this store.
    pub fn backend<'a>(
        &'a mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
    ) -> WgpuTextureBackend<'a> {
        WgpuTextureBackend {
            device,
            queue,
            store: self,
        }
    }
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    levels: &[MipLevel],
) -> GpuTexture {
    let (width, height) = levels
        .first()
        .map_or((1, 1), |l| (l.width, l.height));
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: levels.len().max(1) as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (level, mip) in levels.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: level as u32,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &mip.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * mip.width),
                rows_per_image: Some(mip.height),
            },
            wgpu::Extent3d {
                width: mip.width,
                height: mip.height,
                depth_or_array_layers: 1,
            },
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    GpuTexture {
        texture,
        bind_group,
    }
}

/// Borrowed device, queue and store, for the duration of a load.
pub struct WgpuTextureBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    store: &'a mut TextureStore,
}

impl TextureBackend for WgpuTextureBackend<'_> {
    fn create_texture(
        &mut self,
        image: &DecodedImage,
        label: &str,
    ) -> Result<TextureHandle, AssetError> {
        check_extent(image.width, image.height, self.store.max_dimension)?;
        let rgba = image.to_rgba8().ok_or_else(|| {
            AssetError::Upload(format!("{} channel images cannot be uploaded", image.channels))
        })?;
        let levels = mip_chain(image.width, image.height, rgba)?;

        let store = &mut *self.store;
        let gpu = upload(
            self.device,
            self.queue,
            &store.layout,
            &store.sampler,
            label,
            &levels,
        );
        store.next_id += 1;
        let handle = TextureHandle(store.next_id);
        store.textures.insert(handle, gpu);
        tracing::debug!(
            "uploaded '{label}' as {handle:?} with {} mip levels",
            levels.len()
        );
        Ok(handle)
    }

    fn bind(&mut self, slot: usize, handle: TextureHandle) {
        if !self.store.textures.contains_key(&handle) {
            tracing::warn!("cannot bind unknown texture {handle:?} to slot {slot}");
            return;
        }
        self.store.slots.insert(slot, handle);
    }

    fn release(&mut self, handle: TextureHandle) {
        match self.store.textures.remove(&handle) {
            Some(gpu) => {
                gpu.texture.destroy();
                self.store.slots.retain(|_, bound| *bound != handle);
            }
            None => tracing::warn!("release of unknown texture {handle:?}"),
        }
    }
}
