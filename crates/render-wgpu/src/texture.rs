use deskscene_assets::DecodedTexture;

/// An uploaded texture with its bind group for the lit pipeline.
pub(crate) struct GpuTexture {
    pub bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

impl GpuTexture {
    /// Upload the full mip chain as RGBA8. RGB sources are expanded first;
    /// wgpu has no three-channel texture format.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        decoded: &DecodedTexture,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let levels = decoded.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(decoded.name.as_str()),
            size: wgpu::Extent3d {
                width: decoded.width,
                height: decoded.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, image) in levels.iter().enumerate() {
            let (width, height) = image.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * 4),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
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

        tracing::debug!(
            "uploaded {} ({}x{}, {:?}, {} mips)",
            decoded.name,
            decoded.width,
            decoded.height,
            decoded.format,
            levels.len()
        );

        Self {
            bind_group,
            _texture: texture,
        }
    }
}

/// Linear filtering within the base level, repeat wrapping.
///
/// The lod clamp pins sampling to level 0, the way a plain `LINEAR`
/// minification filter ignores an attached mip chain.
pub(crate) fn sampler_descriptor() -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("texture_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_max_clamp: 0.0,
        ..Default::default()
    }
}

pub(crate) fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&sampler_descriptor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_reads_base_level_only() {
        let desc = sampler_descriptor();
        assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.lod_max_clamp, 0.0);
    }

    #[test]
    fn sampler_repeats_on_every_axis() {
        let desc = sampler_descriptor();
        for mode in [desc.address_mode_u, desc.address_mode_v, desc.address_mode_w] {
            assert_eq!(mode, wgpu::AddressMode::Repeat);
        }
    }
}
