use crate::AssetError;
use crate::decode::DecodedImage;

/// Backend-assigned identifier for an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// A registered texture: tag, GPU handle and the slot it binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTexture {
    pub tag: String,
    pub handle: TextureHandle,
    pub slot: usize,
}

/// GPU side of texture registration.
pub trait TextureBackend {
    /// Allocate a texture, upload `image` (3 or 4 channels) and generate its
    /// mip chain.
    fn create_texture(
        &mut self,
        image: &DecodedImage,
        label: &str,
    ) -> Result<TextureHandle, AssetError>;

    /// Make `handle` the texture sampled from unit `slot`.
    fn bind(&mut self, slot: usize, handle: TextureHandle);

    /// Free the texture. The handle is invalid afterwards.
    fn release(&mut self, handle: TextureHandle);
}

/// Number of mip levels down to 1x1 for a `width` x `height` image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}
