// Author: Dustin Pilgrim
// License: MIT

use std::convert::Infallible;

use image::DynamicImage;

use quadcrop_core::{ImageSize, Quad};
use quadcrop_engine::Cropper;

/// Copies the quad's axis-aligned bounding box out of the source image.
/// No perspective correction.
pub struct BoundsCropper<'a> {
    pub source: &'a DynamicImage,
}

impl Cropper for BoundsCropper<'_> {
    type Output = DynamicImage;
    type Error = Infallible;

    fn crop(&mut self, image: ImageSize, quad: &Quad) -> Result<DynamicImage, Infallible> {
        let xs = quad.corners().map(|p| p.x.clamp(0, image.width));
        let ys = quad.corners().map(|p| p.y.clamp(0, image.height));

        let x0 = xs.iter().copied().min().unwrap_or(0);
        let x1 = xs.iter().copied().max().unwrap_or(image.width);
        let y0 = ys.iter().copied().min().unwrap_or(0);
        let y1 = ys.iter().copied().max().unwrap_or(image.height);

        // corners are inclusive; keep at least one pixel
        let w = (x1 - x0).max(1) as u32;
        let h = (y1 - y0).max(1) as u32;
        Ok(self.source.crop_imm(x0 as u32, y0 as u32, w, h))
    }
}
