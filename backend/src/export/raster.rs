use super::{RenderSurface, Rasterizer, SurfaceHandle};
use crate::data_url;
use crate::error::ExportError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Decodes a PNG/JPEG snapshot sent as a data URL, upsamples it and flattens
/// any transparency onto a solid background.
pub struct DataUrlRasterizer {
    pub scale: u32,
    pub background: [u8; 3],
}

impl Default for DataUrlRasterizer {
    fn default() -> Self {
        Self {
            scale: 2,
            background: [255, 255, 255],
        }
    }
}

impl Rasterizer for DataUrlRasterizer {
    fn rasterize(&self, surface: &SurfaceHandle) -> Result<RenderSurface, ExportError> {
        let (_, bytes) = data_url::decode(&surface.0).map_err(ExportError::Rasterization)?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| ExportError::Rasterization(e.to_string()))?;
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Err(ExportError::EmptySurface);
        }

        let scaled: DynamicImage = if self.scale > 1 {
            img.resize_exact(w * self.scale, h * self.scale, FilterType::Triangle)
        } else {
            img
        };

        let rgba = scaled.to_rgba8();
        let (sw, sh) = rgba.dimensions();
        let [r, g, b] = self.background;
        let mut background = RgbaImage::from_pixel(sw, sh, Rgba([r, g, b, 255]));
        image::imageops::overlay(&mut background, &rgba, 0, 0);

        Ok(RenderSurface {
            pixels: DynamicImage::ImageRgba8(background).to_rgb8(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    fn snapshot(img: RgbaImage) -> SurfaceHandle {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        SurfaceHandle(data_url::encode("image/png", &out.into_inner()))
    }

    #[test]
    fn doubles_and_flattens_onto_white() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 0]));
        let surface = DataUrlRasterizer::default().rasterize(&snapshot(img)).unwrap();
        assert_eq!((surface.width(), surface.height()), (6, 4));
        assert_eq!(surface.pixels.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn garbage_is_a_rasterization_error() {
        let err = DataUrlRasterizer::default()
            .rasterize(&SurfaceHandle("data:image/png;base64,AAAA".to_string()))
            .unwrap_err();
        assert!(matches!(err, ExportError::Rasterization(_)));
    }
}
