use std::path::Path;

pub fn write_test_png(path: &Path, width: u32, height: u32) {
    image::RgbaImage::from_pixel(width, height, image::Rgba([120, 120, 120, 255]))
        .save(path)
        .expect("write test png");
}
