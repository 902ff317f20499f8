use std::path::{Path, PathBuf};

use image::{GrayImage, ImageReader};

use crate::error::AppResult;

pub type ImageSet = Vec<GrayImage>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageLoad {
    pub images: ImageSet,
    pub skipped: usize,
}

/// Decodes every entry of `dir` that is an image, in file name order, and
/// converts it to 8-bit grayscale. Anything that cannot be decoded is
/// counted in `skipped` and otherwise ignored.
pub fn load_images(dir: &Path) -> AppResult<ImageLoad> {
    if !dir.exists() {
        tracing::debug!(path = %dir.display(), "image source absent");
        return Ok(ImageLoad::default());
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    let mut load = ImageLoad::default();
    for path in entries {
        match decode_grayscale(&path) {
            Ok(image) => load.images.push(image),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping undecodable file");
                load.skipped += 1;
            }
        }
    }

    Ok(load)
}

fn decode_grayscale(path: &Path) -> anyhow::Result<GrayImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.to_luma8())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Writes a solid RGB image; the encoder follows the file extension.
    pub(crate) fn write_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 10]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let load = load_images(Path::new("no/such/images")).unwrap();
        assert!(load.images.is_empty());
        assert_eq!(load.skipped, 0);
    }

    #[test]
    fn test_decodable_files_counted_others_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("a.png"), 4, 3);
        write_image(&dir.path().join("b.png"), 2, 2);
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        std::fs::write(dir.path().join("corrupt.png"), [0x89, b'P', b'N', b'G']).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let load = load_images(dir.path()).unwrap();
        assert_eq!(load.images.len(), 2);
        assert_eq!(load.skipped, 3);
    }

    #[test]
    fn test_images_are_grayscale_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("b.png"), 2, 2);
        write_image(&dir.path().join("a.png"), 5, 1);

        let load = load_images(dir.path()).unwrap();
        assert_eq!(load.images[0].dimensions(), (5, 1));
        assert_eq!(load.images[1].dimensions(), (2, 2));
        let luma = load.images[0].get_pixel(0, 0).0[0];
        assert!(luma > 10 && luma < 200, "luma {luma} should blend the channels");
    }

    #[test]
    fn test_non_png_formats_decode() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["site.bmp", "site.tiff", "site.webp", "site.jpg"] {
            write_image(&dir.path().join(name), 2, 2);
        }

        let load = load_images(dir.path()).unwrap();
        assert_eq!(load.images.len(), 4);
        assert_eq!(load.skipped, 0);
    }

    #[test]
    fn test_content_sniffing_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_image(&path, 3, 3);
        std::fs::rename(&path, dir.path().join("photo.bin")).unwrap();

        let load = load_images(dir.path()).unwrap();
        assert_eq!(load.images.len(), 1);
        assert_eq!(load.skipped, 0);
    }
}
