//! The local image set, scanned once per build.

use super::{AssetError, ImageFormat, ImageMetadata};
use crate::{config::ImagesConfig, debug, utils::path::to_slash_key};
use rustc_hash::FxHashMap;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Lazily reads one image's metadata.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    path: PathBuf,
    src: String,
}

impl ImageLoader {
    /// Read dimensions and format on the blocking pool.
    pub async fn load(&self) -> Result<ImageMetadata, AssetError> {
        let path = self.path.clone();
        let src = self.src.clone();
        tokio::task::spawn_blocking(move || read_metadata(path, src)).await?
    }
}

/// Decode only the image header.
fn read_metadata(path: PathBuf, src: String) -> Result<ImageMetadata, AssetError> {
    let io_err = |err: io::Error| AssetError::Io(path.clone(), err);

    let size = fs::metadata(&path).map_err(io_err)?.len();
    let reader = image::ImageReader::open(&path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;

    let format = reader
        .format()
        .and_then(ImageFormat::from_image)
        .ok_or_else(|| AssetError::UnsupportedFormat(path.clone()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;

    Ok(ImageMetadata {
        src,
        path,
        width,
        height,
        format,
        size,
    })
}

/// Immutable map from lookup key to loader.
///
/// Keys are root-relative with a leading slash, e.g.
/// `/src/assets/posts/images/cat.png`. Only direct children of the image
/// directory are indexed.
#[derive(Debug, Default)]
pub struct AssetIndex {
    images: FxHashMap<String, ImageLoader>,
    pattern: String,
}

impl AssetIndex {
    /// Scan `root/<images.dir>` once.
    ///
    /// A missing directory gives an empty index: every lookup then fails with
    /// [`AssetError::NotFound`].
    pub fn scan(images: &ImagesConfig, root: &Path) -> Result<Self, AssetError> {
        let dir = root.join(&images.dir);
        let mut index = Self {
            images: FxHashMap::default(),
            pattern: images.pattern(),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("images"; "image directory {} does not exist", dir.display());
                return Ok(index);
            }
            Err(err) => return Err(AssetError::Io(dir, err)),
        };

        for entry in entries {
            let entry = entry.map_err(|err| AssetError::Io(dir.clone(), err))?;
            let path = entry.path();
            if !path.is_file() || !images.matches_extension(&path) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let key = to_slash_key(&images.dir.join(&file_name));
            debug!("images"; "indexed {}", key);
            index.images.insert(
                key,
                ImageLoader {
                    path,
                    src: images.url_for(&file_name),
                },
            );
        }

        Ok(index)
    }

    pub fn get(&self, key: &str) -> Option<&ImageLoader> {
        self.images.get(key)
    }

    /// Glob-style description of the indexed set.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ImagesConfig) {
        let root = TempDir::new().unwrap();
        let images = ImagesConfig::default();
        fs::create_dir_all(root.path().join(&images.dir)).unwrap();
        (root, images)
    }

    #[test]
    fn test_scan_direct_children_only() {
        let (root, images) = setup();
        let dir = root.path().join(&images.dir);
        image::RgbImage::new(2, 2).save(dir.join("cat.png")).unwrap();
        image::RgbImage::new(2, 2).save(dir.join("DOG.JPG")).unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        image::RgbImage::new(2, 2).save(dir.join("nested/deep.png")).unwrap();

        let index = AssetIndex::scan(&images, root.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.get("/src/assets/posts/images/cat.png").is_some());
        assert!(index.get("/src/assets/posts/images/DOG.JPG").is_some());
        assert!(index.get("/src/assets/posts/images/nested/deep.png").is_none());
        assert!(index.get("src/assets/posts/images/cat.png").is_none());
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let root = TempDir::new().unwrap();
        let index = AssetIndex::scan(&ImagesConfig::default(), root.path()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.pattern(), "/src/assets/posts/images/*.{jpeg,jpg,png,gif}");
    }

    #[tokio::test]
    async fn test_loader_reads_header() {
        let (root, images) = setup();
        let file = root.path().join(&images.dir).join("wide.gif");
        image::RgbaImage::new(5, 3).save(&file).unwrap();

        let index = AssetIndex::scan(&images, root.path()).unwrap();
        let meta = index
            .get("/src/assets/posts/images/wide.gif")
            .unwrap()
            .load()
            .await
            .unwrap();
        assert_eq!((meta.width, meta.height), (5, 3));
        assert_eq!(meta.format, ImageFormat::Gif);
        assert_eq!(meta.src, "/images/wide.gif");
        assert_eq!(meta.size, fs::metadata(&file).unwrap().len());
    }

    #[tokio::test]
    async fn test_loader_rejects_corrupt_file() {
        let (root, images) = setup();
        fs::write(root.path().join(&images.dir).join("broken.png"), "not a png").unwrap();

        let index = AssetIndex::scan(&images, root.path()).unwrap();
        let err = index
            .get("/src/assets/posts/images/broken.png")
            .unwrap()
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }), "got {err}");
    }
}
