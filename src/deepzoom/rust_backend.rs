//! Pure Rust Deep Zoom backend — no ImageMagick, no system tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image` crate (pure Rust decoders) |
//! | Downsample | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode tiles → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Descriptor / manifest XML | `quick_xml::Writer` (read-back via `quick_xml::Reader`) |
//!
//! Layout per pyramid: `<stem>.xml` descriptor next to a `<stem>_files/`
//! directory holding `<level>/<col>_<row>.jpg` tiles, level 0 being 1x1.
//! The collection manifest lists every descriptor with its full-resolution
//! size; sizes are read back from the descriptor files, so the manifest can
//! be rebuilt without re-decoding any source image.

use super::backend::{BackendError, PyramidBackend};
use super::dzi;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;

const DZI_XMLNS: &str = "http://schemas.microsoft.com/deepzoom/2008";
const DZC_XMLNS: &str = "http://schemas.microsoft.com/deepzoom/2009";
const TILE_FORMAT: &str = "jpg";
const TILE_QUALITY: u8 = 85;

/// Manifest-level constants. The viewer reads per-item pyramids through the
/// descriptors, so the collection declares the conventional 256px/level-7
/// addressing without carrying composite tiles of its own.
const COLLECTION_MAX_LEVEL: u32 = 7;
const COLLECTION_TILE_SIZE: u32 = 256;

/// Pure Rust backend using the `image` crate.
pub struct DeepZoomBackend;

impl DeepZoomBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeepZoomBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("failed to decode {}: {}", path.display(), e))
        })
}

fn save_jpeg_tile(tile: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let file = fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, TILE_QUALITY);
    // JPEG has no alpha channel; flatten unconditionally.
    DynamicImage::ImageRgb8(tile.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("JPEG encode failed for {}: {}", path.display(), e))
        })
}

/// Write a DZI descriptor for one pyramid.
fn write_descriptor(path: &Path, width: u32, height: u32) -> Result<(), BackendError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut image = BytesStart::new("Image");
    image.push_attribute(("TileSize", dzi::TILE_SIZE.to_string().as_str()));
    image.push_attribute(("Overlap", dzi::TILE_OVERLAP.to_string().as_str()));
    image.push_attribute(("Format", TILE_FORMAT));
    image.push_attribute(("xmlns", DZI_XMLNS));
    writer.write_event(Event::Start(image))?;

    let mut size = BytesStart::new("Size");
    size.push_attribute(("Width", width.to_string().as_str()));
    size.push_attribute(("Height", height.to_string().as_str()));
    writer.write_event(Event::Empty(size))?;

    writer.write_event(Event::End(BytesEnd::new("Image")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    fs::write(path, bytes)?;
    Ok(())
}

/// Read the full-resolution size back out of a DZI descriptor.
fn read_descriptor_size(path: &Path) -> Result<(u32, u32), BackendError> {
    let text = fs::read_to_string(path)?;
    let mut reader = Reader::from_str(&text);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Size" => {
                let width = size_attr(&e, "Width", path)?;
                let height = size_attr(&e, "Height", path)?;
                return Ok((width, height));
            }
            Event::Eof => {
                return Err(BackendError::ProcessingFailed(format!(
                    "{}: no Size element in descriptor",
                    path.display()
                )));
            }
            _ => {}
        }
    }
}

fn size_attr(element: &BytesStart, name: &str, path: &Path) -> Result<u32, BackendError> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| BackendError::ProcessingFailed(format!("{}: {}", path.display(), e)))?
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "{}: Size element has no {} attribute",
                path.display(),
                name
            ))
        })?;
    let value = attr
        .unescape_value()
        .map_err(|e| BackendError::ProcessingFailed(format!("{}: {}", path.display(), e)))?;
    value.parse().map_err(|_| {
        BackendError::ProcessingFailed(format!(
            "{}: {} is not a valid dimension: '{}'",
            path.display(),
            name,
            value
        ))
    })
}

/// Write the combined collection manifest referencing each descriptor.
fn write_manifest(
    path: &Path,
    entries: &[(String, u32, u32)],
) -> Result<(), BackendError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("Collection");
    root.push_attribute(("MaxLevel", COLLECTION_MAX_LEVEL.to_string().as_str()));
    root.push_attribute(("TileSize", COLLECTION_TILE_SIZE.to_string().as_str()));
    root.push_attribute(("Format", TILE_FORMAT));
    root.push_attribute(("NextItemId", entries.len().to_string().as_str()));
    root.push_attribute(("ServerFormat", "Default"));
    root.push_attribute(("xmlns", DZC_XMLNS));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("Items")))?;
    for (id, (source, width, height)) in entries.iter().enumerate() {
        let mut item = BytesStart::new("I");
        item.push_attribute(("Id", id.to_string().as_str()));
        item.push_attribute(("N", id.to_string().as_str()));
        item.push_attribute(("Source", source.as_str()));
        writer.write_event(Event::Start(item))?;

        let mut size = BytesStart::new("Size");
        size.push_attribute(("Width", width.to_string().as_str()));
        size.push_attribute(("Height", height.to_string().as_str()));
        writer.write_event(Event::Empty(size))?;

        writer.write_event(Event::End(BytesEnd::new("I")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Items")))?;
    writer.write_event(Event::End(BytesEnd::new("Collection")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    fs::write(path, bytes)?;
    Ok(())
}

impl PyramidBackend for DeepZoomBackend {
    fn create_image(&self, source: &Path, descriptor: &Path) -> Result<(), BackendError> {
        let img = load_image(source)?;
        let (width, height) = (img.width(), img.height());

        let stem = descriptor
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                BackendError::ProcessingFailed(format!(
                    "descriptor path has no file stem: {}",
                    descriptor.display()
                ))
            })?;
        let files_dir = descriptor.with_file_name(format!("{stem}_files"));

        let max_level = dzi::level_count(width, height) - 1;
        for level in (0..=max_level).rev() {
            let (lw, lh) = dzi::level_dimensions(width, height, level, max_level);
            // Resample each level from the original for quality; the top
            // level is the original itself.
            let level_img = if level == max_level {
                img.clone()
            } else {
                img.resize_exact(lw, lh, FilterType::Lanczos3)
            };

            let level_dir = files_dir.join(level.to_string());
            fs::create_dir_all(&level_dir)?;

            let (cols, rows) = dzi::tile_grid(lw, lh);
            for row in 0..rows {
                for col in 0..cols {
                    let (x, y, w, h) = dzi::tile_rect(lw, lh, col, row);
                    let tile = level_img.crop_imm(x, y, w, h);
                    save_jpeg_tile(&tile, &level_dir.join(format!("{col}_{row}.{TILE_FORMAT}")))?;
                }
            }
        }

        write_descriptor(descriptor, width, height)
    }

    fn create_collection(
        &self,
        descriptors: &[String],
        manifest: &Path,
    ) -> Result<(), BackendError> {
        let base = manifest.parent().unwrap_or_else(|| Path::new(""));

        let mut entries = Vec::with_capacity(descriptors.len());
        for name in descriptors {
            let (width, height) = read_descriptor_size(&base.join(name))?;
            entries.push((name.clone(), width, height));
        }

        write_manifest(manifest, &entries)
    }
}
