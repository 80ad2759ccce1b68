/*
 * Copyright (C) 2025  Chianti GALLY
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{ DynamicImage, GenericImageView, ImageEncoder, Rgb, RgbImage };
use std::fs::{ self, OpenOptions };
use std::io::{ BufWriter, Write };
use std::path::{ Path, PathBuf };

/// Encodes `img` as JPEG into `output_path`.
///
/// The data goes to `<name>.part` first and is renamed into place once synced,
/// so a failed write never leaves a truncated thumbnail behind.
pub fn write_jpeg_atomic(output_path: &Path, img: &DynamicImage, quality: u8) -> Result<()> {
    let parent = output_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let tmp_path = part_path(output_path);

    struct TempGuard {
        path: PathBuf,
        keep: bool,
    }
    impl Drop for TempGuard {
        fn drop(&mut self) {
            if !self.keep {
                let _ = fs::remove_file(&self.path);
            }
        }
    }
    let mut guard = TempGuard {
        path: tmp_path.clone(),
        keep: false,
    };

    let f = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
    let mut writer = BufWriter::new(f);

    let (w, h) = img.dimensions();
    let buf = flatten_onto_white(img);
    let enc = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    enc.write_image(&buf, w, h, image::ExtendedColorType::Rgb8)?;

    writer.flush()?;
    writer.get_ref().sync_all()?;
    drop(writer);

    fs::rename(&tmp_path, output_path)?;
    guard.keep = true;
    Ok(())
}

fn part_path(output_path: &Path) -> PathBuf {
    output_path.with_extension(
        output_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!("{}.part", e))
            .unwrap_or_else(|| "part".into())
    )
}

/// JPEG has no alpha, so transparent pixels become white. hayro already paints
/// the page white; this matters for rasters from other `PdfDocument`s.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        let blend = |c: u8| (((c as u16) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
