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
use crate::config::ThumbnailConfig;
use crate::encode::write_jpeg_atomic;
use crate::error::{ Error, Result };
use crate::paths::{ file_uri, output_filename };
use crate::pdf::PdfDocument;
use crate::sizing::fit_dimensions;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };

/// A written thumbnail. The caller owns the file from here on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailResult {
    pub uri: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCount {
    pub count: usize,
}

/// Renders page `page` of `doc` and writes it as a JPEG into `output_dir`.
///
/// `file_path` is the caller's original argument; only its last segment is
/// used, to name the output.
pub fn generate_page(
    doc: &dyn PdfDocument,
    file_path: &str,
    page: usize,
    output_dir: &Path,
    config: &ThumbnailConfig
) -> Result<ThumbnailResult> {
    let size = doc.page_size(page).ok_or(Error::InvalidPage {
        page: page as i64,
        count: doc.page_count(),
    })?;

    let (width, height) = fit_dimensions(
        size.width,
        size.height,
        config.max_size,
        config.policy
    ).ok_or_else(|| Error::Render {
        page,
        reason: format!("empty media box ({}x{})", size.width, size.height),
    })?;
    debug!("page {page}: {}x{} pt -> {width}x{height} px", size.width, size.height);

    let raster = doc.render_page(page, width, height)?;

    let output_file = output_dir.join(output_filename(file_path, page));
    write_jpeg_atomic(&output_file, &raster, config.jpeg_quality)?;
    info!("wrote {}", output_file.display());

    Ok(ThumbnailResult {
        uri: file_uri(&output_file),
        width,
        height,
        path: output_file,
    })
}

/// Renders every page in order. The first failure aborts the batch and
/// removes the files this batch already wrote.
///
/// `on_page` is called after each page is written with the result and the
/// total page count.
pub fn generate_all(
    doc: &dyn PdfDocument,
    file_path: &str,
    output_dir: &Path,
    config: &ThumbnailConfig,
    mut on_page: impl FnMut(&ThumbnailResult, usize)
) -> Result<Vec<ThumbnailResult>> {
    let count = doc.page_count();
    let mut results = Vec::with_capacity(count);

    for page in 0..count {
        match generate_page(doc, file_path, page, output_dir, config) {
            Ok(result) => {
                on_page(&result, count);
                results.push(result);
            }
            Err(e) => {
                warn!(
                    "page {page} of {file_path} failed ({e}), discarding {} written thumbnail(s)",
                    results.len()
                );
                for written in &results {
                    let _ = fs::remove_file(&written.path);
                }
                return Err(e);
            }
        }
    }
    Ok(results)
}
