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
//! Page thumbnails for PDF files.
//!
//! [`PdfThumbnail`] is the bridge a host application calls: it takes the file
//! argument exactly as the host received it (a plain path or a `file://` URI),
//! renders the requested page into a bounded-size JPEG in the cache directory
//! and hands back where the file is and how big it came out.
//!
//! ```no_run
//! use pdf_thumbnail::{ PdfThumbnail, ThumbnailConfig };
//!
//! let thumbs = PdfThumbnail::new(ThumbnailConfig::default().with_max_size(1024));
//! let first = thumbs.generate("file:///tmp/report.pdf", 0)?;
//! println!("{} ({}x{})", first.uri, first.width, first.height);
//! # Ok::<(), pdf_thumbnail::Error>(())
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod paths;
pub mod pdf;
pub mod sizing;
pub mod thumbnail;

pub use crate::config::ThumbnailConfig;
pub use crate::error::{ Error, Rejection, Result };
pub use crate::pdf::{ HayroRenderer, PageSize, PdfDocument, PdfRenderer };
pub use crate::sizing::{ fit_dimensions, ResizePolicy, MAX_SIZE, MAX_SIZE_LIMIT };
pub use crate::thumbnail::{ PageCount, ThumbnailResult };

use crate::paths::resolve_source;
use crate::thumbnail::{ generate_all, generate_page };
use log::debug;

pub struct PdfThumbnail<R = HayroRenderer> {
    renderer: R,
    config: ThumbnailConfig,
}

impl PdfThumbnail<HayroRenderer> {
    pub fn new(config: ThumbnailConfig) -> Self {
        PdfThumbnail::with_renderer(HayroRenderer, config)
    }
}

impl Default for PdfThumbnail<HayroRenderer> {
    fn default() -> Self {
        PdfThumbnail::new(ThumbnailConfig::default())
    }
}

impl<R: PdfRenderer> PdfThumbnail<R> {
    pub fn with_renderer(renderer: R, config: ThumbnailConfig) -> Self {
        PdfThumbnail { renderer, config }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Thumbnail of a single page. `page` is zero-based; negative or
    /// out-of-range values are rejected with [`Error::InvalidPage`].
    pub fn generate(&self, file_path: &str, page: i64) -> Result<ThumbnailResult> {
        let doc = self.open(file_path)?;
        let count = doc.page_count();
        let index = usize::try_from(page)
            .ok()
            .filter(|&index| index < count)
            .ok_or(Error::InvalidPage { page, count })?;

        let output_dir = self.config.resolve_output_dir()?;
        generate_page(doc.as_ref(), file_path, index, &output_dir, &self.config)
    }

    /// Thumbnails of every page, in page order. Nothing is returned, and
    /// nothing is left on disk, if any page fails.
    pub fn generate_all_pages(&self, file_path: &str) -> Result<Vec<ThumbnailResult>> {
        self.generate_all_pages_with(file_path, |_, _| {})
    }

    /// Like [`generate_all_pages`](Self::generate_all_pages), calling
    /// `on_page(result, total)` after each page is written.
    pub fn generate_all_pages_with(
        &self,
        file_path: &str,
        on_page: impl FnMut(&ThumbnailResult, usize)
    ) -> Result<Vec<ThumbnailResult>> {
        let doc = self.open(file_path)?;
        let output_dir = self.config.resolve_output_dir()?;
        generate_all(doc.as_ref(), file_path, &output_dir, &self.config, on_page)
    }

    /// Number of pages, without rendering anything.
    pub fn generate_page_count(&self, file_path: &str) -> Result<PageCount> {
        let doc = self.open(file_path)?;
        Ok(PageCount { count: doc.page_count() })
    }

    fn open(&self, file_path: &str) -> Result<Box<dyn PdfDocument>> {
        let path = resolve_source(file_path)?;
        debug!("opening {}", path.display());
        // Report the caller's argument, not the decoded path.
        self.renderer.open(&path).map_err(|e| match e {
            Error::FileNotFound(_) => Error::FileNotFound(file_path.to_string()),
            other => other,
        })
    }
}
