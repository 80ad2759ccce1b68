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
//! Page rendering backends.
//!
//! The generator only needs to open a document, ask for page geometry and
//! get a raster of a page at a given size. [`HayroRenderer`] does this with
//! the pure-Rust `hayro` renderer; tests plug in their own implementation.

use crate::error::{ Error, Result };
use hayro::{ render, InterpreterSettings, Pdf, RenderSettings };
use image::imageops::{ overlay, FilterType };
use image::{ DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage };
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Width and height of a page's media box, in PDF points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Opens documents. Implementations must map unreadable or invalid files to
/// [`Error::FileNotFound`].
pub trait PdfRenderer {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>>;
}

pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Media box size of page `index` as displayed (swapped for pages rotated
    /// a quarter turn), `None` when out of range.
    fn page_size(&self, index: usize) -> Option<PageSize>;

    /// Rasterizes page `index` to exactly `width` x `height` pixels, keeping
    /// the page's aspect ratio.
    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<DynamicImage>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct HayroRenderer;

impl PdfRenderer for HayroRenderer {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>> {
        let not_found = || Error::FileNotFound(path.display().to_string());
        let file = std::fs::read(path).map_err(|_| not_found())?;

        let data = Arc::new(file);
        let pdf = Pdf::new(data).map_err(|_| not_found())?;
        debug!("opened {} ({} pages)", path.display(), pdf.pages().len());

        Ok(Box::new(HayroDocument { pdf }))
    }
}

struct HayroDocument {
    pdf: Pdf,
}

impl PdfDocument for HayroDocument {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn page_size(&self, index: usize) -> Option<PageSize> {
        let page = self.pdf.pages().get(index)?;
        let media_box = page.media_box();
        let (width, height) = (media_box.width().abs(), media_box.height().abs());

        // render_dimensions() is the visible region with /Rotate 90|270 applied;
        // when it differs from the unrotated region the page is turned sideways.
        let (base_w, base_h) = page.base_dimensions();
        let (render_w, render_h) = page.render_dimensions();
        let sideways = base_w != base_h && (base_w, base_h) == (render_h, render_w);

        Some(if sideways {
            PageSize { width: height, height: width }
        } else {
            PageSize { width, height }
        })
    }

    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<DynamicImage> {
        let pages = self.pdf.pages();
        let page = pages.get(index).ok_or_else(|| Error::Render {
            page: index,
            reason: "page disappeared from the document".to_string(),
        })?;

        // hayro draws the visible region; scale it uniformly into the target box.
        let (region_w, region_h) = page.render_dimensions();
        let (region_w, region_h) = ((region_w as f64).max(1.0), (region_h as f64).max(1.0));
        let scale = ((width as f64) / region_w).min((height as f64) / region_h) as f32;

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };

        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(page, &interpreter_settings, &render_settings);
        let raster = image::load_from_memory_with_format(&pixmap.take_png(), ImageFormat::Png)?;

        Ok(fit_onto_canvas(raster, width, height))
    }
}

/// Places `raster` centred on a white `width` x `height` canvas, shrinking or
/// enlarging it to fit without changing its aspect ratio.
pub fn fit_onto_canvas(raster: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if raster.dimensions() == (width, height) {
        return raster;
    }
    let fitted = raster.resize(width, height, FilterType::Triangle).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let x = (width.saturating_sub(fitted.width()) / 2) as i64;
    let y = (height.saturating_sub(fitted.height()) / 2) as i64;
    overlay(&mut canvas, &fitted, x, y);
    DynamicImage::ImageRgba8(canvas)
}
