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
//! The bridge operations, driven through a stand-in renderer.
//!
//! The stand-in reads "documents" that are plain text files listing one
//! `WIDTHxHEIGHT` media box per line.

use image::{ DynamicImage, GenericImageView, Rgb, RgbImage };
use pdf_thumbnail::{
    Error,
    PageSize,
    PdfDocument,
    PdfRenderer,
    PdfThumbnail,
    Rejection,
    ResizePolicy,
    ThumbnailConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TextRenderer;

struct TextDocument {
    pages: Vec<PageSize>,
}

impl PdfRenderer for TextRenderer {
    fn open(&self, path: &Path) -> pdf_thumbnail::Result<Box<dyn PdfDocument>> {
        let not_found = || Error::FileNotFound(path.display().to_string());
        let text = fs::read_to_string(path).map_err(|_| not_found())?;
        let pages = text
            .lines()
            .map(|line| -> pdf_thumbnail::Result<PageSize> {
                let (w, h) = line.split_once('x').ok_or_else(not_found)?;
                Ok(PageSize {
                    width: w.trim().parse().map_err(|_| not_found())?,
                    height: h.trim().parse().map_err(|_| not_found())?,
                })
            })
            .collect::<pdf_thumbnail::Result<Vec<_>>>()?;
        Ok(Box::new(TextDocument { pages }))
    }
}

impl PdfDocument for TextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, index: usize) -> Option<PageSize> {
        self.pages.get(index).copied()
    }

    fn render_page(&self, _index: usize, width: u32, height: u32) -> pdf_thumbnail::Result<DynamicImage> {
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90]))))
    }
}

struct Fixture {
    tmp: TempDir,
    out: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("cache");
        Fixture { tmp, out }
    }

    fn document(&self, name: &str, pages: &[(u32, u32)]) -> String {
        let body: Vec<String> = pages
            .iter()
            .map(|(w, h)| format!("{w}x{h}"))
            .collect();
        let path = self.tmp.path().join(name);
        fs::write(&path, body.join("\n")).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn bridge(&self, policy: ResizePolicy) -> PdfThumbnail<TextRenderer> {
        let config = ThumbnailConfig::default().with_output_dir(&self.out).with_policy(policy);
        PdfThumbnail::with_renderer(TextRenderer, config)
    }

    fn files_written(&self) -> usize {
        fs::read_dir(&self.out)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

#[test]
fn generate_downscale_only_keeps_small_pages() {
    let fx = Fixture::new();
    let doc = fx.document("letter.pdf", &[(600, 800)]);

    let result = fx.bridge(ResizePolicy::DownscaleOnly).generate(&doc, 0).unwrap();

    assert_eq!((result.width, result.height), (600, 800));
    assert_eq!(image::open(&result.path).unwrap().dimensions(), (600, 800));
}

#[test]
fn generate_fit_to_max_scales_up() {
    let fx = Fixture::new();
    let doc = fx.document("letter.pdf", &[(600, 800)]);

    let result = fx.bridge(ResizePolicy::FitToMax).generate(&doc, 0).unwrap();

    assert_eq!((result.width, result.height), (2250, 3000));
}

#[test]
fn generate_names_output_after_source_and_page() {
    let fx = Fixture::new();
    let doc = fx.document("annual.report.pdf", &[(100, 100), (100, 100)]);

    let result = fx.bridge(ResizePolicy::DownscaleOnly).generate(&doc, 1).unwrap();

    let name = result.path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("annual-report-pdf-thumbnail-1-"), "{name}");
    assert!(name.ends_with(".jpg"));
    assert!(result.path.starts_with(&fx.out));
    assert!(result.uri.starts_with("file://"));
    assert!(result.uri.ends_with(&name));
}

#[test]
fn generate_accepts_file_uris() {
    let fx = Fixture::new();
    let doc = fx.document("my doc.pdf", &[(100, 50)]);
    let uri = format!("file://{}", doc.replace(' ', "%20"));

    let result = fx.bridge(ResizePolicy::DownscaleOnly).generate(&uri, 0).unwrap();

    assert_eq!((result.width, result.height), (100, 50));
    let name = result.path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("my%20doc-pdf-thumbnail-0-"), "{name}");
}

#[test]
fn invalid_pages_are_rejected() {
    let fx = Fixture::new();
    let doc = fx.document("two.pdf", &[(100, 100), (100, 100)]);
    let bridge = fx.bridge(ResizePolicy::DownscaleOnly);

    for page in [2, 99, -1] {
        let rejection = Rejection::from(bridge.generate(&doc, page).unwrap_err());
        assert_eq!(rejection.code, "INVALID_PAGE");
        assert_eq!(
            rejection.message,
            format!("Page number {page} is invalid, file has 2 pages")
        );
    }
    assert_eq!(fx.files_written(), 0);
}

#[test]
fn missing_files_are_not_found() {
    let fx = Fixture::new();
    let missing = fx.tmp.path().join("nope.pdf");
    let missing = missing.to_str().unwrap();
    let bridge = fx.bridge(ResizePolicy::DownscaleOnly);

    let err = bridge.generate(missing, 0).unwrap_err();
    assert_eq!(err.code(), "FILE_NOT_FOUND");
    assert_eq!(err.to_string(), format!("File {missing} not found"));

    assert_eq!(bridge.generate_all_pages(missing).unwrap_err().code(), "FILE_NOT_FOUND");
    assert_eq!(bridge.generate_page_count(missing).unwrap_err().code(), "FILE_NOT_FOUND");
}

#[test]
fn all_pages_in_order() {
    let fx = Fixture::new();
    let doc = fx.document("deck.pdf", &[(4000, 3000), (3000, 4000), (200, 100)]);

    let results = fx.bridge(ResizePolicy::DownscaleOnly).generate_all_pages(&doc).unwrap();

    let sizes: Vec<_> = results
        .iter()
        .map(|r| (r.width, r.height))
        .collect();
    assert_eq!(sizes, vec![(3000, 2250), (2250, 3000), (200, 100)]);
    for (page, r) in results.iter().enumerate() {
        let name = r.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(&format!("deck-pdf-thumbnail-{page}-")), "{name}");
        assert!(r.path.is_file());
    }
    assert_eq!(fx.files_written(), 3);
}

#[test]
fn all_pages_abort_on_first_failure() {
    let fx = Fixture::new();
    // second page has an empty media box
    let doc = fx.document("broken.pdf", &[(100, 100), (0, 100), (100, 100)]);

    let err = fx.bridge(ResizePolicy::DownscaleOnly).generate_all_pages(&doc).unwrap_err();

    assert_eq!(err.code(), "INTERNAL_ERROR");
    assert_eq!(fx.files_written(), 0);
}

#[test]
fn page_count_renders_nothing() {
    let fx = Fixture::new();
    let doc = fx.document("five.pdf", &[(10, 10); 5]);

    let count = fx.bridge(ResizePolicy::DownscaleOnly).generate_page_count(&doc).unwrap();

    assert_eq!(count.count, 5);
    assert_eq!(serde_json::to_string(&count).unwrap(), r#"{"count":5}"#);
    assert_eq!(fx.files_written(), 0);
}

#[test]
fn max_size_is_configurable() {
    let fx = Fixture::new();
    let doc = fx.document("a4.pdf", &[(595, 842)]);
    let config = ThumbnailConfig::default().with_output_dir(&fx.out).with_max_size(256);

    let result = PdfThumbnail::with_renderer(TextRenderer, config).generate(&doc, 0).unwrap();

    assert_eq!((result.width, result.height), (180, 256));
}
