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
use crate::error::{ Error, Result };
use crate::sizing::{ ResizePolicy, MAX_SIZE, MAX_SIZE_LIMIT };
use std::fs;
use std::path::PathBuf;

/// Name of the subdirectory created under the platform cache directory.
pub const CACHE_SUBDIR: &str = "pdf-thumbnail";

pub const DEFAULT_JPEG_QUALITY: u8 = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailConfig {
    pub max_size: u32,
    pub policy: ResizePolicy,
    /// JPEG quality 1–100
    pub jpeg_quality: u8,
    /// Where thumbnails are written; `None` means the platform cache directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        ThumbnailConfig {
            max_size: MAX_SIZE,
            policy: ResizePolicy::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_dir: None,
        }
    }
}

impl ThumbnailConfig {
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.clamp(1, MAX_SIZE_LIMIT);
        self
    }

    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Directory thumbnails go to, created if it does not exist yet.
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir().ok_or(Error::NoCacheDir)?.join(CACHE_SUBDIR),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
