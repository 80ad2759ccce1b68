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
use clap::{ Parser, Subcommand };
use pdf_thumbnail::{ ResizePolicy, ThumbnailConfig, MAX_SIZE, MAX_SIZE_LIMIT };
use std::path::PathBuf;

const LONG_ABOUT: &str =
    "\
Generate bounded-size JPEG thumbnails of PDF pages.
Each thumbnail is written to the cache directory (or --output-dir) and described on stdout as JSON.
Failures are printed as {\"code\", \"message\"} with code FILE_NOT_FOUND, INVALID_PAGE or INTERNAL_ERROR.


Copyright (C) 2025 Chianti GALLY

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate bounded-size JPEG thumbnails of PDF pages.",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Output directory (defaults to the platform cache directory)
    #[arg(short = 'o', long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Maximum length of the long edge, in pixels (at most 16384)
    #[arg(
        short = 'm',
        long,
        global = true,
        default_value_t = MAX_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=(MAX_SIZE_LIMIT as i64))
    )]
    pub max_size: u32,

    /// JPEG quality 1–100
    #[arg(short = 'q', long, global = true, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Always scale the long edge to --max-size, enlarging small pages
    #[arg(long, global = true, action)]
    pub fit: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Thumbnail of one page (zero-based)
    Generate {
        /// PDF path or file:// URI
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: String,
        #[arg(allow_negative_numbers = true)]
        page: i64,
    },
    /// Thumbnails of every page, in order
    All {
        /// PDF path or file:// URI
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: String,
    },
    /// Page count only, nothing is rendered
    Count {
        /// PDF path or file:// URI
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: String,
    },
}

impl Cli {
    pub fn config(&self) -> ThumbnailConfig {
        let policy = if self.fit { ResizePolicy::FitToMax } else { ResizePolicy::DownscaleOnly };
        let config = ThumbnailConfig::default()
            .with_max_size(self.max_size)
            .with_jpeg_quality(self.quality)
            .with_policy(policy);
        match &self.output_dir {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        }
    }
}
