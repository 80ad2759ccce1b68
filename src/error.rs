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
use serde::{ Deserialize, Serialize };

pub type Result<T> = std::result::Result<T, Error>;

pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const INVALID_PAGE: &str = "INVALID_PAGE";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("File {0} not found")]
    FileNotFound(String),
    #[error("Page number {page} is invalid, file has {count} pages")]
    InvalidPage {
        page: i64,
        count: usize,
    },
    #[error("Cannot write image data: {0}")]
    Image(#[from] image::ImageError),
    #[error("Cannot write image data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot render page {page}: {reason}")]
    Render {
        page: usize,
        reason: String,
    },
    #[error("Cannot write image data: no cache directory available on this platform")]
    NoCacheDir,
}

impl Error {
    /// Stable, machine-readable code reported to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            Error::FileNotFound(_) => FILE_NOT_FOUND,
            Error::InvalidPage { .. } => INVALID_PAGE,
            Error::Image(_) | Error::Io(_) | Error::Render { .. } | Error::NoCacheDir => {
                INTERNAL_ERROR
            }
        }
    }
}

/// A failed request as seen from the host side: a code plus a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl From<&Error> for Rejection {
    fn from(err: &Error) -> Self {
        Rejection {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for Rejection {
    fn from(err: Error) -> Self {
        Rejection::from(&err)
    }
}
