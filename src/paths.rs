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
use rand::Rng;
use std::path::{ Component, Path, PathBuf };

const FILE_SCHEME: &str = "file://";

/// Turns the caller's file argument into a filesystem path.
///
/// Accepts plain paths and `file://` URIs (percent-encoded).
pub fn resolve_source(file_path: &str) -> Result<PathBuf> {
    let not_found = || Error::FileNotFound(file_path.to_string());
    let trimmed = file_path.trim();
    if trimmed.is_empty() {
        return Err(not_found());
    }

    let raw = match trimmed.strip_prefix(FILE_SCHEME) {
        Some(rest) => {
            // file://localhost/path is the long form of file:///path
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            urlencoding::decode(rest).map_err(|_| not_found())?.into_owned()
        }
        None if trimmed.contains("://") => return Err(not_found()),
        None => trimmed.to_string(),
    };
    if raw.is_empty() {
        return Err(not_found());
    }
    Ok(PathBuf::from(raw))
}

/// Builds `<prefix>-thumbnail-<page>-<random>.jpg` from the caller's file argument.
pub fn output_filename(file_path: &str, page: usize) -> String {
    let random: i64 = rand::thread_rng().gen_range(0..i64::MAX);
    format!("{}-thumbnail-{}-{}.jpg", filename_prefix(file_path), page, random)
}

/// Last `/` segment of the source with dots replaced, `pdf` when there is none.
fn filename_prefix(file_path: &str) -> String {
    match file_path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.replace('.', "-"),
        _ => "pdf".to_string(),
    }
}

/// Renders an absolute path as a `file://` URI, percent-encoding each segment.
pub fn file_uri(path: &Path) -> String {
    let mut uri = String::from(FILE_SCHEME);
    for component in path.components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Prefix(prefix) => {
                uri.push('/');
                uri.push_str(&prefix.as_os_str().to_string_lossy());
            }
            Component::ParentDir => uri.push_str("/.."),
            Component::Normal(segment) => {
                uri.push('/');
                uri.push_str(&urlencoding::encode(&segment.to_string_lossy()));
            }
        }
    }
    if uri.len() == FILE_SCHEME.len() {
        uri.push('/');
    }
    uri
}
