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
/// Default maximum length of the long edge, in pixels.
pub const MAX_SIZE: u32 = 3000;

/// Largest accepted maximum. The renderer sizes its canvas in `u16`.
pub const MAX_SIZE_LIMIT: u32 = 16384;

/// How a page is mapped onto the maximum edge length.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Shrink pages whose long edge exceeds the maximum, keep smaller ones as is.
    #[default]
    DownscaleOnly,
    /// Always scale the long edge to exactly the maximum.
    FitToMax,
}

/// Computes the output size of a page with media box `width` x `height`.
///
/// Returns `None` for degenerate boxes (non-finite or non-positive edges).
/// Results are truncated toward zero and never smaller than one pixel;
/// `max_size` is clamped to `1..=MAX_SIZE_LIMIT`.
pub fn fit_dimensions(width: f64, height: f64, max_size: u32, policy: ResizePolicy) -> Option<(u32, u32)> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return None;
    }
    let max = max_size.clamp(1, MAX_SIZE_LIMIT) as f64;
    let scale = matches!(policy, ResizePolicy::FitToMax);

    let (mut w, mut h) = (width, height);
    if w >= h {
        if scale || w > max {
            h *= max / w;
            w = max;
        }
    } else if scale || h > max {
        w *= max / h;
        h = max;
    }

    Some((to_pixels(w), to_pixels(h)))
}

fn to_pixels(v: f64) -> u32 {
    (v.trunc() as u32).max(1)
}
