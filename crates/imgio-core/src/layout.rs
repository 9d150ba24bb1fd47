//! Buffer layouts and pixel transfer between decoded images and caller buffers.
//!
//! Decoded images are always row-major. Caller buffers are either row-major
//! ([`Layout::Right`]) or column-major ([`Layout::Left`]).

use serde::{Deserialize, Serialize};

/// Interpretation of a flat intensity buffer indexed by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Row-major: `index = y * width + x`
    #[default]
    Right,
    /// Column-major: `index = x * height + y`
    Left,
}

impl Layout {
    /// Map the boolean "layout right" flag used by older callers.
    pub fn from_layout_right(is_layout_right: bool) -> Self {
        if is_layout_right {
            Layout::Right
        } else {
            Layout::Left
        }
    }

    /// Flat index of `(x, y)` in a `width` x `height` buffer.
    #[inline]
    pub fn index(self, x: usize, y: usize, width: usize, height: usize) -> usize {
        match self {
            Layout::Right => y * width + x,
            Layout::Left => x * height + y,
        }
    }
}

/// Rectangular sub-image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of pixels in the region.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the region lies inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= width && b <= height)
    }
}

/// Copy `region` of a row-major source image into `dst` using `layout`.
///
/// `dst` is indexed with the region's own width and height. Callers must
/// have checked that the region fits the source and that
/// `dst.len() == region.pixel_count()`.
pub fn copy_region_into<T>(
    src: &[T],
    src_width: u32,
    region: Region,
    dst: &mut [f32],
    layout: Layout,
) where
    T: Copy + Into<f32>,
{
    let src_width = src_width as usize;
    let (ox, oy) = (region.x as usize, region.y as usize);
    let (w, h) = (region.width as usize, region.height as usize);
    debug_assert_eq!(dst.len(), w * h);

    for y in oy..oy + h {
        let row = &src[y * src_width + ox..y * src_width + ox + w];
        for (dx, &px) in row.iter().enumerate() {
            dst[layout.index(dx, y - oy, w, h)] = px.into();
        }
    }
}

/// Copy a whole row-major source image into `dst` using `layout`.
pub fn copy_into<T>(src: &[T], width: u32, height: u32, dst: &mut [f32], layout: Layout)
where
    T: Copy + Into<f32>,
{
    copy_region_into(src, width, Region::full(width, height), dst, layout);
}

/// Gather a caller buffer into row-major pixels, converting each sample with `f`.
pub fn gather_row_major<T, F>(
    src: &[f32],
    width: u32,
    height: u32,
    layout: Layout,
    mut f: F,
) -> Vec<T>
where
    F: FnMut(f32) -> T,
{
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(src.len(), w * h);

    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            out.push(f(src[layout.index(x, y, w, h)]));
        }
    }
    out
}
