use crate::foundation::core::{Affine, BezPath, Point, Rgb8, Size, Vec2};
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::foundation::math::mul_div255_u16;

/// A 2D drawing surface backed by a CPU pixmap.
///
/// Callers draw in logical (CSS) units; the backing store is the logical size scaled by the
/// device pixel ratio the surface was last resized with.
pub struct DrawingSurface {
    css_size: Size,
    scale: f64,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    clears: u64,
    paints: u64,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("css_size", &self.css_size)
            .field("scale", &self.scale)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clears", &self.clears)
            .field("paints", &self.paints)
            .finish_non_exhaustive()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface {
    /// A 1×1 transparent surface; real sizing happens on [`DrawingSurface::resize`].
    pub fn new() -> Self {
        Self {
            css_size: Size::new(1.0, 1.0),
            scale: 1.0,
            width: 1,
            height: 1,
            pixmap: vello_cpu::Pixmap::new(1, 1),
            ctx: None,
            clears: 0,
            paints: 0,
        }
    }

    /// Resize the backing store to `css_size * scale` (rounded, at least one pixel).
    ///
    /// Reallocation discards the previous contents.
    pub fn resize(&mut self, css_size: Size, scale: f64) -> CardFxResult<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(CardFxError::surface("surface scale must be > 0"));
        }
        let backing = |v: f64, axis: &str| -> CardFxResult<u16> {
            let px = (v.max(0.0) * scale).round().max(1.0);
            if px > f64::from(u16::MAX) {
                return Err(CardFxError::surface(format!(
                    "surface {axis} exceeds u16 ({px} px)"
                )));
            }
            Ok(px as u16)
        };
        let width = backing(css_size.width, "width")?;
        let height = backing(css_size.height, "height")?;

        self.css_size = css_size;
        self.scale = scale;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        } else {
            clear_pixmap_to_transparent(&mut self.pixmap);
        }
        Ok(())
    }

    /// Logical size last passed to [`DrawingSurface::resize`].
    pub fn css_size(&self) -> Size {
        self.css_size
    }

    /// Backing scale (capped device pixel ratio).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Backing store size in pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Erase everything to transparent.
    pub fn clear(&mut self) {
        clear_pixmap_to_transparent(&mut self.pixmap);
        self.clears += 1;
    }

    /// Number of explicit [`DrawingSurface::clear`] calls so far.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Number of completed [`DrawingSurface::paint`] calls so far.
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .all(|px| px[3] == 0)
    }

    /// Replace the surface contents with a freshly drawn frame.
    ///
    /// The painter's base transform maps logical units to backing pixels.
    pub fn paint(&mut self, f: impl FnOnce(&mut Painter<'_>)) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == self.width && ctx.height() == self.height => ctx,
            _ => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();
        {
            let mut painter = Painter {
                ctx: &mut ctx,
                base: Affine::scale(self.scale),
            };
            f(&mut painter);
        }
        ctx.flush();
        clear_pixmap_to_transparent(&mut self.pixmap);
        ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx = Some(ctx);
        self.paints += 1;
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Opaque RGBA8 copy composited over `bg`, suitable for PNG export.
    pub fn to_opaque_rgba8(&self, bg: Rgb8) -> Vec<u8> {
        let src = self.pixmap.data_as_u8_slice();
        let mut out = vec![0u8; src.len()];
        flatten_premul_over_bg(&mut out, src, bg);
        out
    }
}

/// Drawing commands in logical units.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    base: Affine,
}

impl Painter<'_> {
    /// Set the local transform applied on top of the logical→pixel scale.
    pub fn set_transform(&mut self, local: Affine) {
        self.ctx.set_transform(affine_to_cpu(self.base * local));
    }

    /// Fill an arbitrary path with a straight-alpha RGBA8 color.
    pub fn fill_path(&mut self, path: &BezPath, rgba: [u8; 4]) {
        if rgba[3] == 0 {
            return;
        }
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Butt-capped line segment of the given width.
    pub fn line(&mut self, from: Point, to: Point, width: f64, rgba: [u8; 4]) {
        if let Some(quad) = segment_quad(from, to, width) {
            self.fill_path(&quad, rgba);
        }
    }

    /// Filled circle.
    pub fn circle(&mut self, center: Point, radius: f64, rgba: [u8; 4]) {
        use kurbo::Shape as _;

        if radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(center, radius).to_path(0.05);
        self.fill_path(&path, rgba);
    }
}

/// Rectangle covering the segment `from → to` with the given width, or `None` when degenerate.
pub(crate) fn segment_quad(from: Point, to: Point, width: f64) -> Option<BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len < 1e-9 || width <= 0.0 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (0.5 * width / len);
    let mut p = BezPath::new();
    p.move_to(from + n);
    p.line_to(to + n);
    p.line_to(to - n);
    p.line_to(from - n);
    p.close_path();
    Some(p)
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: Rgb8) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(u16::from(bg.r), inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(u16::from(bg.g), inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(u16::from(bg.b), inv)).min(255) as u8;
        d[3] = 255;
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
