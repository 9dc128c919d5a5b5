use std::{
    path::PathBuf,
    time::Duration,
};

use futures::future::join_all;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage, imageops::FilterType};
use reqwest::Client;
use rusttype::{Font, Scale, point};
use tokio::time::timeout;

use crate::{
    collage::{template::Background, text},
    config,
    error::RenderError,
    types::{CollageResult, GridSpec, Item, ItemKind, Template},
    utils, warning,
};

/// Unscaled cell edge in layout units.
pub const BASE_CELL: u32 = 250;

/// Hard ceiling on either canvas dimension, in pixels.
pub const MAX_DIMENSION: f32 = 12000.0;

/// How long one cell image download may take before its cell is given up
/// as blank.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Supersampling factor for a given grid side. Small grids get the most
/// headroom; past eight cells per side the canvas would blow through the
/// dimension ceiling anyway.
pub fn scale_step(max_side: u32) -> u32 {
    match max_side {
        0..=5 => 8,
        6..=7 => 6,
        8 => 4,
        _ => 3,
    }
}

/// Resolved pixel geometry of a collage canvas.
///
/// Derived once per render from the grid shape and the template gap. When
/// the scaled canvas would exceed [`MAX_DIMENSION`] on either side, both
/// dimensions and the effective scale shrink by the same ratio, so cells
/// keep their proportions.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub canvas_w: u32,
    pub canvas_h: u32,
    /// Effective scale after the ceiling clamp; fractional once clamped.
    pub scale: f32,
    /// Cell image edge in pixels.
    pub img_size: f32,
    /// Gap between cells in pixels.
    pub gap: f32,
}

impl Geometry {
    pub fn new(grid: GridSpec, template_gap: u32) -> Self {
        let base_scale = scale_step(grid.width().max(grid.height())) as f32;
        let gap = template_gap as f32;

        let w_units = (BASE_CELL * grid.width() + template_gap * (grid.width() + 1)) as f32;
        let h_units = (BASE_CELL * grid.height() + template_gap * (grid.height() + 1)) as f32;

        let mut canvas_w = w_units * base_scale;
        let mut canvas_h = h_units * base_scale;
        let mut scale = base_scale;

        let largest = canvas_w.max(canvas_h);
        if largest > MAX_DIMENSION {
            let ratio = MAX_DIMENSION / largest;
            canvas_w *= ratio;
            canvas_h *= ratio;
            scale *= ratio;
        }

        let gap_px = gap * scale;
        let img_size = (canvas_w - gap_px * (grid.width() + 1) as f32) / grid.width() as f32;

        Geometry {
            canvas_w: canvas_w.round() as u32,
            canvas_h: canvas_h.round() as u32,
            scale,
            img_size,
            gap: gap_px,
        }
    }

    /// Top-left pixel corner of the cell at `(row, col)`.
    pub fn cell_origin(&self, row: u32, col: u32) -> (f32, f32) {
        (
            col as f32 * (self.img_size + self.gap) + self.gap,
            row as f32 * (self.img_size + self.gap) + self.gap,
        )
    }
}

/// Regular and bold faces for overlay text. When no bold face can be
/// found the regular face stands in for it.
pub struct FontSet {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

const REGULAR_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Loads the overlay fonts, honoring the `COLLAGE_FONT` override before
/// probing the usual system font locations.
pub fn load_fonts() -> Result<FontSet, RenderError> {
    if let Some(path) = config::collage_font() {
        let bytes = std::fs::read(&path)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| RenderError::Font(format!("{} is not a usable font", path.display())))?;
        return Ok(FontSet {
            regular: font.clone(),
            bold: font,
        });
    }

    let regular = load_candidate(&REGULAR_CANDIDATES)
        .ok_or_else(|| RenderError::Font(REGULAR_CANDIDATES.join(", ")))?;
    let bold = load_candidate(&BOLD_CANDIDATES).unwrap_or_else(|| regular.clone());

    Ok(FontSet { regular, bold })
}

fn load_candidate(candidates: &[&str]) -> Option<Font<'static>> {
    for path in candidates {
        if let Ok(bytes) = std::fs::read(path) {
            if let Some(font) = Font::try_from_vec(bytes) {
                return Some(font);
            }
        }
    }
    None
}

/// The three overlay lines of one cell.
pub struct CellText {
    pub title: String,
    pub line2: String,
    pub line3: String,
}

impl CellText {
    pub fn from_item(item: &Item, kind: ItemKind) -> Self {
        let plays = format!("{} plays", utils::group_thousands(item.playcount));
        match kind {
            ItemKind::Albums | ItemKind::Tracks => CellText {
                title: item.name.clone(),
                line2: item.primary_artist.clone(),
                line3: plays,
            },
            ItemKind::Artists => CellText {
                title: item.name.clone(),
                line2: plays,
                line3: item.rank.map(|r| format!("#{}", r)).unwrap_or_default(),
            },
        }
    }
}

/// Everything a cell renderer needs to draw one cell.
pub struct CellFrame<'a> {
    /// Cell image, already resized to `size`. `None` when the download
    /// failed or timed out.
    pub image: Option<&'a RgbaImage>,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub scale: f32,
    pub fonts: &'a FontSet,
    pub text: &'a CellText,
    /// When false the renderer stops after the artwork; no overlay band
    /// or text is drawn.
    pub show_text: bool,
}

/// One template's cell drawing strategy. Registered per template variant;
/// the canvas loop never branches on the template itself.
pub trait CellRenderer: Sync {
    fn render(&self, canvas: &mut RgbaImage, frame: &CellFrame<'_>);
}

pub fn renderer_for(template: Template) -> &'static dyn CellRenderer {
    match template {
        Template::Classic => &ClassicRenderer,
        Template::Polaroid => &PolaroidRenderer,
        Template::Minimal => &MinimalRenderer,
        Template::Mosaic => &MosaicRenderer,
        Template::Vinyl => &VinylRenderer,
    }
}

struct ClassicRenderer;
struct PolaroidRenderer;
struct MinimalRenderer;
struct MosaicRenderer;
struct VinylRenderer;

impl CellRenderer for ClassicRenderer {
    fn render(&self, canvas: &mut RgbaImage, f: &CellFrame<'_>) {
        draw_image_or_blank(canvas, f);
        if !f.show_text {
            return;
        }

        let band = 70.0 * f.scale;
        gradient_band(canvas, f.x, f.y + f.size - band, f.size, band, [0, 0, 0], 0.95);

        let width_limit = f.size - 15.0 * f.scale;
        let center = f.x + f.size / 2.0;

        let title = fit(&f.text.title, width_limit, &f.fonts.bold, 7.0 * f.scale);
        draw_text_shadowed(
            canvas,
            &title,
            &f.fonts.bold,
            7.0 * f.scale,
            center,
            f.y + f.size - 30.0 * f.scale,
            f.scale,
            Rgba([255, 255, 255, 255]),
        );

        let line2 = fit(&f.text.line2, width_limit, &f.fonts.regular, 5.0 * f.scale);
        draw_text_shadowed(
            canvas,
            &line2,
            &f.fonts.regular,
            5.0 * f.scale,
            center,
            f.y + f.size - 15.0 * f.scale,
            f.scale,
            Rgba([255, 255, 255, 230]),
        );
    }
}

impl CellRenderer for PolaroidRenderer {
    fn render(&self, canvas: &mut RgbaImage, f: &CellFrame<'_>) {
        let s = f.scale;
        fill_rect(
            canvas,
            f.x - 10.0 * s,
            f.y - 10.0 * s,
            f.size + 20.0 * s,
            f.size + 70.0 * s,
            Rgba([255, 255, 255, 255]),
        );
        draw_image_or_blank(canvas, f);
        if !f.show_text {
            return;
        }

        let width_limit = f.size - 15.0 * s;
        let center = f.x + f.size / 2.0;

        let title = fit(&f.text.title, width_limit, &f.fonts.bold, 7.0 * s);
        draw_text_centered(
            canvas,
            &title,
            &f.fonts.bold,
            7.0 * s,
            center,
            f.y + f.size + 10.0 * s,
            Rgba([0, 0, 0, 255]),
        );

        let line2 = fit(&f.text.line2, width_limit, &f.fonts.regular, 6.0 * s);
        draw_text_centered(
            canvas,
            &line2,
            &f.fonts.regular,
            6.0 * s,
            center,
            f.y + f.size + 20.0 * s,
            Rgba([0x44, 0x44, 0x44, 255]),
        );

        let line3 = fit(&f.text.line3, width_limit, &f.fonts.regular, 5.0 * s);
        draw_text_centered(
            canvas,
            &line3,
            &f.fonts.regular,
            5.0 * s,
            center,
            f.y + f.size + 30.0 * s,
            Rgba([0x66, 0x66, 0x66, 255]),
        );
    }
}

impl CellRenderer for MinimalRenderer {
    fn render(&self, canvas: &mut RgbaImage, f: &CellFrame<'_>) {
        draw_image_or_blank(canvas, f);
        if !f.show_text {
            return;
        }

        let s = f.scale;
        let band = 60.0 * s;
        gradient_band(canvas, f.x, f.y + f.size - band, f.size, band, [0, 0, 0], 0.9);

        let width_limit = f.size - 10.0 * s;
        let center = f.x + f.size / 2.0;

        let title = fit(&f.text.title, width_limit, &f.fonts.regular, 6.0 * s);
        draw_text_centered(
            canvas,
            &title,
            &f.fonts.regular,
            6.0 * s,
            center,
            f.y + f.size - 25.0 * s,
            Rgba([255, 255, 255, 255]),
        );

        let line2 = fit(&f.text.line2, width_limit, &f.fonts.regular, 5.0 * s);
        draw_text_centered(
            canvas,
            &line2,
            &f.fonts.regular,
            5.0 * s,
            center,
            f.y + f.size - 12.0 * s,
            Rgba([255, 255, 255, 230]),
        );
    }
}

impl CellRenderer for MosaicRenderer {
    fn render(&self, canvas: &mut RgbaImage, f: &CellFrame<'_>) {
        draw_image_or_blank(canvas, f);
        if !f.show_text {
            return;
        }

        let s = f.scale;
        let band = 80.0 * s;
        gradient_band(canvas, f.x, f.y + f.size - band, f.size, band, [0, 0, 0], 0.95);

        let width_limit = f.size - 15.0 * s;
        let center = f.x + f.size / 2.0;

        let title = fit(&f.text.title, width_limit, &f.fonts.bold, 7.0 * s);
        draw_text_shadowed(
            canvas,
            &title,
            &f.fonts.bold,
            7.0 * s,
            center,
            f.y + f.size - 30.0 * s,
            s,
            Rgba([255, 255, 255, 255]),
        );

        let line2 = fit(&f.text.line2, width_limit, &f.fonts.regular, 5.0 * s);
        draw_text_shadowed(
            canvas,
            &line2,
            &f.fonts.regular,
            5.0 * s,
            center,
            f.y + f.size - 15.0 * s,
            s,
            Rgba([255, 255, 255, 230]),
        );
    }
}

impl CellRenderer for VinylRenderer {
    fn render(&self, canvas: &mut RgbaImage, f: &CellFrame<'_>) {
        match f.image {
            Some(img) => draw_image_circle(canvas, img, f.x, f.y, f.size),
            None => fill_circle(canvas, f.x, f.y, f.size, Rgba([40, 40, 40, 255])),
        }
        if !f.show_text {
            return;
        }

        let s = f.scale;
        let width_limit = f.size * 0.7;
        let center = f.x + f.size / 2.0;

        let title = fit(&f.text.title, width_limit, &f.fonts.bold, 7.0 * s);
        draw_text_shadowed(
            canvas,
            &title,
            &f.fonts.bold,
            7.0 * s,
            center,
            f.y + f.size / 2.0,
            s,
            Rgba([255, 255, 255, 255]),
        );

        let line2 = fit(&f.text.line2, width_limit, &f.fonts.regular, 5.0 * s);
        draw_text_shadowed(
            canvas,
            &line2,
            &f.fonts.regular,
            5.0 * s,
            center,
            f.y + f.size / 2.0 + 8.0 * s,
            s,
            Rgba([255, 255, 255, 230]),
        );
    }
}

/// Downloads all cell images concurrently, one slot per cell, in cell
/// order. A download that fails or exceeds [`IMAGE_TIMEOUT`] leaves its
/// slot as `None`; the cell is rendered blank rather than failing the
/// whole collage.
pub async fn preload_images(
    client: &Client,
    result: &CollageResult,
    img_size: u32,
) -> Vec<Option<RgbaImage>> {
    let downloads = result.cells.iter().map(|cell| {
        let url = cell.image_url.clone();
        async move {
            match timeout(IMAGE_TIMEOUT, fetch_cell_image(client, &url, img_size)).await {
                Ok(Ok(img)) => Some(img),
                Ok(Err(e)) => {
                    warning!("Skipping cell image {}: {}", url, e);
                    None
                }
                Err(_) => {
                    warning!(
                        "Skipping cell image {}: timed out after {}s",
                        url,
                        IMAGE_TIMEOUT.as_secs()
                    );
                    None
                }
            }
        }
    });

    join_all(downloads).await
}

async fn fetch_cell_image(
    client: &Client,
    url: &str,
    img_size: u32,
) -> Result<RgbaImage, String> {
    let bytes = client
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    Ok(decoded
        .resize_to_fill(img_size, img_size, FilterType::Lanczos3)
        .to_rgba8())
}

/// Rasterizes a laid-out collage to a PNG file.
///
/// `show_text` toggles the per-cell overlay (band and caption lines);
/// template chrome like the polaroid frame is drawn either way.
/// Returns the path written. When every single cell image fails to load
/// the render is abandoned with [`RenderError::NoImages`] instead of
/// producing an all-blank grid.
pub async fn render_collage(
    client: &Client,
    result: &CollageResult,
    show_text: bool,
    output: Option<PathBuf>,
) -> Result<PathBuf, RenderError> {
    let fonts = load_fonts()?;
    let spec = result.template.spec();
    let geom = Geometry::new(result.grid, spec.gap);
    let img_px = (geom.img_size.round() as u32).max(1);

    let images = preload_images(client, result, img_px).await;
    if !result.cells.is_empty() && images.iter().all(Option::is_none) {
        return Err(RenderError::NoImages(result.cells.len()));
    }

    let mut canvas = blank_canvas(&geom, spec.background);
    let renderer = renderer_for(result.template);

    for (cell, image) in result.cells.iter().zip(images.iter()) {
        let (x, y) = geom.cell_origin(cell.row, cell.col);
        let text = CellText::from_item(&result.items[cell.item], result.kind);
        renderer.render(
            &mut canvas,
            &CellFrame {
                image: image.as_ref(),
                x,
                y,
                size: geom.img_size,
                scale: geom.scale,
                fonts: &fonts,
                text: &text,
                show_text,
            },
        );
    }

    let path = output.unwrap_or_else(|| PathBuf::from(utils::collage_filename(result.template)));
    DynamicImage::ImageRgba8(canvas).save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

fn blank_canvas(geom: &Geometry, background: Background) -> RgbaImage {
    match background {
        Background::Solid([r, g, b]) => {
            ImageBuffer::from_pixel(geom.canvas_w, geom.canvas_h, Rgba([r, g, b, 255]))
        }
        Background::Transparent => {
            ImageBuffer::from_pixel(geom.canvas_w, geom.canvas_h, Rgba([0, 0, 0, 0]))
        }
        Background::Gradient(top, bottom) => {
            let mut canvas = ImageBuffer::new(geom.canvas_w, geom.canvas_h);
            for y in 0..geom.canvas_h {
                let t = y as f32 / (geom.canvas_h.max(1)) as f32;
                let pixel = Rgba([
                    lerp(top[0], bottom[0], t),
                    lerp(top[1], bottom[1], t),
                    lerp(top[2], bottom[2], t),
                    255,
                ]);
                for x in 0..geom.canvas_w {
                    canvas.put_pixel(x, y, pixel);
                }
            }
            canvas
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn fit(line: &str, max_width: f32, font: &Font<'_>, size: f32) -> String {
    text::truncate_text(line, max_width, |s| text::measure_width(font, size, s))
}

fn blend_pixel(base: &mut Rgba<u8>, overlay: &Rgba<u8>) {
    let alpha = overlay[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let inv_alpha = 1.0 - alpha;
    for idx in 0..3 {
        base[idx] = (overlay[idx] as f32 * alpha + base[idx] as f32 * inv_alpha)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    base[3] = base[3].max(overlay[3]);
}

fn fill_rect(canvas: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    let x0 = x.max(0.0) as u32;
    let y0 = y.max(0.0) as u32;
    let x1 = ((x + w).max(0.0) as u32).min(canvas.width());
    let y1 = ((y + h).max(0.0) as u32).min(canvas.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let pixel = canvas.get_pixel_mut(px, py);
            blend_pixel(pixel, &color);
        }
    }
}

/// Vertical gradient from fully transparent at the top of the band to
/// `max_alpha` at the bottom.
fn gradient_band(
    canvas: &mut RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: [u8; 3],
    max_alpha: f32,
) {
    let x0 = x.max(0.0) as u32;
    let y0 = y.max(0.0) as u32;
    let x1 = ((x + w).max(0.0) as u32).min(canvas.width());
    let y1 = ((y + h).max(0.0) as u32).min(canvas.height());
    if y1 <= y0 {
        return;
    }

    for py in y0..y1 {
        let t = (py - y0) as f32 / (y1 - y0) as f32;
        let alpha = (t * max_alpha * 255.0).round() as u8;
        let overlay = Rgba([color[0], color[1], color[2], alpha]);
        for px in x0..x1 {
            let pixel = canvas.get_pixel_mut(px, py);
            blend_pixel(pixel, &overlay);
        }
    }
}

fn draw_image_or_blank(canvas: &mut RgbaImage, f: &CellFrame<'_>) {
    match f.image {
        Some(img) => draw_image(canvas, img, f.x, f.y),
        None => fill_rect(
            canvas,
            f.x,
            f.y,
            f.size,
            f.size,
            Rgba([40, 40, 40, 255]),
        ),
    }
}

fn draw_image(canvas: &mut RgbaImage, img: &RgbaImage, x: f32, y: f32) {
    let x0 = x.round() as i64;
    let y0 = y.round() as i64;

    for (dx, dy, pixel) in img.enumerate_pixels() {
        let px = x0 + dx as i64;
        let py = y0 + dy as i64;
        if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= canvas.height() as i64 {
            continue;
        }
        let target = canvas.get_pixel_mut(px as u32, py as u32);
        if pixel[3] == 255 {
            *target = *pixel;
        } else {
            blend_pixel(target, pixel);
        }
    }
}

/// Draws the image clipped to the inscribed circle of the cell.
fn draw_image_circle(canvas: &mut RgbaImage, img: &RgbaImage, x: f32, y: f32, size: f32) {
    let radius = size / 2.0;
    let cx = radius;
    let cy = radius;
    let x0 = x.round() as i64;
    let y0 = y.round() as i64;

    for (dx, dy, pixel) in img.enumerate_pixels() {
        let dist_x = dx as f32 + 0.5 - cx;
        let dist_y = dy as f32 + 0.5 - cy;
        if dist_x * dist_x + dist_y * dist_y > radius * radius {
            continue;
        }

        let px = x0 + dx as i64;
        let py = y0 + dy as i64;
        if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= canvas.height() as i64 {
            continue;
        }
        let target = canvas.get_pixel_mut(px as u32, py as u32);
        if pixel[3] == 255 {
            *target = *pixel;
        } else {
            blend_pixel(target, pixel);
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, x: f32, y: f32, size: f32, color: Rgba<u8>) {
    let radius = size / 2.0;
    let cx = x + radius;
    let cy = y + radius;
    let x0 = x.max(0.0) as u32;
    let y0 = y.max(0.0) as u32;
    let x1 = ((x + size).max(0.0) as u32).min(canvas.width());
    let y1 = ((y + size).max(0.0) as u32).min(canvas.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let dist_x = px as f32 + 0.5 - cx;
            let dist_y = py as f32 + 0.5 - cy;
            if dist_x * dist_x + dist_y * dist_y <= radius * radius {
                let pixel = canvas.get_pixel_mut(px, py);
                blend_pixel(pixel, &color);
            }
        }
    }
}

fn draw_text(
    canvas: &mut RgbaImage,
    txt: &str,
    font: &Font<'_>,
    size: f32,
    x: f32,
    y: f32,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font.layout(txt, scale, point(0.0, v_metrics.ascent)).collect();

    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, gv| {
                let px = x as i32 + gx as i32 + bb.min.x;
                let py = y as i32 + gy as i32 + bb.min.y;

                if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
                    return;
                }

                let alpha = (gv * color[3] as f32).round() as u8;
                let overlay = Rgba([color[0], color[1], color[2], alpha]);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                blend_pixel(pixel, &overlay);
            });
        }
    }
}

fn draw_text_centered(
    canvas: &mut RgbaImage,
    txt: &str,
    font: &Font<'_>,
    size: f32,
    center_x: f32,
    y: f32,
    color: Rgba<u8>,
) {
    if txt.is_empty() {
        return;
    }
    let width = text::measure_width(font, size, txt);
    draw_text(canvas, txt, font, size, center_x - width / 2.0, y, color);
}

/// Centered text with a dark drop shadow one scaled pixel down-right.
#[allow(clippy::too_many_arguments)]
fn draw_text_shadowed(
    canvas: &mut RgbaImage,
    txt: &str,
    font: &Font<'_>,
    size: f32,
    center_x: f32,
    y: f32,
    scale: f32,
    color: Rgba<u8>,
) {
    draw_text_centered(
        canvas,
        txt,
        font,
        size,
        center_x + scale,
        y + scale,
        Rgba([0, 0, 0, 180]),
    );
    draw_text_centered(canvas, txt, font, size, center_x, y, color);
}
