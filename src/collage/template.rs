use crate::types::Template;

/// Canvas background of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Solid([u8; 3]),
    /// Vertical gradient, top color to bottom color.
    Gradient([u8; 3], [u8; 3]),
    Transparent,
}

/// Static visual parameters of a template. Cell drawing itself lives in
/// the renderer registry; this struct covers what the canvas setup needs.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    /// Gap between cells in unscaled layout units.
    pub gap: u32,
    pub background: Background,
}

impl Template {
    pub fn spec(&self) -> TemplateSpec {
        match self {
            Template::Classic => TemplateSpec {
                gap: 8,
                background: Background::Gradient([0x00, 0x00, 0x00], [0x1a, 0x1a, 0x1a]),
            },
            Template::Polaroid => TemplateSpec {
                gap: 20,
                background: Background::Solid([0xff, 0xff, 0xff]),
            },
            Template::Minimal => TemplateSpec {
                gap: 2,
                background: Background::Transparent,
            },
            Template::Mosaic => TemplateSpec {
                gap: 4,
                background: Background::Solid([0x00, 0x00, 0x00]),
            },
            Template::Vinyl => TemplateSpec {
                gap: 16,
                background: Background::Solid([0x12, 0x12, 0x12]),
            },
        }
    }
}
