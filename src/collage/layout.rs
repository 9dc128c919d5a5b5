use crate::{
    enrich::PLACEHOLDER_FRAGMENT,
    types::{Cell, CollageResult, GridSpec, ImageRef, Item, ItemKind, SizeTag, Template},
    utils,
};

/// Places chart items into grid cells.
///
/// Items are taken in chart order. An item without a selectable image is
/// skipped entirely, so later items shift forward to fill its cell; the
/// grid never shows holes in the middle. When fewer usable items exist
/// than cells, the trailing cells stay unfilled. A chart with no usable
/// items at all yields a result with the `empty` flag set, which is a
/// valid outcome and not an error.
///
/// Cell positions are assigned row-major: left to right, then top to
/// bottom. Every cell URL is normalized to a secure scheme.
pub fn layout(items: Vec<Item>, grid: GridSpec, template: Template, kind: ItemKind) -> CollageResult {
    let mut cells = Vec::new();
    let limit = grid.limit() as usize;

    for (index, item) in items.iter().enumerate() {
        if cells.len() >= limit {
            break;
        }

        let Some(url) = select_image(item, kind) else {
            continue;
        };

        let position = cells.len() as u32;
        cells.push(Cell {
            item: index,
            image_url: utils::secure_url(&url),
            row: position / grid.width(),
            col: position % grid.width(),
        });
    }

    let empty = cells.is_empty();

    CollageResult {
        items,
        cells,
        grid,
        template,
        kind,
        empty,
    }
}

/// Picks the image URL for one item according to its kind.
///
/// Albums carry their own covers and get the largest one available.
/// Artist imagery tops out at `extralarge` on this API, so that is tried
/// first with `large` as fallback. Tracks use their own `extralarge`
/// entry, else the parent album's.
///
/// Real artwork always wins, but an item whose only art is the
/// placeholder star still gets a cell; only items with no image at all
/// are dropped.
fn select_image(item: &Item, kind: ItemKind) -> Option<String> {
    select_with(item, kind, false).or_else(|| select_with(item, kind, true))
}

fn select_with(item: &Item, kind: ItemKind, allow_placeholder: bool) -> Option<String> {
    match kind {
        ItemKind::Albums => pick(
            &item.images,
            &[SizeTag::Mega, SizeTag::ExtraLarge, SizeTag::Large],
            allow_placeholder,
        ),
        ItemKind::Artists => pick(
            &item.images,
            &[SizeTag::ExtraLarge, SizeTag::Large],
            allow_placeholder,
        ),
        ItemKind::Tracks => pick(&item.images, &[SizeTag::ExtraLarge], allow_placeholder)
            .or_else(|| pick(&item.album_images, &[SizeTag::ExtraLarge], allow_placeholder)),
    }
}

fn pick(images: &[ImageRef], preference: &[SizeTag], allow_placeholder: bool) -> Option<String> {
    for wanted in preference {
        if let Some(img) = images.iter().find(|img| {
            img.size == *wanted
                && !img.url.is_empty()
                && (allow_placeholder || !img.url.contains(PLACEHOLDER_FRAGMENT))
        }) {
            return Some(img.url.clone());
        }
    }
    None
}
