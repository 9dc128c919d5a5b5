use std::time::Duration;

use collagefm::collage::layout::layout;
use collagefm::collage::render::{CellText, Geometry, scale_step};
use collagefm::collage::template::Background;
use collagefm::collage::text::truncate_text;
use collagefm::enrich::enrich_with;
use collagefm::pipeline::Session;
use collagefm::types::{
    Density, GridSpec, ImageRef, Item, ItemKind, Period, SizeTag, Template,
};

// Helper to build a chart item with a single extralarge image
fn test_item(name: &str, artist: &str, url: &str) -> Item {
    Item {
        name: name.to_string(),
        primary_artist: artist.to_string(),
        playcount: 42,
        rank: Some(1),
        images: vec![ImageRef {
            size: SizeTag::ExtraLarge,
            url: url.to_string(),
        }],
        album_images: Vec::new(),
    }
}

fn artless_item(name: &str) -> Item {
    Item {
        images: Vec::new(),
        ..test_item(name, "someone", "")
    }
}

#[test]
fn test_grid_spec_rejects_out_of_range_sides() {
    assert!(GridSpec::square(1).is_err());
    assert!(GridSpec::square(9).is_err());
    assert!(GridSpec::new(3, 12).is_err());

    for side in 2..=8 {
        assert!(GridSpec::square(side).is_ok());
    }
}

#[test]
fn test_grid_spec_limit_is_cell_count() {
    assert_eq!(GridSpec::square(3).unwrap().limit(), 9);
    assert_eq!(GridSpec::new(4, 2).unwrap().limit(), 8);
    assert_eq!(GridSpec::square(8).unwrap().limit(), 64);
}

#[test]
fn test_density_thresholds() {
    // 9 cells is the top of the normal band
    assert_eq!(GridSpec::square(3).unwrap().density(), Density::Normal);
    // 10 through 36 cells is small
    assert_eq!(GridSpec::new(5, 2).unwrap().density(), Density::Small);
    assert_eq!(GridSpec::square(6).unwrap().density(), Density::Small);
    // Above 36 is very small
    assert_eq!(GridSpec::square(7).unwrap().density(), Density::VerySmall);
}

#[test]
fn test_layout_assigns_row_major_positions() {
    let items: Vec<Item> = (0..9)
        .map(|i| test_item(&format!("album {}", i), "artist", "https://img/x.png"))
        .collect();
    let grid = GridSpec::square(3).unwrap();

    let result = layout(items, grid, Template::Classic, ItemKind::Albums);

    assert_eq!(result.cells.len(), 9);
    assert!(!result.empty);
    for (i, cell) in result.cells.iter().enumerate() {
        assert_eq!(cell.row, i as u32 / 3);
        assert_eq!(cell.col, i as u32 % 3);
        assert_eq!(cell.item, i);
    }
}

#[test]
fn test_layout_positions_are_unique_and_in_bounds() {
    let items: Vec<Item> = (0..9)
        .map(|i| test_item(&format!("a{}", i), "b", "https://img/x.png"))
        .collect();
    let grid = GridSpec::square(3).unwrap();

    let result = layout(items, grid, Template::Mosaic, ItemKind::Albums);

    let mut seen = std::collections::BTreeSet::new();
    for cell in &result.cells {
        assert!(cell.row < 3 && cell.col < 3);
        assert!(seen.insert((cell.row, cell.col)));
    }
}

#[test]
fn test_layout_skips_artless_items_and_shifts_forward() {
    // 5 items for a 3x3 grid, the second one without artwork
    let items = vec![
        test_item("one", "a", "https://img/1.png"),
        artless_item("two"),
        test_item("three", "a", "https://img/3.png"),
        test_item("four", "a", "https://img/4.png"),
        test_item("five", "a", "https://img/5.png"),
    ];
    let grid = GridSpec::square(3).unwrap();

    let result = layout(items, grid, Template::Classic, ItemKind::Albums);

    // Four usable items fill the first four cells with no hole
    assert_eq!(result.cells.len(), 4);
    assert_eq!(result.cells[1].item, 2);
    assert_eq!(result.cells[1].row, 0);
    assert_eq!(result.cells[1].col, 1);
    assert_eq!(result.cells[3].item, 4);
    assert_eq!(result.cells[3].row, 1);
    assert_eq!(result.cells[3].col, 0);
}

#[test]
fn test_layout_with_no_usable_items_is_empty_not_an_error() {
    let items = vec![artless_item("one"), artless_item("two")];
    let grid = GridSpec::square(2).unwrap();

    let result = layout(items, grid, Template::Classic, ItemKind::Albums);

    assert!(result.empty);
    assert!(result.cells.is_empty());
    // The items themselves are retained for inspection
    assert_eq!(result.items.len(), 2);
}

#[test]
fn test_layout_albums_prefer_largest_size() {
    let mut item = test_item("album", "artist", "https://img/xl.png");
    item.images.push(ImageRef {
        size: SizeTag::Mega,
        url: "https://img/mega.png".to_string(),
    });

    let grid = GridSpec::square(2).unwrap();
    let result = layout(vec![item], grid, Template::Classic, ItemKind::Albums);

    assert_eq!(result.cells[0].image_url, "https://img/mega.png");
}

#[test]
fn test_layout_tracks_fall_back_to_album_art() {
    let mut item = test_item("track", "artist", "");
    item.images.clear();
    item.album_images.push(ImageRef {
        size: SizeTag::ExtraLarge,
        url: "https://img/album.png".to_string(),
    });

    let grid = GridSpec::square(2).unwrap();
    let result = layout(vec![item], grid, Template::Classic, ItemKind::Tracks);

    assert_eq!(result.cells.len(), 1);
    assert_eq!(result.cells[0].image_url, "https://img/album.png");
}

#[test]
fn test_layout_tracks_do_not_fall_back_to_own_large() {
    // Only a large own image and no album art; the track selection rule
    // stops after the album fallback, so no cell is produced.
    let mut item = test_item("track", "artist", "");
    item.images = vec![ImageRef {
        size: SizeTag::Large,
        url: "https://img/large.png".to_string(),
    }];

    let grid = GridSpec::square(2).unwrap();
    let result = layout(vec![item], grid, Template::Classic, ItemKind::Tracks);

    assert!(result.empty);
    assert!(result.cells.is_empty());
}

#[test]
fn test_layout_keeps_placeholder_art_as_last_resort() {
    let star = format!(
        "https://lastfm.freetls.fastly.net/i/u/300x300/{}.png",
        "2a96cbd8b46e442fc41c2b86b821562f"
    );

    // Real art at a lower preference still beats the placeholder
    let mut prefer_real = test_item("one", "artist", &star);
    prefer_real.images.push(ImageRef {
        size: SizeTag::Large,
        url: "https://img/real-large.png".to_string(),
    });

    // An item whose only art is the placeholder keeps its cell
    let star_only = test_item("two", "artist", &star);

    let grid = GridSpec::square(2).unwrap();
    let result = layout(
        vec![prefer_real, star_only],
        grid,
        Template::Classic,
        ItemKind::Albums,
    );

    assert_eq!(result.cells.len(), 2);
    assert_eq!(result.cells[0].image_url, "https://img/real-large.png");
    assert_eq!(result.cells[1].image_url, star);
}

#[test]
fn test_layout_secures_cell_urls() {
    let item = test_item("album", "artist", "http://img.example/cover.png");
    let grid = GridSpec::square(2).unwrap();

    let result = layout(vec![item], grid, Template::Classic, ItemKind::Albums);

    assert_eq!(result.cells[0].image_url, "https://img.example/cover.png");
}

#[test]
fn test_scale_step() {
    assert_eq!(scale_step(2), 8);
    assert_eq!(scale_step(5), 8);
    assert_eq!(scale_step(6), 6);
    assert_eq!(scale_step(7), 6);
    assert_eq!(scale_step(8), 4);
    assert_eq!(scale_step(9), 3);
}

#[test]
fn test_geometry_matches_grid_arithmetic() {
    let grid = GridSpec::square(3).unwrap();
    let geom = Geometry::new(grid, 8);

    // canvas = cells + gaps, at scale 8 for a 3x3 grid
    let expected = (250 * 3 + 8 * 4) * 8;
    assert_eq!(geom.canvas_w, expected);
    assert_eq!(geom.canvas_h, expected);

    // width decomposes back into three cells and four gaps
    let recomposed = geom.img_size * 3.0 + geom.gap * 4.0;
    assert!((recomposed - geom.canvas_w as f32).abs() < 1.0);
}

#[test]
fn test_geometry_clamps_to_max_dimension() {
    // An oversized gap pushes the raw canvas past the ceiling
    let grid = GridSpec::square(5).unwrap();
    let geom = Geometry::new(grid, 200);

    assert!(geom.canvas_w <= 12000);
    assert!(geom.canvas_h <= 12000);
    assert_eq!(geom.canvas_w.max(geom.canvas_h), 12000);

    // Scale shrinks by the same ratio, keeping cell proportions
    let raw = ((250 * 5 + 200 * 6) * 8) as f32;
    let ratio = 12000.0 / raw;
    assert!((geom.scale - 8.0 * ratio).abs() < 0.001);
}

#[test]
fn test_truncate_text_respects_width() {
    // Measure is simply the character count
    let measure = |s: &str| s.chars().count() as f32;

    let out = truncate_text("a very long album title", 10.0, measure);
    assert!(measure(&out) <= 10.0);
    assert!(out.ends_with("..."));
}

#[test]
fn test_truncate_text_is_idempotent() {
    let measure = |s: &str| s.chars().count() as f32;

    let once = truncate_text("a very long album title", 10.0, measure);
    let twice = truncate_text(&once, 10.0, measure);
    assert_eq!(once, twice);
}

#[test]
fn test_truncate_text_leaves_fitting_text_alone() {
    let measure = |s: &str| s.chars().count() as f32;
    assert_eq!(truncate_text("short", 10.0, measure), "short");
}

#[test]
fn test_truncate_text_floors_at_ellipsis() {
    let measure = |s: &str| s.chars().count() as f32;
    // Nothing fits, but the result never degrades below the bare ellipsis
    assert_eq!(truncate_text("abcdefgh", 0.0, measure), "...");
}

#[test]
fn test_cell_text_lines_per_kind() {
    let mut item = test_item("Name", "Artist", "https://img/x.png");
    item.playcount = 1234;
    item.rank = Some(7);

    let albums = CellText::from_item(&item, ItemKind::Albums);
    assert_eq!(albums.title, "Name");
    assert_eq!(albums.line2, "Artist");
    assert_eq!(albums.line3, "1,234 plays");

    let artists = CellText::from_item(&item, ItemKind::Artists);
    assert_eq!(artists.line2, "1,234 plays");
    assert_eq!(artists.line3, "#7");

    let tracks = CellText::from_item(&item, ItemKind::Tracks);
    assert_eq!(tracks.line2, "Artist");
    assert_eq!(tracks.line3, "1,234 plays");
}

#[test]
fn test_template_registry_constants() {
    assert_eq!(Template::Classic.spec().gap, 8);
    assert_eq!(Template::Polaroid.spec().gap, 20);
    assert_eq!(Template::Minimal.spec().gap, 2);
    assert_eq!(Template::Mosaic.spec().gap, 4);
    assert_eq!(Template::Vinyl.spec().gap, 16);

    assert_eq!(
        Template::Polaroid.spec().background,
        Background::Solid([0xff, 0xff, 0xff])
    );
    assert_eq!(Template::Minimal.spec().background, Background::Transparent);
    assert!(matches!(
        Template::Classic.spec().background,
        Background::Gradient(_, _)
    ));
}

#[test]
fn test_session_rejects_blank_username() {
    assert!(Session::new("", ItemKind::Albums, Period::Overall, 3, 3, Template::Classic).is_err());
    assert!(
        Session::new("   ", ItemKind::Albums, Period::Overall, 3, 3, Template::Classic).is_err()
    );
}

#[test]
fn test_session_trims_username_and_validates_grid() {
    let session =
        Session::new("  alice  ", ItemKind::Tracks, Period::SevenDay, 4, 4, Template::Vinyl)
            .unwrap();
    assert_eq!(session.username(), "alice");
    assert_eq!(session.grid().limit(), 16);
    assert!(session.enrich_art());

    assert!(
        Session::new("alice", ItemKind::Tracks, Period::SevenDay, 1, 3, Template::Vinyl).is_err()
    );
}

#[test]
fn test_session_accepts_rectangular_grid() {
    let session =
        Session::new("alice", ItemKind::Albums, Period::Overall, 5, 3, Template::Classic).unwrap();
    assert_eq!(session.grid().width(), 5);
    assert_eq!(session.grid().height(), 3);
    assert_eq!(session.grid().limit(), 15);

    let session = session.without_enrichment();
    assert!(!session.enrich_art());
}

#[tokio::test]
async fn test_enrich_with_preserves_order_under_uneven_latency() {
    let mut items = vec![
        test_item("slow", "a", "https://img/slow.png"),
        test_item("medium", "a", "https://img/medium.png"),
        test_item("fast", "a", "https://img/fast.png"),
    ];

    // Slower lookups for earlier items; results must still land by position
    enrich_with(&mut items, |item| async move {
        let delay = match item.name.as_str() {
            "slow" => 30,
            "medium" => 15,
            _ => 1,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Some(format!("https://new/{}.png", item.name))
    })
    .await;

    assert_eq!(items[0].images[0].url, "https://new/slow.png");
    assert_eq!(items[1].images[0].url, "https://new/medium.png");
    assert_eq!(items[2].images[0].url, "https://new/fast.png");
}

#[tokio::test]
async fn test_enrich_with_all_failures_leaves_items_unchanged() {
    let mut items = vec![
        test_item("one", "a", "https://img/1.png"),
        test_item("two", "a", "https://img/2.png"),
    ];
    let before: Vec<String> = items.iter().map(|i| i.images[0].url.clone()).collect();

    enrich_with(&mut items, |_| async move { None }).await;

    let after: Vec<String> = items.iter().map(|i| i.images[0].url.clone()).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_enrich_with_secures_replacement_urls() {
    let mut items = vec![test_item("one", "a", "https://img/old.png")];

    enrich_with(&mut items, |_| async move {
        Some("http://img.example/new.png".to_string())
    })
    .await;

    assert_eq!(items[0].images[0].url, "https://img.example/new.png");
}
