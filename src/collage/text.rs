use rusttype::{Font, Scale, point};

/// Shortens text until it fits `max_width` under the given measure,
/// replacing the removed tail with an ellipsis.
///
/// Each pass removes one more character and re-appends `"..."`, so the
/// result is deterministic for a fixed measure and calling it on its own
/// output changes nothing. The floor is the bare ellipsis; a string that
/// cannot fit even then is returned as `"..."` rather than emptied.
pub fn truncate_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> String {
    let mut current = text.to_string();

    while measure(&current) > max_width {
        let chars: Vec<char> = current.chars().collect();
        if chars.len() <= 3 {
            break;
        }
        current = chars[..chars.len() - 4].iter().collect::<String>() + "...";
    }

    current
}

/// Advance width of `text` at the given pixel size.
pub fn measure_width(font: &Font<'_>, size: f32, text: &str) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .map(|g| g.unpositioned().h_metrics().advance_width)
        .sum()
}
