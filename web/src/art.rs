use fanmory_core as game;

/// One glyph per default pair, enough for the hard preset without repeats.
const GLYPHS: [&str; 32] = [
    "🍎", "🍌", "🍇", "🍉", "🍒", "🍑", "🍍", "🥝", "🥕", "🌽", "🍄", "🌵", "🌻", "🌈", "⭐", "🌙",
    "🔥", "❄️", "🎈", "🎁", "🎨", "🎸", "🎲", "🚀", "🚲", "⚽", "🏀", "🐱", "🐶", "🐼", "🐸", "🦊",
];

const PALETTE: [&str; 8] = [
    "#fde2e4", "#e2ece9", "#dfe7fd", "#fff1c1", "#e8dff5", "#d7f9f1", "#ffe5d9", "#e4f4fd",
];

fn card_svg(glyph: &str, background: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" rx="12" fill="{background}"/><text x="50" y="54" font-size="56" text-anchor="middle" dominant-baseline="middle">{glyph}</text></svg>"#
    )
}

/// Bundled card faces used to fill pairs the player did not bring images for.
pub(crate) fn default_card_images() -> Vec<game::ImageRef> {
    GLYPHS
        .iter()
        .enumerate()
        .map(|(i, glyph)| {
            let svg = card_svg(glyph, PALETTE[i % PALETTE.len()]);
            let encoded = String::from(js_sys::encode_uri_component(&svg));
            game::ImageRef::new(format!("data:image/svg+xml;charset=utf-8,{}", encoded))
        })
        .collect()
}
