use crate::models::RankingItem;

/// Share-card canvas dimensions (OGP image aspect)
pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Vertical layout of the item rows: row i sits at ROW_BASE_Y + i * ROW_HEIGHT.
/// These constants are part of the contract; visual regression tooling
/// compares against them.
pub const ROW_BASE_Y: u32 = 300;
pub const ROW_HEIGHT: u32 = 100;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Escapes text for embedding in SVG attributes and text nodes.
///
/// `&` must go first or the other substitutions' ampersands would be escaped
/// twice. Already-escaped input gets double-escaped; that is the expected
/// behavior for an opaque text channel, not a defect.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a self-contained 1200x630 SVG share card for a ranked list.
///
/// Items sort by rank ascending (stable) and at most the first three are
/// drawn, each with its ordinal medal. Upstream already truncates, but the
/// cap is enforced here too. An empty item list still produces the full
/// static frame with zero rows.
pub fn render_card(category_name: &str, category_icon: &str, items: &[RankingItem]) -> String {
    let mut ranked: Vec<&RankingItem> = items.iter().collect();
    ranked.sort_by_key(|item| item.rank);
    ranked.truncate(MEDALS.len());

    let header = escape(&format!("{} {}", category_icon, category_name));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    ));
    svg.push_str(
        r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="#1a1a2e"/><stop offset="100%" stop-color="#16213e"/></linearGradient></defs>"##,
    );
    svg.push_str(&format!(
        r##"<rect width="{w}" height="{h}" fill="url(#bg)"/>"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    ));
    svg.push_str(
        r##"<rect x="24" y="24" width="1152" height="582" fill="none" stroke="#e94560" stroke-width="3" rx="16"/>"##,
    );
    svg.push_str(
        r##"<text x="80" y="120" font-family="sans-serif" font-size="44" font-weight="bold" fill="#e94560">MY RANKING</text>"##,
    );
    svg.push_str(&format!(
        r##"<text x="80" y="200" font-family="sans-serif" font-size="56" font-weight="bold" fill="#ffffff">{}</text>"##,
        header
    ));
    svg.push_str(r##"<line x1="80" y1="236" x2="1120" y2="236" stroke="#e94560" stroke-width="2"/>"##);

    for (i, item) in ranked.iter().enumerate() {
        let y = ROW_BASE_Y + i as u32 * ROW_HEIGHT;
        svg.push_str(&format!(
            r##"<text class="row" x="80" y="{y}" font-family="sans-serif" font-size="48" fill="#ffffff">{medal} {title}</text>"##,
            y = y,
            medal = MEDALS[i],
            title = escape(&item.title)
        ));
    }

    svg.push_str(&format!(
        r##"<text x="{x}" y="580" font-family="sans-serif" font-size="28" fill="#8d99ae" text-anchor="middle">MY RANKING API v2.0</text>"##,
        x = CARD_WIDTH / 2
    ));
    svg.push_str("</svg>");

    svg
}
