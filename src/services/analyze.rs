use crate::models::{Category, RankingItem};

/// Formats the full ranking snapshot as one text block per category, in
/// display order, for the taste-analysis prompt.
///
/// Each block is the category header followed by its items sorted by rank.
/// Categories without items still get a header; the model copes with an
/// empty block better than a silently missing category.
pub fn format_ranking_overview(categories: &[Category], items: &[RankingItem]) -> String {
    categories
        .iter()
        .map(|cat| {
            let mut category_items: Vec<&RankingItem> = items
                .iter()
                .filter(|item| item.category_id == cat.id)
                .collect();
            category_items.sort_by_key(|item| item.rank);

            let lines: Vec<String> = category_items
                .iter()
                .map(|item| format!("{}位: {}", item.rank, item.title))
                .collect();

            format!("【{} {}】\n{}", cat.icon, cat.name, lines.join("\n"))
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Prompt asking the model to characterize the owner's taste from the
/// formatted ranking overview
pub fn analysis_prompt(overview: &str) -> String {
    format!(
        "以下はある人の好きなもののランキングデータです。この人の趣味の傾向、好みの特徴、意外な共通点などを300文字程度で分析してください。親しみやすい口調で。\n\n{}",
        overview
    )
}
