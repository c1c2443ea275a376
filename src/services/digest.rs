use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::DigestPick,
};

/// Placeholder used when the trivia generator returns nothing usable
pub const TRIVIA_FALLBACK: &str = "豆知識を生成できませんでした。";

/// Picks one digest candidate uniformly at random.
///
/// The entropy source is an explicit parameter so tests can seed it.
pub fn pick_one<'a, R: Rng + ?Sized>(
    pool: &'a [DigestPick],
    rng: &mut R,
) -> AppResult<&'a DigestPick> {
    if pool.is_empty() {
        return Err(AppError::EmptyPool(
            "ランキングデータが見つかりません".to_string(),
        ));
    }
    Ok(&pool[rng.gen_range(0..pool.len())])
}

/// Renders the push-notification text for a digest pick.
///
/// Four lines: icon header, bracketed category + title, blank line, trivia.
/// Consumers parse this shape, so the template is byte-for-byte fixed. The
/// destination is plain text, so content fields embed unescaped.
pub fn compose(pick: &DigestPick, trivia: &str) -> String {
    format!(
        "{} 今日の豆知識\n\n【{} 1位】{}\n\n{}",
        pick.category_icon, pick.category_name, pick.title, trivia
    )
}
