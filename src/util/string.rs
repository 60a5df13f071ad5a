pub struct StringUtils {}

impl StringUtils {
    pub fn maybe_pluralize((singular, plural) : (&str, &str), qty: usize) -> String {
        format!("{}", if qty == 1 { singular } else { plural })
    }

    pub fn maybe_pluralize_count(count: usize, (singular, plural) : (&str, &str)) -> String {
        format!("{} {}", count, Self::maybe_pluralize((singular, plural), count))
    }

    /// Byte count as kilobytes with one decimal, e.g. `12.3 KB`.
    pub fn kilobytes(bytes: u64) -> String {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }

    /// Relevance in `0.0..=1.0` as a percentage with one decimal.
    pub fn percent(score: f64) -> String {
        format!("{:.1}%", score * 100.0)
    }
}
