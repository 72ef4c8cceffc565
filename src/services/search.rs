use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Matcher, Utf32Str,
};

/// Filter picker options using fuzzy matching.
/// Returns the indices of matching options, best match first.
pub fn filter_options(options: &[String], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..options.len()).collect();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut buf = Vec::new();

    let mut scored: Vec<(usize, u32)> = options
        .iter()
        .enumerate()
        .filter_map(|(idx, option)| {
            let haystack = Utf32Str::new(option, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (idx, score))
        })
        .collect();

    // Stable sort keeps equal scores in listing order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(idx, _)| idx).collect()
}
