// Message resolution

/// Pick the first non-empty candidate, or `fallback`
pub(crate) fn resolve_message<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    fallback: &'a str,
) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|msg| !msg.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
