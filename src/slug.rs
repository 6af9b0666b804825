/// Characters never allowed into a record filename.
const UNSAFE: &[char] = &['|', '/', '\\', ':', '*', '?', '"', '<', '>'];

/// Turn a free-text title into a filesystem-safe slug: unsafe characters
/// stripped, lower-cased, whitespace runs collapsed to single underscores.
/// Total; empty input yields an empty slug.
pub fn sanitize(title: &str) -> String {
    let stripped: String =
        title.chars().filter(|c| !UNSAFE.contains(c)).collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(sanitize("Payment Failures"), "payment_failures");
        assert_eq!(sanitize("DB outage"), "db_outage");
    }

    #[test]
    fn strips_unsafe_characters() {
        assert_eq!(sanitize(r#"a|b/c\d:e*f?g"h<i>j"#), "abcdefghij");
        assert_eq!(sanitize("what? now!"), "what_now!");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize("a  \t b\n\nc"), "a_b_c");
        assert_eq!(sanitize("   padded   "), "padded");
    }

    #[test]
    fn empty_input_is_empty_slug() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("???"), "");
    }

    #[test]
    fn existing_underscores_survive() {
        assert_eq!(sanitize("db_retry plan"), "db_retry_plan");
    }

    #[test]
    fn idempotent_over_samples() {
        let samples = [
            "Payment Failures",
            "a  \t b\n\nc",
            r#"we?ird | title"#,
            "",
            "MiXeD CaSe",
            "already_a_slug",
            "Üñíçødé spaces",
        ];
        for s in samples {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once, "not idempotent for {s:?}");
        }
    }
}
