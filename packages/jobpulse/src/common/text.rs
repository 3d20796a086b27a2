//! Text normalization shared by all job sources.

/// Collapse whitespace runs (including newlines) into single spaces and trim.
///
/// Idempotent: `clean_text(clean_text(s)) == clean_text(s)`.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a combined feed title into (title, company).
///
/// Feeds publish either "Title at Company" or "Company - Title". If neither
/// separator is present the company falls back to "Unknown".
pub fn split_title_company(raw: &str) -> (String, String) {
    if let Some((title, company)) = raw.split_once(" at ") {
        return (clean_text(title), clean_text(company));
    }
    if let Some((company, title)) = raw.split_once(" - ") {
        return (clean_text(title), clean_text(company));
    }
    (clean_text(raw), "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Python \n Intern\t(Remote) "), "Python Intern (Remote)");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn clean_text_is_idempotent() {
        let once = clean_text("Junior\n\nDeveloper  ");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn split_prefers_at_separator() {
        let (title, company) = split_title_company("Python Developer at Acme Corp");
        assert_eq!(title, "Python Developer");
        assert_eq!(company, "Acme Corp");
    }

    #[test]
    fn split_falls_back_to_dash() {
        let (title, company) = split_title_company("Acme Corp - Python Developer");
        assert_eq!(title, "Python Developer");
        assert_eq!(company, "Acme Corp");
    }

    #[test]
    fn split_without_separator_leaves_company_unknown() {
        let (title, company) = split_title_company("Python Developer");
        assert_eq!(title, "Python Developer");
        assert_eq!(company, "Unknown");
    }
}
