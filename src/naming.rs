use convert_case::{Case, Casing};

/// Turn a column token into a display name: `is_active` becomes `Is active`,
/// `author_id` becomes `Author`.
#[must_use]
pub fn humanize(column: &str) -> String {
    let column = column.trim_matches('_');
    column
        .strip_suffix("_id")
        .unwrap_or(column)
        .to_case(Case::Sentence)
}

#[cfg(test)]
mod tests {
    use super::humanize;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("is_active"), "Is active");
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("_created_at_"), "Created at");
        assert_eq!(humanize("имя"), "Имя");
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("createdAt"), "Created at");
        assert_eq!(humanize("дата_создания"), "Дата создания");
    }
}
