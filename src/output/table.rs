//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Placeholder printed instead of an empty table
pub const NO_RESULTS: &str = "Your request returned no object.";

fn build<T: Tabled>(data: &[T]) -> Table {
    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table
}

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return NO_RESULTS.to_string();
    }

    build(data).to_string()
}

/// Format data as a table with a separator between every row, for multi-line cells
pub fn format_table_lined<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut table = build(data);
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "NAME")]
        name: String,
    }

    fn rows() -> Vec<TestRow> {
        vec![
            TestRow {
                id: "1".to_string(),
                name: "Acme".to_string(),
            },
            TestRow {
                id: "2".to_string(),
                name: "Globex".to_string(),
            },
        ]
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        assert_eq!(format_table(&items), NO_RESULTS);
        assert_eq!(format_table_lined(&items), NO_RESULTS);
    }

    #[test]
    fn test_format_table_rows() {
        let result = format_table(&rows());

        assert!(result.contains("ID"));
        assert!(result.contains("NAME"));
        assert!(result.contains("Acme"));
        assert!(result.contains("Globex"));
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let result = format_table(&rows());

        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }

    #[test]
    fn test_format_table_lined_has_more_lines() {
        let plain = format_table(&rows());
        let lined = format_table_lined(&rows());

        assert!(lined.lines().count() > plain.lines().count());
        assert!(lined.contains("Globex"));
    }
}
