/// Render one row of cells for console output.
pub fn format_row(row: &[String]) -> String {
    row.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_cells_with_comma_space() {
        assert_eq!(format_row(&["a".into(), "b".into()]), "a, b");
    }

    #[test]
    fn single_cell_has_no_separator() {
        assert_eq!(format_row(&["only".into()]), "only");
    }

    #[test]
    fn empty_row_is_empty_string() {
        assert_eq!(format_row(&[]), "");
    }
}
