//! Read-only statement gate.

/// Returns true iff the trimmed, case-normalized statement begins with
/// `SELECT`.
///
/// This is a lexical prefix check, not a parse. SELECT statements that smuggle
/// side effects through stored-function calls will pass; statements led by
/// comments or CTEs (`WITH ... SELECT`) will not. Empty candidates are
/// rejected.
pub fn is_select(sql: &str) -> bool {
    sql.trim().to_uppercase().starts_with("SELECT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_select_statements() {
        assert!(is_select("SELECT 1"));
        assert!(is_select("select * from email"));
        assert!(is_select("  \n\tSeLeCt id FROM contact"));
        assert!(is_select("SELECT COUNT(*) FROM email WHERE deleted = 0;"));
    }

    #[test]
    fn rejects_writes_and_ddl() {
        assert!(!is_select("DELETE FROM email WHERE id=1"));
        assert!(!is_select("INSERT INTO email VALUES (1)"));
        assert!(!is_select("UPDATE email SET deleted = 1"));
        assert!(!is_select("DROP TABLE email"));
        assert!(!is_select("TRUNCATE email"));
    }

    #[test]
    fn rejects_empty_and_prose() {
        assert!(!is_select(""));
        assert!(!is_select("   \n  "));
        assert!(!is_select("I cannot answer that question."));
    }

    #[test]
    fn rejects_statements_not_led_by_the_keyword() {
        // Comments and CTEs ahead of an otherwise pure read fail the gate.
        assert!(!is_select("-- note\nSELECT 1"));
        assert!(!is_select("WITH t AS (SELECT 1) SELECT * FROM t"));
    }
}
