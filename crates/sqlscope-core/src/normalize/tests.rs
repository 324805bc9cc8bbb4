//! Tests for statement normalization

use super::*;
use pretty_assertions::assert_eq;

mod shape_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_literals_become_placeholders() {
        let shape = StatementShape::normalize("SELECT * FROM orders WHERE customer_id = 42");
        assert_eq!(shape.as_str(), "SELECT * FROM orders WHERE customer_id = ?");
    }

    #[test]
    fn test_string_literals_become_placeholders() {
        let shape = StatementShape::normalize("SELECT * FROM users WHERE email = 'a@b.com'");
        assert_eq!(shape.as_str(), "SELECT * FROM users WHERE email = ?");
    }

    #[test]
    fn test_escaped_quote_inside_literal() {
        let shape = StatementShape::normalize("SELECT * FROM t WHERE name = 'O''Brien' AND x = 1");
        assert_eq!(shape.as_str(), "SELECT * FROM t WHERE name = ? AND x = ?");
    }

    #[test]
    fn test_identifier_digits_are_preserved() {
        let shape = StatementShape::normalize("SELECT col1, t2.id FROM table3 WHERE col1 = 7");
        assert_eq!(shape.as_str(), "SELECT col1, t2.id FROM table3 WHERE col1 = ?");
    }

    #[test]
    fn test_decimal_and_exponent_literals() {
        let shape = StatementShape::normalize("SELECT * FROM m WHERE score > 0.95 OR score < 1e-3");
        assert_eq!(shape.as_str(), "SELECT * FROM m WHERE score > ? OR score < ?");
    }

    #[test]
    fn test_whitespace_collapses() {
        let shape = StatementShape::normalize("  SELECT *\n  FROM   users\tWHERE id = 5  ");
        assert_eq!(shape.as_str(), "SELECT * FROM users WHERE id = ?");
    }

    #[test]
    fn test_in_lists_share_one_shape() {
        let short = StatementShape::normalize("SELECT * FROM t WHERE id IN (1, 2)");
        let long = StatementShape::normalize("SELECT * FROM t WHERE id IN (10, 20, 30, 40)");
        assert_eq!(short, long);
        assert_eq!(short.as_str(), "SELECT * FROM t WHERE id IN (?)");
    }

    #[test]
    fn test_statements_differing_only_in_literals_share_shape() {
        let a = StatementShape::normalize("SELECT * FROM items WHERE order_id = 1");
        let b = StatementShape::normalize("SELECT * FROM items WHERE order_id = 238");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raws = [
            "SELECT * FROM orders WHERE customer_id = 42",
            "SELECT * FROM t WHERE id IN (1, 2, 3) AND name = 'x'",
            "SELECT * FROM p LIMIT 20 OFFSET 4000",
            "UPDATE users SET last_login = '2026-08-29' WHERE id = 9",
            "",
        ];
        for raw in raws {
            let once = StatementShape::normalize(raw);
            let twice = StatementShape::normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        let shape = StatementShape::normalize("SELECT 1");
        assert_eq!(shape.to_string(), shape.as_str());
    }

    #[test]
    fn test_serde_is_transparent() {
        let shape = StatementShape::normalize("SELECT * FROM t WHERE id = 3");
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "\"SELECT * FROM t WHERE id = ?\"");
        let parsed: StatementShape = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shape);
    }
}

mod clause_probe_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offset_literal_extraction() {
        assert_eq!(
            offset_literal("SELECT * FROM p ORDER BY id LIMIT 20 OFFSET 4000"),
            Some(4000)
        );
        assert_eq!(offset_literal("select * from p limit 20 offset 15"), Some(15));
    }

    #[test]
    fn test_offset_mysql_comma_form() {
        assert_eq!(offset_literal("SELECT * FROM p LIMIT 5000, 20"), Some(5000));
    }

    #[test]
    fn test_offset_placeholder_is_not_literal() {
        assert_eq!(offset_literal("SELECT * FROM p LIMIT 20 OFFSET ?"), None);
        assert_eq!(offset_literal("SELECT * FROM p LIMIT 20 OFFSET :off"), None);
    }

    #[test]
    fn test_no_offset() {
        assert_eq!(offset_literal("SELECT * FROM p WHERE id > 10 LIMIT 20"), None);
    }

    #[test]
    fn test_where_and_limit_probes() {
        assert!(has_where_clause("SELECT * FROM t WHERE id = ?"));
        assert!(!has_where_clause("SELECT * FROM t"));
        assert!(has_limit_clause("SELECT * FROM t LIMIT ?"));
        assert!(!has_limit_clause("SELECT * FROM t"));
        // Word boundaries: identifiers containing the keyword do not match.
        assert!(!has_where_clause("SELECT anywhere_col FROM t"));
    }
}
