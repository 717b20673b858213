//! The default dialect is process-wide, so it is exercised in its own test binary.

use sqlq::prelude::*;
use sqlq::{default_dialect, set_default_dialect};

#[test]
fn default_dialect_is_set_once() {
    let q = select().from(&t("user")).where_(eq(c("id"), 1));
    assert_eq!(default_dialect(), Dialect::Generic);
    assert_eq!(q.to_sql().unwrap().sql, r#"SELECT * FROM "user" WHERE "id" = ?"#);

    set_default_dialect(Dialect::PostgreSql).unwrap();
    assert!(matches!(
        set_default_dialect(Dialect::MySql),
        Err(QError::DefaultDialectAlreadySet)
    ));
    assert_eq!(default_dialect(), Dialect::PostgreSql);
    assert_eq!(q.to_sql().unwrap().sql, r#"SELECT * FROM "user" WHERE "id" = $1"#);

    // Builder and call-site dialects still take precedence.
    let q = q.set_dialect(Dialect::MySql);
    assert_eq!(q.to_sql().unwrap().sql, "SELECT * FROM `user` WHERE `id` = ?");
    assert_eq!(
        q.to_sql_with(Dialect::Sqlite).unwrap().sql,
        r#"SELECT * FROM "user" WHERE "id" = ?"#
    );

    // Display never follows the default.
    assert_eq!(q.to_string(), r#"SELECT * FROM "user" WHERE "id" = ? [1]"#);
}
