use sqlq::prelude::*;

#[test]
fn select_with_join_group_and_paging() {
    let user = t_as("user", "u");
    let post = t_as("post", "p");
    user.left_join(&post, [eq(user.c("id"), post.c("user_id"))]);

    let q = select()
        .column(user.c("name"))
        .column(count(post.c("id")).c_as("posts"))
        .from(&user)
        .where_(eq(user.c("active"), true))
        .group_by(user.c("name"))
        .having(gt(count(post.c("id")), 3))
        .order_by(user.c("name"), true)
        .limit(10)
        .offset(20)
        .to_sql_with(Dialect::PostgreSql)
        .unwrap();

    assert_eq!(
        q.sql,
        r#"SELECT "u"."name", COUNT("p"."id") AS "posts" FROM "user" AS "u" LEFT JOIN "post" AS "p" ON "u"."id" = "p"."user_id" WHERE "u"."active" = $1 GROUP BY "u"."name" HAVING COUNT("p"."id") > $2 ORDER BY "u"."name" ASC LIMIT $3 OFFSET $4"#
    );
    assert_eq!(
        q.args,
        vec![
            Value::from(true),
            Value::from(3),
            Value::from(10),
            Value::from(20)
        ]
    );
}

#[test]
fn insert_returning_depends_on_dialect() {
    let user = t("user");
    let ins = insert()
        .into_table(&user)
        .set(user.c("name"), "alice")
        .set(user.c("age"), 30)
        .returning(user.c("id"));

    let q = ins.to_sql_with(Dialect::PostgreSql).unwrap();
    assert_eq!(
        q.sql,
        r#"INSERT INTO "user"("name", "age") VALUES ($1, $2) RETURNING "id""#
    );
    assert_eq!(q.args, vec![Value::from("alice"), Value::from(30)]);

    let q = ins.to_sql_with(Dialect::MySql).unwrap();
    assert_eq!(q.sql, "INSERT INTO `user`(`name`, `age`) VALUES (?, ?)");
}

#[test]
fn insert_without_assignments_fails() {
    let err = insert().into_table(&t("user")).to_sql().unwrap_err();
    assert!(matches!(err, QError::MissingAssignment { .. }));
    assert!(err.is_programming_error());
}

#[test]
fn delete_without_table_fails() {
    let err = delete().where_(eq(c("id"), 1)).to_sql().unwrap_err();
    assert!(matches!(err, QError::MissingTable { .. }));
}

#[test]
fn update_with_null_and_list_conditions() {
    let user = t("user");
    let q = update(&user)
        .set(user.c("status"), "archived")
        .set(user.c("deleted_at"), null())
        .where_(in_(user.c("id"), vec![1, 2, 3]))
        .where_(eq(user.c("locked_at"), None::<i64>))
        .to_sql_with(Dialect::Sqlite)
        .unwrap();
    assert_eq!(
        q.sql,
        r#"UPDATE "user" SET "status" = ?, "deleted_at" = NULL WHERE ("id" IN (?,?,?))AND("locked_at" IS NULL)"#
    );
    assert_eq!(
        q.args,
        vec![
            Value::from("archived"),
            Value::from(1),
            Value::from(2),
            Value::from(3)
        ]
    );
}

#[test]
fn prepared_statement_rebinds_keyed_values() {
    let user = t("user");
    let p = select()
        .from(&user)
        .where_(eq(user.c("id"), v_as(0, "id")))
        .to_prepared_with(Dialect::MySql)
        .unwrap();
    assert_eq!(p.sql(), "SELECT * FROM `user` WHERE `user`.`id` = ?");

    for id in [7, 8] {
        let mut args = p.builder();
        args.set("id", id).unwrap();
        assert_eq!(args.args(), &[Value::from(id)]);
    }
}

#[test]
fn display_uses_generic_dialect() {
    let q = delete_from(&t("user"))
        .set_dialect(Dialect::MySql)
        .where_(eq(c("id"), 9));
    assert_eq!(q.to_string(), r#"DELETE FROM "user" WHERE "id" = ? [9]"#);
}
