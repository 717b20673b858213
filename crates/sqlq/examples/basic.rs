//! Render a few statements for every dialect.
//!
//! Run with: `cargo run -p sqlq --example basic`

use sqlq::prelude::*;

fn main() -> QResult<()> {
    let user = t_as("user", "u");
    let post = t_as("post", "p");
    user.left_join(&post, [eq(user.c("id"), post.c("user_id"))]);

    let report = select()
        .column(user.c("name"))
        .column(count(post.c("id")).c_as("posts"))
        .column(
            case()
                .when(gt(user.c("age"), 60), "senior")
                .else_("regular")
                .c_as("segment"),
        )
        .from(&user)
        .where_(in_(user.c("status"), ["active", "pending"]))
        .group_by(user.c("name"))
        .order_by(user.c("name"), true)
        .limit(10);

    for dialect in [Dialect::MySql, Dialect::PostgreSql, Dialect::Sqlite] {
        let q = report.to_sql_with(dialect)?;
        println!("[{dialect}] {}", q.sql);
        println!("        args: {:?}", q.args);
    }

    let users = t("user");
    let ins = insert()
        .into_table(&users)
        .set(users.c("name"), "alice")
        .set(users.c("created_at"), add_interval(unsafe_sql!["CURRENT_TIMESTAMP"], [days(1)]))
        .returning(users.c("id"));
    println!("{}", ins.to_sql_with(Dialect::PostgreSql)?);

    let p = update(&users)
        .set(users.c("name"), v_as("", "name"))
        .where_(eq(users.c("id"), v_as(0, "id")))
        .to_prepared_with(Dialect::PostgreSql)?;
    let mut args = p.builder();
    args.set("name", "bob")?.set("id", 7)?;
    println!("{} {:?}", p.sql(), args.args());

    // Display is dialect-independent.
    println!("{}", delete_from(&users).where_(eq(users.c("id"), 7)));

    Ok(())
}
