use crate::common::{Post, User, setup_db};
use tyql::prelude::*;

#[tokio::test]
async fn load_all_rows() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let all: Vec<User> = users
        .order_by([users.col("id")?.asc()])
        .load_as(&conn)
        .await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].userName, "alice");
    assert_eq!(all[1].email, None);
    Ok(())
}

#[tokio::test]
async fn where_filters_and_binds() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;
    let name = users.col("userName")?;

    let found: Vec<User> = users
        .r#where(or([(&name).like("a%"), (&name).eq("carol")]))
        .r#where(users.col("email")?.is_not_null())
        .order_by([users.col("id")?.desc()])
        .load_as(&conn)
        .await?;
    let names: Vec<_> = found.iter().map(|u| u.userName.as_str()).collect();
    assert_eq!(names, ["carol", "alice"]);
    Ok(())
}

#[tokio::test]
async fn set_and_range_predicates() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts = &schema.posts;
    let id = posts.col("id")?;

    let ids = |rows: Vec<Post>| rows.into_iter().map(|p| p.id).collect::<Vec<_>>();

    let inside = posts.r#where((&id).r#in([10, 12, 99])?).order_by([(&id).asc()]);
    assert_eq!(ids(inside.load_as(&conn).await?), [10, 12]);

    let outside = posts.r#where((&id).not_in([10, 12])?);
    assert_eq!(ids(outside.load_as(&conn).await?), [11]);

    let between = posts.r#where((&id).between(11, 12)).order_by([(&id).asc()]);
    assert_eq!(ids(between.load_as(&conn).await?), [11, 12]);

    let not_between = posts.r#where((&id).not_between(11, 12));
    assert_eq!(ids(not_between.load_as(&conn).await?), [10]);

    let no_content = posts.r#where(posts.col("content")?.is_null());
    assert_eq!(ids(no_content.load_as(&conn).await?), [11]);

    let negated = posts
        .r#where(not((&id).eq(10)))
        .order_by([(&id).asc()]);
    assert_eq!(ids(negated.load_as(&conn).await?), [11, 12]);
    Ok(())
}

#[tokio::test]
async fn empty_in_fails_before_execution() -> Result<()> {
    let (_, schema) = setup_db();
    let err = schema.posts.col("id")?.r#in(Vec::<i64>::new()).unwrap_err();
    assert!(matches!(err, TyqlError::EmptyInList));
    assert_eq!(err.to_string(), "Cannot pass empty arguments to IN");
    Ok(())
}

#[tokio::test]
async fn scalar_select_returns_tuples() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts = &schema.posts;
    let id = posts.col("id")?;

    let rows: Vec<(i64, bool)> = posts
        .select([(&id).add(3), (&id).eq(3)])
        .r#where((&id).eq(10))
        .load_as(&conn)
        .await?;
    assert_eq!(rows, [(13, false)]);

    let titles: Vec<String> = posts
        .select([posts.col("title")?])
        .order_by([(&id).desc()])
        .load_as(&conn)
        .await?;
    assert_eq!(titles, ["sqlite", "rust", "hello"]);
    Ok(())
}

#[tokio::test]
async fn arithmetic_is_left_to_the_database() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts = &schema.posts;
    let id = posts.col("id")?;

    let rows: Vec<f64> = posts
        .select([(&id).mlt(2).sbt(4).dvd(4.0)])
        .r#where((&id).eq(12))
        .load_as(&conn)
        .await?;
    assert_eq!(rows, [5.0]);
    Ok(())
}

#[tokio::test]
async fn group_by_and_having() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts = &schema.posts;
    let author = posts.col("authorId")?;

    let authors: Vec<i64> = posts
        .select([&author])
        .group_by([&author])
        .having((&author).gt(1))
        .load_as(&conn)
        .await?;
    assert_eq!(authors, [2]);
    Ok(())
}

#[tokio::test]
async fn limit_and_offset() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;
    let by_id = || users.col("id").map(|id| id.asc());

    let second: Vec<User> = users
        .order_by([by_id()?])
        .limit(1)
        .offset(1)
        .load_as(&conn)
        .await?;
    assert_eq!(second[0].userName, "bob");

    let tail: Vec<User> = users.order_by([by_id()?]).offset(2).load_as(&conn).await?;
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].userName, "carol");
    Ok(())
}

#[tokio::test]
async fn first_row_only() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let bob: Option<User> = users
        .r#where(users.col("userName")?.eq("bob"))
        .first_as(&conn)
        .await?;
    assert_eq!(bob.map(|u| u.id), Some(2));

    let nobody = users
        .r#where(users.col("id")?.gt(100))
        .first(&conn)
        .await?;
    assert!(nobody.is_none());
    Ok(())
}

#[tokio::test]
async fn aliased_root_table() -> Result<()> {
    let (conn, schema) = setup_db();
    let query = schema.users.query_as("u");
    let id = query.col("id")?;

    let sql = conn.to_sql(&query.clone().r#where((&id).eq(1)))?.sql;
    assert!(sql.contains(r#"FROM "users" AS "u" WHERE "u"."id" = ?"#));

    let found: Vec<User> = query.r#where(id.eq(1)).load_as(&conn).await?;
    assert_eq!(found[0].userName, "alice");
    Ok(())
}

#[tokio::test]
async fn database_errors_pass_through() {
    let (conn, _) = setup_db();
    let missing = Table::new::<User>();
    conn.execute_batch("DROP TABLE comments; DROP TABLE posts; DROP TABLE users;")
        .expect("drop tables");

    let err = missing.query().load(&conn).await.unwrap_err();
    assert!(matches!(err, TyqlError::Rusqlite(_)));
}
