use crate::common::{Comment, Post, User, setup_db};
use tyql::prelude::*;

#[tokio::test]
async fn inner_join_returns_model_pairs() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let query = users.inner_join(users.rel("posts")?);
    let post_id = query.join("posts")?.col("id")?;
    let rows: Vec<(User, Post)> = query.order_by([post_id.asc()]).load_as(&conn).await?;

    let pairs: Vec<_> = rows
        .iter()
        .map(|(user, post)| (user.userName.as_str(), post.title.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [("alice", "hello"), ("alice", "rust"), ("bob", "sqlite")]
    );
    assert!(rows.iter().all(|(user, post)| post.authorId == user.id));
    Ok(())
}

#[tokio::test]
async fn chained_join_off_joined_table() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;
    let posts = &schema.posts;

    let query = users.inner_join(users.rel("posts")?.inner_join(posts.rel("comments")?));
    let comment_id = query.join("posts")?.child("comments").map(|c| c.col("id"));
    let comment_id = comment_id.expect("nested join")?;

    let rows: Vec<(User, Post, Comment)> = query
        .order_by([comment_id.asc()])
        .load_as(&conn)
        .await?;
    let summary: Vec<_> = rows
        .iter()
        .map(|(user, post, comment)| (user.id, post.id, comment.id))
        .collect();
    assert_eq!(summary, [(1, 10, 100), (1, 10, 101), (2, 12, 102)]);
    Ok(())
}

#[tokio::test]
async fn parallel_and_chained_joins() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;
    let posts = &schema.posts;

    // users ⋈ posts ⋈ post comments, and users ⋈ their own comments
    let query = users
        .inner_join(users.rel("posts")?.inner_join(posts.rel("comments")?))
        .inner_join(users.rel("comments")?);

    let rows: Vec<(User, Post, Comment, Comment)> = query.load_as(&conn).await?;
    for (user, post, on_post, by_user) in &rows {
        assert_eq!(post.authorId, user.id);
        assert_eq!(on_post.postId, post.id);
        assert_eq!(by_user.commenterId, user.id);
    }
    assert_eq!(rows.len(), 3);
    Ok(())
}

#[tokio::test]
async fn join_from_the_many_side() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts = &schema.posts;

    let query = posts.inner_join(posts.rel("author")?);
    let author_name = query.join("author")?.col("userName")?;
    let rows: Vec<(Post, User)> = query
        .r#where(author_name.eq("bob"))
        .load_as(&conn)
        .await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.title, "sqlite");
    assert_eq!(rows[0].1.id, 2);
    Ok(())
}

#[tokio::test]
async fn select_columns_from_joined_tables() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let query = users.inner_join(users.rel("posts")?);
    let posts = query.join("posts")?.clone();
    let title = posts.col("title")?;
    let name = query.col("userName")?;

    let rows: Vec<(String, Post)> = query
        .select([Selectable::from(&name), Selectable::from(&posts)])
        .order_by([title.desc()])
        .load_as(&conn)
        .await?;
    assert_eq!(rows[0].0, "bob");
    assert_eq!(rows[0].1.title, "sqlite");
    assert_eq!(rows.len(), 3);
    Ok(())
}

#[tokio::test]
async fn join_on_wrong_root_is_rejected() -> Result<()> {
    let (conn, schema) = setup_db();
    let query = schema.users.inner_join(schema.posts.rel("comments")?);

    let err = query.load(&conn).await.unwrap_err();
    assert!(matches!(err, TyqlError::InvalidJoin(_)));
    Ok(())
}
