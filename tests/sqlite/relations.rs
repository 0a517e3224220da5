use crate::common::{Comment, Post, User, setup_db};
use tyql::prelude::*;

#[tokio::test]
async fn batch_loads_each_relation_once() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let parents: Vec<User> = users
        .order_by([users.col("id")?.asc()])
        .load_as(&conn)
        .await?;
    let maps = users.rels(["posts", "comments"])?.load(&parents, &conn).await?;
    assert_eq!(maps.len(), 2);

    let posts = &maps[0];
    let titles = |user: &User| -> Result<Vec<String>> {
        Ok(posts
            .get_as::<Post>(user.id)?
            .into_iter()
            .map(|p| p.title.clone())
            .collect())
    };
    assert_eq!(titles(&parents[0])?, ["hello", "rust"]);
    assert_eq!(titles(&parents[1])?, ["sqlite"]);
    assert!(posts.for_parent(&parents[2]).is_none());

    let comments = &maps[1];
    assert_eq!(comments.len(), 3);
    assert_eq!(comments.get_as::<Comment>(3)?[0].content, "+1");
    Ok(())
}

#[tokio::test]
async fn loads_from_the_many_side() -> Result<()> {
    let (conn, schema) = setup_db();
    let posts: Vec<Post> = schema.posts.query().load_as(&conn).await?;

    let mut maps = schema.posts.rels(["author"])?.load(&posts, &conn).await?;
    let authors = maps.remove(0).into_typed::<User>()?;

    for post in &posts {
        let author = &authors[&Value::Integer(post.authorId)];
        assert_eq!(author.len(), 1);
        assert_eq!(author[0].id, post.authorId);
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_parent_keys_do_not_duplicate_rows() -> Result<()> {
    let (conn, schema) = setup_db();
    let users = &schema.users;

    let alice: Vec<User> = users
        .r#where(users.col("id")?.eq(1))
        .load_as(&conn)
        .await?;
    let parents = [alice[0].clone(), alice[0].clone()];

    let maps = users.rels(["posts"])?.load(&parents, &conn).await?;
    assert_eq!(maps[0].get(1).map(<[_]>::len), Some(2));
    Ok(())
}
