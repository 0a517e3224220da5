#![cfg(feature = "rusqlite")]

use tyql::prelude::*;
use tyql::sqlite::SqliteConnection;

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct User in "users", columns = naming::camel_to_snake {
        pub id: i64,
        #[allow(non_snake_case)]
        pub userName: String,
        pub email: Option<String>,
    }
}

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Post in "posts", columns = naming::camel_to_snake {
        pub id: i64,
        #[allow(non_snake_case)]
        pub authorId: i64,
        pub title: String,
        pub content: Option<String>,
    }
}

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Comment in "comments", columns = naming::camel_to_snake {
        pub id: i64,
        #[allow(non_snake_case)]
        pub commenterId: i64,
        #[allow(non_snake_case)]
        pub postId: i64,
        pub content: String,
    }
}

pub struct Schema {
    pub users: Table,
    pub posts: Table,
    pub comments: Table,
}

impl Schema {
    pub fn new() -> Self {
        let users = Table::new::<User>()
            .relation("posts", to::<Post>("authorId", "id"))
            .and_then(|t| t.relation("comments", to::<Comment>("commenterId", "id")))
            .expect("users relations");
        let posts = Table::new::<Post>()
            .relation("comments", to::<Comment>("postId", "id"))
            .and_then(|t| t.relation("author", to::<User>("id", "authorId")))
            .expect("posts relations");
        let comments = Table::new::<Comment>();
        Self {
            users,
            posts,
            comments,
        }
    }
}

const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        user_name TEXT NOT NULL,
        email TEXT
    );
    CREATE TABLE posts (
        id INTEGER PRIMARY KEY,
        author_id INTEGER NOT NULL REFERENCES users(id),
        title TEXT NOT NULL,
        content TEXT
    );
    CREATE TABLE comments (
        id INTEGER PRIMARY KEY,
        commenter_id INTEGER NOT NULL REFERENCES users(id),
        post_id INTEGER NOT NULL REFERENCES posts(id),
        content TEXT NOT NULL
    );
";

const SEED: &str = "
    INSERT INTO users (id, user_name, email) VALUES
        (1, 'alice', 'alice@example.com'),
        (2, 'bob', NULL),
        (3, 'carol', 'carol@example.com');
    INSERT INTO posts (id, author_id, title, content) VALUES
        (10, 1, 'hello', 'first post'),
        (11, 1, 'rust', NULL),
        (12, 2, 'sqlite', 'embedded');
    INSERT INTO comments (id, commenter_id, post_id, content) VALUES
        (100, 2, 10, 'nice'),
        (101, 3, 10, '+1'),
        (102, 1, 12, 'cool');
";

pub fn setup_db() -> (SqliteConnection, Schema) {
    let conn = SqliteConnection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch(SCHEMA).expect("Failed to create tables");
    conn.execute_batch(SEED).expect("Failed to seed tables");
    (conn, Schema::new())
}
