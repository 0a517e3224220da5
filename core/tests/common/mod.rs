#![allow(dead_code)]

use std::future::{Future, ready};
use std::sync::Mutex;

use tyql_core::{
    BuildContext, Connection, Dialect, Result, Table, TyqlError, Value, model, to,
};

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct User in "users" {
        pub id: i64,
        pub user_name: String,
        pub email: Option<String>,
    }
}

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Post in "posts" {
        pub id: i64,
        pub author_id: i64,
        pub title: String,
        pub content: Option<String>,
    }
}

model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Comment in "comments" {
        pub id: i64,
        pub commenter_id: i64,
        pub post_id: i64,
        pub content: String,
    }
}

pub fn users() -> Table {
    Table::new::<User>()
        .relation("posts", to::<Post>("author_id", "id"))
        .and_then(|t| t.relation("comments", to::<Comment>("commenter_id", "id")))
        .expect("users relations")
}

pub fn posts() -> Table {
    Table::new::<Post>()
        .relation("comments", to::<Comment>("post_id", "id"))
        .and_then(|t| t.relation("author", to::<User>("id", "author_id")))
        .expect("posts relations")
}

pub fn comments() -> Table {
    Table::new::<Comment>()
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        user_name: name.to_string(),
        email: None,
    }
}

pub fn int(i: i64) -> Value {
    Value::Integer(i)
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Connection that records every statement and answers with canned rows.
///
/// A response is picked by the first registered key contained in the SQL;
/// statements matching nothing return no rows.
pub struct MockConnection {
    context: BuildContext,
    responses: Vec<(String, Vec<Vec<Value>>)>,
    failures: Vec<String>,
    executed: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            context: BuildContext::new(Dialect::SQLite),
            responses: Vec::new(),
            failures: Vec::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, key: &str, rows: Vec<Vec<Value>>) -> Self {
        self.responses.push((key.to_string(), rows));
        self
    }

    pub fn fail_on(mut self, key: &str) -> Self {
        self.failures.push(key.to_string());
        self
    }

    pub fn executed(&self) -> Vec<(String, Vec<Value>)> {
        self.executed.lock().expect("executed lock").clone()
    }
}

impl Connection for MockConnection {
    fn build_context(&self) -> BuildContext {
        self.context
    }

    fn execute_raw(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = Result<Vec<Vec<Value>>>> {
        self.executed
            .lock()
            .expect("executed lock")
            .push((sql.to_string(), bindings.to_vec()));

        let result = if self.failures.iter().any(|key| sql.contains(key.as_str())) {
            Err(TyqlError::Execution(format!("refused: {sql}")))
        } else {
            Ok(self
                .responses
                .iter()
                .find(|(key, _)| sql.contains(key.as_str()))
                .map(|(_, rows)| rows.clone())
                .unwrap_or_default())
        };
        ready(result)
    }
}
