//! Builder statements executed through the client against in-memory SQLite.

use rowmap::{
    Client, ClientConfig, Condition, CreateBuilder, DeleteBuilder, DropBuilder, Function,
    FunctionKind, InsertBuilder, OrmError, OrmResult, Order, RawStatement, SelectBuilder, Statement,
    SqlStatement, UpdateBuilder, Value,
};
use std::time::Duration;

async fn memory_client() -> OrmResult<Client> {
    Client::connect(ClientConfig::sqlite(":memory:").pool_size(1)).await
}

async fn seed(client: &Client) {
    let create = CreateBuilder::new()
        .create("users")
        .if_not_exists(true)
        .value("id", &["INTEGER"])
        .value("name", &["VARCHAR(255)", "NOT NULL"])
        .value("age", &["INTEGER"])
        .primary_key("id")
        .build();
    assert!(client.execute(&create).await);

    for (name, age) in [("ann", 31), ("bob", 24), ("cid", 45)] {
        let insert = InsertBuilder::into("users")
            .columns(["name", "age"])
            .value(name)
            .value(age)
            .build();
        assert!(client.execute(&insert).await);
    }
}

#[tokio::test]
async fn test_round_trip_through_builders() -> OrmResult<()> {
    let client = memory_client().await?;
    seed(&client).await;

    let select = SelectBuilder::new()
        .select_all(["name", "age"])
        .from("users")
        .and_where(Condition::gt("age", 25))
        .order_by(&[Order::desc("age")])
        .build();
    let result = client.query(&select).await?;

    assert_eq!(result.columns(), ["name", "age"]);
    assert_eq!(result.size(), 2);
    assert_eq!(result.row_at(0)?.get::<String>("name")?, "cid");
    assert_eq!(result.row_at(1)?.get::<i32>("age")?, 31);
    assert!(matches!(result.row_at(2), Err(OrmError::Index { .. })));
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete() -> OrmResult<()> {
    let client = memory_client().await?;
    seed(&client).await;

    let update = UpdateBuilder::new()
        .update("users")
        .set("age", 32)
        .and_where(Condition::eq("name", "ann"))
        .build();
    assert_eq!(client.try_execute(&update).await?, 1);

    let delete = DeleteBuilder::new()
        .from("users")
        .and_where(Condition::lt("age", 30))
        .build();
    assert!(client.execute(&delete).await);

    let result = client.query_sql("SELECT name, age FROM users ORDER BY id").await?;
    assert_eq!(result.size(), 2);
    let ages: Vec<i64> = result
        .iter()
        .map(|row| row.get("age"))
        .collect::<OrmResult<_>>()?;
    assert_eq!(ages, vec![32, 45]);
    Ok(())
}

#[tokio::test]
async fn test_aggregate_function() -> OrmResult<()> {
    let client = memory_client().await?;
    seed(&client).await;

    let select = SelectBuilder::new()
        .function(Function::new(FunctionKind::Count, "id").alias("total"))
        .from("users")
        .build();
    assert_eq!(select.sql(), "SELECT COUNT(id) AS total FROM users;");

    let result = client.query(&select).await?;
    assert_eq!(result.row_at(0)?.get::<i64>("total")?, 3);
    Ok(())
}

#[tokio::test]
async fn test_statement_enum_executes() -> OrmResult<()> {
    let client = memory_client().await?;
    seed(&client).await;

    let statements: Vec<Statement> = vec![
        UpdateBuilder::new()
            .update("users")
            .set("name", "bea")
            .and_where(Condition::eq("name", "bob"))
            .build()
            .into(),
        DropBuilder::new().drop("users").build().into(),
    ];
    for statement in &statements {
        assert!(client.execute(statement).await);
    }
    assert!(client.query_sql("SELECT * FROM users").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_execute_failure_is_false() -> OrmResult<()> {
    let client = Client::connect(
        ClientConfig::sqlite(":memory:")
            .pool_size(1)
            .log_errors(true),
    )
    .await?;

    assert!(!client.execute_sql("INSERT INTO missing VALUES (1)").await);
    assert!(client.try_execute(&DropBuilder::new().drop("missing").build()).await.is_err());

    // the connection goes back to the pool after a failure
    assert!(client.execute_sql("CREATE TABLE t (v INTEGER)").await);
    Ok(())
}

#[tokio::test]
async fn test_timed_out_statement_keeps_database() -> OrmResult<()> {
    let client = Client::connect(
        ClientConfig::sqlite(":memory:")
            .pool_size(1)
            .query_timeout(Duration::from_millis(200)),
    )
    .await?;
    assert!(client.execute_sql("CREATE TABLE kept (x INTEGER)").await);
    assert!(client.execute_sql("INSERT INTO kept VALUES (1)").await);

    let endless = "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x+1 FROM c) \
                   SELECT COUNT(*) FROM c";
    assert!(!client.execute_sql(endless).await);
    let err = client.try_execute(&RawStatement::new(endless)).await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err}");

    // the interrupted connection went back to the pool with its data
    let result = client.query_sql("SELECT x FROM kept").await?;
    assert_eq!(result.size(), 1);
    assert_eq!(result.row_at(0)?.get::<i64>("x")?, 1);
    Ok(())
}

#[tokio::test]
async fn test_null_and_empty_results() -> OrmResult<()> {
    let client = memory_client().await?;
    assert!(client.execute_sql("CREATE TABLE notes (body TEXT)").await);

    let insert = InsertBuilder::into("notes").value(Value::Null).build();
    assert_eq!(insert.sql(), "INSERT INTO notes VALUES (?);");
    assert!(client.execute(&insert).await);

    let result = client.query_sql("SELECT body FROM notes").await?;
    let row = result.row_at(0)?;
    assert_eq!(row.get_value("body"), Some(&Value::Null));
    assert_eq!(row.get::<Option<String>>("body")?, None);

    let empty = client.query_sql("SELECT body FROM notes WHERE 1 = 0").await?;
    assert!(empty.is_empty());
    assert_eq!(empty.columns(), ["body"]);
    Ok(())
}

#[tokio::test]
async fn test_submit_query_in_background() -> OrmResult<()> {
    let client = memory_client().await?;
    seed(&client).await;

    let background = client.clone();
    let handle = client.submit(async move {
        background
            .query_sql("SELECT COUNT(*) AS n FROM users")
            .await
            .and_then(|result| result.row_at(0)?.get::<i64>("n"))
    })?;
    assert_eq!(handle.wait().await??, 3);
    Ok(())
}

#[tokio::test]
async fn test_close() -> OrmResult<()> {
    let client = memory_client().await?;
    assert!(client.is_connected());

    client.close();
    assert!(!client.is_connected());
    assert!(!client.execute_sql("SELECT 1").await);
    assert!(client.submit(async {}).is_err());
    Ok(())
}
