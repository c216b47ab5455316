//! Statement builders executed against SQLite
//!
//! Run with: cargo run --example builder -p rowmap
//!
//! Set ROWMAP_SQLITE_PATH in .env file or environment variable to use a file
//! instead of an in-memory database.

use rowmap::{
    Client, ClientConfig, Condition, CreateBuilder, DeleteBuilder, Function, FunctionKind,
    InsertBuilder, Join, OrmError, Order, SelectBuilder, SqlStatement, UpdateBuilder, Value,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), OrmError> {
    dotenvy::dotenv().ok();

    let path = env::var("ROWMAP_SQLITE_PATH").unwrap_or_else(|_| ":memory:".to_string());
    let client = Client::connect(ClientConfig::sqlite(path).pool_size(1)).await?;

    // Setup
    let authors = CreateBuilder::new()
        .create("authors")
        .if_not_exists(true)
        .value("id", &["INTEGER"])
        .value("name", &["VARCHAR(255)", "NOT NULL"])
        .primary_key("id")
        .build();
    let books = CreateBuilder::new()
        .create("books")
        .if_not_exists(true)
        .value("id", &["INTEGER"])
        .value("author_id", &["INTEGER"])
        .value("title", &["VARCHAR(255)"])
        .value("pages", &["INTEGER"])
        .primary_key("id")
        .build();
    for statement in [&authors, &books] {
        println!("{}", statement.sql());
        client.try_execute(statement).await?;
    }

    // Insert
    for (id, name) in [(1, "Le Guin"), (2, "Lem")] {
        let insert = InsertBuilder::into("authors")
            .columns(["id", "name"])
            .value(id)
            .value(name)
            .build();
        client.try_execute(&insert).await?;
    }
    for (author, title, pages) in [
        (1, "The Dispossessed", 387),
        (1, "The Lathe of Heaven", 184),
        (2, "Solaris", 204),
    ] {
        let insert = InsertBuilder::into("books")
            .columns(["author_id", "title", "pages"])
            .values([Value::from(author), Value::from(title), Value::from(pages)])
            .build();
        client.try_execute(&insert).await?;
    }

    // Query with a join
    let select = SelectBuilder::new()
        .select_all(["authors.name", "books.title"])
        .from("books")
        .join(Join::left("authors", "books.author_id", "authors.id"))
        .and_where(Condition::gt("books.pages", 190))
        .order_by(&[Order::asc("books.title")])
        .build();
    println!("{}", select.sql());
    for row in &client.query(&select).await? {
        println!(
            "  {} wrote {}",
            row.get::<String>("name")?,
            row.get::<String>("title")?
        );
    }

    // Update and aggregate
    let update = UpdateBuilder::new()
        .update("books")
        .set("pages", 400)
        .and_where(Condition::eq("title", "The Dispossessed"))
        .build();
    println!("updated {} row(s)", client.try_execute(&update).await?);

    let total = SelectBuilder::new()
        .function(Function::new(FunctionKind::Sum, "pages").alias("total"))
        .from("books")
        .build();
    let result = client.query(&total).await?;
    println!("total pages: {}", result.row_at(0)?.get::<i64>("total")?);

    // Cleanup
    let delete = DeleteBuilder::new()
        .from("books")
        .and_where(Condition::lt("pages", 200))
        .build();
    client.try_execute(&delete).await?;

    client.close();
    Ok(())
}
