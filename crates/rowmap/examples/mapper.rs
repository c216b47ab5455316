//! Record mapping with `#[derive(Model)]`
//!
//! Run with: cargo run --example mapper -p rowmap
//!
//! Set ROWMAP_SQLITE_PATH in .env file or environment variable to use a file
//! instead of an in-memory database.

use rowmap::{
    Client, ClientConfig, Condition, Model, OrmError, Order, SelectOptions, SqlStatement,
};
use std::env;

#[derive(Debug, Clone, Default, Model)]
#[orm(table = "users", create_if_not_exists)]
struct User {
    #[orm(column, primary_key, auto_increment)]
    id: i32,
    #[orm(column = "user_name", not_null, unique)]
    name: String,
    #[orm(column)]
    email: Option<String>,
    #[orm(column)]
    active: bool,
}

#[tokio::main]
async fn main() -> Result<(), OrmError> {
    dotenvy::dotenv().ok();

    let path = env::var("ROWMAP_SQLITE_PATH").unwrap_or_else(|_| ":memory:".to_string());
    let client = Client::connect(ClientConfig::sqlite(path).pool_size(1)).await?;
    let mapper = client.mapper();

    let spec = mapper.schema::<User>()?;
    println!("{}", spec.create_statement().sql());
    mapper.create::<User>().await?;

    for (name, email) in [("alice", Some("alice@example.com")), ("bob", None)] {
        let user = User {
            name: name.to_string(),
            email: email.map(str::to_string),
            active: true,
            ..User::default()
        };
        if !mapper.insert(&user).await? {
            println!("insert of {name} failed");
        }
    }

    let users: Vec<User> = mapper.select_all().await?;
    for user in &users {
        println!("{:?}", user);
    }

    // Deactivate bob, identified by primary key
    if let Some(mut bob) = users.into_iter().find(|u| u.name == "bob") {
        bob.active = false;
        mapper.update(&bob).await?;
    }

    let options = SelectOptions::new()
        .condition(Condition::eq("active", true))
        .order(Order::desc("id"))
        .limit(10);
    let active: Vec<User> = mapper.select(options).await?;
    println!("active users: {}", active.len());

    mapper.delete::<User>(&[Condition::eq("user_name", "bob")]).await?;
    mapper.drop::<User>().await?;

    client.close();
    Ok(())
}
