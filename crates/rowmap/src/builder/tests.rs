use super::*;
use crate::condition::{Condition, Operator};
use crate::fragment::{Function, FunctionKind, Join, Order};

#[test]
fn test_select_all_columns() {
    let stmt = SelectBuilder::new().select("*").from("test").build();
    assert_eq!(stmt.sql(), "SELECT * FROM test;");
    assert!(stmt.params().is_empty());
}

#[test]
fn test_select_single_column() {
    let stmt = SelectBuilder::new().select("name").from("t").build();
    assert_eq!(stmt.sql(), "SELECT name FROM t;");
}

#[test]
fn test_select_limit() {
    let stmt = SelectBuilder::new()
        .select("name")
        .from("test")
        .limit(2)
        .build();
    assert_eq!(stmt.sql(), "SELECT name FROM test LIMIT 2;");
}

#[test]
fn test_select_where() {
    let stmt = SelectBuilder::new()
        .select("name")
        .from("test")
        .and_where(Condition::new("id", Operator::GreaterEqual, "1"))
        .build();
    assert_eq!(stmt.sql(), "SELECT name FROM test WHERE id>=?;");
    assert_eq!(stmt.params(), vec![Value::Text("1".into())]);
}

#[test]
fn test_select_join() {
    let stmt = SelectBuilder::new()
        .select("test.id")
        .select("test_data.color")
        .from("test")
        .join(Join::left("test_data", "test_data.id", "test.id"))
        .build();
    assert_eq!(
        stmt.sql(),
        "SELECT test.id,test_data.color FROM test LEFT JOIN test_data ON test_data.id=test.id;"
    );
}

#[test]
fn test_select_expression_list() {
    let stmt = SelectBuilder::new()
        .select("test.id, test_data.color")
        .from("test")
        .join(Join::left("test_data", "test_data.id", "test.id"))
        .build();
    assert_eq!(
        stmt.sql(),
        "SELECT test.id, test_data.color FROM test LEFT JOIN test_data ON test_data.id=test.id;"
    );
}

#[test]
fn test_joins_are_space_separated() {
    let stmt = SelectBuilder::new()
        .select("*")
        .from("a")
        .join(Join::left("b", "b.a_id", "a.id"))
        .join(Join::right("c", "c.a_id", "a.id"))
        .build();
    assert_eq!(
        stmt.sql(),
        "SELECT * FROM a LEFT JOIN b ON b.a_id=a.id RIGHT JOIN c ON c.a_id=a.id;"
    );
}

#[test]
fn test_select_function() {
    let stmt = SelectBuilder::new()
        .select("test.id, test_data.color")
        .function(Function::new(FunctionKind::Min, "test.id").alias("average"))
        .from("test")
        .build();
    assert_eq!(
        stmt.sql(),
        "SELECT test.id, test_data.color, MIN(test.id) AS average FROM test;"
    );
}

#[test]
fn test_select_function_without_columns() {
    let stmt = SelectBuilder::new()
        .function(Function::new(FunctionKind::Count, "*"))
        .function(Function::new(FunctionKind::Max, "id").alias("top"))
        .from("test")
        .build();
    assert_eq!(stmt.sql(), "SELECT COUNT(*),MAX(id) AS top FROM test;");
}

#[test]
fn test_select_full_clause_order() {
    let stmt = SelectBuilder::new()
        .select_all(["id", "name"])
        .from("test")
        .and_where(Condition::gt("id", 3))
        .and_where(Condition::ne("name", "x"))
        .order_by(&[Order::desc("id"), Order::asc("name")])
        .limit_str("10 OFFSET 5")
        .build();
    assert_eq!(
        stmt.sql(),
        "SELECT id,name FROM test WHERE id>? AND name!=? ORDER BY id DESC,name ASC LIMIT 10 OFFSET 5;"
    );
    assert_eq!(stmt.params(), vec![Value::Int(3), Value::Text("x".into())]);
}

#[test]
fn test_order_by_replaces_previous() {
    let stmt = SelectBuilder::new()
        .select("*")
        .from("t")
        .order_by(&[Order::asc("a")])
        .order_by(&[Order::desc("b")])
        .build();
    assert_eq!(stmt.sql(), "SELECT * FROM t ORDER BY b DESC;");
}

#[test]
fn test_placeholders_match_params() {
    let mut builder = SelectBuilder::new();
    builder.select("*").from("t");
    for i in 0..5 {
        builder.and_where(Condition::lte(format!("c{i}"), i));
    }
    let stmt = builder.build();
    let sql = stmt.sql();
    assert_eq!(sql.matches('?').count(), stmt.params().len());
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE c0<=? AND c1<=? AND c2<=? AND c3<=? AND c4<=?;"
    );
    let expected: Vec<Value> = (0..5).map(Value::from).collect();
    assert_eq!(stmt.params(), expected);
}

#[test]
fn test_duplicate_where_columns_are_kept() {
    let stmt = DeleteBuilder::new()
        .from("t")
        .and_where(Condition::gte("id", 1))
        .and_where(Condition::lte("id", 9))
        .build();
    assert_eq!(stmt.sql(), "DELETE FROM t WHERE id>=? AND id<=?;");
    assert_eq!(stmt.params(), vec![Value::Int(1), Value::Int(9)]);
}

#[test]
fn test_build_is_idempotent() {
    let mut builder = SelectBuilder::new();
    builder
        .select("name")
        .from("test")
        .and_where(Condition::eq("id", 1));
    let a = builder.build();
    let b = builder.build();
    assert_eq!(a.sql(), b.sql());
    assert_eq!(a.params(), b.params());

    // the builder stays usable after build
    builder.limit(1);
    assert_eq!(builder.build().sql(), "SELECT name FROM test WHERE id=? LIMIT 1;");
    assert_eq!(a.sql(), "SELECT name FROM test WHERE id=?;");
}

#[test]
fn test_insert_positional() {
    let stmt = InsertBuilder::into("test")
        .value(1)
        .value("Jack")
        .value("0000")
        .build();
    assert_eq!(stmt.sql(), "INSERT INTO test VALUES (?,?,?);");
    assert_eq!(
        stmt.params(),
        vec![Value::Int(1), Value::Text("Jack".into()), Value::Text("0000".into())]
    );
}

#[test]
fn test_insert_with_columns() {
    let stmt = InsertBuilder::new()
        .table("test")
        .columns(["custom_name", "custom_uuid"])
        .values(["Jack", "0000"])
        .build();
    assert_eq!(
        stmt.sql(),
        "INSERT INTO test (custom_name,custom_uuid) VALUES (?,?);"
    );
    assert_eq!(stmt.params().len(), 2);
}

#[test]
fn test_insert_placeholders_follow_values() {
    let stmt = InsertBuilder::into("t").columns(["a", "b"]).value(1).build();
    assert_eq!(stmt.sql(), "INSERT INTO t (a,b) VALUES (?);");
    assert_eq!(stmt.sql().matches('?').count(), stmt.params().len());

    let stmt = InsertBuilder::into("t").column("a").values([1, 2]).build();
    assert_eq!(stmt.sql(), "INSERT INTO t (a) VALUES (?,?);");
    assert_eq!(stmt.sql().matches('?').count(), stmt.param_count());
}

#[test]
fn test_update_single_set() {
    let stmt = UpdateBuilder::new()
        .update("test")
        .set("name", "Jacky")
        .and_where(Condition::eq("id", "1"))
        .build();
    assert_eq!(stmt.sql(), "UPDATE test SET name=? WHERE id=?;");
}

#[test]
fn test_update_binding_order() {
    let stmt = UpdateBuilder::new()
        .update("test")
        .set("name", "Jacky")
        .set("uuid", "0000")
        .and_where(Condition::eq("id", "1"))
        .build();
    assert_eq!(stmt.sql(), "UPDATE test SET name=?,uuid=? WHERE id=?;");
    assert_eq!(
        stmt.params(),
        vec![
            Value::Text("Jacky".into()),
            Value::Text("0000".into()),
            Value::Text("1".into()),
        ]
    );
}

#[test]
fn test_update_less_equal() {
    let stmt = UpdateBuilder::new()
        .update("test")
        .set("name", "Jacky")
        .and_where(Condition::lte("id", "1"))
        .build();
    assert_eq!(stmt.sql(), "UPDATE test SET name=? WHERE id<=?;");
}

#[test]
fn test_update_set_replaces_in_place() {
    let stmt = UpdateBuilder::new()
        .update("t")
        .set("a", 1)
        .set("b", 2)
        .set("a", 3)
        .build();
    assert_eq!(stmt.sql(), "UPDATE t SET a=?,b=?;");
    assert_eq!(stmt.params(), vec![Value::Int(3), Value::Int(2)]);
}

#[test]
fn test_update_without_set() {
    let stmt = UpdateBuilder::new().update("t").build();
    assert_eq!(stmt.sql(), "UPDATE t;");
}

#[test]
fn test_delete() {
    let stmt = DeleteBuilder::new()
        .from("test")
        .and_where(Condition::eq("id", "1"))
        .build();
    assert_eq!(stmt.sql(), "DELETE FROM test WHERE id=?;");

    let stmt = DeleteBuilder::new()
        .from("test")
        .and_where(Condition::gte("id", "1"))
        .build();
    assert_eq!(stmt.sql(), "DELETE FROM test WHERE id>=?;");

    let stmt = DeleteBuilder::new().from("test").build();
    assert_eq!(stmt.sql(), "DELETE FROM test;");
}

#[test]
fn test_create() {
    let stmt = CreateBuilder::new()
        .create("test")
        .value("id", &["int", "auto_increment"])
        .value("name", &["varchar(255)"])
        .value("uuid", &["varchar(255)"])
        .primary_key("id")
        .build();
    assert_eq!(
        stmt.sql(),
        "CREATE TABLE test (id int auto_increment,name varchar(255),uuid varchar(255),PRIMARY KEY (id));"
    );
}

#[test]
fn test_create_if_not_exists() {
    let stmt = CreateBuilder::new()
        .create("test")
        .if_not_exists(true)
        .value("id", &["int", "auto_increment"])
        .value("name", &["varchar(255)"])
        .value("uuid", &["varchar(255)"])
        .primary_key("id")
        .build();
    assert_eq!(
        stmt.sql(),
        "CREATE TABLE IF NOT EXISTS test (id int auto_increment,name varchar(255),uuid varchar(255),PRIMARY KEY (id));"
    );
}

#[test]
fn test_create_composite_key_and_bare_column() {
    let stmt = CreateBuilder::new()
        .create("pairs")
        .value("a", &["INTEGER"])
        .value::<&str>("b", &[])
        .primary_key("a")
        .primary_key("b")
        .build();
    // a column without option tokens renders bare, with no trailing space
    assert_eq!(stmt.sql(), "CREATE TABLE pairs (a INTEGER,b,PRIMARY KEY (a,b));");
    assert!(!stmt.sql().contains("b ,"));
}

#[test]
fn test_drop() {
    let stmt = DropBuilder::new().drop("test").build();
    assert_eq!(stmt.sql(), "DROP TABLE test;");
    assert_eq!(stmt.kind(), StatementKind::Drop);
}

#[test]
fn test_statement_enum_dispatch() {
    let stmt: Statement = UpdateBuilder::new()
        .update("t")
        .set("a", 1)
        .and_where(Condition::eq("id", 2))
        .build()
        .into();
    assert_eq!(stmt.kind(), StatementKind::Update);
    assert_eq!(stmt.sql(), "UPDATE t SET a=? WHERE id=?;");
    assert_eq!(stmt.sql().matches('?').count(), stmt.param_count());

    let raw: Statement = RawStatement::new("SELECT 1;").into();
    assert_eq!(raw.sql(), "SELECT 1;");
    assert!(raw.params().is_empty());
    assert_eq!(raw.kind(), StatementKind::Raw);
}
