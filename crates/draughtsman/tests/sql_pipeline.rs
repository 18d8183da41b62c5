//! End-to-end tests for the SQL pipeline

use draughtsman::parse_sql;
use draughtsman::prelude::*;
use proptest::prelude::*;

const ECOMMERCE_SCHEMA: &str = "
CREATE TABLE Customers (
    customer_id INT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255)
);

CREATE TABLE Products (
    product_id INT PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    price DECIMAL(10,2)
);

CREATE TABLE Orders (
    order_id INT PRIMARY KEY,
    customer_id INT NOT NULL,
    placed_at TIMESTAMP,
    FOREIGN KEY (customer_id) REFERENCES Customers(customer_id)
);

CREATE TABLE OrderItems (
    order_item_id INT PRIMARY KEY,
    order_id INT,
    product_id INT,
    quantity INT NOT NULL,
    FOREIGN KEY (order_id) REFERENCES Orders(order_id),
    FOREIGN KEY (product_id) REFERENCES Products(product_id)
);

CREATE TABLE Categories (
    category_id INT PRIMARY KEY,
    label VARCHAR(50)
);

CREATE TABLE ProductCategories (
    product_id INT,
    category_id INT,
    FOREIGN KEY (product_id) REFERENCES Products(product_id),
    FOREIGN KEY (category_id) REFERENCES Categories(category_id)
);
";

#[test]
fn test_ecommerce_schema_entities() {
    let db = parse_sql(ECOMMERCE_SCHEMA).unwrap();

    assert_eq!(db.entity_count(), 6);
    for name in [
        "Customers",
        "Products",
        "Orders",
        "OrderItems",
        "Categories",
        "ProductCategories",
    ] {
        assert!(db.has_entity(name), "missing entity {}", name);
    }
}

#[test]
fn test_ecommerce_schema_relationships() {
    let db = parse_sql(ECOMMERCE_SCHEMA).unwrap();

    assert_eq!(db.relationship_count(), 5);

    let find = |source: &str, target: &str| {
        db.relationships()
            .iter()
            .find(|r| r.source == source && r.target == target)
            .unwrap_or_else(|| panic!("missing relationship {} -> {}", source, target))
    };

    // Every FK joins a non-key local column to a PK on the target side
    assert_eq!(find("Orders", "Customers").kind, RelationshipKind::ManyToOne);
    assert_eq!(find("OrderItems", "Orders").kind, RelationshipKind::ManyToOne);
    assert_eq!(find("OrderItems", "Products").kind, RelationshipKind::ManyToOne);
    assert_eq!(
        find("ProductCategories", "Products").kind,
        RelationshipKind::ManyToOne
    );
    assert_eq!(
        find("ProductCategories", "Categories").kind,
        RelationshipKind::ManyToOne
    );
}

#[test]
fn test_ecommerce_foreign_key_attributes_marked() {
    let db = parse_sql(ECOMMERCE_SCHEMA).unwrap();

    let orders = db.get_entity("Orders").unwrap();
    let fk = orders.attribute("customer_id").unwrap();
    assert!(fk.is_foreign_key);
    assert_eq!(fk.referenced_table.as_deref(), Some("Customers"));
    assert_eq!(fk.referenced_column.as_deref(), Some("customer_id"));

    let items = db.get_entity("OrderItems").unwrap();
    assert!(items.is_primary_key("order_item_id"));
    assert!(!items.is_primary_key("order_id"));
    assert_eq!(items.foreign_keys().count(), 2);
}

#[test]
fn test_not_null_and_nullable_columns() {
    let db = parse_sql(ECOMMERCE_SCHEMA).unwrap();

    let customers = db.get_entity("Customers").unwrap();
    assert!(!customers.attribute("name").unwrap().nullable);
    assert!(customers.attribute("email").unwrap().nullable);
}

#[test]
fn test_forward_reference_resolves() {
    // FK target declared after the referencing table
    let db = parse_sql(
        "CREATE TABLE posts (
             id INT PRIMARY KEY,
             author_id INT,
             FOREIGN KEY (author_id) REFERENCES authors(id)
         );
         CREATE TABLE authors (id INT PRIMARY KEY);",
    )
    .unwrap();

    assert_eq!(db.relationship_count(), 1);
    assert_eq!(db.relationships()[0].target, "authors");
}

#[test]
fn test_non_create_statements_are_skipped() {
    let db = parse_sql(
        "DROP TABLE old_users;
         CREATE TABLE users (id INT PRIMARY KEY);
         INSERT INTO users VALUES (1);",
    )
    .unwrap();

    assert_eq!(db.entity_count(), 1);
}

#[test]
fn test_inline_references_shorthand() {
    let db = parse_sql(
        "CREATE TABLE teams (id INT PRIMARY KEY);
         CREATE TABLE players (
             id INT PRIMARY KEY,
             team_id INT REFERENCES teams(id)
         );",
    )
    .unwrap();

    assert_eq!(db.relationship_count(), 1);
    let rel = &db.relationships()[0];
    assert_eq!(rel.source, "players");
    assert_eq!(rel.target, "teams");
}

proptest! {
    /// Any batch of well-formed single-column tables with distinct names
    /// yields one entity per statement, in first-seen order.
    #[test]
    fn prop_each_create_table_yields_one_entity(count in 1usize..20) {
        let ddl: String = (0..count)
            .map(|i| format!("CREATE TABLE table_{} (id INT PRIMARY KEY);\n", i))
            .collect();

        let db = parse_sql(&ddl).unwrap();

        prop_assert_eq!(db.entity_count(), count);
        for (i, entity) in db.entities().iter().enumerate() {
            let expected = format!("table_{}", i);
            prop_assert_eq!(entity.name.as_str(), expected.as_str());
        }
    }
}
