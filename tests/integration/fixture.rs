//! A miniature Northwind database.
//!
//! Expected aggregates over this data:
//!
//! | Country | TotalSales | TotalOrders |
//! |---------|-----------:|------------:|
//! | USA     |     830.00 |           3 |
//! | Germany |     335.00 |           1 |
//! | France  |     200.00 |           1 |
//! | NULL    |      19.00 |           1 |
//!
//! | CategoryName | Profit |
//! |--------------|-------:|
//! | Beverages    | 955.60 |
//! | Seafood      | 201.50 |
//! | Condiments   | 200.00 |

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Executor};

const SCHEMA: &str = r#"
CREATE TABLE Category (Id INTEGER PRIMARY KEY, CategoryName TEXT, Description TEXT);
CREATE TABLE Product (
    Id INTEGER PRIMARY KEY,
    ProductName TEXT,
    SupplierId INTEGER,
    CategoryId INTEGER,
    UnitPrice DECIMAL,
    Discontinued INTEGER
);
CREATE TABLE Customer (Id TEXT PRIMARY KEY, CompanyName TEXT, Country TEXT);
CREATE TABLE "Order" (Id INTEGER PRIMARY KEY, CustomerId TEXT, OrderDate TEXT);
CREATE TABLE OrderDetail (
    Id TEXT PRIMARY KEY,
    OrderId INTEGER,
    ProductId INTEGER,
    UnitPrice DECIMAL,
    Quantity INTEGER,
    Discount DOUBLE
);
"#;

const DATA: &str = r#"
INSERT INTO Category VALUES
    (1, 'Beverages', 'Soft drinks, coffees, teas, beers, and ales'),
    (2, 'Condiments', 'Sweet and savory sauces'),
    (3, 'Seafood', 'Seaweed and fish');

INSERT INTO Product VALUES
    (1, 'Chai', 1, 1, 18.0, 0),
    (2, 'Aniseed Syrup', 1, 2, 10.0, 0),
    (3, 'Ikura', 4, 3, 31.0, 0),
    (4, 'Chang', 1, 1, 19.0, 0);

INSERT INTO Customer VALUES
    ('ALFKI', 'Alfreds Futterkiste', 'Germany'),
    ('BONAP', 'Bon app''', 'France'),
    ('GREAL', 'Great Lakes Food Market', 'USA'),
    ('HUNGC', 'Hungry Coyote Import Store', 'USA'),
    ('NOCTY', 'Unknown Trader', NULL);

INSERT INTO "Order" VALUES
    (10248, 'ALFKI', '2012-07-04'),
    (10249, 'BONAP', '2012-07-05'),
    (10250, 'GREAL', '2012-07-08'),
    (10251, 'HUNGC', '2012-07-08'),
    (10252, 'GREAL', '2012-07-09'),
    (10253, 'NOCTY', '2012-07-10');

INSERT INTO OrderDetail VALUES
    ('10248/1', 10248, 1, 18.0, 10, 0),
    ('10248/3', 10248, 3, 31.0, 5, 0.1),
    ('10249/2', 10249, 2, 10.0, 20, 0),
    ('10250/4', 10250, 4, 19.0, 12, 0.05),
    ('10251/1', 10251, 1, 18.0, 30, 0),
    ('10252/3', 10252, 3, 31.0, 2, 0),
    ('10253/4', 10253, 4, 19.0, 1, 0);
"#;

/// Fifteen products in one category, product `Pn` selling `n` units at a
/// unit price of `16 - n`, inserted out of order. Revenue ranks differently
/// from quantity.
const CATALOG: &str = r#"
INSERT INTO Category VALUES (1, 'Beverages', 'Drinks');

INSERT INTO Product VALUES
    (1, 'P01', 1, 1, 15.0, 0),
    (2, 'P02', 1, 1, 14.0, 0),
    (3, 'P03', 1, 1, 13.0, 0),
    (4, 'P04', 1, 1, 12.0, 0),
    (5, 'P05', 1, 1, 11.0, 0),
    (6, 'P06', 1, 1, 10.0, 0),
    (7, 'P07', 1, 1, 9.0, 0),
    (8, 'P08', 1, 1, 8.0, 0),
    (9, 'P09', 1, 1, 7.0, 0),
    (10, 'P10', 1, 1, 6.0, 0),
    (11, 'P11', 1, 1, 5.0, 0),
    (12, 'P12', 1, 1, 4.0, 0),
    (13, 'P13', 1, 1, 3.0, 0),
    (14, 'P14', 1, 1, 2.0, 0),
    (15, 'P15', 1, 1, 1.0, 0);

INSERT INTO Customer VALUES ('QUICK', 'QUICK-Stop', 'Germany');

INSERT INTO "Order" VALUES (20000, 'QUICK', '2013-01-02');

INSERT INTO OrderDetail VALUES
    ('20000/7', 20000, 7, 9.0, 7, 0),
    ('20000/3', 20000, 3, 13.0, 3, 0),
    ('20000/15', 20000, 15, 1.0, 15, 0),
    ('20000/1', 20000, 1, 15.0, 1, 0),
    ('20000/12', 20000, 12, 4.0, 12, 0),
    ('20000/9', 20000, 9, 7.0, 9, 0),
    ('20000/5', 20000, 5, 11.0, 5, 0),
    ('20000/14', 20000, 14, 2.0, 14, 0),
    ('20000/2a', 20000, 2, 14.0, 1, 0),
    ('20000/2b', 20000, 2, 14.0, 1, 0),
    ('20000/11', 20000, 11, 5.0, 11, 0),
    ('20000/8', 20000, 8, 8.0, 8, 0),
    ('20000/13', 20000, 13, 3.0, 13, 0),
    ('20000/4', 20000, 4, 12.0, 4, 0),
    ('20000/10', 20000, 10, 6.0, 10, 0),
    ('20000/6', 20000, 6, 10.0, 6, 0);
"#;

/// Creates the fixture database under `dir` and returns its path.
pub async fn northwind_db(dir: &Path) -> PathBuf {
    let path = dir.join("Northwind_small.sqlite");
    build(&path, &[SCHEMA, DATA]).await;
    path
}

/// Creates a database with the Northwind tables but no rows.
pub async fn empty_northwind_db(dir: &Path) -> PathBuf {
    let path = dir.join("empty.sqlite");
    build(&path, &[SCHEMA]).await;
    path
}

/// Creates a database with more products than the top-products limit.
pub async fn catalog_db(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.sqlite");
    build(&path, &[SCHEMA, CATALOG]).await;
    path
}

async fn build(path: &Path, scripts: &[&str]) {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("create fixture database");
    for script in scripts {
        conn.execute(*script).await.expect("run fixture script");
    }
    conn.close().await.expect("close fixture database");
}
