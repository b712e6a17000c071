#![allow(dead_code)]

use pgorm::{
    async_trait,
    driver::{Connection, Driver, Response, Row},
    stmt::{Statement, Value},
    PoolConfig, Result, Store,
};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
    time::Duration,
};

/// In-process stand-in for PostgreSQL that records every statement.
///
/// Clones share the same database, so two stores built from clones of one
/// driver see the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    db: Arc<Mutex<Database>>,
}

#[derive(Debug, Default)]
pub struct Database {
    pub tables: HashMap<String, Table>,
    pub indices: Vec<String>,

    /// Every statement executed, in order
    pub ops: Vec<Statement>,

    pub connections_opened: usize,

    /// Delay applied before each statement
    pub delay: Option<Duration>,

    /// Delay applied before each new connection
    pub connect_delay: Option<Duration>,

    /// New connections fail
    pub refuse_connections: bool,

    /// Open connections report themselves closed
    pub connections_closed: bool,
}

#[derive(Debug, Default)]
pub struct Table {
    pub key_column: String,
    pub rows: BTreeMap<String, (Value, serde_json::Value)>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db<R>(&self, f: impl FnOnce(&mut Database) -> R) -> R {
        f(&mut self.db.lock().expect("Failed to acquire db lock"))
    }

    pub fn ops(&self) -> Vec<Statement> {
        self.with_db(|db| db.ops.clone())
    }

    pub fn create_table_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, Statement::CreateTable(_)))
            .count()
    }

    pub fn rows(&self, table: &str) -> usize {
        self.with_db(|db| db.tables.get(table).map(|t| t.rows.len()).unwrap_or(0))
    }

    /// Overwrites a stored document without going through a mapper.
    pub fn put_document(&self, table: &str, key: impl Into<Value>, document: serde_json::Value) {
        let key = key.into();
        self.with_db(|db| {
            db.tables
                .get_mut(table)
                .expect("table not created")
                .rows
                .insert(key.to_string(), (key, document));
        });
    }

    pub fn set_delay(&self, delay: Duration) {
        self.with_db(|db| db.delay = Some(delay));
    }

    pub fn set_connect_delay(&self, delay: Duration) {
        self.with_db(|db| db.connect_delay = Some(delay));
    }

    /// Simulates a server restart that refuses reconnects.
    pub fn go_away(&self) {
        self.with_db(|db| {
            db.refuse_connections = true;
            db.connections_closed = true;
        });
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        if let Some(delay) = self.with_db(|db| db.connect_delay) {
            tokio::time::sleep(delay).await;
        }

        if self.with_db(|db| db.refuse_connections) {
            pgorm::bail!("connection refused");
        }

        self.with_db(|db| db.connections_opened += 1);
        Ok(Box::new(MemoryConnection {
            driver: self.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct MemoryConnection {
    driver: MemoryDriver,
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        if let Some(delay) = self.driver.with_db(|db| db.delay) {
            tokio::time::sleep(delay).await;
        }

        self.driver.with_db(|db| {
            db.ops.push(stmt.clone());
            db.exec(stmt)
        })
    }

    fn is_closed(&self) -> bool {
        self.driver.with_db(|db| db.connections_closed)
    }
}

impl Database {
    fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        match stmt {
            Statement::CreateTable(create) => {
                self.tables
                    .entry(create.name.clone())
                    .or_insert_with(|| Table {
                        key_column: create.key_column.clone(),
                        rows: BTreeMap::new(),
                    });
                Ok(Response::count(0))
            }
            Statement::CreateIndex(index) => {
                if !self.tables.contains_key(&index.on) {
                    pgorm::bail!("relation \"{}\" does not exist", index.on);
                }
                if !self.indices.contains(&index.name) {
                    self.indices.push(index.name.clone());
                }
                Ok(Response::count(0))
            }
            Statement::Upsert(upsert) => {
                let Some(table) = self.tables.get_mut(&upsert.table) else {
                    pgorm::bail!("relation \"{}\" does not exist", upsert.table);
                };
                let document = serde_json::from_str(&upsert.document)
                    .map_err(|err| pgorm::err!("invalid input syntax for type json: {err}"))?;
                table
                    .rows
                    .insert(upsert.key.to_string(), (upsert.key.clone(), document));
                Ok(Response::count(1))
            }
            Statement::Select(select) => {
                let Some(table) = self.tables.get(&select.table) else {
                    pgorm::bail!("relation \"{}\" does not exist", select.table);
                };
                let rows = table
                    .rows
                    .get(&select.key.to_string())
                    .map(|(key, document)| table.row(key, document))
                    .into_iter()
                    .collect();
                Ok(Response::Rows(rows))
            }
            // Raw SQL is not interpreted. A `SELECT data FROM <table>` returns
            // every document of the table in key order.
            Statement::Raw(raw) => {
                let rows = raw
                    .sql
                    .strip_prefix("SELECT data FROM ")
                    .and_then(|rest| rest.split_whitespace().next())
                    .and_then(|name| self.tables.get(name))
                    .map(|table| {
                        table
                            .rows
                            .values()
                            .map(|(_, document)| Row::from_iter([("data", document.clone())]))
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(Response::Rows(rows))
            }
        }
    }
}

impl Table {
    fn row(&self, key: &Value, document: &serde_json::Value) -> Row {
        let mut row = Row::new();
        row.push(self.key_column.clone(), key.clone());
        row.push("data", document.clone());
        row
    }
}

/// A store over a fresh in-memory database, not yet connected.
pub fn store() -> (Store, MemoryDriver) {
    let driver = MemoryDriver::new();
    (store_on(&driver), driver)
}

/// A second store sharing `driver`'s database.
pub fn store_on(driver: &MemoryDriver) -> Store {
    Store::with_driver(driver.clone(), PoolConfig::default()).expect("failed to build store")
}

/// A connected store over a fresh in-memory database.
pub fn connected() -> (Store, MemoryDriver) {
    let (store, driver) = store();
    store.connect().expect("failed to connect");
    (store, driver)
}
