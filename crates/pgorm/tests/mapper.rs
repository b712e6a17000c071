mod support;

use pgorm::{
    schema::{Field, FieldTy, Model},
    stmt::Statement,
    Comparison, Document,
};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std_util::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[table = "widgets"]
#[index("name")]
#[gin_index("tag")]
struct Widget {
    #[key]
    id: String,
    name: String,
    tag: String,
}

fn widget(name: &str) -> Widget {
    Widget {
        id: "1234".to_string(),
        name: name.to_string(),
        tag: "something".to_string(),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Document)]
#[table = "counters"]
struct Counter {
    #[key(column = "counter_id")]
    id: i64,
    hits: u32,
}

#[test]
fn save_then_load_round_trips() {
    let (store, _driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    assert_ok!(widgets.save(&widget("test")));

    let loaded = assert_ok!(widgets.load("1234"));
    assert_eq!(loaded, Some(widget("test")));
}

#[test]
fn saving_same_key_replaces_document() {
    let (store, driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    assert_ok!(widgets.save(&widget("first")));
    assert_ok!(widgets.save(&widget("second")));

    assert_eq!(assert_ok!(widgets.load("1234")), Some(widget("second")));
    assert_eq!(driver.rows("widgets"), 1);
}

#[test]
fn load_missing_key_is_none() {
    let (store, _driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    assert_none!(assert_ok!(widgets.load("nope")));
}

#[test]
fn get_missing_key_is_record_not_found() {
    let (store, _driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    let err = assert_err!(widgets.get("nope"));
    assert!(err.is_record_not_found());
    assert!(err.to_string().contains("table=widgets key=nope"));
}

#[test]
fn bootstrap_creates_table_then_indexes() {
    let (store, driver) = support::connected();
    assert_ok!(store.map_sync::<Widget>());

    let ops = driver.ops();
    assert_eq!(ops.len(), 4);

    let Statement::CreateTable(table) = &ops[0] else {
        panic!("expected CREATE TABLE; op={:?}", ops[0]);
    };
    assert_eq!(table.name, "widgets");
    assert!(table.if_not_exists);

    let names: Vec<_> = ops[1..]
        .iter()
        .map(|op| match op {
            Statement::CreateIndex(index) => index.name.clone(),
            _ => panic!("expected CREATE INDEX; op={op:?}"),
        })
        .collect();

    assert_eq!(
        names,
        [
            "idx_btree_widgets_name",
            "idx_gin_widgets_data",
            "idx_gin_widgets_tag",
        ]
    );
}

#[test]
fn integer_keys_are_coerced() {
    let (store, _driver) = support::connected();
    let counters = assert_ok!(store.map_sync::<Counter>());

    assert_eq!(counters.schema().primary_key.column, "counter_id");

    assert_ok!(counters.save(&Counter { id: 7, hits: 3 }));

    // An `i32` key widens to the BIGINT key column.
    let loaded = assert_ok!(counters.load(7_i32));
    assert_eq!(loaded, Some(Counter { id: 7, hits: 3 }));
}

#[test]
fn mismatched_key_type_is_invalid_key() {
    let (store, _driver) = support::connected();
    let counters = assert_ok!(store.map_sync::<Counter>());

    let err = assert_err!(counters.load("7"));
    assert!(err.is_invalid_key());
}

#[test]
fn corrupt_document_is_decode_error() {
    let (store, driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    assert_ok!(widgets.save(&widget("test")));
    driver.put_document("widgets", "1234", json!({"id": "1234", "name": 5}));

    let err = assert_err!(widgets.load("1234"));
    assert!(err.is_decode());
    assert!(!err.is_record_not_found());
    assert!(err.to_string().contains("table=widgets key=1234"));
}

#[derive(Debug, Serialize, Deserialize, Document)]
#[table = "blobs"]
struct Blob {
    #[key]
    id: String,
    chunks: BTreeMap<Vec<u8>, String>,
}

#[test]
fn unserializable_value_is_encode_error() {
    let (store, driver) = support::connected();
    let blobs = assert_ok!(store.map_sync::<Blob>());

    let blob = Blob {
        id: "b".to_string(),
        chunks: BTreeMap::from([(vec![1, 2], "x".to_string())]),
    };

    let err = assert_err!(blobs.save(&blob));
    assert!(err.is_encode());
    assert_eq!(driver.rows("blobs"), 0);
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Document)]
#[table = "renamed"]
struct Renamed {
    #[key]
    #[serde(rename = "widgetId")]
    id: String,
}

#[test]
fn key_is_read_by_json_name() {
    let (store, _driver) = support::connected();
    let renamed = assert_ok!(store.map_sync::<Renamed>());

    assert_eq!(renamed.schema().primary_key.field, "widgetId");

    assert_ok!(renamed.save(&Renamed { id: "r1".to_string() }));
    assert_eq!(
        assert_ok!(renamed.load("r1")),
        Some(Renamed { id: "r1".to_string() })
    );
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[serde(rename_all = "camelCase")]
#[table = "accounts"]
#[index("displayName")]
struct Account {
    #[key]
    account_id: String,
    display_name: String,
}

#[test]
fn container_rename_all_round_trips() {
    let (store, driver) = support::connected();
    let accounts = assert_ok!(store.map_sync::<Account>());

    assert_eq!(accounts.schema().primary_key.field, "accountId");

    let account = Account {
        account_id: "a-1".to_string(),
        display_name: "Ada".to_string(),
    };
    assert_ok!(accounts.save(&account));

    let loaded = assert_some!(assert_ok!(accounts.load("a-1")));
    assert_eq!(loaded, account);
    assert_eq!(driver.rows("accounts"), 1);
}

#[test]
fn select_decodes_every_row() {
    let (store, _driver) = support::connected();
    let widgets = assert_ok!(store.map_sync::<Widget>());

    for id in ["a", "b"] {
        let mut w = widget(id);
        w.id = id.to_string();
        assert_ok!(widgets.save(&w));
    }

    let query = widgets
        .query()
        .where_clause()
        .has("name")
        .and()
        .compare_param("name", "text", "\"a\"", Comparison::Eq);

    assert_eq!(
        query.sql(),
        "SELECT data FROM widgets WHERE data->'name' IS NOT NULL AND (data->'name')::text::text = $1"
    );

    // The in-memory database ignores predicates.
    let found = assert_ok!(widgets.select(query));
    let ids: Vec<_> = found.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

// Hand-written metadata: the derive rejects these at compile time.

macro_rules! manual_document {
    ($name:ident, $model:expr) => {
        #[derive(Debug, Serialize, Deserialize)]
        struct $name {
            id: f64,
        }

        impl Document for $name {
            fn model() -> Model {
                $model
            }
        }
    };
}

manual_document!(
    NoKey,
    Model::new("NoKey")
        .table("no_key")
        .field(Field::new("id", FieldTy::of::<f64>()))
);

manual_document!(
    NoTable,
    Model::new("NoTable").field(Field::new("id", FieldTy::of::<String>()).primary_key())
);

manual_document!(
    FloatKey,
    Model::new("FloatKey")
        .table("float_key")
        .field(Field::new("id", FieldTy::of::<f64>()).primary_key())
);

manual_document!(
    TwoKeys,
    Model::new("TwoKeys")
        .table("two_keys")
        .field(Field::new("id", FieldTy::of::<String>()).primary_key())
        .field(Field::new("other", FieldTy::of::<i32>()).primary_key())
);

#[test]
fn missing_primary_key_fails_before_ddl() {
    let (store, driver) = support::connected();

    let err = assert_err!(store.map_sync::<NoKey>());
    assert!(err.is_missing_primary_key());
    assert!(driver.ops().is_empty());
}

#[test]
fn missing_table_fails_before_ddl() {
    let (store, driver) = support::connected();

    let err = assert_err!(store.map_sync::<NoTable>());
    assert!(err.is_missing_table_metadata());
    assert!(driver.ops().is_empty());
}

#[test]
fn unsupported_key_type_fails_before_ddl() {
    let (store, driver) = support::connected();

    let err = assert_err!(store.map_async::<FloatKey>());
    assert!(err.is_unsupported_primary_key_type());
    assert!(driver.ops().is_empty());
}

#[test]
fn duplicate_primary_key_fails_before_ddl() {
    let (store, driver) = support::connected();

    let err = assert_err!(store.map_sync::<TwoKeys>());
    assert!(err.is_duplicate_primary_key());
    assert!(driver.ops().is_empty());
}

#[test]
fn operations_require_connection() {
    let (store, _driver) = support::store();
    assert!(!store.is_connected());

    let err = assert_err!(store.map_sync::<Widget>());
    assert!(err.is_not_connected());

    assert_ok!(store.connect());
    assert_ok!(store.connect());
    assert!(store.is_connected());

    let widgets = assert_ok!(store.map_sync::<Widget>());
    assert_ok!(widgets.save(&widget("test")));

    store.disconnect();
    store.disconnect();
    assert!(!store.is_connected());

    let err = assert_err!(widgets.load("1234"));
    assert!(err.is_not_connected());
}

#[test]
fn raw_statements_reach_the_driver() {
    let (store, driver) = support::connected();

    assert_ok!(store.execute("VACUUM"));

    let ops = driver.ops();
    let [Statement::Raw(raw)] = &ops[..] else {
        panic!("expected one raw statement; ops={ops:?}");
    };
    assert_eq!(raw.sql, "VACUUM");
    assert!(raw.params.is_empty());
}
