// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{dec, dt, sqlite_store, tx};
use rusqlite::Connection;
use tempfile::TempDir;
use txsummary::db;
use txsummary::models::Transaction;
use txsummary::sequence::SqliteSequenceCounter;
use txsummary::store::{SqliteTransactionStore, TransactionStore};
use txsummary::SummaryError;

#[test]
fn save_assigns_sequential_ids() {
    let store = sqlite_store();
    let saved = store
        .save_or_update(vec![
            tx("1", "1/10/2016 2:51:23 AM", "23.4", "first transaction description"),
            tx("2", "2/10/2016 3:00:00 PM", "-5.00", "second"),
        ])
        .unwrap();
    let ids: Vec<_> = saved.iter().map(|t| t.id.clone().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let found = store.find_by_id("1").unwrap().unwrap();
    assert_eq!(found.customer, "1");
    assert_eq!(found.date, dt("1/10/2016 2:51:23 AM"));
    assert_eq!(found.amount, dec("23.4"));
    assert_eq!(found.description, "first transaction description");
    assert!(store.find_by_id("42").unwrap().is_none());
}

#[test]
fn save_with_existing_id_replaces_record() {
    let store = sqlite_store();
    let saved = store
        .save_or_update(vec![tx("1", "1/10/2016 2:51:23 AM", "10.00", "before")])
        .unwrap();
    let mut updated = saved[0].clone();
    updated.description = "after".to_string();
    updated.amount = dec("11.00");
    store.save_or_update(vec![updated]).unwrap();

    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id.as_deref(), Some("1"));
    assert_eq!(all[0].description, "after");
    assert_eq!(all[0].amount, dec("11.00"));
}

#[test]
fn save_with_unknown_id_inserts_and_keeps_that_id() {
    let store = sqlite_store();
    let preset = tx("3", "5/10/2016 1:00:00 PM", "1.00", "imported").with_id("abc");
    store.save_or_update(vec![preset]).unwrap();

    let found = store.find_by_id("abc").unwrap().unwrap();
    assert_eq!(found.customer, "3");

    let next = store
        .save_or_update(vec![tx("3", "6/10/2016 1:00:00 PM", "2.00", "fresh")])
        .unwrap();
    assert_eq!(next[0].id.as_deref(), Some("1"));
}

#[test]
fn issued_id_never_overwrites_caller_supplied_record() {
    let store = sqlite_store();
    store
        .save_or_update(vec![
            tx("5", "5/10/2016 1:00:00 PM", "1.00", "kept").with_id("1"),
        ])
        .unwrap();

    let err = store
        .save_or_update(vec![tx("6", "6/10/2016 1:00:00 PM", "2.00", "fresh")])
        .unwrap_err();
    assert!(matches!(err, SummaryError::DuplicateId(ref id) if id == "1"));

    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].customer, "5");
    assert_eq!(all[0].description, "kept");

    // The taken id is consumed; the next save gets a free one.
    let saved = store
        .save_or_update(vec![tx("6", "6/10/2016 1:00:00 PM", "2.00", "fresh")])
        .unwrap();
    assert_eq!(saved[0].id.as_deref(), Some("2"));
    assert_eq!(store.find_all().unwrap().len(), 2);
}

#[test]
fn blank_customer_is_rejected_before_any_write() {
    assert!(matches!(
        Transaction::new("  ", dt("1/10/2016 2:51:23 AM"), dec("1"), "x"),
        Err(SummaryError::InvalidTransaction(_))
    ));

    let store = sqlite_store();
    let good = tx("1", "1/10/2016 2:51:23 AM", "1.00", "ok");
    let mut bad = good.clone();
    bad.customer = String::new();

    let err = store.save_or_update(vec![good, bad]).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidTransaction(_)));
    assert!(err.to_string().starts_with("Invalid Transaction field values ["));
    assert!(store.find_all().unwrap().is_empty());

    // No id was burned for the rejected batch.
    let saved = store
        .save_or_update(vec![tx("1", "1/10/2016 2:51:23 AM", "1.00", "ok")])
        .unwrap();
    assert_eq!(saved[0].id.as_deref(), Some("1"));
}

#[test]
fn find_by_customer_keeps_insertion_order() {
    let store = sqlite_store();
    store
        .save_or_update(vec![
            tx("1", "20/10/2016 9:00:00 AM", "1.00", "late"),
            tx("2", "2/10/2016 9:00:00 AM", "2.00", "other"),
            tx("1", "3/10/2016 9:00:00 AM", "3.00", "early"),
        ])
        .unwrap();

    let rows = store.find_by_customer_id("1").unwrap();
    let descs: Vec<_> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["late", "early"]);
    assert!(store.find_by_customer_id("3").unwrap().is_empty());
}

#[test]
fn find_by_customer_and_date_uses_half_open_range() {
    let store = sqlite_store();
    store
        .save_or_update(vec![tx("1", "1/10/2016 2:51:23 AM", "23.4", "sample")])
        .unwrap();

    let hit = store
        .find_by_customer_id_and_date("1", dt("1/10/2016 1:00:00 AM"), dt("1/10/2016 3:00:00 AM"))
        .unwrap();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].description, "sample");

    let miss = store
        .find_by_customer_id_and_date("1", dt("1/10/2016 3:00:00 AM"), dt("1/10/2016 4:00:00 AM"))
        .unwrap();
    assert!(miss.is_empty());

    let at_start = store
        .find_by_customer_id_and_date("1", dt("1/10/2016 2:51:23 AM"), dt("1/10/2016 4:00:00 AM"))
        .unwrap();
    assert_eq!(at_start.len(), 1);

    let at_end = store
        .find_by_customer_id_and_date("1", dt("1/10/2016 1:00:00 AM"), dt("1/10/2016 2:51:23 AM"))
        .unwrap();
    assert!(at_end.is_empty());

    let other_customer = store
        .find_by_customer_id_and_date("2", dt("1/10/2016 1:00:00 AM"), dt("1/10/2016 3:00:00 AM"))
        .unwrap();
    assert!(other_customer.is_empty());
}

#[test]
fn file_backed_store_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.sqlite");
    {
        let counter = SqliteSequenceCounter::new(db::open_at(&path).unwrap());
        let store = SqliteTransactionStore::new(db::open_at(&path).unwrap(), Box::new(counter));
        store
            .save_or_update(vec![tx("1", "1/10/2016 2:51:23 AM", "12.30", "kept")])
            .unwrap();
    }
    let counter = SqliteSequenceCounter::new(db::open_at(&path).unwrap());
    let store = SqliteTransactionStore::new(db::open_at(&path).unwrap(), Box::new(counter));
    let all = store.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "kept");

    let saved = store
        .save_or_update(vec![tx("1", "2/10/2016 2:51:23 AM", "1.00", "next")])
        .unwrap();
    assert_eq!(saved[0].id.as_deref(), Some("2"));
}

#[test]
fn schema_declares_required_indexes() {
    let conn = db::open_in_memory().unwrap();
    db::verify_schema(&conn).unwrap();
    let compound: String = conn
        .query_row(
            "SELECT group_concat(name, ',') FROM \
             (SELECT name FROM pragma_index_info('transaction_customer_date_idx') ORDER BY seqno)",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(compound, "customer,date");
}

#[test]
fn schema_check_rejects_conflicting_index() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(id TEXT, customer TEXT, date TEXT, amount TEXT, description TEXT);
        CREATE INDEX transaction_id_idx ON transactions(customer);
        "#,
    )
    .unwrap();
    match db::init_schema(&conn) {
        Err(SummaryError::Schema(msg)) => assert!(msg.contains("transaction_id_idx")),
        other => panic!("expected schema error, got {:?}", other),
    }
}
