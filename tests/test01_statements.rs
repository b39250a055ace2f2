use std::sync::Arc;

use mysql_helper::prelude::*;
use mysql_helper::test_utils::RecordingConnection;

fn helper() -> (Arc<RecordingConnection>, DatabaseHelper<RecordingConnection>) {
    let conn = Arc::new(RecordingConnection::new());
    let db = DatabaseHelper::new(Arc::clone(&conn));
    (conn, db)
}

#[test]
fn every_builder_submits_expected_sql() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (conn, db) = helper();

        db.select("accounts", &ValueMap::new(), &[]).await;
        db.select(
            "accounts",
            &ValueMap::new().with("status", "A"),
            &["id", "name"],
        )
        .await;
        db.select_with(
            "accounts a",
            &ValueMap::new().with("a.region", vec!["eu", "us"]),
            &["a.id"],
            Some("ORDER BY a.id LIMIT 10"),
            Some("LEFT JOIN owners o ON o.id = a.owner_id"),
        )
        .await;
        db.insert(
            "accounts",
            &ValueMap::new().with("name", "Bob's").with("balance", 10),
        )
        .await;
        db.multi_insert(
            "ledger",
            &["account_id", "amount"],
            &[
                vec![SqlValue::Int(1), SqlValue::Float(2.5)],
                vec![SqlValue::Int(2), SqlValue::raw("DEFAULT")],
            ],
        )
        .await;
        db.insert_update(
            "table",
            &ValueMap::new().with("id", 1).with("name", "x"),
            &ValueMap::new().with("name", "y"),
        )
        .await;
        db.multi_insert_update(
            "stock",
            &["sku", "qty"],
            &[
                vec![SqlValue::from("A-1"), SqlValue::Int(4)],
                vec![SqlValue::from("B-2"), SqlValue::Int(9)],
            ],
            "incoming",
            &ValueMap::new().with("qty", SqlValue::raw("IF(incoming.qty > qty, incoming.qty, qty)")),
        )
        .await;
        db.update(
            "accounts",
            &ValueMap::new().with("status", "closed").with("closed_by", SqlValue::Null),
            &ValueMap::new().with("id", vec![3, 4]),
        )
        .await;
        db.query("DELETE FROM sessions WHERE expires_at < NOW()").await;

        assert_eq!(
            conn.statements(),
            vec![
                "SELECT * FROM accounts WHERE 1".to_string(),
                "SELECT id,name FROM accounts WHERE status = 'A'".to_string(),
                "SELECT a.id FROM accounts a LEFT JOIN owners o ON o.id = a.owner_id \
                 WHERE a.region IN ('eu','us') ORDER BY a.id LIMIT 10"
                    .to_string(),
                "INSERT INTO accounts (name, balance) VALUES ('Bob\\'s',10);".to_string(),
                "INSERT INTO ledger (account_id, amount) VALUES (1,2.5),(2,DEFAULT)".to_string(),
                "INSERT INTO table (id, name) VALUES (1,'x') ON DUPLICATE KEY UPDATE name = 'y'"
                    .to_string(),
                "INSERT INTO stock (sku, qty) VALUES ('A-1',4),('B-2',9) AS incoming \
                 ON DUPLICATE KEY UPDATE qty = IF(incoming.qty > qty, incoming.qty, qty)"
                    .to_string(),
                "UPDATE accounts SET status = 'closed',closed_by = NULL WHERE id IN (3,4)"
                    .to_string(),
                "DELETE FROM sessions WHERE expires_at < NOW()".to_string(),
            ]
        );
        assert!(conn.submitted().iter().all(|q| q.params.is_empty()));
        Ok(())
    })
}

#[tokio::test]
async fn predicate_has_one_clause_per_entry() {
    let (conn, db) = helper();
    let filter = ValueMap::new()
        .with("a", 1)
        .with("b", "two")
        .with("c", vec![3, 4, 5])
        .with("d", SqlValue::Null);
    db.select("t", &filter, &[]).await;

    let sql = conn.statements().remove(0);
    let predicate = sql.split(" WHERE ").nth(1).unwrap();
    let clauses: Vec<&str> = predicate.split(" AND ").collect();
    assert_eq!(clauses.len(), filter.len());
    assert_eq!(clauses[2], "c IN (3,4,5)");
}

#[tokio::test]
async fn injection_attempts_stay_inside_literals() {
    let (conn, db) = helper();
    db.select(
        "users",
        &ValueMap::new().with("name", "x' OR '1'='1"),
        &[],
    )
    .await;
    assert_eq!(
        conn.statements(),
        vec!["SELECT * FROM users WHERE name = 'x\\' OR \\'1\\'=\\'1'".to_string()]
    );
}
