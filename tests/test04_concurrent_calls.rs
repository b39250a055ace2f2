use std::sync::Arc;

use mysql_helper::prelude::*;
use mysql_helper::test_utils::RecordingConnection;

#[test]
fn concurrent_calls_share_one_connection() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let conn = Arc::new(RecordingConnection::new());
        let db = DatabaseHelper::new(Arc::clone(&conn));

        let mut handles = Vec::new();
        for i in 0..16_i64 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.insert("events", &ValueMap::new().with("seq", i)).await
            }));
        }

        for handle in handles {
            let outcome = handle.await?;
            assert!(outcome.is_success());
        }

        let mut statements = conn.statements();
        statements.sort();
        assert_eq!(statements.len(), 16);
        assert!(statements.contains(&"INSERT INTO events (seq) VALUES (15);".to_string()));
        Ok(())
    })
}
