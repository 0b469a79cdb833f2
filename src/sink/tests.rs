use crate::model::Item;
use crate::sink::postgres::{build_upsert, dedup_by_link};
use crate::sink::SinkError;

fn item(link: &str, title: &str) -> Item {
    Item {
        link: link.to_string(),
        title: title.to_string(),
        md5: format!("md5-{link}"),
        ..Item::default()
    }
}

#[test]
fn dedup_keeps_last_arrival_per_link() {
    let items = vec![
        item("https://example.com/a", "old"),
        item("https://example.com/a", "new"),
        item("https://example.com/b", "b"),
    ];

    let unique = dedup_by_link(&items);

    assert_eq!(unique.len(), 2);
    assert_eq!(unique[0].link, "https://example.com/a");
    assert_eq!(unique[0].title, "new");
    assert_eq!(unique[1].link, "https://example.com/b");
    assert_eq!(unique[1].title, "b");
}

#[test]
fn dedup_preserves_order_of_distinct_links() {
    let items = vec![
        item("https://example.com/1", "one"),
        item("https://example.com/2", "two"),
        item("https://example.com/3", "three"),
    ];

    let unique = dedup_by_link(&items);

    let links: Vec<&str> = unique.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3"
        ]
    );
}

#[test]
fn dedup_of_empty_batch_is_empty() {
    assert!(dedup_by_link(&[]).is_empty());
}

#[test]
fn database_error_debug_keeps_the_cause() {
    // The batcher logs sink failures in Debug form; the underlying
    // database error must survive in that rendering.
    let err = SinkError::Database(sqlx::Error::PoolClosed);
    assert!(format!("{err:?}").contains("PoolClosed"));
    assert_eq!(err.to_string(), "database write failed");
}

#[test]
fn upsert_statement_carries_conflict_clause() {
    let items = vec![item("https://example.com/a", "a"), item("https://example.com/b", "b")];
    let unique = dedup_by_link(&items);

    let mut query = build_upsert(&unique);
    let sql = query.sql();

    assert!(sql.starts_with("INSERT INTO feed "));
    assert!(sql.contains(
        "(time, md5, source_name, parsed, title, description, full_text, link, enclosure, category)"
    ));
    assert!(sql.contains("ON CONFLICT (link) DO UPDATE SET"));
    assert!(sql.contains("title = EXCLUDED.title"));
    assert!(sql.contains("category = EXCLUDED.category"));
    // Identity fields must not be refreshed on conflict.
    assert!(!sql.contains("md5 = EXCLUDED"));
    assert!(!sql.contains("link = EXCLUDED"));
}

#[test]
fn upsert_statement_binds_ten_columns_per_row() {
    let items = vec![item("https://example.com/a", "a"), item("https://example.com/b", "b")];
    let unique = dedup_by_link(&items);

    let mut query = build_upsert(&unique);
    let sql = query.sql();

    // Two rows of ten placeholders each.
    assert!(sql.contains("$10"));
    assert!(sql.contains("$20"));
    assert!(!sql.contains("$21"));
}
