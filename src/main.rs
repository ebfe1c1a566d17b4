//! Linkstash — a bookmark management backend with categories, tags, and
//! LLM-generated summaries.
//!
//! Entry point: runs an interactive console demo of every component against
//! an in-memory database. The real service runs as `linkstash-rpc`.

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                Linkstash v{} — Demo Mode                  ║", env!("CARGO_PKG_VERSION"));
    println!("║     Bookmark backend with categories, tags, summaries      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_database();
    demo_categories();
    demo_tags();
    demo_bookmarks();
    demo_related();
    demo_summaries();
    demo_llm_gateway();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("  Linkstash is ready — start the linkstash-rpc server.");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_database() {
    use linkstash::database::Database;
    section("Database Layer");

    let db = Database::open_in_memory().expect("Failed to open database");
    let tables: Vec<String> = {
        let conn = db.connection();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    };
    println!("  Created {} tables: {}", tables.len(), tables.join(", "));
    println!("  ✓ Database + migrations OK");
    println!();
}

fn demo_categories() {
    use linkstash::database::Database;
    use linkstash::managers::category_manager::{CategoryManager, CategoryManagerTrait};
    section("Categories");

    let db = Database::open_in_memory().expect("Failed to open database");
    let mut mgr = CategoryManager::new(db.connection());

    let dev = mgr
        .create_category("Development", Some("#2ea44f"), Some("code"), None)
        .unwrap();
    let rust = mgr
        .create_category("Rust", None, None, Some(&dev.id))
        .unwrap();
    println!("  Created '{}' with child '{}'", dev.name, rust.name);

    let children = mgr.list_children(Some(&dev.id)).unwrap();
    println!("  '{}' has {} child(ren)", dev.name, children.len());

    // A category cannot become its own descendant's child
    let err = mgr
        .update_category(&dev.id, "Development", None, None, Some(&rust.id))
        .unwrap_err();
    println!("  Cycle rejected: {}", err);
    println!("  ✓ CategoryManager OK");
    println!();
}

fn demo_tags() {
    use linkstash::database::Database;
    use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};
    section("Tags");

    let db = Database::open_in_memory().expect("Failed to open database");
    let mut mgr = TagManager::new(db.connection());

    let tag = mgr.create_tag("rust").unwrap();
    println!("  Created tag '{}' ({})", tag.name, tag.id);

    let err = mgr.create_tag("rust").unwrap_err();
    println!("  Duplicate rejected: {}", err);
    println!("  ✓ TagManager OK");
    println!();
}

fn demo_bookmarks() {
    use linkstash::database::Database;
    use linkstash::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
    use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};
    section("Bookmarks");

    let db = Database::open_in_memory().expect("Failed to open database");
    let conn = db.connection();

    let tag = TagManager::new(conn).create_tag("reference").unwrap();
    let mut mgr = BookmarkManager::new(conn);

    let bm = mgr
        .create_bookmark(
            "https://doc.rust-lang.org",
            Some("The Rust Documentation"),
            Some("Official docs"),
            None,
            &[tag.id.clone(), "no-such-tag".to_string()],
        )
        .unwrap();
    println!("  Created '{}' with {} tag(s) (unknown id dropped)", bm.url, bm.tags.len());

    let updated = mgr
        .update_bookmark(&bm.id, &bm.url, Some("Rust Docs"), None, None, None)
        .unwrap()
        .unwrap();
    println!("  Updated title to '{}', tags untouched: {}", updated.title.as_deref().unwrap_or(""), updated.tags.len());

    let deleted = mgr.delete_bookmark(&bm.id).unwrap().unwrap();
    println!("  Deleted '{}'", deleted.url);
    println!("  ✓ BookmarkManager OK");
    println!();
}

fn demo_related() {
    use linkstash::database::Database;
    use linkstash::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
    use linkstash::managers::category_manager::{CategoryManager, CategoryManagerTrait};
    use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};
    section("Related Bookmarks");

    let db = Database::open_in_memory().expect("Failed to open database");
    let conn = db.connection();

    let cat = CategoryManager::new(conn)
        .create_category("News", None, None, None)
        .unwrap();
    let tag = TagManager::new(conn).create_tag("tech").unwrap();
    let tags = vec![tag.id.clone()];

    let mut mgr = BookmarkManager::new(conn);
    let a = mgr
        .create_bookmark("https://a.example", None, None, Some(&cat.id), &tags)
        .unwrap();
    mgr.create_bookmark("https://b.example", None, None, Some(&cat.id), &tags)
        .unwrap();
    mgr.create_bookmark("https://c.example", None, None, None, &tags)
        .unwrap();

    let related = mgr.related_bookmarks(&a.id, None).unwrap();
    println!("  {} related to {} (same category + shared tag)", related.len(), a.url);
    println!("  ✓ Related query OK");
    println!();
}

fn demo_summaries() {
    use linkstash::database::Database;
    use linkstash::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
    use linkstash::managers::summary_manager::{SummaryManager, SummaryManagerTrait};
    use linkstash::services::llm_gateway::{summarize_bookmark, LlmGatewayTrait};
    use linkstash::types::errors::LlmError;
    section("Summaries");

    // Canned gateway so the demo works without a running inference server
    struct CannedGateway;
    impl LlmGatewayTrait for CannedGateway {
        fn ask_with_timeout(
            &self,
            _prompt: &str,
            _timeout: std::time::Duration,
        ) -> Result<String, LlmError> {
            Ok("A concise demo summary.".to_string())
        }
    }

    let db = Database::open_in_memory().expect("Failed to open database");
    let conn = db.connection();

    let bm = BookmarkManager::new(conn)
        .create_bookmark("https://example.com", Some("Example"), None, None, &[])
        .unwrap();

    let summary = summarize_bookmark(&CannedGateway, conn, &bm.id)
        .unwrap()
        .unwrap();
    println!("  Generated summary: \"{}\"", summary.summary);

    let history = SummaryManager::new(conn).list_summaries(&bm.id).unwrap();
    println!("  History holds {} entry(ies), newest first", history.len());
    println!("  ✓ Summary flow OK");
    println!();
}

fn demo_llm_gateway() {
    use linkstash::services::llm_gateway::LlmGateway;
    section("LLM Gateway");

    let gateway = LlmGateway::from_env();
    println!("  Endpoint: {}", gateway.endpoint());
    println!("  Model:    {}", gateway.model());
    println!("  (no request sent in demo mode)");
    println!("  ✓ Gateway configured");
    println!();
}
