//! App Core for Linkstash.
//!
//! Central struct holding the database handle and the LLM gateway.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::services::llm_gateway::LlmGateway;

/// Central application struct.
///
/// Managers are created on-demand via `db.connection()` because they borrow
/// the connection with a lifetime parameter, e.g.
/// `BookmarkManager::new(app.db.connection())`. Each request-handling call
/// constructs its managers, uses them, and drops them, so the connection
/// borrow never outlives the request.
pub struct App {
    pub db: Arc<Database>,
    pub llm: LlmGateway,
}

impl App {
    /// Creates a new App, opening (or creating) the database at `db_path`
    /// and configuring the LLM gateway from the environment.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let llm = LlmGateway::from_env();
        Ok(Self { db, llm })
    }
}
