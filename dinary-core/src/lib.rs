pub mod session;

use dinary_database::Database;
use dinary_progression::XpCurve;

pub use session::{Role, Session};

pub type Error = anyhow::Error;

/// Shared dependencies handed to every command.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub curve: XpCurve,
}
