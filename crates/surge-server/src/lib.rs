//! surge-rules HTTP server.
//!
//! Serves stored rule lists as plain text for routing clients, plus a small
//! HTML UI for inserting and deleting rules.
//!
//! | Path | Answer |
//! |---|---|
//! | `/?rule=` | landing page (302 to `/?rule=direct` without `rule`) |
//! | `/rule?rule=` | newline-terminated rule lines, 404 when none |
//! | `/insert?rules=&ruleType=` | plain-text receipt |
//! | `/get-rule-types` | JSON array |
//! | `/rule-list` | HTML index, 404 when empty |
//! | `/delete-rule?rule=` | plain-text confirmation |

pub mod cli;
mod error;
mod handler;
pub mod pages;
mod routes;
pub mod sanitize;
mod server;
mod state;

pub use cli::ServerArgs;
pub use error::{ApiError, ServerError};
pub use routes::routes;
pub use server::{connect_store, run, run_with_shutdown, serve};
pub use tokio_util::sync::CancellationToken;
