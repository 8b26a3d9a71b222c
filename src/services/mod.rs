//! HTTP route groups. Each module contributes a `Router<AppState>` that
//! `server::build_router` merges into the portal.

pub mod chat;
pub mod identify;
pub mod ledger;
