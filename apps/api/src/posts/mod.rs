// Saved posts: the store abstraction, its Postgres and in-memory backends,
// and the CRUD handlers.

pub mod handlers;
pub mod store;
