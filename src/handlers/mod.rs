// handlers/mod.rs
//
// /health is public; /api/feedback sits behind Basic authentication
// (see router.rs for where the middleware is attached).
pub mod feedback;
pub mod health;
