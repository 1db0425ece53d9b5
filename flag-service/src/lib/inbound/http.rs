pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod router;
