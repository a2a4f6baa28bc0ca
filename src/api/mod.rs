pub mod handlers;
pub mod page;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

pub use page::PageRenderer;
pub use routes::create_router;
pub use server::start_server;
pub use state::AppState;
