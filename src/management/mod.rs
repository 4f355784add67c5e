mod auth;
mod session;

pub use auth::AuthService;
pub use session::InMemorySessionStore;
pub use session::SESSION_TTL_HOURS;
pub use session::Session;
pub use session::SessionStore;
pub use session::generate_session_id;
