pub mod credentials;
pub mod session;

pub use credentials::{display_name_from_email, validate_credentials};
pub use session::{InMemoryAuthState, SessionService};
