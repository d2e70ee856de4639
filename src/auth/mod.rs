//! Authentication
//!
//! Login/signup/demo flows that write the session store, and the route
//! guard that reads it. Both follow the fallback rule of the client: when
//! the backend cannot be reached the user still gets in, with the
//! reserved offline token.

mod flow;
mod guard;

pub use flow::{AuthError, AuthFlow, SignedIn};
pub use guard::{check, guard, Access, Route};
