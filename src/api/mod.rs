// API layer - HTTP endpoints
pub mod health;
pub mod lists;
pub mod users;

pub use health::HealthApi;
pub use lists::ListApi;
pub use users::UserApi;

use poem::session::Session;

use crate::policy::{AccessError, AccessPolicy};
use crate::types::internal::session::SessionUser;

/// Session key under which the authenticated user is stored.
pub const SESSION_USER_KEY: &str = "user";

/// Pull the authenticated user out of the cookie session, then run the
/// role's access policy against the request. Handlers pass the concrete
/// method and path they serve rather than `req.uri()`, which nested
/// routing has already rewritten.
pub fn guard(
    policy: &AccessPolicy,
    session: &Session,
    method: &str,
    path: &str,
) -> Result<SessionUser, AccessError> {
    let user: SessionUser = session
        .get(SESSION_USER_KEY)
        .ok_or(AccessError::Unauthenticated)?;

    policy.check(&user.role, method, path)?;
    Ok(user)
}
