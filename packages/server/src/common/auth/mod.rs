/// Authentication primitives shared by the token store and the HTTP gates.
///
/// The console has a single administrator identity. A successful login issues
/// an opaque bearer token bound to a [`Principal`]; mutating routes resolve
/// that token back to the principal, and taxonomy mutations additionally check
/// the shared admin secret.
mod errors;
mod principal;

pub use errors::AuthError;
pub use principal::{Principal, ADMIN_USER_ID};
