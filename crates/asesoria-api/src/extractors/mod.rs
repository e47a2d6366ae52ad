//! Request extractors

mod auth;
mod pagination;
mod tenant;
mod validated;

pub use auth::CurrentUser;
pub use pagination::Pagination;
pub use tenant::{TenantScope, TENANT_HEADER};
pub use validated::ValidatedJson;
