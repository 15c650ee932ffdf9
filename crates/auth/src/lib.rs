//! `forno-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: opaque
//! permission strings, the staff role table, a pure policy check, and the
//! staff account record. Token transport (bearer extraction, anon key)
//! lives in the API layer.

pub mod account;
pub mod authorize;
pub mod permissions;
pub mod roles;

pub use account::{StaffAccount, StaffAccountDraft, StaffAccountId};
pub use authorize::{AuthzError, authorize};
pub use permissions::Permission;
pub use roles::StaffRole;
