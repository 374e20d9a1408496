//! Role gate for routes with a required role set

mod gate;

pub use gate::RoleGate;
