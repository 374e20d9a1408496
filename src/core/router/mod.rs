//! Prefix route table
//!
//! Entries are tested in table order and the first whose prefix is a string
//! prefix of the inbound path wins. A shorter prefix listed earlier shadows a
//! longer one listed later, so construction order is part of the table's
//! behaviour.

mod rewrite;
mod table;


pub use rewrite::PathRewrite;
pub use table::{ResolvedRoute, RouteEntry, RouteTable};
