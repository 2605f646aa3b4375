//! Domain types of the privilege model.

#![forbid(unsafe_code)]

mod entity_type;
mod grant_entity;
mod privilege;
mod role_grant;

pub use entity_type::EntityType;
pub use grant_entity::{EntitySnapshot, GrantEntity};
pub use privilege::PrivilegeLevel;
pub use role_grant::RoleGrant;
