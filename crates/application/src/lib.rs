//! Application services and ports.

#![forbid(unsafe_code)]

mod access_rights_ports;
mod access_rights_service;

pub use access_rights_ports::AccessRightsRepository;
pub use access_rights_service::{AccessRightsService, CaseTypeRights};
