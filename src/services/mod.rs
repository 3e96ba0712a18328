//! Service layer

pub mod admin;
pub mod capability;
pub mod payment;
pub mod profile;
pub mod property;
pub mod subscription;
