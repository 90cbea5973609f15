//! # pab-core
//!
//! Core types, validation rules, and collaborator ports for the Project
//! Online to Azure DevOps bridge.
//!
//! This crate provides the foundational types shared across all bridge crates:
//! - Project and task records read from the source system
//! - The closed [`enums::SyncMode`] and [`enums::ErrorCode`] enums
//! - Cross-cutting error types ([`errors::SyncError`] and the per-port errors)
//! - The [`responses::SyncResult`] aggregate returned by every sync call
//! - JSON-patch documents accepted by the work-item write API
//! - Pre-write validation rules
//! - Port traits implemented by the source and target adapters

pub mod entities;
pub mod enums;
pub mod errors;
pub mod patch;
pub mod ports;
pub mod responses;
pub mod timestamps;
pub mod validation;

pub use entities::{ProjectPayload, ProjectRecord, ProjectSummary, TaskRecord, WorkItemId, WorkItemRef};
pub use enums::{ErrorCode, LookupFailurePolicy, SyncMode};
pub use errors::{CredentialError, SourceError, SyncError, TargetError};
pub use responses::SyncResult;
