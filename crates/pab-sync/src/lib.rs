//! # pab-sync
//!
//! The synchronization engine of the bridge.
//!
//! - [`mapper`] turns project and task records into work-item patch documents
//! - [`gateway::WorkItemGateway`] resolves or creates parents and creates children
//! - [`orchestrator::SyncEngine`] runs a batch and aggregates a [`pab_core::SyncResult`]
//! - [`service::BridgeService`] exposes the caller-facing flows
//! - [`memory`] holds in-memory port adapters for tests and dry runs
//!
//! Everything runs sequentially: projects in input order, tasks in list order.

pub mod demo;
pub mod gateway;
pub mod mapper;
pub mod memory;
pub mod orchestrator;
pub mod service;

pub use gateway::WorkItemGateway;
pub use orchestrator::SyncEngine;
pub use service::BridgeService;
