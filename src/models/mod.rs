//! Core data models for the postal tariff engine.
//!
//! This module contains the request, service and result types shared by the
//! calculation pipeline and the HTTP API.

mod cost_result;
mod parcel;
mod region;
mod service;

pub use cost_result::{AdditionalCharges, AuditStep, BaseCostBreakdown, PostalCostOutput};
pub use parcel::{DeliveryTimeReduction, Dimensions, MAX_SIDE_CM, MAX_WEIGHT_KG, PostalCostInput};
pub use region::{CityTier, ProvincialStatus};
pub use service::{
    BaseGoodsService, ExcessService, IntercityPriorityService, ScopeKind, ServiceCategory,
    UrbanPriorityService,
};
