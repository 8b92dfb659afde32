// Municipal backend client and wire types.

pub mod client;
pub mod models;

mod centers;
mod contacts;
mod hazards;
mod incidents;

pub use client::{BackendClient, Endpoints};
pub use models::{
    CenterRecord, ContactRecord, HazardRecord, IncidentSubmission, MediaUpload, guess_mime,
};
