//! Advisor module - the crop observation wizard and the recommendation round trip

pub mod catalog;
pub mod client;
pub mod controller;
pub mod inputs;
pub mod payload;
pub mod response;
pub mod validator;
pub mod view;

pub use catalog::{
    BoundedField, CatalogError, ChoiceField, Control, Panel, Slider, StepCatalog, StepDefinition,
    TileId, Treatment, FINAL_STEP, STEP_COUNT,
};
pub use client::{
    interpret, ClientError, HttpRecommendationService, Outcome, RecommendationPhase,
    RecommendationService, RecommendationSession,
};
pub use controller::{NavOutcome, WizardController, NEXT_LABEL, SUBMIT_LABEL};
pub use inputs::{CropInputs, YesNo};
pub use payload::{build_request, stage_to_days, RecommendationRequest};
pub use response::RecommendationResponse;
pub use validator::{first_incomplete_step, is_step_complete};
pub use view::{DisplayedControl, OutputContent, ViewState, WizardView, LOADING_MESSAGE};
