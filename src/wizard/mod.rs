//! Wizard step pages — fixed sequence, typed forward-only context.

pub mod context;
pub mod engine;
pub mod forms;
pub mod nav;
pub mod routes;
pub mod step;
pub mod validation;

pub use context::StepContext;
pub use engine::{COMPLETE_PATH, skip, submit};
pub use forms::{
    BirthdayForm, CountryForm, EducationForm, EducationStatus, StepAnswer, TRAVEL_STYLES,
    TravelForm,
};
pub use nav::{Navigation, Navigator, TracingNavigator};
pub use routes::{StepView, StepWidget, wizard_routes};
pub use step::{WizardStep, welcome_heading};
pub use validation::{FieldError, Validator, place_name_pattern};
