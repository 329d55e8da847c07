//! # Models
//!
//! Resource arguments and state for the alternate contact and login profile handlers.

mod alternate_contact;
mod login_profile;

pub use alternate_contact::{AlternateContact, AlternateContactArgs, ContactDetails, ContactType};
pub use login_profile::{LoginProfile, LoginProfileArgs, LoginProfileState};
