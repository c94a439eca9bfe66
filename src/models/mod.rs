pub mod activities;
pub mod activity_row;

pub use activities::{Activity, ActivityDetails, ActivityListing, MessageResponse};
pub use activity_row::ActivityRow;
