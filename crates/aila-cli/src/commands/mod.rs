pub mod ads;
pub mod config;
pub mod premium;
pub mod prompt;
pub mod referral;
pub mod status;
pub mod track;

mod session;
