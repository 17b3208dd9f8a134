pub mod authorization;
pub mod booking_service;
pub mod class_service;
pub mod payment_service;
pub mod stats_service;
pub mod token_service;
pub mod user_service;
