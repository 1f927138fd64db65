pub mod clash_detector;
pub mod clash_service;
pub mod date_utils;
pub mod locality;
pub mod priority;
pub mod suggestion;
pub mod tender_service;
