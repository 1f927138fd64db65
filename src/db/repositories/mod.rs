pub mod tender_repository;
