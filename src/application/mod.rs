pub mod use_cases;

pub use use_cases::election_data::ElectionDataUseCase;
