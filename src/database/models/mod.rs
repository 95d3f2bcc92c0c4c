pub mod clinician;
pub mod phone_number;
pub mod practice_information;

pub use clinician::{Clinician, ClinicianInfo};
pub use phone_number::PhoneNumber;
pub use practice_information::{PracticeInformation, PracticeInformationFields, PracticeInformationRow};
