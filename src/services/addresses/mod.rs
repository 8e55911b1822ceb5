pub mod address_book;
pub mod address_service;

pub use address_book::AddressBook;
pub use address_service::AddressService;
