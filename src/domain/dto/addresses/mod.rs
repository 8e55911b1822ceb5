//! 주소록 API DTO
//!
//! 우편번호는 정확히 6자리 숫자, 전화번호는 정확히 10자리 숫자, 이름은 3자 이상입니다.

pub mod address_request;
pub mod address_response;

pub use address_request::AddressRequest;
pub use address_response::AddressResponse;
