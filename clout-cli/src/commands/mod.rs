pub mod address;
pub mod decode_address;
pub mod keygen;
pub mod sign;
pub mod token;
pub mod verify_token;
pub mod verify_transaction;
