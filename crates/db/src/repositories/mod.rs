//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! caller-owned transaction take `&mut PgConnection` instead.

pub mod audit_repo;
pub mod member_repo;
pub mod place_repo;
pub mod place_type_repo;
pub mod reservation_repo;

pub use audit_repo::AuditLogRepo;
pub use member_repo::MemberRepo;
pub use place_repo::PlaceRepo;
pub use place_type_repo::PlaceTypeRepo;
pub use reservation_repo::ReservationRepo;
