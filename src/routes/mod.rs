pub mod routes;

pub use self::routes::init_routes;
