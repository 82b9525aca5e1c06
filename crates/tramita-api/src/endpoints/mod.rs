// Endpoint surfaces, implemented as inherent methods on `ApiClient`.

pub mod catalogos;
pub mod gestiones;
pub mod identity;
pub mod usuarios;
