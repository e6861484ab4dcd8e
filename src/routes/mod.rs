pub mod despacho_routes;
pub mod viaje_routes;
