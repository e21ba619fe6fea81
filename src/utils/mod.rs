pub mod city_memory;
pub mod distance;
pub mod init_route;
pub mod label_ingest;
pub mod route_store;
pub mod service_area;
