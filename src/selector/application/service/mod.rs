pub mod resolve_service;
