pub mod cluster_resource;
pub mod resource_record;
pub mod schedule_spec;
