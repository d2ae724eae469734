pub mod leonardo_generation_status;
