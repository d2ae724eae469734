pub mod cog_health_status;
