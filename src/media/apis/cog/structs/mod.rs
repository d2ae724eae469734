pub mod cog_health_response;
